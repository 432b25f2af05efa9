//! The ECS facade: one entity registry, one component storage and one system
//! registry, kept consistent with each other.
//!
//! Every attach or detach flips the matching signature bit and, for flushed
//! entities, forwards the new signature to the system registry. Pending
//! entities are announced to systems when they are flushed.

use crate::entity::{EntityObserver, EntityRecord, EntityRegistry, FlushStats};
use crate::error::{EcsError, Result};
use crate::signature::{ComponentKind, Signature};
use crate::storage::{Component, ComponentStorage};
use crate::system::{InterestSet, System, SystemRegistry};
use crate::EntityId;

#[derive(Default)]
pub struct Ecs {
    entities: EntityRegistry,
    components: ComponentStorage,
    systems: SystemRegistry,
}

impl Ecs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- entities ---

    pub fn spawn(&mut self, tag: &str) -> EntityId {
        self.entities.spawn(tag)
    }

    /// Marks the entity destroyed and removes it from every interest set now.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.entities.destroy(id, &mut self.systems)
    }

    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.is_active(id)
    }

    pub fn flush(&mut self) -> FlushStats {
        self.entities.flush(&mut self.systems)
    }

    /// Destroys everything, clears component data and restarts ids.
    pub fn reset_all(&mut self) -> usize {
        let count = self.entities.reset_all(&mut self.systems);
        self.components.clear();
        count
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.lookup(id)
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        self.entities.entities()
    }

    #[must_use]
    pub fn entities_with_tag(&self, tag: &str) -> &[EntityId] {
        self.entities.entities_with_tag(tag)
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.entities
    }

    // --- components ---

    /// Attaches or overwrites a component.
    ///
    /// Returns `None` and stores nothing when the id is unknown or destroyed.
    pub fn add_component<T: Component>(&mut self, id: EntityId, value: T) -> Option<&mut T> {
        let update = self.entities.set_component_bit(id, T::KIND, true)?;
        if update.visible {
            self.systems.on_signature_changed(id, update.signature);
        }
        Some(self.components.add(id, value))
    }

    /// Detaches a component. Unknown or destroyed ids are ignored.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> Option<T> {
        let update = self.entities.set_component_bit(id, T::KIND, false)?;
        if update.visible {
            self.systems.on_signature_changed(id, update.signature);
        }
        self.components.remove::<T>(id)
    }

    #[must_use]
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.components.has::<T>(id)
    }

    pub fn get_component<T: Component>(&self, id: EntityId) -> Result<&T> {
        self.components
            .get::<T>(id)
            .ok_or_else(|| EcsError::not_found(T::KIND, id))
    }

    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Result<&mut T> {
        self.components
            .get_mut::<T>(id)
            .ok_or_else(|| EcsError::not_found(T::KIND, id))
    }

    #[must_use]
    pub fn components(&self) -> &ComponentStorage {
        &self.components
    }

    /// True when the entity's signature bits match its actual storage
    /// membership for every kind.
    #[must_use]
    pub fn signature_consistent(&self, id: EntityId) -> bool {
        let signature = self.entities.signature(id).unwrap_or(Signature::EMPTY);
        ComponentKind::ALL
            .iter()
            .all(|&kind| signature.test(kind) == self.components.has_kind(kind, id))
    }

    // --- systems ---

    pub fn register_system<S: System>(&mut self, system: S) -> Result<&mut S> {
        self.systems.register(system)
    }

    /// Sets the system's required signature and evaluates it against every
    /// flushed, active entity.
    pub fn set_required_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        self.systems.set_required_signature::<S>(signature)?;
        let entities = &self.entities;
        let current = entities
            .entities()
            .iter()
            .filter_map(|&id| entities.lookup(id))
            .filter(|r| r.is_active())
            .map(|r| (r.id(), r.signature()));
        self.systems.rebuild_interest::<S, _>(current)?;
        Ok(())
    }

    pub fn get_system<S: System>(&self) -> Option<&S> {
        self.systems.get::<S>()
    }

    pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems.get_mut::<S>()
    }

    pub fn interest<S: System>(&self) -> Option<&InterestSet> {
        self.systems.interest::<S>()
    }

    #[must_use]
    pub fn systems(&self) -> &SystemRegistry {
        &self.systems
    }

    /// Runs `pass` with the system, its interest set, the entity registry and
    /// mutable component storage. Returns `None` if `S` is not registered.
    ///
    /// The entity and system containers are only borrowed shared here, so a
    /// pass cannot restructure them while iterating.
    pub fn run_system<S, R, F>(&mut self, pass: F) -> Option<R>
    where
        S: System,
        F: FnOnce(&S, &InterestSet, &EntityRegistry, &mut ComponentStorage) -> R,
    {
        let (system, interest) = self.systems.split::<S>()?;
        Some(pass(system, interest, &self.entities, &mut self.components))
    }
}
