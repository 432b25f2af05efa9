//! System registration and incrementally maintained interest sets.
//!
//! Each registered system kind owns a required [`Signature`] and the ordered
//! set of entity ids whose signature contains it. The registry is told about
//! every signature change and every destruction through [`EntityObserver`],
//! so no per-tick scan is needed to know which entities a pass acts on.
//!
//! A system whose required signature has not been set matches nothing. An
//! all-zero required signature is rejected.

use crate::entity::EntityObserver;
use crate::error::{EcsError, Result};
use crate::signature::Signature;
use crate::EntityId;
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Ordered set of ids a system acts on. Ordered so passes consume random
/// numbers in a reproducible sequence.
pub type InterestSet = BTreeSet<EntityId>;

/// Marker for types that can be registered as update passes.
pub trait System: Any {
    /// Label used in logs and errors.
    fn label() -> &'static str
    where
        Self: Sized,
    {
        type_name::<Self>()
    }
}

struct SystemSlot {
    name: &'static str,
    required: Option<Signature>,
    interest: InterestSet,
    instance: Box<dyn Any>,
}

impl SystemSlot {
    fn update(&mut self, id: EntityId, signature: Signature) {
        match self.required {
            Some(required) if signature.contains(required) => {
                self.interest.insert(id);
            }
            _ => {
                self.interest.remove(&id);
            }
        }
    }
}

#[derive(Default)]
pub struct SystemRegistry {
    slots: Vec<SystemSlot>,
    index: HashMap<TypeId, usize>,
}

impl SystemRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot<S: System>(&self) -> Option<&SystemSlot> {
        self.index
            .get(&TypeId::of::<S>())
            .map(|&i| &self.slots[i])
    }

    fn slot_mut<S: System>(&mut self) -> Option<&mut SystemSlot> {
        self.index
            .get(&TypeId::of::<S>())
            .map(|&i| &mut self.slots[i])
    }

    /// Registers the single instance of a system kind.
    pub fn register<S: System>(&mut self, system: S) -> Result<&mut S> {
        let type_id = TypeId::of::<S>();
        if self.index.contains_key(&type_id) {
            return Err(EcsError::DuplicateRegistration(S::label()));
        }
        self.index.insert(type_id, self.slots.len());
        self.slots.push(SystemSlot {
            name: S::label(),
            required: None,
            interest: InterestSet::new(),
            instance: Box::new(system),
        });
        tracing::debug!(system = S::label(), "System registered");

        let slot = self
            .slot_mut::<S>()
            .ok_or(EcsError::UnregisteredSystem(S::label()))?;
        slot.instance
            .downcast_mut::<S>()
            .ok_or(EcsError::UnregisteredSystem(S::label()))
    }

    /// Fixes which component kinds the system needs.
    ///
    /// The interest set is emptied; callers repopulate it with
    /// [`SystemRegistry::rebuild_interest`] when entities already exist.
    pub fn set_required_signature<S: System>(&mut self, signature: Signature) -> Result<()> {
        if signature.is_empty() {
            return Err(EcsError::EmptySignature(S::label()));
        }
        let slot = self
            .slot_mut::<S>()
            .ok_or(EcsError::UnregisteredSystem(S::label()))?;
        slot.required = Some(signature);
        slot.interest.clear();
        Ok(())
    }

    /// Re-evaluates one system against a full set of `(id, signature)`
    /// pairs. Only used when a required signature changes.
    pub fn rebuild_interest<S, I>(&mut self, entities: I) -> Result<usize>
    where
        S: System,
        I: IntoIterator<Item = (EntityId, Signature)>,
    {
        let slot = self
            .slot_mut::<S>()
            .ok_or(EcsError::UnregisteredSystem(S::label()))?;
        slot.interest.clear();
        for (id, signature) in entities {
            slot.update(id, signature);
        }
        Ok(slot.interest.len())
    }

    #[must_use]
    pub fn required_signature<S: System>(&self) -> Option<Signature> {
        self.slot::<S>().and_then(|s| s.required)
    }

    pub fn get<S: System>(&self) -> Option<&S> {
        self.slot::<S>()
            .and_then(|s| s.instance.downcast_ref::<S>())
    }

    pub fn get_mut<S: System>(&mut self) -> Option<&mut S> {
        self.slot_mut::<S>()
            .and_then(|s| s.instance.downcast_mut::<S>())
    }

    pub fn interest<S: System>(&self) -> Option<&InterestSet> {
        self.slot::<S>().map(|s| &s.interest)
    }

    /// The system together with the ids it acts on.
    pub fn split<S: System>(&self) -> Option<(&S, &InterestSet)> {
        let slot = self.slot::<S>()?;
        let system = slot.instance.downcast_ref::<S>()?;
        Some((system, &slot.interest))
    }

    #[must_use]
    pub fn is_registered<S: System>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<S>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered system labels in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.name)
    }
}

impl EntityObserver for SystemRegistry {
    fn on_signature_changed(&mut self, id: EntityId, signature: Signature) {
        for slot in &mut self.slots {
            slot.update(id, signature);
        }
    }

    fn on_entity_destroyed(&mut self, id: EntityId) {
        for slot in &mut self.slots {
            slot.interest.remove(&id);
        }
    }
}
