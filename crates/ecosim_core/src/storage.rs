//! Per-kind component storage.
//!
//! Each component kind lives in its own [`SparseSet`]: a dense, packed array
//! of values plus an id-indexed table pointing into it. Lookup, insertion and
//! removal are O(1), and iterating "every entity with X" is a linear walk of
//! one dense array. Kinds are independent; an id may be present in one set and
//! absent from another.

use crate::signature::ComponentKind;
use crate::EntityId;
use ecosim_data::{Behavior, Energy, Health, Reproductive, Species, Transform};

/// Dense array of `T` keyed by entity id.
///
/// `sparse[id]` holds the position of the id's value in `dense`. Removal
/// swaps the last element into the hole, so dense order is not insertion
/// order after a removal.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    dense: Vec<T>,
    ids: Vec<EntityId>,
    sparse: Vec<Option<usize>>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            ids: Vec::new(),
            sparse: Vec::new(),
        }
    }
}

impl<T> SparseSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn slot(&self, id: EntityId) -> Option<usize> {
        self.sparse.get(id as usize).copied().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot(id).map(|i| &self.dense[i])
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slot(id).map(move |i| &mut self.dense[i])
    }

    /// Inserts or overwrites the value for `id`.
    pub fn insert(&mut self, id: EntityId, value: T) -> &mut T {
        if let Some(i) = self.slot(id) {
            self.dense[i] = value;
            return &mut self.dense[i];
        }

        let index = id as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        let dense_index = self.dense.len();
        self.dense.push(value);
        self.ids.push(id);
        self.sparse[index] = Some(dense_index);
        &mut self.dense[dense_index]
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let dense_index = self.slot(id)?;
        let last = self.dense.len() - 1;
        if dense_index != last {
            let moved = self.ids[last] as usize;
            self.sparse[moved] = Some(dense_index);
        }
        self.sparse[id as usize] = None;
        self.ids.swap_remove(dense_index);
        Some(self.dense.swap_remove(dense_index))
    }

    pub fn clear(&mut self) {
        self.dense.clear();
        self.ids.clear();
        self.sparse.clear();
    }

    /// Ids in dense order.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.dense
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.ids.iter().copied().zip(self.dense.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.ids.iter().copied().zip(self.dense.iter_mut())
    }
}

/// A data type with a fixed slot in [`ComponentStorage`] and a signature bit.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn store(storage: &ComponentStorage) -> &SparseSet<Self>;
    fn store_mut(storage: &mut ComponentStorage) -> &mut SparseSet<Self>;
}

macro_rules! impl_component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            #[inline]
            fn store(storage: &ComponentStorage) -> &SparseSet<Self> {
                &storage.$field
            }

            #[inline]
            fn store_mut(storage: &mut ComponentStorage) -> &mut SparseSet<Self> {
                &mut storage.$field
            }
        }
    };
}

impl_component!(Transform, Transform, transforms);
impl_component!(Species, Species, species);
impl_component!(Health, Health, health);
impl_component!(Energy, Energy, energy);
impl_component!(Reproductive, Reproductive, reproductive);
impl_component!(Behavior, Behavior, behavior);

/// One sparse set per known component kind.
///
/// Fields are public so a pass can borrow two kinds mutably at once.
#[derive(Debug, Clone, Default)]
pub struct ComponentStorage {
    pub transforms: SparseSet<Transform>,
    pub species: SparseSet<Species>,
    pub health: SparseSet<Health>,
    pub energy: SparseSet<Energy>,
    pub reproductive: SparseSet<Reproductive>,
    pub behavior: SparseSet<Behavior>,
}

impl ComponentStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T: Component>(&mut self, id: EntityId, value: T) -> &mut T {
        T::store_mut(self).insert(id, value)
    }

    #[must_use]
    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        T::store(self).contains(id)
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::store(self).get(id)
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        T::store_mut(self).get_mut(id)
    }

    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        T::store_mut(self).remove(id)
    }

    /// Presence check by runtime kind, used to audit signatures.
    #[must_use]
    pub fn has_kind(&self, kind: ComponentKind, id: EntityId) -> bool {
        match kind {
            ComponentKind::Transform => self.transforms.contains(id),
            ComponentKind::Species => self.species.contains(id),
            ComponentKind::Health => self.health.contains(id),
            ComponentKind::Energy => self.energy.contains(id),
            ComponentKind::Reproductive => self.reproductive.contains(id),
            ComponentKind::Behavior => self.behavior.contains(id),
        }
    }

    /// Drops every kind for every id. Used on world reset.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.species.clear();
        self.health.clear();
        self.energy.clear();
        self.reproductive.clear();
        self.behavior.clear();
    }
}
