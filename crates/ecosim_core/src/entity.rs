//! Entity identity, liveness and the deferred add/remove buffers.
//!
//! Ids are issued from a monotonically increasing counter and never handed out
//! twice (until [`EntityRegistry::reset_all`] restarts the counter). A spawned
//! entity sits in the pending buffer, invisible to [`EntityRegistry::entities`]
//! and to systems, until the next [`EntityRegistry::flush`]. Destruction only
//! clears the active flag; the record leaves the live list and tag index at
//! the following flush.

use crate::signature::{ComponentKind, Signature};
use crate::EntityId;
use std::collections::{BTreeMap, HashMap};

/// Receives liveness and signature changes from the registry.
///
/// The system registry implements this to keep interest sets current. The
/// unit type is a detached observer.
pub trait EntityObserver {
    fn on_signature_changed(&mut self, id: EntityId, signature: Signature);
    fn on_entity_destroyed(&mut self, id: EntityId);
}

impl EntityObserver for () {
    fn on_signature_changed(&mut self, _id: EntityId, _signature: Signature) {}
    fn on_entity_destroyed(&mut self, _id: EntityId) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    id: EntityId,
    tag: String,
    active: bool,
    pending: bool,
    signature: Signature,
}

impl EntityRecord {
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True until the first flush after spawn.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn signature(&self) -> Signature {
        self.signature
    }
}

/// Result of one [`EntityRegistry::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub added: usize,
    pub removed: usize,
}

/// Outcome of flipping one signature bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureUpdate {
    pub signature: Signature,
    /// Whether systems may see the entity yet.
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    records: HashMap<EntityId, EntityRecord>,
    live: Vec<EntityId>,
    pending: Vec<EntityId>,
    by_tag: BTreeMap<String, Vec<EntityId>>,
    next_id: EntityId,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a new entity. The id is valid immediately but the entity is
    /// not listed until the next flush.
    pub fn spawn(&mut self, tag: &str) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            EntityRecord {
                id,
                tag: tag.to_string(),
                active: true,
                pending: true,
                signature: Signature::EMPTY,
            },
        );
        self.pending.push(id);
        tracing::debug!(id, tag, "Entity queued");
        id
    }

    /// Marks the entity inactive and tells the observer to drop it.
    ///
    /// Returns `false` for unknown or already destroyed ids, which are
    /// otherwise ignored.
    pub fn destroy(&mut self, id: EntityId, observer: &mut impl EntityObserver) -> bool {
        match self.records.get_mut(&id) {
            Some(record) if record.active => {
                record.active = false;
                observer.on_entity_destroyed(id);
                tracing::debug!(id, "Entity destroyed");
                true
            }
            _ => false,
        }
    }

    /// Commits pending entities and drops destroyed ones from every list.
    pub fn flush(&mut self, observer: &mut impl EntityObserver) -> FlushStats {
        let mut stats = FlushStats::default();

        for id in std::mem::take(&mut self.pending) {
            let Some(record) = self.records.get_mut(&id) else {
                continue;
            };
            if !record.active {
                // Destroyed before it was ever listed.
                self.records.remove(&id);
                continue;
            }
            record.pending = false;
            self.live.push(id);
            self.by_tag.entry(record.tag.clone()).or_default().push(id);
            observer.on_signature_changed(id, record.signature);
            stats.added += 1;
        }

        let records = &mut self.records;
        let before = self.live.len();
        self.live.retain(|id| records.get(id).is_some_and(EntityRecord::is_active));
        stats.removed = before - self.live.len();

        for ids in self.by_tag.values_mut() {
            ids.retain(|id| records.get(id).is_some_and(EntityRecord::is_active));
        }
        self.by_tag.retain(|_, ids| !ids.is_empty());

        if stats.removed > 0 {
            records.retain(|&id, record| {
                if record.active {
                    true
                } else {
                    observer.on_entity_destroyed(id);
                    false
                }
            });
        }

        if stats.added > 0 || stats.removed > 0 {
            tracing::debug!(
                added = stats.added,
                removed = stats.removed,
                live = self.live.len(),
                "Entity registry flushed"
            );
        }
        stats
    }

    /// Sets or clears one component bit on an active entity.
    ///
    /// Returns `None` for unknown or destroyed ids.
    pub fn set_component_bit(
        &mut self,
        id: EntityId,
        kind: ComponentKind,
        present: bool,
    ) -> Option<SignatureUpdate> {
        let record = self.records.get_mut(&id).filter(|r| r.active)?;
        record.signature.set(kind, present);
        Some(SignatureUpdate {
            signature: record.signature,
            visible: !record.pending,
        })
    }

    /// Destroys every live and pending entity and restarts id issuance.
    ///
    /// Component data is not touched here; the owner of the storage clears it.
    pub fn reset_all(&mut self, observer: &mut impl EntityObserver) -> usize {
        let count = self.records.len();
        for id in self.live.iter().chain(self.pending.iter()) {
            if let Some(record) = self.records.get_mut(id) {
                record.active = false;
            }
            observer.on_entity_destroyed(*id);
        }
        self.records.clear();
        self.live.clear();
        self.pending.clear();
        self.by_tag.clear();
        self.next_id = 0;
        tracing::debug!(count, "Entity registry reset");
        count
    }

    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.records.get(&id).is_some_and(EntityRecord::is_active)
    }

    /// Record for a live, pending, or destroyed-but-unflushed id.
    #[must_use]
    pub fn lookup(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn signature(&self, id: EntityId) -> Option<Signature> {
        self.records.get(&id).map(EntityRecord::signature)
    }

    /// Flushed entities in creation order, including ones destroyed since
    /// the last flush.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.live
    }

    #[must_use]
    pub fn entities_with_tag(&self, tag: &str) -> &[EntityId] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Ids issued since construction or the last reset.
    #[must_use]
    pub fn total_created(&self) -> EntityId {
        self.next_id
    }
}
