// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Entity index: stable handles over physical storage slots
//!
//! The index owns every archetype and the table mapping entity ids to
//! (archetype, slot). Ids are recycled through a queue; recycling bumps the
//! stored generation so previously issued handles go stale. Because
//! archetype deletion is swap-with-last, the index also keeps a dense
//! slot-to-id table per archetype and repairs the displaced entity's record
//! in the same operation that deletes a slot.

use std::collections::{BTreeSet, VecDeque};

use crate::archetype::{Archetype, ArchetypeId};
use crate::component::{Component, ComponentDescriptor, ComponentView};
use crate::entity::{Entity, EntityLocation};
use crate::error::{EcsError, Result};

/// One record per allocated id.
#[derive(Debug, Clone, Copy)]
struct EntityRecord {
    archetype: Option<ArchetypeId>,
    slot: usize,
    generation: u32,
}

impl EntityRecord {
    fn clear(&mut self) {
        self.archetype = None;
        self.slot = 0;
        self.generation += 1;
    }
}

/// Snapshot of one archetype's live handles, ascending by id.
///
/// Captured eagerly at enumeration time; structural changes made afterwards
/// do not affect a snapshot already taken. Handles of members destroyed
/// mid-iteration simply go stale, which data access then reports.
pub struct LiveEntities {
    entities: Vec<Entity>,
}

impl LiveEntities {
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl IntoIterator for LiveEntities {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a LiveEntities {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Generation-counted table from stable entity handles to storage slots.
pub struct EntityIndex {
    archetypes: Vec<Archetype>,
    /// Per archetype: member ids, sorted for ascending-id passes.
    members: Vec<BTreeSet<u32>>,
    /// Per archetype: dense slot -> id table mirroring the archetype's
    /// packing; rewritten on every swap-remove.
    slot_owners: Vec<Vec<u32>>,
    records: Vec<EntityRecord>,
    free: VecDeque<u32>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self {
            archetypes: Vec::new(),
            members: Vec::new(),
            slot_owners: Vec::new(),
            records: Vec::new(),
            free: VecDeque::new(),
        }
    }

    /// Create an archetype for `components` with the next id in creation
    /// order, registering empty membership for it.
    pub fn create_archetype(&mut self, components: &[ComponentDescriptor]) -> Result<ArchetypeId> {
        let id = ArchetypeId(self.archetypes.len() as u32);
        let archetype = Archetype::new(id, components)?;
        self.archetypes.push(archetype);
        self.members.push(BTreeSet::new());
        self.slot_owners.push(Vec::new());
        Ok(id)
    }

    pub fn archetype(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.get(id.index())
    }

    /// All archetypes, in creation order.
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.records.len() - self.free.len()
    }

    /// Create an entity in `archetype`, recycling a freed id when one is
    /// available.
    pub fn create_entity(&mut self, archetype: ArchetypeId) -> Result<Entity> {
        let len = self.archetypes.len();
        let arch = self
            .archetypes
            .get_mut(archetype.index())
            .ok_or(EcsError::OutOfRange {
                index: archetype.index(),
                len,
            })?;
        let slot = arch.allocate_slot();

        let id = match self.free.pop_front() {
            Some(id) => id,
            None => {
                let id = self.records.len() as u32;
                self.records.push(EntityRecord {
                    archetype: None,
                    slot: 0,
                    generation: 0,
                });
                id
            }
        };

        let record = &mut self.records[id as usize];
        record.archetype = Some(archetype);
        record.slot = slot;
        let generation = record.generation;

        self.members[archetype.index()].insert(id);
        debug_assert_eq!(self.slot_owners[archetype.index()].len(), slot);
        self.slot_owners[archetype.index()].push(id);

        Ok(Entity::new(id, generation))
    }

    /// Destroy `entity`, returning false when the handle is stale or out of
    /// range. Frees the storage slot, repairs the record of the entity
    /// displaced by the swap, bumps the generation and recycles the id.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(record) = self.record(entity) else {
            return false;
        };
        let Some(archetype_id) = record.archetype else {
            return false;
        };
        let slot = record.slot;
        let a = archetype_id.index();

        self.members[a].remove(&entity.id());

        // In range by the ownership contract: record.slot always tracks the
        // physical slot.
        let moved_from = match self.archetypes[a].delete_slot(slot) {
            Ok(moved_from) => moved_from,
            Err(_) => return false,
        };

        match moved_from {
            Some(last) => {
                // The occupant of the old last slot now lives at `slot`;
                // redirect its record before anything else observes it.
                let moved_id = self.slot_owners[a][last];
                self.slot_owners[a][slot] = moved_id;
                self.slot_owners[a].pop();
                self.records[moved_id as usize].slot = slot;
            }
            None => {
                self.slot_owners[a].pop();
            }
        }

        self.records[entity.id() as usize].clear();
        self.free.push_back(entity.id());
        true
    }

    /// Whether `entity` currently resolves to storage.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.record(entity).is_some_and(|r| r.archetype.is_some())
    }

    /// Current location of `entity`, if live.
    pub fn location(&self, entity: Entity) -> Option<EntityLocation> {
        let record = self.record(entity)?;
        record.archetype.map(|archetype_id| EntityLocation {
            archetype_id,
            slot: record.slot,
        })
    }

    /// Read component `T` of `entity`.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<T> {
        let (archetype, slot) = self.resolve(entity)?;
        self.archetypes[archetype.index()].get::<T>(slot)
    }

    /// Write component `T` of `entity`.
    pub fn set<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        let (archetype, slot) = self.resolve(entity)?;
        self.archetypes[archetype.index()].set(slot, value)
    }

    /// Byte window of one component of `entity`.
    pub fn read(&self, entity: Entity, component: ComponentDescriptor) -> Result<&[u8]> {
        let (archetype, slot) = self.resolve(entity)?;
        let arch = &self.archetypes[archetype.index()];
        let index = arch
            .find_component(component.id())
            .ok_or(EcsError::UnknownComponent(component.name()))?;
        arch.read(slot, index)
    }

    /// Overwrite one component of `entity` from raw bytes.
    pub fn write(
        &mut self,
        entity: Entity,
        component: ComponentDescriptor,
        bytes: &[u8],
    ) -> Result<()> {
        let (archetype, slot) = self.resolve(entity)?;
        let arch = &mut self.archetypes[archetype.index()];
        let index = arch
            .find_component(component.id())
            .ok_or(EcsError::UnknownComponent(component.name()))?;
        arch.write(slot, index, bytes)
    }

    /// Snapshot the live handles of `archetype`, ascending by id. An
    /// unknown archetype yields an empty snapshot.
    pub fn live_entities(&self, archetype: ArchetypeId) -> LiveEntities {
        let entities = match self.members.get(archetype.index()) {
            Some(members) => members
                .iter()
                .map(|&id| Entity::new(id, self.records[id as usize].generation))
                .collect(),
            None => Vec::new(),
        };
        LiveEntities { entities }
    }

    /// One (descriptor, byte-window) view per component the entity's
    /// archetype carries.
    pub fn component_views(&self, entity: Entity) -> Result<Vec<ComponentView<'_>>> {
        let (archetype, slot) = self.resolve(entity)?;
        let arch = &self.archetypes[archetype.index()];
        let mut views = Vec::with_capacity(arch.components().len());
        for (index, &descriptor) in arch.components().iter().enumerate() {
            views.push(ComponentView {
                descriptor,
                bytes: arch.read(slot, index)?,
            });
        }
        Ok(views)
    }

    fn record(&self, entity: Entity) -> Option<EntityRecord> {
        let record = self.records.get(entity.id() as usize)?;
        (record.generation == entity.generation()).then_some(*record)
    }

    fn resolve(&self, entity: Entity) -> Result<(ArchetypeId, usize)> {
        match self.record(entity) {
            Some(EntityRecord {
                archetype: Some(archetype),
                slot,
                ..
            }) => Ok((archetype, slot)),
            _ => Err(EcsError::StaleHandle(entity)),
        }
    }
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self::new()
    }
}
