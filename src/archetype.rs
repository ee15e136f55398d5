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

//! Chunked column-store archetype with slot allocation and dense-packing
//! removal
//!
//! An archetype owns the storage of every entity sharing one component set.
//! Records live in fixed-size chunks; inside a chunk each component forms a
//! contiguous column, so a system touching one component walks contiguous
//! memory. Deletion swaps the last record into the hole, keeping the active
//! range `[0, active)` dense at all times.

use std::fmt;

use smallvec::SmallVec;

use crate::component::{Component, ComponentDescriptor, ComponentId, ComponentSet};
use crate::error::{EcsError, Result};

/// Byte budget of one chunk. Bounds the largest contiguous allocation the
/// store ever makes; per-chunk record capacity is derived from this.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Archetype identifier, assigned in creation order by the entity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchetypeId(pub u32);

impl ArchetypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One fixed-capacity byte block holding a column-major slice of records.
#[derive(Debug)]
struct Chunk {
    data: Box<[u8]>,
}

impl Chunk {
    fn new() -> Self {
        Self {
            data: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

/// Archetype: chunked Structure of Arrays storage
///
/// The component set is immutable after construction. Slots are numbered
/// globally; slot `g` lives in chunk `g / chunk_capacity` at local index
/// `g % chunk_capacity`. Component `i`'s bytes for local index `s` occupy
/// the window `[offsets[i] + size_i * s, offsets[i] + size_i * (s + 1))`,
/// and columns never overlap.
#[derive(Debug)]
pub struct Archetype {
    id: ArchetypeId,
    components: ComponentSet,
    /// Per-component byte offset of the column start within a chunk.
    offsets: SmallVec<[usize; 8]>,
    chunks: Vec<Chunk>,
    chunk_capacity: usize,
    entity_size: usize,
    active: usize,
}

impl Archetype {
    /// Create an archetype for `components`, computing the column layout.
    ///
    /// Fails with `InvalidLayout` when a single record does not fit in one
    /// chunk, including the degenerate case of a set with no data.
    pub(crate) fn new(id: ArchetypeId, components: &[ComponentDescriptor]) -> Result<Self> {
        let components: ComponentSet = components.iter().copied().collect();
        let entity_size: usize = components.iter().map(|c| c.size()).sum();
        if entity_size == 0 || entity_size > CHUNK_SIZE {
            return Err(EcsError::InvalidLayout { entity_size });
        }
        let chunk_capacity = CHUNK_SIZE / entity_size;

        let mut offsets = SmallVec::with_capacity(components.len());
        let mut cursor = 0;
        for component in &components {
            offsets.push(cursor);
            cursor += component.size() * chunk_capacity;
        }

        Ok(Self {
            id,
            components,
            offsets,
            chunks: Vec::new(),
            chunk_capacity,
            entity_size,
            active: 0,
        })
    }

    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    /// Component descriptors, in column order.
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Number of live slots. Slots `[0, active_count)` are valid.
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Records per chunk.
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Total bytes of one record across all columns.
    pub fn entity_size(&self) -> usize {
        self.entity_size
    }

    /// Column index of component `id`. Linear scan; component sets are
    /// small and fixed.
    pub fn find_component(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.find_component(id).is_some()
    }

    /// Whether this archetype's set is a superset of `required`.
    pub fn contains_all(&self, required: &[ComponentDescriptor]) -> bool {
        required.iter().all(|r| self.contains(r.id()))
    }

    /// Allocate a slot for a new record, appending a chunk when the current
    /// ones are full. O(1) amortized.
    pub fn allocate_slot(&mut self) -> usize {
        if self.active == self.chunks.len() * self.chunk_capacity {
            self.chunks.push(Chunk::new());
        }
        let slot = self.active;
        self.active += 1;
        slot
    }

    /// Delete `slot`, keeping the active range dense.
    ///
    /// When `slot` is not the last active slot, every component column of
    /// the last record is copied into `slot`'s windows and the old last
    /// index is returned: the occupant of that index now lives at `slot`,
    /// and any external mapping keyed by slot must be redirected by the
    /// caller. Returns `Ok(None)` when the last slot itself was released.
    pub fn delete_slot(&mut self, slot: usize) -> Result<Option<usize>> {
        if slot >= self.active {
            return Err(EcsError::OutOfRange {
                index: slot,
                len: self.active,
            });
        }
        let last = self.active - 1;
        if slot == last {
            self.active = last;
            return Ok(None);
        }

        let dst_chunk = slot / self.chunk_capacity;
        let dst_local = slot % self.chunk_capacity;
        let src_chunk = last / self.chunk_capacity;
        let src_local = last % self.chunk_capacity;

        for (i, component) in self.components.iter().enumerate() {
            let size = component.size();
            if size == 0 {
                continue;
            }
            let src_at = self.offsets[i] + size * src_local;
            let dst_at = self.offsets[i] + size * dst_local;
            if src_chunk == dst_chunk {
                self.chunks[src_chunk]
                    .data
                    .copy_within(src_at..src_at + size, dst_at);
            } else {
                // last > slot, so src_chunk > dst_chunk here
                let (head, tail) = self.chunks.split_at_mut(src_chunk);
                let src = &tail[0].data[src_at..src_at + size];
                head[dst_chunk].data[dst_at..dst_at + size].copy_from_slice(src);
            }
        }

        self.active = last;
        Ok(Some(last))
    }

    /// Byte window of component `component_index` for `slot`.
    pub fn read(&self, slot: usize, component_index: usize) -> Result<&[u8]> {
        let (chunk, at, size) = self.window(slot, component_index)?;
        Ok(&self.chunks[chunk].data[at..at + size])
    }

    /// Overwrite the byte window of component `component_index` for `slot`.
    /// `bytes` must be exactly the component's size.
    pub fn write(&mut self, slot: usize, component_index: usize, bytes: &[u8]) -> Result<()> {
        let (chunk, at, size) = self.window(slot, component_index)?;
        if bytes.len() != size {
            return Err(EcsError::OutOfRange {
                index: bytes.len(),
                len: size,
            });
        }
        self.chunks[chunk].data[at..at + size].copy_from_slice(bytes);
        Ok(())
    }

    /// Read component `T` at `slot`.
    pub fn get<T: Component>(&self, slot: usize) -> Result<T> {
        let index = self
            .find_component(T::ID)
            .ok_or(EcsError::UnknownComponent(T::NAME))?;
        let bytes = self.read(slot, index)?;
        if bytes.len() != std::mem::size_of::<T>() {
            return Err(EcsError::UnknownComponent(T::NAME));
        }
        // Column windows are packed by byte size, not by alignment.
        Ok(unsafe { std::ptr::read_unaligned(bytes.as_ptr().cast::<T>()) })
    }

    /// Write component `T` at `slot`.
    pub fn set<T: Component>(&mut self, slot: usize, value: T) -> Result<()> {
        let index = self
            .find_component(T::ID)
            .ok_or(EcsError::UnknownComponent(T::NAME))?;
        let (chunk, at, size) = self.window(slot, index)?;
        if size != std::mem::size_of::<T>() {
            return Err(EcsError::UnknownComponent(T::NAME));
        }
        let dst = self.chunks[chunk].data[at..].as_mut_ptr();
        unsafe { std::ptr::write_unaligned(dst.cast::<T>(), value) };
        Ok(())
    }

    /// Bounds-check `slot` and `component_index`, returning
    /// (chunk index, byte offset in chunk, component size).
    fn window(&self, slot: usize, component_index: usize) -> Result<(usize, usize, usize)> {
        if slot >= self.active {
            return Err(EcsError::OutOfRange {
                index: slot,
                len: self.active,
            });
        }
        if component_index >= self.components.len() {
            return Err(EcsError::OutOfRange {
                index: component_index,
                len: self.components.len(),
            });
        }
        let size = self.components[component_index].size();
        let local = slot % self.chunk_capacity;
        Ok((
            slot / self.chunk_capacity,
            self.offsets[component_index] + size * local,
            size,
        ))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "archetype {}: {} B/record, {} per chunk [",
            self.id.0, self.entity_size, self.chunk_capacity
        )?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(
                f,
                "{{{}|size:{}|offset:{}}}",
                component.name(),
                component.size(),
                self.offsets[i]
            )?;
        }
        write!(f, "]")
    }
}
