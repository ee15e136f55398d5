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

//! Component descriptors and the component value trait
//!
//! Components are plain fixed-size `Copy` records with no internal
//! references. Each component type declares a stable numeric id; archetypes
//! resolve ids to column indices once at construction, so no runtime type
//! identity machinery is involved anywhere in the hot path.

use std::fmt;
use std::mem;

use smallvec::SmallVec;

/// Stable component identifier, unique within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

/// Trait for component value types.
///
/// The id is declared by the implementation and must not collide with
/// another component used in the same world. Component data is stored and
/// copied byte-wise, so the type must be `Copy`.
pub trait Component: Copy + 'static {
    /// Stable id of this component type.
    const ID: ComponentId;

    /// Human-readable name, used in errors and diagnostics.
    const NAME: &'static str;
}

/// Reference-free component descriptor: stable id plus fixed byte size.
///
/// Descriptors identify columns inside an archetype and spell out a
/// system's requirements. The byte size is fixed at archetype construction
/// and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDescriptor {
    id: ComponentId,
    size: usize,
    name: &'static str,
}

impl ComponentDescriptor {
    /// Descriptor of component type `T`.
    pub const fn of<T: Component>() -> Self {
        Self {
            id: T::ID,
            size: mem::size_of::<T>(),
            name: T::NAME,
        }
    }

    pub const fn id(&self) -> ComponentId {
        self.id
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}:{}B", self.name, self.id.0, self.size)
    }
}

/// Component set of an archetype or of a system's requirements.
pub type ComponentSet = SmallVec<[ComponentDescriptor; 8]>;

/// Borrowed view of one component's bytes, for introspection.
#[derive(Debug, Clone, Copy)]
pub struct ComponentView<'a> {
    pub descriptor: ComponentDescriptor,
    pub bytes: &'a [u8],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        const ID: ComponentId = ComponentId(0);
        const NAME: &'static str = "position";
    }

    #[test]
    fn test_descriptor_of() {
        let desc = ComponentDescriptor::of::<Position>();
        assert_eq!(desc.id(), ComponentId(0));
        assert_eq!(desc.size(), 8);
        assert_eq!(desc.name(), "position");
    }

    #[test]
    fn test_descriptor_display() {
        let desc = ComponentDescriptor::of::<Position>();
        assert_eq!(format!("{desc}"), "position#0:8B");
    }
}
