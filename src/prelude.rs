//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use chunk_ecs::prelude::*;
//! ```

pub use crate::archetype::{Archetype, ArchetypeId, CHUNK_SIZE};
pub use crate::component::{Component, ComponentDescriptor, ComponentId, ComponentSet, ComponentView};
pub use crate::debug::WorldInspector;
pub use crate::entity::{Entity, EntityLocation};
pub use crate::error::{EcsError, Result};
pub use crate::index::{EntityIndex, LiveEntities};
pub use crate::system::{BoxedSystem, System};
pub use crate::world::World;
