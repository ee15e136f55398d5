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

//! Chunked column-store Entity Component System
//!
//! Entities are stable (id, generation) handles; their components live in
//! archetype-owned fixed-size chunks, column-major and densely packed for
//! cache-friendly bulk iteration. A world drives registered systems over
//! matching archetypes one synchronous pass at a time.

pub mod archetype;
pub mod component;
pub mod debug;
pub mod entity;
pub mod error;
pub mod index;
pub mod prelude;
pub mod system;
pub mod world;


pub use archetype::*;
pub use component::*;
pub use debug::*;
pub use entity::*;
pub use error::*;
pub use index::*;
pub use system::*;
pub use world::*;
