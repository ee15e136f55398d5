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

//! Error types

use std::fmt;

use crate::archetype::CHUNK_SIZE;
use crate::entity::Entity;

/// ECS error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// A single record does not fit in one chunk, or the component set
    /// carries no data at all. Fatal at archetype construction.
    InvalidLayout { entity_size: usize },

    /// Slot, component, or archetype index outside current bounds.
    /// Always a programming error at the call site.
    OutOfRange { index: usize, len: usize },

    /// Requested component type absent from the archetype's set.
    UnknownComponent(&'static str),

    /// Handle generation no longer matches; the entity was destroyed.
    /// Recoverable by discarding the handle.
    StaleHandle(Entity),

    /// Two systems registered under the same name.
    DuplicateName(String),
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::InvalidLayout { entity_size } => {
                write!(
                    f,
                    "invalid component layout: {entity_size} bytes per record, chunk budget is {CHUNK_SIZE}"
                )
            }
            EcsError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            EcsError::UnknownComponent(name) => {
                write!(f, "component {name} not present in archetype")
            }
            EcsError::StaleHandle(entity) => write!(f, "stale entity handle {entity}"),
            EcsError::DuplicateName(name) => {
                write!(f, "system name already registered: {name}")
            }
        }
    }
}

impl std::error::Error for EcsError {}

/// Result type alias
pub type Result<T> = std::result::Result<T, EcsError>;
