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

//! World: scheduler owning the entity index and registered systems
//!
//! A world is an explicitly constructed object; several independent worlds
//! can coexist in one process. It drives registered systems over matching
//! archetypes one full pass at a time, using a dispatch table built by
//! [`World::rebuild_dispatch`].

use rustc_hash::FxHashMap;

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::archetype::ArchetypeId;
use crate::component::ComponentDescriptor;
use crate::entity::Entity;
use crate::error::{EcsError, Result};
use crate::index::EntityIndex;
use crate::system::{BoxedSystem, System};

/// Central scheduler: entity index, systems in registration order, and the
/// precomputed system-to-archetype dispatch table.
pub struct World {
    index: EntityIndex,
    systems: Vec<BoxedSystem>,
    system_names: FxHashMap<String, usize>,
    /// Per system (registration order): matching archetypes in creation
    /// order. A point-in-time cache over (systems x archetypes).
    dispatch: Vec<Vec<ArchetypeId>>,
    /// (archetype count, system count) the table was built for.
    dispatch_built_for: (usize, usize),
}

impl World {
    /// Create a new, empty world.
    pub fn new() -> Self {
        Self {
            index: EntityIndex::new(),
            systems: Vec::new(),
            system_names: FxHashMap::default(),
            dispatch: Vec::new(),
            dispatch_built_for: (0, 0),
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut EntityIndex {
        &mut self.index
    }

    /// Create an archetype through the owned index. The dispatch table must
    /// be rebuilt before the next pass is expected to cover it.
    pub fn create_archetype(&mut self, components: &[ComponentDescriptor]) -> Result<ArchetypeId> {
        self.index.create_archetype(components)
    }

    pub fn create_entity(&mut self, archetype: ArchetypeId) -> Result<Entity> {
        self.index.create_entity(archetype)
    }

    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        self.index.destroy_entity(entity)
    }

    /// Register `system` at the end of the pass order. Fails with
    /// `DuplicateName` when a system with the same name already exists.
    pub fn register_system(&mut self, system: BoxedSystem) -> Result<()> {
        let name = system.name();
        if self.system_names.contains_key(name) {
            return Err(EcsError::DuplicateName(name.to_string()));
        }
        self.system_names.insert(name.to_string(), self.systems.len());
        self.systems.push(system);
        Ok(())
    }

    /// Remove the system registered under `name`, preserving the relative
    /// order of the others. Returns false when no such system exists. The
    /// dispatch table must be rebuilt afterwards.
    pub fn unregister_system(&mut self, name: &str) -> bool {
        let Some(index) = self.system_names.remove(name) else {
            return false;
        };
        self.systems.remove(index);
        for slot in self.system_names.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        true
    }

    /// Look up a registered system by name.
    pub fn system(&self, name: &str) -> Option<&dyn System> {
        self.system_names
            .get(name)
            .map(|&index| self.systems[index].as_ref())
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Rebuild the dispatch table: for every system, the archetypes whose
    /// component set is a superset of the system's required set, archetype
    /// creation order preserved.
    ///
    /// The table is not auto-maintained; call again after creating an
    /// archetype or (un)registering a system.
    pub fn rebuild_dispatch(&mut self) {
        #[cfg(feature = "profiling")]
        let span = info_span!(
            "world.rebuild_dispatch",
            systems = self.systems.len(),
            archetypes = self.index.archetypes().len()
        );
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        self.dispatch.clear();
        for system in &self.systems {
            let required = system.required();
            let matching = self
                .index
                .archetypes()
                .iter()
                .filter(|archetype| archetype.contains_all(required))
                .map(|archetype| archetype.id())
                .collect();
            self.dispatch.push(matching);
        }
        self.dispatch_built_for = (self.index.archetypes().len(), self.systems.len());
    }

    /// Whether the dispatch table still covers the current structure.
    pub fn dispatch_is_current(&self) -> bool {
        self.dispatch_built_for == (self.index.archetypes().len(), self.systems.len())
    }

    /// Run one full pass: systems in registration order, each over its
    /// matching archetypes in creation order, each over the archetype's
    /// live entities in ascending id order.
    ///
    /// Entity membership of the visited archetypes must not change during
    /// the pass (see [`System`]).
    pub fn run_pass(&mut self) -> Result<()> {
        #[cfg(feature = "profiling")]
        let span = info_span!("world.run_pass", systems = self.systems.len());
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        for (i, system) in self.systems.iter_mut().enumerate() {
            let Some(archetypes) = self.dispatch.get(i) else {
                continue;
            };
            for &archetype in archetypes {
                let snapshot = self.index.live_entities(archetype);
                for &entity in snapshot.iter() {
                    system.update(&mut self.index, entity)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentId};

    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    struct A(u32);

    impl Component for A {
        const ID: ComponentId = ComponentId(0);
        const NAME: &'static str = "a";
    }

    #[allow(dead_code)]
    #[derive(Debug, Clone, Copy)]
    struct B(u32);

    impl Component for B {
        const ID: ComponentId = ComponentId(1);
        const NAME: &'static str = "b";
    }

    struct Noop {
        name: &'static str,
        required: Vec<ComponentDescriptor>,
    }

    impl System for Noop {
        fn name(&self) -> &'static str {
            self.name
        }

        fn required(&self) -> &[ComponentDescriptor] {
            &self.required
        }

        fn update(&mut self, _index: &mut EntityIndex, _entity: Entity) -> Result<()> {
            Ok(())
        }
    }

    fn noop(name: &'static str, required: Vec<ComponentDescriptor>) -> BoxedSystem {
        Box::new(Noop { name, required })
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut world = World::new();
        world.register_system(noop("tick", vec![])).unwrap();

        let err = world.register_system(noop("tick", vec![])).unwrap_err();
        assert_eq!(err, EcsError::DuplicateName("tick".to_string()));
        assert_eq!(world.system_count(), 1);
    }

    #[test]
    fn test_dispatch_matches_supersets() {
        let mut world = World::new();
        let a = ComponentDescriptor::of::<A>();
        let b = ComponentDescriptor::of::<B>();

        let only_a = world.create_archetype(&[a]).unwrap();
        let both = world.create_archetype(&[a, b]).unwrap();
        let only_b = world.create_archetype(&[b]).unwrap();

        world.register_system(noop("needs_a", vec![a])).unwrap();
        world.register_system(noop("needs_ab", vec![a, b])).unwrap();
        world.rebuild_dispatch();

        assert_eq!(world.dispatch[0], vec![only_a, both]);
        assert_eq!(world.dispatch[1], vec![both]);
        let _ = only_b;
    }

    #[test]
    fn test_dispatch_staleness_is_observable() {
        let mut world = World::new();
        world.register_system(noop("tick", vec![])).unwrap();
        world.rebuild_dispatch();
        assert!(world.dispatch_is_current());

        world
            .create_archetype(&[ComponentDescriptor::of::<A>()])
            .unwrap();
        assert!(!world.dispatch_is_current());

        world.rebuild_dispatch();
        assert!(world.dispatch_is_current());
    }

    #[test]
    fn test_unregister_preserves_order() {
        let mut world = World::new();
        world.register_system(noop("first", vec![])).unwrap();
        world.register_system(noop("second", vec![])).unwrap();
        world.register_system(noop("third", vec![])).unwrap();

        assert!(world.unregister_system("second"));
        assert!(!world.unregister_system("second"));
        assert_eq!(world.system_count(), 2);
        assert!(world.system("first").is_some());
        assert_eq!(world.system("third").unwrap().name(), "third");
    }

    #[test]
    fn test_pass_without_rebuild_skips_new_systems() {
        let mut world = World::new();
        let a = ComponentDescriptor::of::<A>();
        let arch = world.create_archetype(&[a]).unwrap();
        world.create_entity(arch).unwrap();

        // Registered after the (empty) table was built; a pass must not
        // visit it until the table is rebuilt.
        world.rebuild_dispatch();
        world.register_system(noop("late", vec![a])).unwrap();
        assert!(!world.dispatch_is_current());
        world.run_pass().unwrap();
    }
}
