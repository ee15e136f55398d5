//! System trait and dispatch metadata

use crate::component::ComponentDescriptor;
use crate::entity::Entity;
use crate::error::Result;
use crate::index::EntityIndex;

/// Per-entity logic bound to a required component set.
///
/// `update` runs once per matching live entity per pass, in ascending id
/// order, and may read and write any component on that entity through the
/// index. A system must not create or destroy entities, or create
/// archetypes, while a pass is in flight: slot numbers the pass is
/// iterating could otherwise resolve to a different entity.
pub trait System {
    /// Name, unique across one world.
    fn name(&self) -> &'static str;

    /// Component set an archetype must carry for this system to visit it.
    fn required(&self) -> &[ComponentDescriptor];

    /// Run this system's logic for one entity.
    fn update(&mut self, index: &mut EntityIndex, entity: Entity) -> Result<()>;
}

/// Boxed system
pub type BoxedSystem = Box<dyn System>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentId};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Counter(u64);

    impl Component for Counter {
        const ID: ComponentId = ComponentId(0);
        const NAME: &'static str = "counter";
    }

    struct IncrementCounters {
        visited: usize,
    }

    const REQUIRED: [ComponentDescriptor; 1] = [ComponentDescriptor::of::<Counter>()];

    impl System for IncrementCounters {
        fn name(&self) -> &'static str {
            "increment_counters"
        }

        fn required(&self) -> &[ComponentDescriptor] {
            &REQUIRED
        }

        fn update(&mut self, index: &mut EntityIndex, entity: Entity) -> Result<()> {
            let Counter(n) = index.get::<Counter>(entity)?;
            index.set(entity, Counter(n + 1))?;
            self.visited += 1;
            Ok(())
        }
    }

    #[test]
    fn test_system_update_signature() {
        let mut index = EntityIndex::new();
        let archetype = index.create_archetype(&REQUIRED).unwrap();
        let entity = index.create_entity(archetype).unwrap();
        index.set(entity, Counter(41)).unwrap();

        let mut system = IncrementCounters { visited: 0 };
        system.update(&mut index, entity).expect("system should run");

        assert_eq!(index.get::<Counter>(entity).unwrap(), Counter(42));
        assert_eq!(system.visited, 1);
    }
}
