#[cfg(test)]
mod tests {
    use chunk_ecs::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Label(u64);

    impl Component for Label {
        const ID: ComponentId = ComponentId(0);
        const NAME: &'static str = "label";
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pad([u8; 24]);

    impl Component for Pad {
        const ID: ComponentId = ComponentId(1);
        const NAME: &'static str = "pad";
    }

    const COMPONENTS: [ComponentDescriptor; 2] = [
        ComponentDescriptor::of::<Label>(),
        ComponentDescriptor::of::<Pad>(),
    ];

    /// Interleaved create/destroy churn must never desync handle -> slot
    /// mappings, whatever order slots get recycled in.
    #[test]
    fn test_churn_keeps_mappings_consistent() {
        let mut index = EntityIndex::new();
        let archetype = index.create_archetype(&COMPONENTS).unwrap();

        let mut live: Vec<(Entity, u64)> = Vec::new();
        let mut next_label = 0u64;

        for round in 0..64 {
            // Grow.
            for _ in 0..37 {
                let e = index.create_entity(archetype).unwrap();
                index.set(e, Label(next_label)).unwrap();
                live.push((e, next_label));
                next_label += 1;
            }
            // Shrink at a shifting position so slots recycle in varied order.
            for _ in 0..11 {
                let (victim, _) = live.remove((round * 7) % live.len());
                assert!(index.destroy_entity(victim));
            }

            // Every survivor still resolves to its own value.
            for &(e, label) in &live {
                assert_eq!(index.get::<Label>(e).unwrap(), Label(label));
            }
        }

        let arch = index.archetype(archetype).unwrap();
        assert_eq!(arch.active_count(), live.len());
        assert_eq!(index.entity_count(), live.len());
    }

    /// Values written before churn must survive it untouched.
    #[test]
    fn test_survivor_data_is_untouched() {
        let mut index = EntityIndex::new();
        let archetype = index.create_archetype(&COMPONENTS).unwrap();

        let mut entities = Vec::new();
        for i in 0..1_000u64 {
            let e = index.create_entity(archetype).unwrap();
            index.set(e, Label(i)).unwrap();
            index.set(e, Pad([i as u8; 24])).unwrap();
            entities.push((e, i));
        }

        // Drop every third entity.
        let mut survivors = Vec::new();
        for (n, (e, i)) in entities.into_iter().enumerate() {
            if n % 3 == 0 {
                assert!(index.destroy_entity(e));
            } else {
                survivors.push((e, i));
            }
        }

        for (e, i) in survivors {
            assert_eq!(index.get::<Label>(e).unwrap(), Label(i));
            assert_eq!(index.get::<Pad>(e).unwrap(), Pad([i as u8; 24]));
        }
    }

    /// Storage spanning several chunks behaves like one dense array.
    #[test]
    fn test_multi_chunk_storage() {
        let mut index = EntityIndex::new();
        let archetype = index.create_archetype(&COMPONENTS).unwrap();
        let capacity = index.archetype(archetype).unwrap().chunk_capacity();

        let total = capacity * 2 + 3;
        let mut entities = Vec::new();
        for i in 0..total {
            let e = index.create_entity(archetype).unwrap();
            index.set(e, Label(i as u64)).unwrap();
            entities.push(e);
        }

        let arch = index.archetype(archetype).unwrap();
        assert_eq!(arch.chunk_count(), 3);
        assert_eq!(arch.active_count(), total);

        // Deleting an early slot pulls the last record across a chunk
        // boundary; the moved entity's handle must follow it.
        let last = *entities.last().unwrap();
        assert!(index.destroy_entity(entities[1]));
        assert_eq!(index.location(last).unwrap().slot, 1);
        assert_eq!(index.get::<Label>(last).unwrap(), Label((total - 1) as u64));
    }
}
