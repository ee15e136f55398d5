use crate::entity::Entity;
use crate::world::World;

/// World inspector for debugging
pub struct WorldInspector;

impl WorldInspector {
    /// Get total live entity count
    pub fn entity_count(world: &World) -> usize {
        world.index().entity_count()
    }

    /// Get archetype summary
    pub fn archetype_summary(world: &World) -> Vec<ArchetypeInfo> {
        let mut infos = Vec::new();

        for archetype in world.index().archetypes() {
            let components: Vec<String> = archetype
                .components()
                .iter()
                .map(|c| c.name().to_string())
                .collect();

            infos.push(ArchetypeInfo {
                id: archetype.id().index(),
                components,
                entity_count: archetype.active_count(),
                chunk_count: archetype.chunk_count(),
                chunk_capacity: archetype.chunk_capacity(),
            });
        }

        infos
    }

    /// Print world summary to console
    pub fn print_summary(world: &World) {
        println!("=== World Summary ===");
        println!("Entities: {}", Self::entity_count(world));
        println!("Archetypes: {}", world.index().archetypes().len());
        println!("Systems: {}", world.system_count());

        println!("\n=== Archetypes ===");
        for info in Self::archetype_summary(world) {
            println!(
                "Archetype {}: {} entities, {} chunks of {} [{}]",
                info.id,
                info.entity_count,
                info.chunk_count,
                info.chunk_capacity,
                info.components.join(", ")
            );
        }
    }

    /// Print entity details
    pub fn print_entity(world: &World, entity: Entity) {
        if let Some(location) = world.index().location(entity) {
            println!("=== Entity {entity} ===");
            println!("Archetype: {}", location.archetype_id.0);
            println!("Slot: {}", location.slot);

            if let Ok(views) = world.index().component_views(entity) {
                for view in views {
                    println!("  {} = {:?}", view.descriptor, view.bytes);
                }
            }
        } else {
            println!("Entity {entity} not found");
        }
    }
}

/// Archetype information for debugging
#[derive(Clone, Debug)]
pub struct ArchetypeInfo {
    pub id: usize,
    pub components: Vec<String>,
    pub entity_count: usize,
    pub chunk_count: usize,
    pub chunk_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentDescriptor, ComponentId};

    #[derive(Debug, Clone, Copy)]
    struct Marker(u8);

    impl Component for Marker {
        const ID: ComponentId = ComponentId(0);
        const NAME: &'static str = "marker";
    }

    #[test]
    fn test_world_inspector() {
        let mut world = World::new();
        assert_eq!(WorldInspector::entity_count(&world), 0);

        let archetype = world
            .create_archetype(&[ComponentDescriptor::of::<Marker>()])
            .unwrap();
        world.create_entity(archetype).unwrap();

        let summary = WorldInspector::archetype_summary(&world);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].entity_count, 1);
        assert_eq!(summary[0].components, vec!["marker".to_string()]);
    }
}
