//! Example: basic store and scheduler usage
//!
//! Two archetypes share one component; two printing systems show which
//! archetypes each system is dispatched to.

use chunk_ecs::prelude::*;
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
struct Serial(i32);

impl Component for Serial {
    const ID: ComponentId = ComponentId(0);
    const NAME: &'static str = "serial";
}

/// Newtype wrapper so a glam `Vec3` can carry a `Component` impl from this
/// crate — the orphan rule forbids implementing a foreign trait for a
/// foreign type directly.
#[derive(Debug, Clone, Copy)]
struct Vel(Vec3);

impl Component for Vel {
    const ID: ComponentId = ComponentId(1);
    const NAME: &'static str = "vec3";
}

impl std::fmt::Display for Vel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
struct Grid([f32; 16]);

impl Component for Grid {
    const ID: ComponentId = ComponentId(2);
    const NAME: &'static str = "grid";
}

struct PrintSerial;

const SERIAL_ONLY: [ComponentDescriptor; 1] = [ComponentDescriptor::of::<Serial>()];

impl System for PrintSerial {
    fn name(&self) -> &'static str {
        "print_serial"
    }

    fn required(&self) -> &[ComponentDescriptor] {
        &SERIAL_ONLY
    }

    fn update(&mut self, index: &mut EntityIndex, entity: Entity) -> Result<()> {
        let Serial(n) = index.get::<Serial>(entity)?;
        println!("[{}] {entity}: {n}", self.name());
        Ok(())
    }
}

struct PrintVec3;

const VEC3_ONLY: [ComponentDescriptor; 1] = [ComponentDescriptor::of::<Vel>()];

impl System for PrintVec3 {
    fn name(&self) -> &'static str {
        "print_vec3"
    }

    fn required(&self) -> &[ComponentDescriptor] {
        &VEC3_ONLY
    }

    fn update(&mut self, index: &mut EntityIndex, entity: Entity) -> Result<()> {
        let v = index.get::<Vel>(entity)?;
        println!("[{}] {entity}: {v}", self.name());
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut world = World::new();

    let movers = world.create_archetype(&[
        ComponentDescriptor::of::<Serial>(),
        ComponentDescriptor::of::<Vel>(),
    ])?;
    let grids = world.create_archetype(&[
        ComponentDescriptor::of::<Serial>(),
        ComponentDescriptor::of::<Grid>(),
    ])?;

    for i in 0..2 {
        let mover = world.create_entity(movers)?;
        world.index_mut().set(mover, Serial(i))?;
        world.index_mut().set(mover, Vel(Vec3::new(0.0, 0.0, i as f32)))?;

        let grid = world.create_entity(grids)?;
        world.index_mut().set(grid, Serial(i32::MAX - i))?;
        world.index_mut().set(grid, Grid([i as f32; 16]))?;
    }

    world.register_system(Box::new(PrintSerial))?;
    world.register_system(Box::new(PrintVec3))?;
    world.rebuild_dispatch();
    world.run_pass()?;

    WorldInspector::print_summary(&world);

    // Destroying an entity leaves old handles stale.
    let doomed = world.create_entity(movers)?;
    world.destroy_entity(doomed);
    match world.index().get::<Serial>(doomed) {
        Err(EcsError::StaleHandle(handle)) => println!("handle {handle} is stale"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
