#![allow(dead_code, unused_imports)]

use chunk_ecs::prelude::*;
use std::{fs::File, time::Instant};

#[cfg(feature = "profiling")]
use tracing_subscriber::{self, prelude::*};

#[derive(Debug, Clone, Copy)]
struct Position(f32, f32, f32);

impl Component for Position {
    const ID: ComponentId = ComponentId(0);
    const NAME: &'static str = "position";
}

#[derive(Debug, Clone, Copy)]
struct Velocity(f32, f32, f32);

impl Component for Velocity {
    const ID: ComponentId = ComponentId(1);
    const NAME: &'static str = "velocity";
}

#[derive(Debug, Clone, Copy)]
struct Health(u32);

impl Component for Health {
    const ID: ComponentId = ComponentId(2);
    const NAME: &'static str = "health";
}

const MOVER_SET: [ComponentDescriptor; 3] = [
    ComponentDescriptor::of::<Position>(),
    ComponentDescriptor::of::<Velocity>(),
    ComponentDescriptor::of::<Health>(),
];

struct Integrate;

const INTEGRATE_REQUIRED: [ComponentDescriptor; 2] = [
    ComponentDescriptor::of::<Position>(),
    ComponentDescriptor::of::<Velocity>(),
];

impl System for Integrate {
    fn name(&self) -> &'static str {
        "integrate"
    }

    fn required(&self) -> &[ComponentDescriptor] {
        &INTEGRATE_REQUIRED
    }

    fn update(&mut self, index: &mut EntityIndex, entity: Entity) -> Result<()> {
        let Position(x, y, z) = index.get::<Position>(entity)?;
        let Velocity(dx, dy, dz) = index.get::<Velocity>(entity)?;
        index.set(entity, Position(x + dx, y + dy, z + dz))
    }
}

#[cfg(feature = "profiling")]
fn populate(world: &mut World, count: usize) {
    let _span = tracing::info_span!("populate", count = count).entered();
    let archetype = world.create_archetype(&MOVER_SET).unwrap();
    for i in 0..count {
        if i % 1_000 == 0 {
            tracing::info!("Creating entity {}/{}", i, count);
        }
        let e = world.create_entity(archetype).unwrap();
        world.index_mut().set(e, Position(1.0, 2.0, 3.0)).unwrap();
        world.index_mut().set(e, Velocity(1.0, 0.0, 0.0)).unwrap();
        world.index_mut().set(e, Health(100)).unwrap();
    }
}

#[cfg(feature = "profiling")]
fn main() {
    // Set up tracing subscriber to write to a file
    let file = File::create("trace.json").unwrap();
    let (non_blocking, _guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut world = World::new();

    println!("Populating world...");
    populate(&mut world, 10_000);
    world.register_system(Box::new(Integrate)).unwrap();
    world.rebuild_dispatch();

    println!("Profiling 100 passes over 10k entities...");
    let start = Instant::now();
    for _ in 0..100 {
        world.run_pass().unwrap();
    }
    println!("100 passes complete in: {:?}", start.elapsed());
}

#[cfg(not(feature = "profiling"))]
fn main() {
    println!("profile_pass binary requires --features profiling");
}
