// Copyright 2025 eraflo
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

// Tessera Sandbox
// Host application: owns the entity registry and drives a tiny simulation.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tessera_data::ecs::{
    Archetype, Component, ComponentCollection, EntityId, EntityRegistry, TagComponent,
};

use crate::config::SandboxConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Component)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Component)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Component)]
struct Label(String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TagComponent)]
struct SquadLeader;

type Mover = Archetype<(Position, Velocity)>;

fn spawn_squads(registry: &mut EntityRegistry, config: &SandboxConfig) -> Result<Vec<EntityId>> {
    let mut squads = Vec::with_capacity(config.squad_count);
    for squad in 0..config.squad_count {
        let mut components = Mover::create_instance();
        components.emplace(SquadLeader);
        components.emplace(Label(format!("squad-{squad}")));
        let leader = registry.spawn_with(components);

        for member in 0..config.members_per_squad {
            let components = squad_member(squad, member);
            registry
                .spawn_child(leader, components)
                .with_context(|| format!("Could not attach member {member} to squad {squad}"))?;
        }
        squads.push(leader);
    }
    Ok(squads)
}

/// Builds a member that starts with a velocity and gets the rest of `Mover`
/// from the archetype.
fn squad_member(squad: usize, member: usize) -> ComponentCollection {
    let mut components = ComponentCollection::new();
    components.emplace(Velocity {
        dx: 1.0 + member as f32,
        dy: squad as f32,
    });
    // Position is added before the pass stops at the existing Velocity.
    let complete = Mover::supplement(&mut components);
    log::debug!(
        "Supplemented member {member} of squad {squad}: all added = {complete}, \
         archetype satisfied = {}.",
        Mover::is_present_in(&components)
    );
    components
}

fn tick(registry: &EntityRegistry) -> usize {
    let mut moved = 0;
    for (_, entity) in registry.with_all::<(Position, Velocity)>() {
        let Some(velocity) = entity.components.get::<Velocity>().read(|v| *v) else {
            continue;
        };
        if entity
            .components
            .get::<Position>()
            .write(|p| {
                p.x += velocity.dx;
                p.y += velocity.dy;
            })
            .is_some()
        {
            moved += 1;
        }
    }
    moved
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SandboxConfig::from_file(&path)?,
        None => SandboxConfig::default(),
    };

    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();
    log::info!("Starting sandbox with {config:?}");

    let mut registry = EntityRegistry::new();
    let squads = spawn_squads(&mut registry, &config)?;
    log::info!(
        "Spawned {} entities in {} squad(s).",
        registry.len(),
        squads.len()
    );

    let snapshot = registry
        .try_clone()
        .context("Could not snapshot the registry")?;
    for frame in 0..config.ticks {
        let moved = tick(&registry);
        log::debug!("Tick {frame}: moved {moved} entities.");
    }

    for (id, entity) in registry.with_all::<(SquadLeader, Label)>() {
        let label = entity.components.get::<Label>().read(|l| l.0.clone());
        let position = entity.components.get::<Position>().read(|p| *p);
        let before = snapshot
            .get(id)
            .and_then(|e| e.components.get::<Position>().read(|p| *p));
        log::info!(
            "{} ({id}): {} member(s), {before:?} -> {position:?}",
            label.unwrap_or_default(),
            registry.descendants(id).len()
        );
    }

    if let Some(&first) = squads.first() {
        let removed = registry.despawn(first);
        log::info!("Disbanded squad {first}: removed {removed} entities.");
    }
    log::info!("{} entities remain.", registry.len());

    Ok(())
}
