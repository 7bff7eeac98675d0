//! BRAWL Simulation Core
//!
//! ECS-симуляция ближнего боя на Bevy 0.16 (headless).
//!
//! Агенты: vitality + attack catalog + combat FSM. Хит: пересечение
//! hit-volume атакующего с hurt-volume защитника (edge-triggered).
//! Match flow, UI и input живут снаружи и общаются через events/компоненты.

use bevy::app::{FixedMain, PluginsState};
use bevy::ecs::component::Tick;
use bevy::ecs::event::EventRegistry;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod physics;
pub mod player;
pub mod spawn;
pub mod status;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AttackCadence, CombatState, CombatStateKind, CombatTarget, HitReaction, Pursuit};
pub use combat::{
    AgentSpawned, AttackCatalog, AttackDefinition, AttackStarted, CombatFault, CombatPlugin, CombatStateChanged,
    DamageDealt, EntityDied, HitGuarded, HitVolume, HurtVolume, Reach, RespawnRequested, SeedStats,
};
pub use components::*;
pub use config::{CombatConfig, CombatantConfig, PlayerConfig};
pub use error::{CombatError, CombatResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{CollisionBackend, PhysicsPlugin};
pub use player::{Player, PlayerIntent, PlayerPlugin};
pub use spawn::{spawn_combatant, spawn_player};
pub use status::{agent_status, AgentStatus};

/// Фазы одного fixed tick (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Respawn, seed stats, AgentSpawned → CombatTarget
    Bind,
    /// AI + player state machines
    Decide,
    /// Locomotion → Transform
    Move,
    /// Hit-volume spawn/sync
    Volumes,
    /// Overlap detection → CollisionEvent
    Collide,
    /// CollisionEvent → ApplyHit
    Resolve,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Debug, Clone)]
pub struct SimulationPlugin {
    pub tick_hz: f64,
    pub seed: u64,
    pub backend: CollisionBackend,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            backend: CollisionBackend::default(),
        }
    }
}

impl From<&CombatConfig> for SimulationPlugin {
    fn from(config: &CombatConfig) -> Self {
        Self {
            tick_hz: config.tick_hz,
            seed: config.seed,
            ..default()
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Bind,
                SimulationSet::Decide,
                SimulationSet::Move,
                SimulationSet::Volumes,
                SimulationSet::Collide,
                SimulationSet::Resolve,
            )
                .chain(),
        );

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(self.tick_hz))
            // Детерминистичный RNG (attack selection)
            .insert_resource(DeterministicRng::new(self.seed))
            // Подсистемы
            .add_plugins((
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                PhysicsPlugin { backend: self.backend },
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with(SimulationPlugin { seed, ..default() })
}

pub fn create_headless_app_with(plugin: SimulationPlugin) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(plugin);

    app
}

/// Один fixed tick, независимо от wall clock
///
/// `app.update()` крутит FixedMain по накопленному реальному времени
/// (0..N тиков за кадр). Здесь время продвигается ровно на timestep,
/// затем выполняется FixedMain (FixedUpdate + FixedPostUpdate для Rapier).
/// После тика double-buffer событий свапается: событие живёт два тика,
/// так что каждый `EventReader` в FixedUpdate видит его ровно один раз.
///
/// Первый вызов достраивает plugins и прогоняет один пустой кадр
/// (Startup schedules, Rapier context), fixed тиков в нём нет.
pub fn run_fixed_tick(app: &mut App) {
    if app.plugins_state() == PluginsState::Ready {
        app.finish();
        app.cleanup();
        app.update();
    }

    let world = app.world_mut();
    world.flush();

    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedMain);

    swap_event_buffers(world);
}

/// Change tick последнего свапа событий
#[derive(Resource)]
struct EventSwapTick(Tick);

fn swap_event_buffers(world: &mut World) {
    let last = world.get_resource::<EventSwapTick>().map_or(Tick::new(0), |swap| swap.0);

    if world.contains_resource::<EventRegistry>() {
        world.resource_scope(|world, mut registry: Mut<EventRegistry>| {
            registry.run_updates(world, last);
        });
    }

    let now = world.change_tick();
    world.insert_resource(EventSwapTick(now));
}

/// `run_fixed_tick` × `ticks`
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        run_fixed_tick(app);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
