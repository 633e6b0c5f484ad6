//! Game loop driver and lifecycle controller.
//!
//! `Game` owns the world, the spawn timer handles and the asset readiness
//! flags.  The host calls `frame` once per display refresh and
//! `poll_spawners` on every loop iteration; both are no-ops unless the game
//! is running.
use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::assets::AssetKind;
use crate::compute::{self, collision, motion};
use crate::entities::World;
use crate::input::{Action, Movement};
use crate::spawner::{spawn_enemy, spawn_power_up, SpawnIntervals, SpawnTimers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; nothing was updated.
    Skipped,
    Advanced,
    /// The castle fell this frame.  The world has already been reset.
    GameOver { final_score: u32 },
}

/// Entities created by one `poll_spawners` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spawned {
    pub enemies: u32,
    pub power_ups: u32,
}

/// One-shot readiness flags, set when each asset arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    pub castle: bool,
    pub knight: bool,
}

#[derive(Debug)]
pub struct Game {
    pub world: World,
    status: Status,
    timers: Option<SpawnTimers>,
    intervals: SpawnIntervals,
    assets: Readiness,
    final_score: Option<u32>,
}

impl Game {
    pub fn new(width: f32, height: f32, intervals: SpawnIntervals) -> Self {
        Self {
            world: World::new(width, height),
            status: Status::Idle,
            timers: None,
            intervals,
            assets: Readiness::default(),
            final_score: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn readiness(&self) -> Readiness {
        self.assets
    }

    /// Score of the last game lost, shown until the next start or reset.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn timers(&self) -> Option<&SpawnTimers> {
        self.timers.as_ref()
    }

    // ── Assets ────────────────────────────────────────────────────────────────

    /// Record that an asset finished loading.  Repeated signals are ignored.
    pub fn asset_ready(&mut self, kind: AssetKind) {
        match kind {
            AssetKind::Castle if !self.assets.castle => {
                self.assets.castle = true;
                self.world.place_castle();
                info!("castle ready");
            }
            AssetKind::Knight if !self.assets.knight => {
                self.assets.knight = true;
                info!("knight sprite ready");
            }
            _ => {}
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Shoot => self.shoot(),
            Action::Start => self.start(now),
            Action::TogglePause => self.toggle_pause(now),
            Action::Reset => self.reset(),
            // The host owns the process; nothing to do in here.
            Action::Quit => {}
        }
    }

    pub fn start(&mut self, now: Instant) {
        if !matches!(self.status, Status::Idle | Status::GameOver) {
            return;
        }
        self.final_score = None;
        self.set_running(now);
        info!("game started");
    }

    pub fn pause(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.status = Status::Paused;
        self.world.state.paused = true;
        self.timers = None;
        info!("game paused");
    }

    pub fn resume(&mut self, now: Instant) {
        if self.status != Status::Paused {
            return;
        }
        self.set_running(now);
        info!("game resumed");
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(now),
            Status::Idle | Status::GameOver => {}
        }
    }

    /// Full in-process reinitialisation: entities, health and score are
    /// reset and the timers cancelled.  Loaded assets stay loaded.
    pub fn reset(&mut self) {
        self.reinitialise();
        self.status = Status::Idle;
        self.final_score = None;
        info!("game reset");
    }

    fn set_running(&mut self, now: Instant) {
        self.status = Status::Running;
        self.world.state.paused = false;
        self.timers = Some(SpawnTimers::start(self.intervals, now));
    }

    fn reinitialise(&mut self) {
        self.timers = None;
        self.world = World::new(self.world.width, self.world.height);
        if self.assets.castle {
            self.world.place_castle();
        }
    }

    // ── Per-tick work ─────────────────────────────────────────────────────────

    pub fn shoot(&mut self) {
        if self.status == Status::Running {
            compute::shoot(&mut self.world);
        }
    }

    /// Fire whichever spawn timers are due.
    pub fn poll_spawners(&mut self, now: Instant, rng: &mut impl Rng) -> Spawned {
        let mut spawned = Spawned::default();
        if self.status != Status::Running {
            return spawned;
        }
        let Some(timers) = self.timers.as_mut() else {
            return spawned;
        };

        // The enemy timer keeps ticking before the sprite loads; it just
        // produces nothing.
        if timers.enemy.poll(now) && self.assets.knight {
            spawn_enemy(&mut self.world, rng);
            spawned.enemies += 1;
        }
        if timers.power_up.poll(now) {
            spawn_power_up(&mut self.world, rng);
            spawned.power_ups += 1;
        }
        spawned
    }

    /// One frame of the game loop: input → motion → collisions.
    pub fn frame(&mut self, movement: Movement) -> FrameOutcome {
        if self.status != Status::Running {
            return FrameOutcome::Skipped;
        }
        let world = &mut self.world;

        compute::move_player(world, movement.left, movement.right);
        motion::advance_all(world);

        collision::arrows_vs_enemies(world);
        let castle = collision::enemies_vs_castle(world);
        if castle.fallen {
            let final_score = world.state.score;
            self.game_over(final_score);
            return FrameOutcome::GameOver { final_score };
        }
        collision::power_ups_vs_player(world);

        FrameOutcome::Advanced
    }

    fn game_over(&mut self, final_score: u32) {
        info!(final_score, "castle fallen");
        self.reinitialise();
        self.status = Status::GameOver;
        self.final_score = Some(final_score);
    }
}
