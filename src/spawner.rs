//! Timer-driven spawning of enemies and power-ups.
//!
//! The timers are polled by the host loop with the current `Instant`; they
//! never fire more than once per poll, so a late poll does not build up a
//! backlog of spawns.
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::entities::{Enemy, PowerUp, World};

pub const ENEMY_SPAWN_INTERVAL: Duration = Duration::from_millis(3000);
pub const POWER_UP_SPAWN_INTERVAL: Duration = Duration::from_millis(10_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnIntervals {
    pub enemy: Duration,
    pub power_up: Duration,
}

impl Default for SpawnIntervals {
    fn default() -> Self {
        Self {
            enemy: ENEMY_SPAWN_INTERVAL,
            power_up: POWER_UP_SPAWN_INTERVAL,
        }
    }
}

// ── Timers ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    next_fire: Instant,
}

impl IntervalTimer {
    /// First firing is one full period after `now`.
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_fire: now + period,
        }
    }

    /// Returns `true` if the timer is due, and schedules the next firing one
    /// period from `now` rather than from the missed deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_fire {
            return false;
        }
        self.next_fire = now + self.period;
        true
    }

    pub fn next_fire(&self) -> Instant {
        self.next_fire
    }
}

/// Handles for both spawn timers.  Dropping this cancels them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnTimers {
    pub enemy: IntervalTimer,
    pub power_up: IntervalTimer,
}

impl SpawnTimers {
    pub fn start(intervals: SpawnIntervals, now: Instant) -> Self {
        Self {
            enemy: IntervalTimer::start(intervals.enemy, now),
            power_up: IntervalTimer::start(intervals.power_up, now),
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// New knight somewhere along the top edge.
pub fn spawn_enemy(world: &mut World, rng: &mut impl Rng) {
    let x = rng.gen_range(0.0..world.width);
    world.entities.enemies.push(Enemy::at(x, 0.0));
    debug!(x, "enemy spawned");
}

/// New power-up somewhere in the upper half of the play area.
pub fn spawn_power_up(world: &mut World, rng: &mut impl Rng) {
    let x = rng.gen_range(0.0..world.width);
    let y = rng.gen_range(0.0..world.height / 2.0);
    world.entities.power_ups.push(PowerUp::at(x, y));
    debug!(x, y, "power-up spawned");
}
