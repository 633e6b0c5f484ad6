use std::time::{Duration, Instant};

use castle_defense::entities::*;
use castle_defense::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── IntervalTimer ─────────────────────────────────────────────────────────────

#[test]
fn timer_waits_a_full_period() {
    let t0 = Instant::now();
    let mut timer = IntervalTimer::start(ms(3000), t0);
    assert!(!timer.poll(t0));
    assert!(!timer.poll(t0 + ms(2999)));
    assert!(timer.poll(t0 + ms(3000)));
    assert!(!timer.poll(t0 + ms(3001)));
    assert!(timer.poll(t0 + ms(6000)));
}

#[test]
fn late_poll_fires_once_without_backlog() {
    let t0 = Instant::now();
    let mut timer = IntervalTimer::start(ms(1000), t0);
    let late = t0 + ms(10_500);
    assert!(timer.poll(late));
    assert!(!timer.poll(late));
    assert_eq!(timer.next_fire(), late + ms(1000));
}

#[test]
fn spawn_timers_use_their_own_intervals() {
    let t0 = Instant::now();
    let timers = SpawnTimers::start(SpawnIntervals::default(), t0);
    assert_eq!(timers.enemy.next_fire(), t0 + ENEMY_SPAWN_INTERVAL);
    assert_eq!(timers.power_up.next_fire(), t0 + POWER_UP_SPAWN_INTERVAL);
}

#[test]
fn default_intervals() {
    let i = SpawnIntervals::default();
    assert_eq!(i.enemy, ms(3000));
    assert_eq!(i.power_up, ms(10_000));
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_on_top_edge() {
    let mut w = World::new(800.0, 600.0);
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_enemy(&mut w, &mut rng);
    }
    assert_eq!(w.entities.enemies.len(), 50);
    for e in &w.entities.enemies {
        assert_eq!(e.rect.y, 0.0);
        assert!(e.rect.x >= 0.0 && e.rect.x < 800.0);
        assert_eq!(e.rect.width, ENEMY_SIZE);
    }
}

#[test]
fn power_up_spawns_in_upper_half() {
    let mut w = World::new(800.0, 600.0);
    let mut rng = seeded_rng();
    for _ in 0..50 {
        spawn_power_up(&mut w, &mut rng);
    }
    assert_eq!(w.entities.power_ups.len(), 50);
    for p in &w.entities.power_ups {
        assert!(p.rect.x >= 0.0 && p.rect.x < 800.0);
        assert!(p.rect.y >= 0.0 && p.rect.y < 300.0);
        assert_eq!(p.rect.width, POWER_UP_SIZE);
    }
}

#[test]
fn spawning_is_deterministic_with_seed() {
    let mut a = World::new(800.0, 600.0);
    let mut b = World::new(800.0, 600.0);
    spawn_enemy(&mut a, &mut seeded_rng());
    spawn_enemy(&mut b, &mut seeded_rng());
    assert_eq!(a.entities.enemies, b.entities.enemies);
}
