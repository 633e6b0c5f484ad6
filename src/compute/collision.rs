//! Threshold collision checks.  Each check does a read-only pairwise pass to
//! mark what was hit, then removes the marked entities in one go and applies
//! the score/health effect.
use tracing::debug;

use super::remove_marked;
use crate::entities::{World, HEALTH_BOOST};

pub const ARROW_HIT_RADIUS: f32 = 20.0;
/// Added to the castle's half-width to get the breach distance.
pub const CASTLE_HIT_MARGIN: f32 = 20.0;
pub const POINTS_PER_KNIGHT: u32 = 10;

/// What the enemy ↔ castle check did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastleReport {
    pub breaches: u32,
    pub fallen: bool,
}

// ── Arrow ↔ enemy ─────────────────────────────────────────────────────────────

/// Returns the number of enemies shot down.  An arrow stops at the first
/// enemy it hits, and an enemy can only be hit once.
pub fn arrows_vs_enemies(world: &mut World) -> u32 {
    let mut spent_arrows: Vec<usize> = Vec::new();
    let mut slain: Vec<usize> = Vec::new();

    for (ai, arrow) in world.entities.arrows.iter().enumerate() {
        for (ei, enemy) in world.entities.enemies.iter().enumerate() {
            if slain.contains(&ei) {
                continue;
            }
            if arrow.head.distance_to(enemy.rect.center()) < ARROW_HIT_RADIUS {
                spent_arrows.push(ai);
                slain.push(ei);
                break;
            }
        }
    }

    remove_marked(&mut world.entities.arrows, &spent_arrows);
    remove_marked(&mut world.entities.enemies, &slain);

    let hits = slain.len() as u32;
    if hits > 0 {
        world.award(hits * POINTS_PER_KNIGHT);
        debug!(hits, score = world.state.score, "knights shot down");
    }
    hits
}

// ── Enemy ↔ castle ────────────────────────────────────────────────────────────

/// Every enemy close enough to the castle is removed and costs one point of
/// health.  No-op before the castle exists.
pub fn enemies_vs_castle(world: &mut World) -> CastleReport {
    let Some(castle) = world.castle.as_ref() else {
        return CastleReport::default();
    };
    let center = castle.rect.center();
    let threshold = castle.rect.half_width() + CASTLE_HIT_MARGIN;

    let breached: Vec<usize> = world
        .entities
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.rect.center().distance_to(center) < threshold)
        .map(|(i, _)| i)
        .collect();

    remove_marked(&mut world.entities.enemies, &breached);
    for _ in &breached {
        world.damage_castle();
    }

    if !breached.is_empty() {
        debug!(
            breaches = breached.len(),
            castle_health = world.state.castle_health,
            "castle breached"
        );
    }

    CastleReport {
        breaches: breached.len() as u32,
        fallen: world.castle_fallen(),
    }
}

// ── Power-up ↔ player ─────────────────────────────────────────────────────────

/// Returns the number of power-ups collected; each restores `HEALTH_BOOST`
/// health, capped at full.
pub fn power_ups_vs_player(world: &mut World) -> u32 {
    let player = world.player.rect;
    let center = player.center();

    let collected: Vec<usize> = world
        .entities
        .power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            p.rect.center().distance_to(center) < player.half_width() + p.rect.half_width()
        })
        .map(|(i, _)| i)
        .collect();

    remove_marked(&mut world.entities.power_ups, &collected);
    for _ in &collected {
        world.boost_castle(HEALTH_BOOST);
    }

    if !collected.is_empty() {
        debug!(
            collected = collected.len(),
            castle_health = world.state.castle_health,
            "health boost"
        );
    }
    collected.len() as u32
}
