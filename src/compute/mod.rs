//! Game-logic functions for a single frame.
//!
//! Every function takes the `World` by mutable reference and updates it in
//! place.  Nothing here touches the terminal, the clock or an RNG.
pub mod collision;
pub mod motion;

use crate::entities::{Arrow, Point, World};

/// Horizontal player speed in units per frame.
pub const PLAYER_SPEED: f32 = 5.0;

// ── Input-driven state transitions ───────────────────────────────────────────

/// Apply held movement keys.  Left is applied before right, so holding both
/// leaves the player where it started (unless clamped at an edge).
pub fn move_player(world: &mut World, left: bool, right: bool) {
    let max_x = world.width - world.player.rect.width;
    let rect = &mut world.player.rect;
    if left && rect.x > 0.0 {
        rect.x = (rect.x - PLAYER_SPEED).max(0.0);
    }
    if right && rect.x < max_x {
        rect.x = (rect.x + PLAYER_SPEED).min(max_x);
    }
}

/// Loose an arrow from the top-centre of the player.
pub fn shoot(world: &mut World) {
    let rect = world.player.rect;
    let origin = Point::new(rect.x + rect.width / 2.0, rect.y);
    world.entities.arrows.push(Arrow::loosed_from(origin));
}

/// Drop every item whose index was marked during a read-only pass.
pub(crate) fn remove_marked<T>(items: &mut Vec<T>, marked: &[usize]) {
    if marked.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !marked.contains(&index);
        index += 1;
        keep
    });
}
