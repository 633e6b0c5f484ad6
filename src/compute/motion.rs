use crate::entities::World;

pub const ARROW_SPEED: f32 = 10.0;
pub const ENEMY_SPEED: f32 = 2.0;
pub const POWER_UP_SPEED: f32 = 1.0;

/// Move every arrow head up and discard arrows that have left the top.
pub fn advance_arrows(world: &mut World) {
    let arrows = &mut world.entities.arrows;
    for arrow in arrows.iter_mut() {
        arrow.head.y -= ARROW_SPEED;
    }
    arrows.retain(|a| a.head.y >= 0.0);
}

/// Step every enemy toward the castle centre.  Does nothing until the castle
/// exists.
pub fn advance_enemies(world: &mut World) {
    let Some(castle) = world.castle.as_ref() else {
        return;
    };
    let target = castle.rect.center();
    let (width, height) = (world.width, world.height);

    let enemies = &mut world.entities.enemies;
    for enemy in enemies.iter_mut() {
        let from = enemy.rect.center();
        // Heading is recomputed every frame (seek movement).
        let angle = (target.y - from.y).atan2(target.x - from.x);
        enemy.rect.x += angle.cos() * ENEMY_SPEED;
        enemy.rect.y += angle.sin() * ENEMY_SPEED;
    }

    // Normally the castle catches them first; this only cleans up strays.
    enemies.retain(|e| e.rect.y <= height && e.rect.x >= 0.0 && e.rect.x <= width);
}

/// Let power-ups fall and discard those below the bottom edge.
pub fn advance_power_ups(world: &mut World) {
    let height = world.height;
    let power_ups = &mut world.entities.power_ups;
    for power_up in power_ups.iter_mut() {
        power_up.rect.y += POWER_UP_SPEED;
    }
    power_ups.retain(|p| p.rect.y <= height);
}

/// Advance all three entity kinds, in the order the frame loop uses.
pub fn advance_all(world: &mut World) {
    advance_arrows(world);
    advance_enemies(world);
    advance_power_ups(world);
}
