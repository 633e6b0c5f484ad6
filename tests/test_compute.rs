use castle_defense::compute::collision::*;
use castle_defense::compute::motion::*;
use castle_defense::compute::*;
use castle_defense::entities::*;

fn make_world() -> World {
    World::new(800.0, 600.0)
}

/// Enemy whose centre sits at (cx, cy).
fn enemy_centred(cx: f32, cy: f32) -> Enemy {
    Enemy::at(cx - ENEMY_SIZE / 2.0, cy - ENEMY_SIZE / 2.0)
}

fn power_up_centred(cx: f32, cy: f32) -> PowerUp {
    PowerUp::at(cx - POWER_UP_SIZE / 2.0, cy - POWER_UP_SIZE / 2.0)
}

fn arrow_at(x: f32, y: f32) -> Arrow {
    Arrow::loosed_from(Point::new(x, y))
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_left_and_right() {
    let mut w = make_world(); // x=380
    move_player(&mut w, true, false);
    assert_eq!(w.player.rect.x, 375.0);
    move_player(&mut w, false, true);
    move_player(&mut w, false, true);
    assert_eq!(w.player.rect.x, 385.0);
}

#[test]
fn move_both_cancels_out() {
    let mut w = make_world();
    move_player(&mut w, true, true);
    assert_eq!(w.player.rect.x, 380.0);
}

#[test]
fn move_left_clamps_at_zero() {
    let mut w = make_world();
    w.player.rect.x = 3.0;
    move_player(&mut w, true, false);
    assert_eq!(w.player.rect.x, 0.0);
    move_player(&mut w, true, false);
    assert_eq!(w.player.rect.x, 0.0);
}

#[test]
fn move_right_clamps_at_edge() {
    let mut w = make_world();
    w.player.rect.x = 758.0; // max is 800 - 40 = 760
    move_player(&mut w, false, true);
    assert_eq!(w.player.rect.x, 760.0);
    move_player(&mut w, false, true);
    assert_eq!(w.player.rect.x, 760.0);
}

#[test]
fn move_ignores_vertical() {
    let mut w = make_world();
    move_player(&mut w, true, false);
    assert_eq!(w.player.rect.y, 540.0);
}

// ── shoot ─────────────────────────────────────────────────────────────────────

#[test]
fn shoot_looses_arrow_from_player_top_centre() {
    let mut w = make_world();
    shoot(&mut w);
    assert_eq!(w.entities.arrows.len(), 1);
    let a = &w.entities.arrows[0];
    assert_eq!(a.head, Point::new(400.0, 540.0));
    assert_eq!(a.tail, a.head);
}

#[test]
fn shoot_has_no_cap() {
    let mut w = make_world();
    for _ in 0..5 {
        shoot(&mut w);
    }
    assert_eq!(w.entities.arrows.len(), 5);
}

// ── Motion: arrows ────────────────────────────────────────────────────────────

#[test]
fn arrow_head_moves_up_tail_stays() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(100.0, 300.0));
    advance_arrows(&mut w);
    let a = &w.entities.arrows[0];
    assert_eq!(a.head.y, 290.0);
    assert_eq!(a.tail.y, 300.0);
    assert_eq!(a.head.x, 100.0);
}

#[test]
fn arrow_removed_only_below_zero() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(100.0, 10.0)); // → 0, kept
    w.entities.arrows.push(arrow_at(200.0, 5.0)); // → -5, removed
    advance_arrows(&mut w);
    assert_eq!(w.entities.arrows.len(), 1);
    assert_eq!(w.entities.arrows[0].head, Point::new(100.0, 0.0));
    advance_arrows(&mut w);
    assert!(w.entities.arrows.is_empty());
}

#[test]
fn arrow_head_strictly_decreases_until_removed() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(100.0, 95.0));
    let mut last = 95.0;
    let mut frames = 0;
    while let Some(a) = w.entities.arrows.first() {
        assert!(a.head.y >= 0.0);
        advance_arrows(&mut w);
        if let Some(a) = w.entities.arrows.first() {
            assert!(a.head.y < last);
            last = a.head.y;
        }
        frames += 1;
    }
    // 95 → 85 … 5 → -5: removed on the 10th frame
    assert_eq!(frames, 10);
}

#[test]
fn adjacent_arrows_both_removed_in_one_pass() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(1.0, 2.0));
    w.entities.arrows.push(arrow_at(2.0, 3.0));
    w.entities.arrows.push(arrow_at(3.0, 50.0));
    advance_arrows(&mut w);
    assert_eq!(w.entities.arrows.len(), 1);
    assert_eq!(w.entities.arrows[0].head.x, 3.0);
}

// ── Motion: enemies ───────────────────────────────────────────────────────────

#[test]
fn enemies_wait_for_castle() {
    let mut w = make_world();
    w.entities.enemies.push(Enemy::at(10.0, 0.0));
    advance_enemies(&mut w);
    assert_eq!(w.entities.enemies[0], Enemy::at(10.0, 0.0));
}

#[test]
fn enemy_moves_straight_down_toward_castle() {
    let mut w = make_world();
    w.place_castle(); // centre (400, 300)
    w.entities.enemies.push(enemy_centred(400.0, 32.0));
    advance_enemies(&mut w);
    let c = w.entities.enemies[0].rect.center();
    assert!((c.x - 400.0).abs() < 1e-3);
    assert!((c.y - 34.0).abs() < 1e-3);
}

#[test]
fn enemy_steps_two_units_per_frame() {
    let mut w = make_world();
    w.place_castle();
    w.entities.enemies.push(enemy_centred(32.0, 32.0));
    let before = w.entities.enemies[0].rect.center();
    advance_enemies(&mut w);
    let after = w.entities.enemies[0].rect.center();
    assert!((before.distance_to(after) - ENEMY_SPEED).abs() < 1e-3);
}

#[test]
fn enemy_distance_to_castle_never_increases() {
    let mut w = make_world();
    w.place_castle();
    let target = Point::new(400.0, 300.0);
    w.entities.enemies.push(enemy_centred(40.0, 32.0));
    w.entities.enemies.push(enemy_centred(760.0, 32.0));

    let mut last: Vec<f32> = w
        .entities
        .enemies
        .iter()
        .map(|e| e.rect.center().distance_to(target))
        .collect();
    for _ in 0..100 {
        advance_enemies(&mut w);
        assert_eq!(w.entities.enemies.len(), 2);
        for (e, prev) in w.entities.enemies.iter().zip(last.iter_mut()) {
            let d = e.rect.center().distance_to(target);
            assert!(d <= *prev + 1e-3, "distance grew: {} -> {}", prev, d);
            *prev = d;
        }
    }
}

#[test]
fn enemy_out_of_bounds_removed() {
    let mut w = make_world();
    w.place_castle();
    // Left of the board heading right → still x<0 after one step
    w.entities.enemies.push(Enemy::at(-10.0, 100.0));
    // Below the board
    w.entities.enemies.push(Enemy::at(300.0, 650.0));
    // In bounds
    w.entities.enemies.push(Enemy::at(100.0, 100.0));
    advance_enemies(&mut w);
    assert_eq!(w.entities.enemies.len(), 1);
    assert!(w.entities.enemies[0].rect.x > 100.0);
}

// ── Motion: power-ups ─────────────────────────────────────────────────────────

#[test]
fn power_up_falls_one_unit() {
    let mut w = make_world();
    w.entities.power_ups.push(PowerUp::at(50.0, 100.0));
    advance_power_ups(&mut w);
    assert_eq!(w.entities.power_ups[0].rect.y, 101.0);
}

#[test]
fn power_up_removed_below_bottom() {
    let mut w = make_world();
    w.entities.power_ups.push(PowerUp::at(50.0, 599.0)); // → 600, kept
    w.entities.power_ups.push(PowerUp::at(60.0, 600.0)); // → 601, removed
    advance_power_ups(&mut w);
    assert_eq!(w.entities.power_ups.len(), 1);
    assert_eq!(w.entities.power_ups[0].rect.y, 600.0);
}

// ── Collision: arrow ↔ enemy ──────────────────────────────────────────────────

#[test]
fn arrow_hits_enemy_within_radius() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(200.0, 200.0));
    w.entities.enemies.push(enemy_centred(200.0, 185.0));
    let hits = arrows_vs_enemies(&mut w);
    assert_eq!(hits, 1);
    assert!(w.entities.arrows.is_empty());
    assert!(w.entities.enemies.is_empty());
    assert_eq!(w.state.score, POINTS_PER_KNIGHT);
    assert_eq!(w.hud, "Castle Health: 10 | Score: 10");
}

#[test]
fn arrow_misses_at_exact_radius() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(200.0, 200.0));
    w.entities.enemies.push(enemy_centred(200.0, 180.0)); // distance == 20
    assert_eq!(arrows_vs_enemies(&mut w), 0);
    assert_eq!(w.entities.arrows.len(), 1);
    assert_eq!(w.entities.enemies.len(), 1);
    assert_eq!(w.state.score, 0);
}

#[test]
fn one_arrow_downs_only_one_enemy() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(200.0, 200.0));
    w.entities.enemies.push(enemy_centred(200.0, 195.0));
    w.entities.enemies.push(enemy_centred(205.0, 200.0));
    assert_eq!(arrows_vs_enemies(&mut w), 1);
    assert!(w.entities.arrows.is_empty());
    assert_eq!(w.entities.enemies.len(), 1);
    assert_eq!(w.state.score, 10);
}

#[test]
fn two_arrows_two_enemies_all_removed() {
    let mut w = make_world();
    w.entities.arrows.push(arrow_at(100.0, 100.0));
    w.entities.arrows.push(arrow_at(500.0, 100.0));
    w.entities.arrows.push(arrow_at(700.0, 500.0)); // no target
    w.entities.enemies.push(enemy_centred(500.0, 95.0));
    w.entities.enemies.push(enemy_centred(100.0, 95.0));
    assert_eq!(arrows_vs_enemies(&mut w), 2);
    assert_eq!(w.entities.arrows, vec![arrow_at(700.0, 500.0)]);
    assert!(w.entities.enemies.is_empty());
    assert_eq!(w.state.score, 20);
}

// ── Collision: enemy ↔ castle ─────────────────────────────────────────────────

#[test]
fn no_castle_no_breach() {
    let mut w = make_world();
    w.entities.enemies.push(enemy_centred(400.0, 300.0));
    assert_eq!(enemies_vs_castle(&mut w), CastleReport::default());
    assert_eq!(w.entities.enemies.len(), 1);
}

#[test]
fn enemy_breaches_castle() {
    let mut w = make_world();
    w.place_castle(); // threshold 50 + 20 = 70
    w.entities.enemies.push(enemy_centred(400.0, 231.0)); // 69 away
    w.entities.enemies.push(enemy_centred(400.0, 230.0)); // 70 away, not yet
    let report = enemies_vs_castle(&mut w);
    assert_eq!(
        report,
        CastleReport {
            breaches: 1,
            fallen: false
        }
    );
    assert_eq!(w.entities.enemies.len(), 1);
    assert_eq!(w.state.castle_health, 9);
    assert_eq!(w.hud, "Castle Health: 9 | Score: 0");
}

#[test]
fn last_breach_fells_castle() {
    let mut w = make_world();
    w.place_castle();
    w.state.castle_health = 1;
    w.entities.enemies.push(enemy_centred(400.0, 300.0));
    w.entities.enemies.push(enemy_centred(410.0, 300.0));
    let report = enemies_vs_castle(&mut w);
    assert_eq!(report.breaches, 2);
    assert!(report.fallen);
    assert_eq!(w.state.castle_health, 0);
    assert!(w.entities.enemies.is_empty());
}

// ── Collision: power-up ↔ player ──────────────────────────────────────────────

#[test]
fn power_up_on_player_clamps_health() {
    let mut w = make_world();
    w.state.castle_health = 8;
    let c = w.player.rect.center();
    w.entities.power_ups.push(power_up_centred(c.x, c.y));
    assert_eq!(power_ups_vs_player(&mut w), 1);
    assert_eq!(w.state.castle_health, 10);
    assert!(w.entities.power_ups.is_empty());
    assert_eq!(w.hud, "Castle Health: 10 | Score: 0");
}

#[test]
fn power_up_at_full_health_still_consumed() {
    let mut w = make_world();
    let c = w.player.rect.center();
    w.entities.power_ups.push(power_up_centred(c.x + 10.0, c.y));
    assert_eq!(power_ups_vs_player(&mut w), 1);
    assert_eq!(w.state.castle_health, MAX_CASTLE_HEALTH);
}

#[test]
fn distant_power_up_not_collected() {
    let mut w = make_world();
    w.state.castle_health = 4;
    let c = w.player.rect.center();
    // threshold = 20 + 15 = 35
    w.entities.power_ups.push(power_up_centred(c.x + 35.0, c.y));
    assert_eq!(power_ups_vs_player(&mut w), 0);
    assert_eq!(w.entities.power_ups.len(), 1);
    assert_eq!(w.state.castle_health, 4);
}
