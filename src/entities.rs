//! All game entity types and the shared game state — pure data, no per-frame logic.
//!
//! Coordinates are logical units with the origin at the top-left of the play
//! area; y grows downward.

// ── Fixed sizes & limits ──────────────────────────────────────────────────────

pub const MAX_CASTLE_HEALTH: u32 = 10;
/// Health restored by one power-up.
pub const HEALTH_BOOST: u32 = 2;
pub const CASTLE_SIZE: f32 = 100.0;
pub const PLAYER_SIZE: f32 = 40.0;
pub const ENEMY_SIZE: f32 = 64.0;
pub const POWER_UP_SIZE: f32 = 30.0;
/// Length of the arrow shaft drawn behind its head.
pub const ARROW_LENGTH: f32 = 20.0;

/// Distance of the player's top edge from the bottom of the play area.
const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned box: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Castle {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

/// A knight marching on the castle.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
}

impl Enemy {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::square(x, y, ENEMY_SIZE),
        }
    }
}

/// Falling health boost.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
}

impl PowerUp {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::square(x, y, POWER_UP_SIZE),
        }
    }
}

/// An arrow in flight.  The tail stays where the shot was loosed; only the
/// head advances.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub tail: Point,
    pub head: Point,
}

impl Arrow {
    pub fn loosed_from(origin: Point) -> Self {
        Self {
            tail: origin,
            head: origin,
        }
    }
}

// ── Entity store ──────────────────────────────────────────────────────────────

/// Owns every transient entity.  Motion and collision code only borrow these
/// collections and remove by index.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    pub arrows: Vec<Arrow>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
}

impl EntityStore {
    pub fn clear(&mut self) {
        self.arrows.clear();
        self.enemies.clear();
        self.power_ups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty() && self.enemies.is_empty() && self.power_ups.is_empty()
    }
}

// ── Score & health ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// 0 ..= MAX_CASTLE_HEALTH; 0 means the castle has fallen.
    pub castle_health: u32,
    pub score: u32,
    pub paused: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            castle_health: MAX_CASTLE_HEALTH,
            score: 0,
            paused: false,
        }
    }
}

impl GameState {
    pub fn status_line(&self) -> String {
        format!(
            "Castle Health: {} | Score: {}",
            self.castle_health, self.score
        )
    }
}

// ── Master world ──────────────────────────────────────────────────────────────

/// Everything the frame loop reads and writes.
#[derive(Clone, Debug)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub player: Player,
    /// `None` until the castle image has loaded.
    pub castle: Option<Castle>,
    pub entities: EntityStore,
    pub state: GameState,
    /// The status surface; rewritten whenever health or score changes.
    pub hud: String,
}

impl World {
    /// Fresh world for a play area of the given size.  Dimensions are floored
    /// at one unit so random placement always has a non-empty range.
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let state = GameState::default();
        let hud = state.status_line();
        Self {
            width,
            height,
            player: Player {
                rect: Rect::square(
                    width / 2.0 - PLAYER_SIZE / 2.0,
                    height - PLAYER_BOTTOM_OFFSET,
                    PLAYER_SIZE,
                ),
            },
            castle: None,
            entities: EntityStore::default(),
            state,
            hud,
        }
    }

    /// Put the castle in the middle of the play area.
    pub fn place_castle(&mut self) {
        self.castle = Some(Castle {
            rect: Rect::square(
                self.width / 2.0 - CASTLE_SIZE / 2.0,
                self.height / 2.0 - CASTLE_SIZE / 2.0,
                CASTLE_SIZE,
            ),
        });
    }

    pub fn refresh_hud(&mut self) {
        self.hud = self.state.status_line();
    }

    pub fn award(&mut self, points: u32) {
        self.state.score = self.state.score.saturating_add(points);
        self.refresh_hud();
    }

    pub fn damage_castle(&mut self) {
        self.state.castle_health = self.state.castle_health.saturating_sub(1);
        self.refresh_hud();
    }

    pub fn boost_castle(&mut self, amount: u32) {
        self.state.castle_health = (self.state.castle_health + amount).min(MAX_CASTLE_HEALTH);
        self.refresh_hud();
    }

    pub fn castle_fallen(&self) -> bool {
        self.state.castle_health == 0
    }
}
