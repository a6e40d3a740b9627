/// Fixed session parameters.
///
/// All simulation coordinates are logical pixels in a `FIELD_WIDTH` ×
/// `FIELD_HEIGHT` field; the display scales them onto the terminal grid.

// ── Field ─────────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 1600;
pub const FIELD_HEIGHT: i32 = 900;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 50;

/// How long the defeat frame stays on screen before the session ends.
pub const GAME_OVER_HOLD_MS: u64 = 1000;

// ── Bird ──────────────────────────────────────────────────────────────────────

pub const BIRD_SIZE: i32 = 100;
pub const BIRD_START: (i32, i32) = (900, 400);
/// Displacement per held direction key per tick.
pub const BIRD_STEP: i32 = 5;

// ── Bombs ─────────────────────────────────────────────────────────────────────

pub const BOMB_COUNT: usize = 6;
pub const BOMB_MIN_RADIUS: i32 = 10;
pub const BOMB_MAX_RADIUS: i32 = 50;
/// Velocity components are drawn from ±1..=±BOMB_MAX_SPEED, never 0.
pub const BOMB_MAX_SPEED: i32 = 5;

// ── Beam ──────────────────────────────────────────────────────────────────────

pub const BEAM_WIDTH: i32 = 40;
pub const BEAM_HEIGHT: i32 = 20;
pub const BEAM_VELOCITY: (i32, i32) = (5, 0);

// ── Explosion ─────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: i32 = 100;
pub const EXPLOSION_LIFE: i32 = 100;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const LIMIT_START: i64 = 10_000_000_000;
/// The limit drops by `frame / LIMIT_DIVISOR` every tick.
pub const LIMIT_DIVISOR: u64 = 50;
pub const SCORE_ANCHOR: (i32, i32) = (100, FIELD_HEIGHT - 50);
pub const LIMIT_ANCHOR: (i32, i32) = (100, FIELD_HEIGHT - 100);

/// Per-session knobs consumed by `compute::init_state`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub bomb_count: usize,
    pub limit_start: i64,
    /// Centre of the bird at session start.
    pub bird_start: (i32, i32),
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bomb_count: BOMB_COUNT,
            limit_start: LIMIT_START,
            bird_start: BIRD_START,
            tick_rate: TICK_RATE,
        }
    }
}

impl GameConfig {
    /// Milliseconds per tick at the configured rate.
    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.tick_rate.max(1))
    }
}
