/// All game entity types — pure data, no game logic.

use crate::config::BIRD_STEP;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in logical pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Negative sizes are clamped to zero.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// A `w` × `h` rectangle whose centre sits at `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Strict overlap: rectangles that merely share an edge do not intersect,
    /// and an empty rectangle intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-tick displacement `(dx, dy)`.
pub type Delta = (i32, i32);

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

/// Direction keys held during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }
}

/// Everything the loop feeds into one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    /// A beam was requested this tick.
    pub fire: bool,
    /// Out-of-band quit signal.
    pub quit: bool,
}

// ── Bird (player) ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirdSprite {
    /// Normal flight, keyed by the displacement used this tick.
    Facing(Delta),
    /// Shown on the frame a bomb is destroyed.
    Cheer,
    /// Shown once the session is lost.
    Defeat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub rect: Rect,
    pub sprite: BirdSprite,
}

impl Bird {
    /// Key → displacement table.  Diagonals are the sum of two entries.
    pub const DELTA: [(Key, Delta); 4] = [
        (Key::Up, (0, -BIRD_STEP)),
        (Key::Down, (0, BIRD_STEP)),
        (Key::Left, (-BIRD_STEP, 0)),
        (Key::Right, (BIRD_STEP, 0)),
    ];

    /// Sprite used before the first move.
    pub const DEFAULT_FACING: Delta = (BIRD_STEP, 0);
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
    Black,
}

impl BombColor {
    pub const PALETTE: [BombColor; 8] = [
        BombColor::Red,
        BombColor::Yellow,
        BombColor::Green,
        BombColor::Cyan,
        BombColor::Blue,
        BombColor::Magenta,
        BombColor::White,
        BombColor::Black,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    /// Bounding square of side `2 * radius`.
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
    pub radius: i32,
    pub color: BombColor,
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
}

/// One of the four mirrored variants of the explosion sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionFrame {
    FlipH,
    FlipHV,
    FlipV,
    Plain,
}

impl ExplosionFrame {
    const CYCLE: [ExplosionFrame; 4] = [
        ExplosionFrame::FlipH,
        ExplosionFrame::FlipHV,
        ExplosionFrame::FlipV,
        ExplosionFrame::Plain,
    ];

    /// Frame for a given remaining lifetime, cycling on `life % 4`.
    pub fn from_life(life: i32) -> Self {
        Self::CYCLE[life.rem_euclid(4) as usize]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks; the explosion is pruned once this is ≤ 0.
    pub life: i32,
    pub frame: ExplosionFrame,
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    pub value: i64,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    BombHit,
    LimitExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameOverCause),
    Quit,
}

/// Notable things that happened during the most recent tick.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    BeamFired,
    BombDestroyed { center: (i32, i32) },
    GameOver(GameOverCause),
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub bird: Bird,
    pub bombs: Vec<Bomb>,
    /// Only one beam is ever in flight; firing again replaces it.
    pub beam: Option<Beam>,
    pub explosions: Vec<Explosion>,
    pub score: Score,
    pub limit: Limit,
    pub status: GameStatus,
    /// Ticks elapsed since the session started.
    pub frame: u64,
    /// Events produced by the tick that built this state.
    pub events: Vec<FrameEvent>,
}
