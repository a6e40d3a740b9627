/// Pure game-logic functions.
///
/// Every public function takes immutable references (and, where needed, an
/// RNG handle) and returns brand-new values.  Side effects are limited to the
/// injected RNG, which only matters while building a session.

use rand::Rng;

use crate::config::{
    GameConfig, BEAM_HEIGHT, BEAM_VELOCITY, BEAM_WIDTH, BIRD_SIZE, BOMB_MAX_RADIUS,
    BOMB_MAX_SPEED, BOMB_MIN_RADIUS, EXPLOSION_LIFE, EXPLOSION_SIZE, FIELD_HEIGHT, FIELD_WIDTH,
    LIMIT_DIVISOR,
};
use crate::entities::{
    Beam, Bird, BirdSprite, Bomb, BombColor, Explosion, ExplosionFrame, FrameEvent,
    GameOverCause, GameState, GameStatus, HeldKeys, Limit, Rect, Score, TickInput,
};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// `(within horizontal bounds, within vertical bounds)` of the field.
pub fn check_bound(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0 && rect.right() <= FIELD_WIDTH;
    let vertical = rect.top() >= 0 && rect.bottom() <= FIELD_HEIGHT;
    (horizontal, vertical)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session state.  All randomness (bomb placement, size,
/// colour and velocity) is drawn from `rng`.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let (cx, cy) = config.bird_start;
    GameState {
        bird: Bird {
            rect: Rect::centered_at(cx, cy, BIRD_SIZE, BIRD_SIZE),
            sprite: BirdSprite::Facing(Bird::DEFAULT_FACING),
        },
        bombs: (0..config.bomb_count).map(|_| spawn_bomb(rng)).collect(),
        beam: None,
        explosions: Vec::new(),
        score: Score::default(),
        limit: Limit {
            value: config.limit_start,
        },
        status: GameStatus::Running,
        frame: 0,
        events: Vec::new(),
    }
}

/// Non-zero speed in `-BOMB_MAX_SPEED..=BOMB_MAX_SPEED`.
fn random_speed(rng: &mut impl Rng) -> i32 {
    let magnitude = rng.gen_range(1..=BOMB_MAX_SPEED);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// A bomb fully inside the field.  A bomb straddling an edge would flip its
/// velocity every tick and stay pinned there.
pub fn spawn_bomb(rng: &mut impl Rng) -> Bomb {
    let radius = rng.gen_range(BOMB_MIN_RADIUS..=BOMB_MAX_RADIUS);
    let color = BombColor::PALETTE[rng.gen_range(0..BombColor::PALETTE.len())];
    let cx = rng.gen_range(radius..=FIELD_WIDTH - radius);
    let cy = rng.gen_range(radius..=FIELD_HEIGHT - radius);
    Bomb {
        rect: Rect::centered_at(cx, cy, 2 * radius, 2 * radius),
        vx: random_speed(rng),
        vy: random_speed(rng),
        radius,
        color,
    }
}

/// A beam leaving the bird's right edge, vertically centred on it.
pub fn fire_beam(bird: &Bird) -> Beam {
    let (_, cy) = bird.rect.center();
    Beam {
        rect: Rect::new(
            bird.rect.right(),
            cy - BEAM_HEIGHT / 2,
            BEAM_WIDTH,
            BEAM_HEIGHT,
        ),
        vx: BEAM_VELOCITY.0,
        vy: BEAM_VELOCITY.1,
    }
}

pub fn spawn_explosion(bomb: &Bomb) -> Explosion {
    let (cx, cy) = bomb.rect.center();
    Explosion {
        rect: Rect::centered_at(cx, cy, EXPLOSION_SIZE, EXPLOSION_SIZE),
        life: EXPLOSION_LIFE,
        frame: ExplosionFrame::from_life(EXPLOSION_LIFE),
    }
}

// ── Per-entity updates (pure) ────────────────────────────────────────────────

/// Move the bird by the sum of the held keys' displacements.  A move that
/// would leave the field on either axis is reverted entirely.
pub fn move_bird(bird: &Bird, held: &HeldKeys) -> Bird {
    let delta = Bird::DELTA
        .iter()
        .filter(|(key, _)| held.is_held(*key))
        .fold((0, 0), |(dx, dy), (_, (kx, ky))| (dx + kx, dy + ky));

    let moved = bird.rect.moved(delta.0, delta.1);
    let rect = if check_bound(&moved) == (true, true) {
        moved
    } else {
        bird.rect
    };

    Bird {
        rect,
        sprite: BirdSprite::Facing(delta),
    }
}

pub fn set_bird_sprite(bird: &Bird, sprite: BirdSprite) -> Bird {
    Bird {
        sprite,
        ..bird.clone()
    }
}

/// Reflect off any violated field edge (each axis independently), then move.
pub fn update_bomb(bomb: &Bomb) -> Bomb {
    let (horizontal, vertical) = check_bound(&bomb.rect);
    let vx = if horizontal { bomb.vx } else { -bomb.vx };
    let vy = if vertical { bomb.vy } else { -bomb.vy };
    Bomb {
        rect: bomb.rect.moved(vx, vy),
        vx,
        vy,
        ..bomb.clone()
    }
}

/// Advance the beam; `None` once it crosses a horizontal field edge.
pub fn update_beam(beam: &Beam) -> Option<Beam> {
    let rect = beam.rect.moved(beam.vx, beam.vy);
    let (horizontal, _) = check_bound(&rect);
    horizontal.then(|| Beam { rect, ..beam.clone() })
}

pub fn update_explosion(explosion: &Explosion) -> Explosion {
    let life = explosion.life - 1;
    Explosion {
        life,
        frame: ExplosionFrame::from_life(life),
        ..explosion.clone()
    }
}

/// How much the limit drops on the tick that starts at `frame`.
pub fn limit_decrement(frame: u64) -> i64 {
    i64::try_from(frame / LIMIT_DIVISOR).unwrap_or(i64::MAX)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Terminal state built mid-scan: nothing after the point of failure is
/// applied, so score, limit, bird position and frame stay as they were.
fn game_over(
    state: &GameState,
    bombs: Vec<Bomb>,
    beam: Option<Beam>,
    cause: GameOverCause,
    mut events: Vec<FrameEvent>,
) -> GameState {
    events.push(FrameEvent::GameOver(cause));
    GameState {
        bird: set_bird_sprite(&state.bird, BirdSprite::Defeat),
        bombs,
        beam,
        status: GameStatus::GameOver(cause),
        events,
        ..state.clone()
    }
}

/// Advance the simulation by one tick.
///
/// Order: quit → fire → bomb scan (move, bird hit, limit, beam hit) → bird
/// move → explosions → beam → limit and frame counter.  Once the session has
/// left `Running` the state is returned unchanged.
pub fn tick(state: &GameState, input: &TickInput) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    if input.quit {
        return GameState {
            status: GameStatus::Quit,
            events: Vec::new(),
            ..state.clone()
        };
    }

    let mut events = Vec::new();

    // ── 1. Fire ──────────────────────────────────────────────────────────────
    let mut beam = if input.fire {
        events.push(FrameEvent::BeamFired);
        Some(fire_beam(&state.bird))
    } else {
        state.beam.clone()
    };

    // ── 2. Bomb scan ─────────────────────────────────────────────────────────
    let mut bombs: Vec<Bomb> = Vec::with_capacity(state.bombs.len());
    let mut spawned: Vec<Explosion> = Vec::new();
    let mut score = state.score;

    for (i, bomb) in state.bombs.iter().enumerate() {
        let bomb = update_bomb(bomb);

        let cause = if bomb.rect.intersects(&state.bird.rect) {
            Some(GameOverCause::BombHit)
        } else if state.limit.value <= 0 {
            Some(GameOverCause::LimitExhausted)
        } else {
            None
        };
        if let Some(cause) = cause {
            bombs.push(bomb);
            bombs.extend(state.bombs[i + 1..].iter().cloned());
            return game_over(state, bombs, beam, cause, events);
        }

        let hit = beam
            .as_ref()
            .map_or(false, |b| bomb.rect.intersects(&b.rect));
        if hit {
            beam = None;
            score.value += 1;
            spawned.push(spawn_explosion(&bomb));
            events.push(FrameEvent::BombDestroyed {
                center: bomb.rect.center(),
            });
        } else {
            bombs.push(bomb);
        }
    }

    // ── 3. Bird ──────────────────────────────────────────────────────────────
    let mut bird = move_bird(&state.bird, &input.held);
    if !spawned.is_empty() {
        bird = set_bird_sprite(&bird, BirdSprite::Cheer);
    }

    // ── 4. Explosions: advance, prune, then add this tick's ─────────────────
    let mut explosions: Vec<Explosion> = state
        .explosions
        .iter()
        .map(update_explosion)
        .filter(|e| e.life > 0)
        .collect();
    explosions.extend(spawned);

    // ── 5. Beam ──────────────────────────────────────────────────────────────
    let beam = beam.and_then(|b| update_beam(&b));

    // ── 6. Limit & frame counter ─────────────────────────────────────────────
    let limit = Limit {
        value: state
            .limit
            .value
            .saturating_sub(limit_decrement(state.frame)),
    };

    GameState {
        bird,
        bombs,
        beam,
        explosions,
        score,
        limit,
        status: GameStatus::Running,
        frame: state.frame + 1,
        events,
    }
}
