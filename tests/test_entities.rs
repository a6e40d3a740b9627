use bomb_dodge::config::*;
use bomb_dodge::entities::*;

#[test]
fn entity_enums_eq() {
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::Quit);
    assert_ne!(
        GameStatus::GameOver(GameOverCause::BombHit),
        GameStatus::GameOver(GameOverCause::LimitExhausted)
    );
    assert_eq!(BirdSprite::Facing((5, 0)), BirdSprite::Facing((5, 0)));
    assert_ne!(BirdSprite::Facing((5, 0)), BirdSprite::Facing((-5, 0)));
    assert_ne!(BirdSprite::Cheer, BirdSprite::Defeat);
}

#[test]
fn rect_new_clamps_negative_size() {
    let r = Rect::new(10, 20, -5, -1);
    assert_eq!((r.w, r.h), (0, 0));
}

#[test]
fn rect_edges_and_center() {
    let r = Rect::centered_at(100, 50, 40, 20);
    assert_eq!(r.left(), 80);
    assert_eq!(r.right(), 120);
    assert_eq!(r.top(), 40);
    assert_eq!(r.bottom(), 60);
    assert_eq!(r.center(), (100, 50));
    assert_eq!(r.moved(5, -5).center(), (105, 45));
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
    // Sharing an edge is not a collision
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
    // Empty rects never collide
    assert!(!a.intersects(&Rect::new(5, 5, 0, 0)));
}

#[test]
fn rect_contained_intersects() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(40, 40, 10, 10);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

#[test]
fn held_keys_lookup() {
    let held = HeldKeys {
        up: true,
        right: true,
        ..HeldKeys::default()
    };
    assert!(held.is_held(Key::Up));
    assert!(held.is_held(Key::Right));
    assert!(!held.is_held(Key::Down));
    assert!(!held.is_held(Key::Left));
}

#[test]
fn bird_delta_table_has_four_unit_moves() {
    for (_, (dx, dy)) in Bird::DELTA {
        assert_eq!(dx.abs() + dy.abs(), BIRD_STEP);
    }
    assert_eq!(Bird::DEFAULT_FACING, (5, 0));
}

#[test]
fn explosion_frame_cycles_on_life_mod_four() {
    assert_eq!(ExplosionFrame::from_life(100), ExplosionFrame::FlipH);
    assert_eq!(ExplosionFrame::from_life(99), ExplosionFrame::Plain);
    assert_eq!(ExplosionFrame::from_life(98), ExplosionFrame::FlipV);
    assert_eq!(ExplosionFrame::from_life(97), ExplosionFrame::FlipHV);
    assert_eq!(ExplosionFrame::from_life(1), ExplosionFrame::FlipHV);
    assert_eq!(ExplosionFrame::from_life(0), ExplosionFrame::FlipH);
}

#[test]
fn palette_has_eight_distinct_colours() {
    let palette = BombColor::PALETTE;
    for (i, a) in palette.iter().enumerate() {
        for b in &palette[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn default_config_matches_session_constants() {
    let config = GameConfig::default();
    assert_eq!(config.bomb_count, 6);
    assert_eq!(config.tick_rate, 50);
    assert_eq!(config.frame_millis(), 20);
    assert_eq!(config.limit_start, 10_000_000_000);
    assert_eq!(config.bird_start, (900, 400));
    assert_eq!((FIELD_WIDTH, FIELD_HEIGHT), (1600, 900));
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        bird: Bird {
            rect: Rect::centered_at(900, 400, BIRD_SIZE, BIRD_SIZE),
            sprite: BirdSprite::Facing(Bird::DEFAULT_FACING),
        },
        bombs: Vec::new(),
        beam: None,
        explosions: Vec::new(),
        score: Score::default(),
        limit: Limit { value: LIMIT_START },
        status: GameStatus::Running,
        frame: 0,
        events: Vec::new(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.bird.rect.x = 0;
    cloned.score.value = 999;
    cloned.bombs.push(Bomb {
        rect: Rect::new(5, 5, 20, 20),
        vx: 1,
        vy: -1,
        radius: 10,
        color: BombColor::Red,
    });

    assert_eq!(original.bird.rect.x, 850);
    assert_eq!(original.score.value, 0);
    assert!(original.bombs.is_empty());
}
