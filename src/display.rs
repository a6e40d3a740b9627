/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// logical field coordinates into terminal cells and queues the commands.

use std::collections::HashMap;
use std::io::Write;

use bomb_dodge::config::{FIELD_HEIGHT, FIELD_WIDTH, LIMIT_ANCHOR, SCORE_ANCHOR};
use bomb_dodge::entities::{
    Beam, Bird, BirdSprite, Bomb, BombColor, Delta, Explosion, ExplosionFrame, GameOverCause,
    GameState, GameStatus, Rect,
};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SCORE: Color = Color::Blue;
const C_LIMIT: Color = Color::Red;
const C_BIRD: Color = Color::Yellow;
const C_BIRD_CHEER: Color = Color::Green;
const C_BIRD_DEFEAT: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

fn bomb_color(color: BombColor) -> Color {
    match color {
        BombColor::Red => Color::Red,
        BombColor::Yellow => Color::Yellow,
        BombColor::Green => Color::Green,
        BombColor::Cyan => Color::Cyan,
        BombColor::Blue => Color::Blue,
        BombColor::Magenta => Color::Magenta,
        BombColor::White => Color::White,
        // Pure black vanishes on most terminal backgrounds
        BombColor::Black => Color::DarkGrey,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the logical field onto the terminal grid inside the border.
///
/// Row 0 and row `height - 2` hold the border, row `height - 1` the controls
/// hint; the field occupies the cells in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }

    fn cols(&self) -> i32 {
        (self.width as i32 - 2).max(1)
    }

    fn rows(&self) -> i32 {
        (self.height as i32 - 3).max(1)
    }

    /// Terminal column for logical `x`, clamped to the field.
    fn col(&self, x: i32) -> i32 {
        1 + x.clamp(0, FIELD_WIDTH) * self.cols() / FIELD_WIDTH
    }

    /// Terminal row for logical `y`, clamped to the field.
    fn row(&self, y: i32) -> i32 {
        1 + y.clamp(0, FIELD_HEIGHT) * self.rows() / FIELD_HEIGHT
    }

    /// Cell containing the logical point, or `None` if it falls outside the
    /// drawable field.
    pub fn to_cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if !(0..FIELD_WIDTH).contains(&x) || !(0..FIELD_HEIGHT).contains(&y) {
            return None;
        }
        Some((self.col(x) as u16, self.row(y) as u16))
    }

    /// Logical centre of a terminal cell.
    fn cell_center(&self, col: i32, row: i32) -> (i32, i32) {
        let x = ((col - 1) * 2 + 1) * FIELD_WIDTH / (2 * self.cols());
        let y = ((row - 1) * 2 + 1) * FIELD_HEIGHT / (2 * self.rows());
        (x, y)
    }

    /// Inclusive cell span covered by a rectangle, clipped to the field.
    fn span(&self, rect: &Rect) -> Option<((i32, i32), (i32, i32))> {
        let right = rect.right().min(FIELD_WIDTH);
        let bottom = rect.bottom().min(FIELD_HEIGHT);
        let left = rect.left().max(0);
        let top = rect.top().max(0);
        if left >= right || top >= bottom {
            return None;
        }
        let c0 = self.col(left);
        let c1 = self.col(right - 1);
        let r0 = self.row(top);
        let r1 = self.row(bottom - 1);
        Some(((c0, c1), (r0, r1)))
    }

    fn last_col(&self) -> i32 {
        self.width as i32 - 2
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

const EXPLOSION_BASE: [&str; 3] = ["*.  ", " \\|/", "--@("];

/// Mirror a single glyph across the vertical axis.
fn mirror_h(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '(' => ')',
        ')' => '(',
        '<' => '>',
        '>' => '<',
        c => c,
    }
}

/// Mirror a single glyph across the horizontal axis.
fn mirror_v(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '.' => '\'',
        '\'' => '.',
        c => c,
    }
}

/// Flip a block of text horizontally and/or vertically.
pub fn mirror(rows: &[&str], flip_h: bool, flip_v: bool) -> Vec<String> {
    let mut out: Vec<String> = rows
        .iter()
        .map(|row| {
            let mut chars: Vec<char> = row.chars().collect();
            if flip_h {
                chars.reverse();
                chars = chars.into_iter().map(mirror_h).collect();
            }
            if flip_v {
                chars = chars.into_iter().map(mirror_v).collect();
            }
            chars.into_iter().collect()
        })
        .collect();
    if flip_v {
        out.reverse();
    }
    out
}

/// Every glyph the renderer needs, prepared once at start-up.
pub struct SpriteSheet {
    bird: HashMap<Delta, String>,
    cheer: String,
    defeat: String,
    explosion: [Vec<String>; 4],
}

impl SpriteSheet {
    pub fn new() -> Self {
        let arrows: [(Delta, char); 9] = [
            ((0, 0), '●'),
            ((0, -5), '▲'),
            ((5, -5), '◥'),
            ((5, 0), '▶'),
            ((5, 5), '◢'),
            ((0, 5), '▼'),
            ((-5, 5), '◣'),
            ((-5, 0), '◀'),
            ((-5, -5), '◤'),
        ];
        let bird = arrows
            .iter()
            .map(|&(delta, arrow)| (delta, format!("({})", arrow)))
            .collect();

        Self {
            bird,
            cheer: "\\(^o^)/".to_string(),
            defeat: "(x_x)".to_string(),
            explosion: [
                mirror(&EXPLOSION_BASE, true, false),
                mirror(&EXPLOSION_BASE, true, true),
                mirror(&EXPLOSION_BASE, false, true),
                mirror(&EXPLOSION_BASE, false, false),
            ],
        }
    }

    pub fn bird(&self, sprite: BirdSprite) -> (&str, Color) {
        match sprite {
            BirdSprite::Facing(delta) => {
                let glyph = self.bird.get(&delta).map(String::as_str).unwrap_or("(●)");
                (glyph, C_BIRD)
            }
            BirdSprite::Cheer => (self.cheer.as_str(), C_BIRD_CHEER),
            BirdSprite::Defeat => (self.defeat.as_str(), C_BIRD_DEFEAT),
        }
    }

    pub fn explosion(&self, frame: ExplosionFrame) -> &[String] {
        let i = match frame {
            ExplosionFrame::FlipH => 0,
            ExplosionFrame::FlipHV => 1,
            ExplosionFrame::FlipV => 2,
            ExplosionFrame::Plain => 3,
        };
        &self.explosion[i]
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sheet: &SpriteSheet,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;

    for bomb in &state.bombs {
        draw_bomb(out, bomb, view)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion, sheet, view)?;
    }
    if let Some(beam) = &state.beam {
        draw_beam(out, beam, view)?;
    }
    draw_bird(out, &state.bird, sheet, view)?;
    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    if let GameStatus::GameOver(cause) = state.status {
        draw_game_over(out, state, cause, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 1..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Print `text` centred on a logical point, clipped to the field's columns.
fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    (x, y): (i32, i32),
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(x.clamp(0, FIELD_WIDTH - 1), y.clamp(0, FIELD_HEIGHT - 1))
    else {
        return Ok(());
    };
    let len = text.chars().count() as i32;
    let start = (col as i32 - len / 2).max(1);
    let room = (view.last_col() - start + 1).max(0) as usize;
    let clipped: String = text.chars().take(room).collect();
    if clipped.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(clipped))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_bird<W: Write>(
    out: &mut W,
    bird: &Bird,
    sheet: &SpriteSheet,
    view: Viewport,
) -> std::io::Result<()> {
    let (glyph, color) = sheet.bird(bird.sprite);
    print_centered(out, view, bird.rect.center(), glyph, color)
}

/// Fill every cell whose centre lies inside the bomb's circle; tiny bombs
/// still get their centre cell.
fn draw_bomb<W: Write>(out: &mut W, bomb: &Bomb, view: Viewport) -> std::io::Result<()> {
    let Some(((c0, c1), (r0, r1))) = view.span(&bomb.rect) else {
        return Ok(());
    };
    let (bx, by) = bomb.rect.center();
    let r2 = bomb.radius * bomb.radius;

    out.queue(style::SetForegroundColor(bomb_color(bomb.color)))?;
    let mut drawn = false;
    for row in r0..=r1 {
        for col in c0..=c1 {
            let (x, y) = view.cell_center(col, row);
            let (dx, dy) = (x - bx, y - by);
            if dx * dx + dy * dy <= r2 {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print("█"))?;
                drawn = true;
            }
        }
    }
    if !drawn {
        if let Some((col, row)) = view.to_cell(bx, by) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("●"))?;
        }
    }
    Ok(())
}

fn draw_beam<W: Write>(out: &mut W, beam: &Beam, view: Viewport) -> std::io::Result<()> {
    let Some(((c0, c1), (r0, r1))) = view.span(&beam.rect) else {
        return Ok(());
    };
    let row = (r0 + r1) / 2;
    out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_BEAM))?;
    out.queue(Print("═".repeat((c1 - c0 + 1) as usize)))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &Explosion,
    sheet: &SpriteSheet,
    view: Viewport,
) -> std::io::Result<()> {
    let rows = sheet.explosion(explosion.frame);
    let Some((col, row)) = view.to_cell(
        explosion.rect.center().0.clamp(0, FIELD_WIDTH - 1),
        explosion.rect.center().1.clamp(0, FIELD_HEIGHT - 1),
    ) else {
        return Ok(());
    };
    let top = row as i32 - rows.len() as i32 / 2;
    let bottom_limit = view.height as i32 - 3;

    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for (i, line) in rows.iter().enumerate() {
        let r = top + i as i32;
        if r < 1 || r > bottom_limit {
            continue;
        }
        let len = line.chars().count() as i32;
        let start = (col as i32 - len / 2).max(1);
        let room = (view.last_col() - start + 1).max(0) as usize;
        let clipped: String = line.chars().take(room).collect();
        out.queue(cursor::MoveTo(start as u16, r as u16))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let score = format!("SCORE:{}", state.score.value);
    print_centered(out, view, SCORE_ANCHOR, &score, C_SCORE)?;

    let limit = format!("LIMIT:{}", state.limit.value.max(0));
    print_centered(out, view, LIMIT_ANCHOR, &limit, C_LIMIT)?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Move   SPACE : Beam   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cause: GameOverCause,
    view: Viewport,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score.value);
    let cause_line = match cause {
        GameOverCause::BombHit => "Hit by a bomb",
        GameOverCause::LimitExhausted => "Out of time",
    };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (cause_line, Color::White),
        (&score_line, Color::Yellow),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_corners_map_inside_border() {
        let view = Viewport::new((162, 48));
        assert_eq!(view.to_cell(0, 0), Some((1, 1)));
        let (col, row) = view.to_cell(FIELD_WIDTH - 1, FIELD_HEIGHT - 1).unwrap();
        assert_eq!(col, 160);
        assert_eq!(row, 45);
        assert_eq!(view.to_cell(FIELD_WIDTH, 0), None);
        assert_eq!(view.to_cell(-1, 10), None);
    }

    #[test]
    fn span_clips_offscreen_rects() {
        let view = Viewport::new((162, 48));
        assert!(view.span(&Rect::new(-50, -50, 20, 20)).is_none());
        let ((c0, _), (r0, _)) = view.span(&Rect::new(-10, -10, 40, 40)).unwrap();
        assert_eq!((c0, r0), (1, 1));
    }

    #[test]
    fn mirror_horizontal_reverses_and_swaps_slashes() {
        assert_eq!(mirror(&["/-("], true, false), vec![")-\\".to_string()]);
    }

    #[test]
    fn mirror_vertical_reverses_rows() {
        let flipped = mirror(&["ab", "c/"], false, true);
        assert_eq!(flipped, vec!["c\\".to_string(), "ab".to_string()]);
    }

    #[test]
    fn double_mirror_is_identity() {
        let once = mirror(&EXPLOSION_BASE, true, true);
        let refs: Vec<&str> = once.iter().map(String::as_str).collect();
        let twice = mirror(&refs, true, true);
        let base: Vec<String> = EXPLOSION_BASE.iter().map(|s| s.to_string()).collect();
        assert_eq!(twice, base);
    }

    #[test]
    fn sprite_sheet_covers_all_nine_directions() {
        let sheet = SpriteSheet::new();
        for dx in [-5, 0, 5] {
            for dy in [-5, 0, 5] {
                let (glyph, _) = sheet.bird(BirdSprite::Facing((dx, dy)));
                assert_eq!(glyph.chars().count(), 3);
            }
        }
        assert_eq!(sheet.bird(BirdSprite::Defeat).0, "(x_x)");
    }

    #[test]
    fn render_draws_hud_text() {
        let state = GameState {
            bird: Bird {
                rect: Rect::centered_at(900, 400, 100, 100),
                sprite: BirdSprite::Facing((5, 0)),
            },
            bombs: Vec::new(),
            beam: None,
            explosions: Vec::new(),
            score: bomb_dodge::entities::Score { value: 7 },
            limit: bomb_dodge::entities::Limit { value: -3 },
            status: GameStatus::Running,
            frame: 0,
            events: Vec::new(),
        };
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, &state, &SpriteSheet::new(), Viewport::new((162, 48))).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("SCORE:7"));
        assert!(text.contains("LIMIT:0"));
        assert!(text.contains("(▶)"));
    }
}
