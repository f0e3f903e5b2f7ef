//! Terminal platform: half-block pixels, keyboard polling and frame pacing

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};
use glam::Vec2;
use pong_core::{
    Assets, Audio, Config, Cue, FontHandle, Input, Key, Platform, PongError, Renderer,
    SoundHandle, SpriteHandle, SpriteKind,
};

use crate::audio::SoundOut;

const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 12;

// Without release events a key counts as held this long after its last press
const HOLD_WINDOW: Duration = Duration::from_millis(150);
// Without release events, presses closer together than this are auto-repeat
const REPEAT_DEBOUNCE: Duration = Duration::from_millis(60);

// ── Colours ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Rgb(u8, u8, u8);

const BACKGROUND: Rgb = Rgb(10, 10, 18);
const FOREGROUND: Rgb = Rgb(235, 235, 235);
const MIDDLE_LINE: Rgb = Rgb(90, 90, 110);
const ARROW: Rgb = Rgb(250, 200, 60);

fn to_color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Pixel buffer ────────────────────────────────────────────────────────────

/// Two pixels per terminal cell, stacked vertically
struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = (cols as usize, rows as usize * 2);
        Self {
            w,
            h,
            px: vec![BACKGROUND; w * h],
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize;
        self.h = rows as usize * 2;
        self.px = vec![BACKGROUND; self.w * self.h];
    }

    fn clear(&mut self) {
        self.px.fill(BACKGROUND);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn dashed_column(&mut self, x: i32, w: i32, h: i32, c: Rgb) {
        for y in (0..h).filter(|y| (y / 2) % 2 == 0) {
            self.fill_rect(x, y, w, 1, c);
        }
    }

    /// Solid triangle filling the rect, tip on the left or right edge
    fn triangle(&mut self, x: i32, y: i32, w: i32, h: i32, tip_left: bool, c: Rgb) {
        let mid = y as f32 + h as f32 / 2.0;
        for dx in 0..w {
            let along = if tip_left { dx + 1 } else { w - dx };
            let half = h as f32 / 2.0 * along as f32 / w as f32;
            let top = (mid - half).round() as i32;
            let bottom = (mid + half).round() as i32;
            self.fill_rect(x + dx, top, 1, (bottom - top).max(1), c);
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev: Option<(Rgb, Rgb)> = None;

        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(to_color(top)),
                        style::SetBackgroundColor(to_color(bot))
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── Keyboard ────────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            's' => Some(Key::S),
            'r' => Some(Key::R),
            ' ' => Some(Key::Space),
            _ => None,
        },
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Held and freshly pressed keys for one frame
#[derive(Debug, Default)]
struct KeyState {
    /// Release events are reported by the terminal
    releases: bool,
    held: HashMap<Key, Instant>,
    pressed: Vec<Key>,
}

impl KeyState {
    fn new(releases: bool) -> Self {
        Self {
            releases,
            ..Self::default()
        }
    }

    fn begin_frame(&mut self, now: Instant) {
        self.pressed.clear();
        if !self.releases {
            self.held.retain(|_, last| now.duration_since(*last) < HOLD_WINDOW);
        }
    }

    fn handle(&mut self, key: Key, kind: KeyEventKind, now: Instant) {
        match kind {
            KeyEventKind::Press => {
                let last = self.held.insert(key, now);
                let fresh = match last {
                    None => true,
                    // Legacy terminals send auto-repeat as more presses
                    Some(last) if !self.releases => now.duration_since(last) >= REPEAT_DEBOUNCE,
                    Some(_) => false,
                };
                if fresh && !self.pressed.contains(&key) {
                    self.pressed.push(key);
                }
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    fn is_down(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

// ── Platform ────────────────────────────────────────────────────────────────

struct TextItem {
    col: i32,
    row: i32,
    text: String,
}

pub struct Terminal {
    out: Stdout,
    buf: PixelBuf,
    cols: u16,
    rows: u16,
    logical: Vec2,
    texts: Vec<TextItem>,
    keys: KeyState,
    enhanced: bool,
    close: bool,
    audio: SoundOut,
    frame_dur: Duration,
    frame_start: Instant,
}

impl Terminal {
    pub fn open(config: &Config, audio: SoundOut) -> Result<Self, PongError> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(PongError::Platform(format!(
                "terminal is {cols}x{rows}, need at least {MIN_COLS}x{MIN_ROWS}"
            )));
        }

        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            tracing::warn!("Terminal does not report key releases; holding keys is approximate");
        }

        tracing::info!(cols, rows, enhanced, "Terminal opened");
        Ok(Self {
            out,
            buf: PixelBuf::new(cols, rows),
            cols,
            rows,
            logical: Vec2::new(config.screen_width, config.screen_height),
            texts: Vec::new(),
            keys: KeyState::new(enhanced),
            enhanced,
            close: false,
            audio,
            frame_dur: Duration::from_secs_f32(config.frame_dt()),
            frame_start: Instant::now(),
        })
    }

    /// Logical game units to pixel coordinates
    fn to_pixels(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            v.x * self.buf.w as f32 / self.logical.x,
            v.y * self.buf.h as f32 / self.logical.y,
        )
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if is_quit(&key) => {
                if key.kind != KeyEventKind::Release {
                    self.close = true;
                }
            }
            Event::Key(key) => {
                if let Some(mapped) = map_key(key.code) {
                    self.keys.handle(mapped, key.kind, now);
                }
            }
            Event::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "Terminal resized");
                self.cols = cols;
                self.rows = rows;
                self.buf.resize(cols, rows);
            }
            _ => {}
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!("Failed to restore terminal: {}", err);
        }
    }
}

impl Input for Terminal {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    fn key_just_pressed(&self, key: Key) -> bool {
        self.keys.just_pressed(key)
    }
}

const SPRITES: [SpriteKind; 4] = [
    SpriteKind::Pixel,
    SpriteKind::MiddleLine,
    SpriteKind::ArrowLeft,
    SpriteKind::ArrowRight,
];

impl Renderer for Terminal {
    fn draw_sprite(&mut self, sprite: SpriteHandle, top_left: Vec2, size: Vec2) {
        let Some(kind) = SPRITES.into_iter().find(|&k| k as u32 == sprite.0) else {
            return;
        };
        let p = self.to_pixels(top_left);
        let s = self.to_pixels(size);
        let (x, y) = (p.x.round() as i32, p.y.round() as i32);
        let (w, h) = ((s.x.round() as i32).max(1), (s.y.round() as i32).max(1));
        match kind {
            SpriteKind::Pixel => self.buf.fill_rect(x, y, w, h, FOREGROUND),
            SpriteKind::MiddleLine => self.buf.dashed_column(x, w, h, MIDDLE_LINE),
            SpriteKind::ArrowLeft => self.buf.triangle(x, y, w, h, true, ARROW),
            SpriteKind::ArrowRight => self.buf.triangle(x, y, w, h, false, ARROW),
        }
    }

    fn draw_text(&mut self, _font: FontHandle, text: &str, center: Vec2) {
        let col = center.x * self.cols as f32 / self.logical.x;
        let row = center.y * self.rows as f32 / self.logical.y;
        let len = text.chars().count() as f32;
        self.texts.push(TextItem {
            col: (col - len / 2.0).round() as i32,
            row: row as i32,
            text: text.to_string(),
        });
    }
}

impl Audio for Terminal {
    fn play(&mut self, sound: SoundHandle) {
        self.audio.play(sound);
    }

    fn start_music(&mut self) {
        self.audio.start_music();
    }

    fn stop_music(&mut self) {
        self.audio.stop_music();
    }
}

impl Assets for Terminal {
    fn load_sprite(&mut self, kind: SpriteKind) -> Result<SpriteHandle, PongError> {
        tracing::debug!("Loading sprite {}", kind.name());
        Ok(SpriteHandle(kind as u32))
    }

    fn load_font(&mut self) -> Result<FontHandle, PongError> {
        Ok(FontHandle(0))
    }

    fn load_sound(&mut self, cue: Cue) -> Result<SoundHandle, PongError> {
        tracing::debug!("Loading sound {}", cue.name());
        Ok(self.audio.load(cue))
    }
}

impl Platform for Terminal {
    fn begin_frame(&mut self) -> Result<(), PongError> {
        let now = Instant::now();
        self.frame_start = now;
        self.keys.begin_frame(now);
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event, now);
        }
        self.buf.clear();
        self.texts.clear();
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), PongError> {
        self.buf.render(&mut self.out)?;
        for item in &self.texts {
            if item.row < 0 || item.row >= self.rows as i32 {
                continue;
            }
            let col = item.col.clamp(0, self.cols as i32) as u16;
            queue!(
                self.out,
                cursor::MoveTo(col, item.row as u16),
                style::SetForegroundColor(to_color(FOREGROUND)),
                style::SetBackgroundColor(to_color(BACKGROUND)),
                style::Print(&item.text),
                style::ResetColor
            )?;
        }
        self.out.flush()?;
        self.audio.pump_music();

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_dur {
            std::thread::sleep(self.frame_dur - elapsed);
        }
        Ok(())
    }

    fn close_requested(&self) -> bool {
        self.close
    }
}
