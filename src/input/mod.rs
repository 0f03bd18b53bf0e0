//! Inbound event normalization.
//!
//! Keyboard, wheel and swipe events all funnel through [`EventNormalizer`]
//! and come out as [`Intent`]s. The controller never sees raw events;
//! wheel debouncing happens here.

use std::time::{Duration, Instant};

use crate::domain::Direction;

/// Minimum vertical travel, in pixels, for a touch gesture to count as a swipe
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Space,
    Esc,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Positive `delta_y` scrolls down, towards the next article
    Wheel { delta_y: f32, at: Instant },
    /// Vertical travel of a completed touch gesture; negative is upwards
    Swipe { delta_y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(Direction),
    ToggleLike,
    Retry,
    Quit,
}

/// Collapses a burst of wheel events into a single step. A burst ends once
/// no wheel event has arrived for the quiet period.
#[derive(Debug, Clone)]
pub struct WheelDebouncer {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl WheelDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    /// Returns the step for the first event of a burst, `None` for the rest
    pub fn feed(&mut self, delta_y: f32, at: Instant) -> Option<Direction> {
        let in_burst = self
            .last_event
            .map(|last| at.saturating_duration_since(last) < self.quiet)
            .unwrap_or(false);
        self.last_event = Some(at);

        if in_burst || delta_y == 0.0 {
            return None;
        }

        Some(if delta_y > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        })
    }
}

pub struct EventNormalizer {
    wheel: WheelDebouncer,
}

impl EventNormalizer {
    pub fn new(wheel_quiet: Duration) -> Self {
        Self {
            wheel: WheelDebouncer::new(wheel_quiet),
        }
    }

    pub fn normalize(&mut self, event: InputEvent) -> Option<Intent> {
        match event {
            InputEvent::Key(key) => key_intent(key),
            InputEvent::Wheel { delta_y, at } => self.wheel.feed(delta_y, at).map(Intent::Navigate),
            InputEvent::Swipe { delta_y } => swipe_intent(delta_y),
        }
    }
}

fn key_intent(key: Key) -> Option<Intent> {
    match key {
        Key::Down | Key::PageDown | Key::Space | Key::Char('j') => {
            Some(Intent::Navigate(Direction::Next))
        }
        Key::Up | Key::PageUp | Key::Char('k') => Some(Intent::Navigate(Direction::Previous)),
        Key::Char('l') => Some(Intent::ToggleLike),
        Key::Char('r') => Some(Intent::Retry),
        Key::Char('q') | Key::Esc => Some(Intent::Quit),
        _ => None,
    }
}

fn swipe_intent(delta_y: f32) -> Option<Intent> {
    if delta_y.abs() < SWIPE_MIN_DISTANCE {
        return None;
    }
    // Finger moving up pulls the next card in from below
    Some(Intent::Navigate(if delta_y < 0.0 {
        Direction::Next
    } else {
        Direction::Previous
    }))
}

/// Parse one line of terminal input into a key
pub fn parse_line(line: &str) -> Option<Key> {
    match line.trim() {
        "" => Some(Key::Space),
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "esc" => Some(Key::Esc),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_key_mapping() {
        let mut input = EventNormalizer::new(ms(300));
        assert_eq!(
            input.normalize(InputEvent::Key(Key::Down)),
            Some(Intent::Navigate(Direction::Next))
        );
        assert_eq!(
            input.normalize(InputEvent::Key(Key::Char('k'))),
            Some(Intent::Navigate(Direction::Previous))
        );
        assert_eq!(input.normalize(InputEvent::Key(Key::Char('l'))), Some(Intent::ToggleLike));
        assert_eq!(input.normalize(InputEvent::Key(Key::Char('r'))), Some(Intent::Retry));
        assert_eq!(input.normalize(InputEvent::Key(Key::Esc)), Some(Intent::Quit));
        assert_eq!(input.normalize(InputEvent::Key(Key::Char('z'))), None);
    }

    #[test]
    fn test_wheel_burst_yields_one_step() {
        let mut wheel = WheelDebouncer::new(ms(300));
        let start = Instant::now();

        let steps: Vec<Option<Direction>> = (0..20)
            .map(|i| wheel.feed(12.0, start + ms(i * 16)))
            .collect();

        assert_eq!(steps[0], Some(Direction::Next));
        assert!(steps[1..].iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_wheel_new_burst_after_quiet_period() {
        let mut wheel = WheelDebouncer::new(ms(300));
        let start = Instant::now();

        assert_eq!(wheel.feed(10.0, start), Some(Direction::Next));
        assert_eq!(wheel.feed(10.0, start + ms(200)), None);
        // 200ms after the last event is still the same burst
        assert_eq!(wheel.feed(10.0, start + ms(400)), None);
        assert_eq!(wheel.feed(-10.0, start + ms(800)), Some(Direction::Previous));
    }

    #[test]
    fn test_wheel_zero_delta_is_ignored() {
        let mut wheel = WheelDebouncer::new(ms(300));
        assert_eq!(wheel.feed(0.0, Instant::now()), None);
    }

    #[test]
    fn test_swipe_thresholds() {
        let mut input = EventNormalizer::new(ms(300));
        assert_eq!(input.normalize(InputEvent::Swipe { delta_y: -20.0 }), None);
        assert_eq!(
            input.normalize(InputEvent::Swipe { delta_y: -80.0 }),
            Some(Intent::Navigate(Direction::Next))
        );
        assert_eq!(
            input.normalize(InputEvent::Swipe { delta_y: 120.0 }),
            Some(Intent::Navigate(Direction::Previous))
        );
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(""), Some(Key::Space));
        assert_eq!(parse_line(" J \n"), Some(Key::Char('j')));
        assert_eq!(parse_line("up"), Some(Key::Up));
        assert_eq!(parse_line("hello"), None);
    }
}
