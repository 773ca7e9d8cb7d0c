use std::time::{Duration, Instant};

use winit::keyboard::KeyCode;

use crate::geometry::Point;
use crate::scene::{Command, Direction};

pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(200);

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::KeyR => Command::Reset,
        KeyCode::KeyW | KeyCode::ArrowUp => Command::MoreRays,
        KeyCode::KeyS | KeyCode::ArrowDown => Command::FewerRays,
        KeyCode::KeyA | KeyCode::ArrowLeft => Command::CycleActive(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Command::CycleActive(Direction::Right),
        KeyCode::KeyT => Command::ToggleWallColor,
        _ => return None,
    };
    Some(command)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tap {
    Move(Point),
    Spawn(Point),
}

/// Tells a single tap from a double tap. The first tap arms a one-shot
/// deadline; a second tap before it cancels the pending move and spawns.
pub struct TapDetector {
    window: Duration,
    pending: Option<(Instant, Point)>,
}

impl TapDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Call [`poll`](Self::poll) first so an expired tap fires before a new
    /// one is considered.
    pub fn touch_start(&mut self, at: Point, now: Instant) -> Option<Tap> {
        match self.pending.take() {
            Some((deadline, _)) if now < deadline => Some(Tap::Spawn(at)),
            _ => {
                self.pending = Some((now + self.window, at));
                None
            }
        }
    }

    /// Fires the pending single tap once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Tap> {
        match self.pending {
            Some((deadline, at)) if now >= deadline => {
                self.pending = None;
                Some(Tap::Move(at))
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(d, _)| d)
    }
}

impl Tap {
    pub fn into_command(self) -> Command {
        match self {
            Tap::Move(p) => Command::MoveActive(p),
            Tap::Spawn(p) => Command::SpawnRebalanced(p),
        }
    }
}
