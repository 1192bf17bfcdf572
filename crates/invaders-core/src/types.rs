//! Fundamental geometric, time and timer types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in screen space (pixels).
/// x = right, y = down. The playfield origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in screen space (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Angle to another position in radians (0 = right, PI/2 = down).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Velocity of magnitude `speed` pointing along `angle` (radians).
    pub fn from_angle(angle: f64, speed: f64) -> Self {
        Self {
            x: angle.cos() * speed,
            y: angle.sin() * speed,
        }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Speed magnitude (px/s).
    pub fn speed(&self) -> f64 {
        self.as_vec().length()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl SimTime {
    /// Milliseconds per tick at the fixed tick rate.
    pub fn dt_ms(&self) -> f64 {
        crate::constants::DT_MS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms = self.tick as f64 * self.dt_ms();
    }
}

/// One-shot timer that can be paused (stun, silence, buffs).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining_ms: f64,
    pub paused: bool,
}

impl Countdown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            remaining_ms: duration_ms.max(0.0),
            paused: false,
        }
    }

    /// Advance the countdown. Returns true on the tick it runs out.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.paused {
            return false;
        }
        self.remaining_ms -= dt_ms;
        self.remaining_ms <= 0.0
    }
}

/// Looping timer (enemy shoot and steering timers).
///
/// The delay may be changed at any time; the current cycle keeps its
/// elapsed time and fires as soon as it reaches the new delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatTimer {
    pub delay_ms: f64,
    pub elapsed_ms: f64,
    pub paused: bool,
}

impl RepeatTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(1.0),
            elapsed_ms: 0.0,
            paused: false,
        }
    }

    /// Advance the timer. Returns true when a cycle completes.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.delay_ms {
            self.elapsed_ms -= self.delay_ms;
            // A shortened delay must not fire repeatedly on one tick.
            if self.elapsed_ms >= self.delay_ms {
                self.elapsed_ms = 0.0;
            }
            return true;
        }
        false
    }

    /// Restart the cycle with a new delay.
    pub fn reset(&mut self, delay_ms: f64) {
        self.delay_ms = delay_ms.max(1.0);
        self.elapsed_ms = 0.0;
    }
}
