use crate::ConsoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shaping functions for a normalized joystick offset.
///
/// Each is defined on [0, 1] with `f(0) = 0` and `f(1) = 1`, and extended to
/// [-1, 0) as an odd function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "easeInCirc")]
    EaseInCirc,
    #[serde(rename = "easeOutCirc")]
    EaseOutCirc,
}

impl Easing {
    pub const ALL: [Easing; 3] = [Easing::Linear, Easing::EaseInCirc, Easing::EaseOutCirc];

    /// Apply the easing to `n` in [-1, 1]; values outside are clamped first.
    pub fn apply(&self, n: f64) -> f64 {
        let n = n.clamp(-1.0, 1.0);
        let magnitude = self.apply_positive(n.abs());
        if n < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }

    fn apply_positive(&self, pos: f64) -> f64 {
        match self {
            Easing::Linear => pos,
            Easing::EaseInCirc => 1.0 - (1.0 - pos * pos).max(0.0).sqrt(),
            Easing::EaseOutCirc => (1.0 - (pos - 1.0).powi(2)).max(0.0).sqrt(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInCirc => "easeInCirc",
            Easing::EaseOutCirc => "easeOutCirc",
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::EaseInCirc
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| {
                ConsoleError::Configuration(format!("easing formula {} does not exist", s))
            })
    }
}
