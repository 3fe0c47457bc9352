use crate::{
    api::models::RunState,
    core::geo::{rad_to_display_deg, two_decimals, Pose},
};

/// Sidebar pose readout: meters rounded to two decimals, heading in degrees
/// in (−180, 180].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseReadout {
    pub x: f64,
    pub y: f64,
    pub theta_deg: f64,
}

impl From<&Pose> for PoseReadout {
    fn from(pose: &Pose) -> Self {
        Self {
            x: two_decimals(pose.x),
            y: two_decimals(pose.y),
            theta_deg: two_decimals(rad_to_display_deg(pose.theta)),
        }
    }
}

/// Which SLAM session buttons are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub start: bool,
    pub stop: bool,
    pub close: bool,
}

impl Affordances {
    /// `None` for a state the console does not know; the buttons stay as they are.
    pub fn for_state(state: RunState) -> Option<Self> {
        match state {
            RunState::Stopped => Some(Self {
                start: true,
                stop: false,
                close: true,
            }),
            RunState::Running => Some(Self {
                start: false,
                stop: true,
                close: false,
            }),
            RunState::Unknown => None,
        }
    }
}
