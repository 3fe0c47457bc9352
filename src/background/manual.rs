//! Manual drive: joystick position turned into motor speeds at a fixed cadence.

use crate::{
    api::RobotApi,
    core::config::ManualControlConfig,
    runtime::{self, AsyncHandle},
    ui::traits::ControlView,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Differential drive mix.
///
/// `joy_y` is forward speed and `joy_x` turn rate, both clamped to [-1, 1].
/// Turning adds `alpha * turn` to the left wheel and removes it from the right
/// one; when the faster wheel would exceed 1 both are scaled down together.
pub fn differential(joy_x: f64, joy_y: f64, alpha: f64) -> (f64, f64) {
    let speed = joy_y.clamp(-1.0, 1.0);
    let turn = joy_x.clamp(-1.0, 1.0);

    let mut left = speed + alpha * turn;
    let mut right = speed - alpha * turn;

    let normalizer = left.max(right);
    if normalizer > 1.0 {
        left /= normalizer;
        right /= normalizer;
    }
    (left, right)
}

struct ManualState {
    api: Arc<dyn RobotApi>,
    control: Arc<dyn ControlView>,
    turn_alpha: f64,
    /// (joy_x, joy_y), y pointing forward
    joystick: Mutex<(f64, f64)>,
    timer: Mutex<Option<Box<dyn AsyncHandle>>>,
}

impl ManualState {
    fn stop(&self) -> bool {
        match self.timer.lock() {
            Ok(mut timer) => match timer.take() {
                Some(handle) => {
                    handle.cancel();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    fn speeds(&self) -> (f64, f64) {
        let (x, y) = self.joystick.lock().map(|j| *j).unwrap_or((0.0, 0.0));
        differential(x, y, self.turn_alpha)
    }

    async fn send(&self, left: f64, right: f64) {
        if let Err(e) = self.api.set_motor_speeds(left, right).await {
            if self.stop() {
                log::warn!("manual control stopped: {}", e);
            }
            self.control.show_error(&format!("Error: {}", e.user_message()));
        }
    }
}

pub struct ManualControlLoop {
    state: Arc<ManualState>,
    send_interval: Duration,
}

impl ManualControlLoop {
    pub fn new(
        api: Arc<dyn RobotApi>,
        control: Arc<dyn ControlView>,
        config: &ManualControlConfig,
    ) -> Self {
        Self {
            state: Arc::new(ManualState {
                api,
                control,
                turn_alpha: config.turn_alpha,
                joystick: Mutex::new((0.0, 0.0)),
                timer: Mutex::new(None),
            }),
            send_interval: config.send_interval(),
        }
    }

    /// Store a joystick reading given in screen axes (y grows downward).
    pub fn set_joystick(&self, x: f64, y: f64) {
        if let Ok(mut joystick) = self.state.joystick.lock() {
            *joystick = (x, -y);
        }
    }

    /// Callback for [`PointerDragInput::on_signal`](crate::input::PointerDragInput::on_signal).
    pub fn joystick_sink(&self) -> impl FnMut(f64, f64, bool) + Send + 'static {
        let state = self.state.clone();
        move |x, y, _is_final| {
            if let Ok(mut joystick) = state.joystick.lock() {
                *joystick = (x, -y);
            }
        }
    }

    /// Current joystick value, y pointing forward
    pub fn joystick(&self) -> (f64, f64) {
        self.state.joystick.lock().map(|j| *j).unwrap_or((0.0, 0.0))
    }

    /// Wheel speeds the next tick would send
    pub fn speeds(&self) -> (f64, f64) {
        self.state.speeds()
    }

    /// Start sending speeds; the first command goes out one interval from now.
    pub fn start(&self) {
        let state = self.state.clone();
        let handle = runtime::spawn_interval(self.send_interval, move || {
            let (left, right) = state.speeds();
            let state = state.clone();
            runtime::spawn(async move { state.send(left, right).await });
        });

        if let Ok(mut timer) = self.state.timer.lock() {
            if let Some(old) = timer.replace(handle) {
                old.cancel();
            }
        }
        log::info!("manual control sending every {:?}", self.send_interval);
    }

    /// Stop sending. Commands already sent are not recalled.
    pub fn stop(&self) {
        if self.state.stop() {
            log::info!("manual control stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state
            .timer
            .lock()
            .map(|timer| timer.as_ref().map_or(false, |t| !t.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for ManualControlLoop {
    fn drop(&mut self) {
        self.state.stop();
    }
}
