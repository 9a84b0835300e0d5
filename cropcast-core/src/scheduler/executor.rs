//! Task gating for the control loop

use crate::config::Intervals;

use super::timer::IntervalTimer;

/// Tasks due on this pass of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Due {
    /// Sample the sensors
    pub sample: bool,
    /// Fetch a new prediction
    pub fetch: bool,
    /// Rotate to the next screen
    pub rotate: bool,
}

impl Due {
    /// Check if any task is due
    pub fn any(&self) -> bool {
        self.sample || self.fetch || self.rotate
    }
}

/// Gates for the sensor, prediction and rotation tasks
///
/// The suggestion scroll gate is owned by the presenter instead, since it
/// only advances while the prediction screen is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduler {
    sensor: IntervalTimer,
    prediction: IntervalTimer,
    rotation: IntervalTimer,
}

impl Scheduler {
    /// Create a scheduler with every gate last fired at time zero
    pub fn new(intervals: &Intervals) -> Self {
        Self {
            sensor: IntervalTimer::new(intervals.sensor_ms),
            prediction: IntervalTimer::new(intervals.prediction_ms),
            rotation: IntervalTimer::new(intervals.rotation_ms),
        }
    }

    /// Restart every interval from `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.sensor.arm(now_ms);
        self.prediction.arm(now_ms);
        self.rotation.arm(now_ms);
    }

    /// Evaluate every gate against one clock reading
    ///
    /// Each due gate is reset to `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Due {
        Due {
            sample: self.sensor.fire_if_elapsed(now_ms),
            fetch: self.prediction.fire_if_elapsed(now_ms),
            rotate: self.rotation.fire_if_elapsed(now_ms),
        }
    }
}
