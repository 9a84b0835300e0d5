//! Shared device state
//!
//! One block owned by the control loop and lent to each task in turn.
//! Each part has a single writer: the sensor reader writes the snapshot,
//! the prediction client writes the prediction, and the scheduler and
//! presenter advance the cursor.

pub mod cursor;
pub mod prediction;
pub mod snapshot;

pub use cursor::{Screen, ScrollCursor};
pub use prediction::{PredictionResult, HTTP_ERROR_LABEL, LOADING_LABEL, PARSE_ERROR_LABEL};
pub use snapshot::SensorSnapshot;

/// Everything the control loop carries between iterations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceState {
    /// Latest sensor readings
    pub snapshot: SensorSnapshot,
    /// Latest prediction or failure sentinel
    pub prediction: PredictionResult,
    /// Active screen and suggestion
    pub cursor: ScrollCursor,
}
