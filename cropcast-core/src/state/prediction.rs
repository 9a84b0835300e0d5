//! Latest prediction from the crop server

use cropcast_protocol::{Alternatives, CropName, PredictionResponse};

/// Crop label shown before the first fetch completes
pub const LOADING_LABEL: &str = "Loading...";

/// Crop label after a transport failure
pub const HTTP_ERROR_LABEL: &str = "HTTP Error";

/// Crop label after an unparseable response
pub const PARSE_ERROR_LABEL: &str = "Parse Error";

/// Latest prediction, or a failure sentinel in place of the crop
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PredictionResult {
    /// Recommended crop or sentinel label
    pub best_crop: CropName,
    /// Rainfall figure from the last good response (mm)
    pub rainfall_mm: f32,
    /// Runner-up crops from the last good response
    pub alternatives: Alternatives,
}

impl PredictionResult {
    /// Create the pre-fetch state
    pub fn new() -> Self {
        Self {
            best_crop: CropName::new(LOADING_LABEL),
            rainfall_mm: 0.0,
            alternatives: Alternatives::new(),
        }
    }

    /// Replace every field from a decoded response
    pub fn apply(&mut self, response: PredictionResponse) {
        self.rainfall_mm = response.rainfall_mm();
        self.best_crop = response.best_crop.clone();
        self.alternatives = response.into_alternatives();
    }

    /// Show a failure label in place of the crop
    ///
    /// Rainfall and alternatives keep their previous values.
    pub fn set_sentinel(&mut self, label: &str) {
        self.best_crop = CropName::new(label);
    }
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self::new()
    }
}
