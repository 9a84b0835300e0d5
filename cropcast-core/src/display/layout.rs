//! Pixel layout of the 128x64 screens
//!
//! Text and icon positions are baselines.

/// Panel width (px)
pub const SCREEN_WIDTH: i32 = 128;

/// Title baseline
pub const TITLE_POS: (i32, i32) = (0, 12);

/// Separator row under the title
pub const SEPARATOR_Y: i32 = 16;

/// Single-line status message baseline
pub const STATUS_POS: (i32, i32) = (0, 35);

/// Primary screen title
pub const PRIMARY_TITLE: &str = "Environment";

/// Secondary screen title
pub const SECONDARY_TITLE: &str = "Soil & Weather";

/// Prediction screen title
pub const PREDICTION_TITLE: &str = "Crop Suggestion";

pub const TEMPERATURE_ICON_POS: (i32, i32) = (0, 42);
pub const TEMPERATURE_TEXT_POS: (i32, i32) = (32, 40);
pub const HUMIDITY_ICON_POS: (i32, i32) = (0, 64);
pub const HUMIDITY_TEXT_POS: (i32, i32) = (32, 62);

pub const MOISTURE_ICON_POS: (i32, i32) = (2, 42);
pub const MOISTURE_TEXT_POS: (i32, i32) = (32, 40);
pub const RAINFALL_ICON_POS: (i32, i32) = (2, 64);
pub const RAINFALL_TEXT_POS: (i32, i32) = (32, 62);

pub const CROP_ICON_POS: (i32, i32) = (0, 38);
pub const CROP_TEXT_POS: (i32, i32) = (24, 38);
pub const ALTERNATIVES_ICON_POS: (i32, i32) = (0, 62);
pub const ALTERNATIVES_CAPTION_POS: (i32, i32) = (24, 54);
pub const ALTERNATIVE_TEXT_POS: (i32, i32) = (24, 64);

/// Caption above the scrolling alternative
pub const ALTERNATIVES_CAPTION: &str = "Alternatives:";

/// Shown when there are no alternatives
pub const NO_ALTERNATIVES: &str = "None";
