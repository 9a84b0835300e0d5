//! Screen rendering
//!
//! Builds the three data screens and the single-line status screens used
//! during boot. Every render clears the frame, draws it completely, and
//! flushes once, so a partial frame is never visible.

use core::fmt::Write;

use heapless::String;

use crate::scheduler::IntervalTimer;
use crate::state::{PredictionResult, Screen, ScrollCursor, SensorSnapshot};
use crate::traits::{DisplayDriver, DisplayError, Font, Icon};

use super::layout::*;

/// Capacity of one formatted line
pub const LINE_CAPACITY: usize = 24;

/// Renders device state onto the display
///
/// Owns the suggestion scroll timer. It is checked only while the
/// prediction screen is drawn and is independent of screen rotation.
pub struct DisplayPresenter {
    scroll: IntervalTimer,
}

impl DisplayPresenter {
    /// Create a presenter scrolling every `scroll_ms`
    pub const fn new(scroll_ms: u32) -> Self {
        Self {
            scroll: IntervalTimer::new(scroll_ms),
        }
    }

    /// Draw the screen selected by `cursor`
    ///
    /// On the prediction screen, advances the suggestion once more than one
    /// scroll interval has passed since it last moved. An empty list never
    /// moves the cursor or resets the timer.
    pub fn render<D: DisplayDriver>(
        &mut self,
        display: &mut D,
        cursor: &mut ScrollCursor,
        snapshot: &SensorSnapshot,
        prediction: &PredictionResult,
        now_ms: u64,
    ) -> Result<(), DisplayError> {
        display.clear()?;

        match cursor.screen {
            Screen::Primary => {
                draw_title(display, PRIMARY_TITLE)?;
                draw_primary(display, snapshot)?;
            }
            Screen::Secondary => {
                draw_title(display, SECONDARY_TITLE)?;
                draw_secondary(display, snapshot, prediction)?;
            }
            Screen::Prediction => {
                let count = prediction.alternatives.len();
                if count > 0 && self.scroll.fire_if_exceeded(now_ms) {
                    cursor.advance_suggestion(count);
                }
                draw_title(display, PREDICTION_TITLE)?;
                draw_prediction(display, cursor, prediction)?;
            }
        }

        display.flush()
    }

    /// Draw a single status line on an otherwise blank screen
    pub fn render_status<D: DisplayDriver>(
        &self,
        display: &mut D,
        message: &str,
    ) -> Result<(), DisplayError> {
        display.clear()?;
        let (x, y) = STATUS_POS;
        display.draw_text(x, y, Font::Body, message)?;
        display.flush()
    }
}

fn draw_title<D: DisplayDriver>(display: &mut D, title: &str) -> Result<(), DisplayError> {
    let (x, y) = TITLE_POS;
    display.draw_text(x, y, Font::Title, title)?;
    display.draw_line(0, SEPARATOR_Y, SCREEN_WIDTH - 1, SEPARATOR_Y)
}

fn draw_primary<D: DisplayDriver>(
    display: &mut D,
    snapshot: &SensorSnapshot,
) -> Result<(), DisplayError> {
    let temperature: String<LINE_CAPACITY> = reading(snapshot.temperature_c, "C");
    let humidity: String<LINE_CAPACITY> = reading(snapshot.humidity_pct, "%");

    draw_icon_line(
        display,
        TEMPERATURE_ICON_POS,
        Icon::Thermometer,
        TEMPERATURE_TEXT_POS,
        Font::Body,
        &temperature,
    )?;
    draw_icon_line(
        display,
        HUMIDITY_ICON_POS,
        Icon::Droplet,
        HUMIDITY_TEXT_POS,
        Font::Body,
        &humidity,
    )
}

fn draw_secondary<D: DisplayDriver>(
    display: &mut D,
    snapshot: &SensorSnapshot,
    prediction: &PredictionResult,
) -> Result<(), DisplayError> {
    let rainfall: String<LINE_CAPACITY> = reading(Some(prediction.rainfall_mm), "mm");

    draw_icon_line(
        display,
        MOISTURE_ICON_POS,
        Icon::Leaf,
        MOISTURE_TEXT_POS,
        Font::Body,
        snapshot.moisture_status().label(),
    )?;
    draw_icon_line(
        display,
        RAINFALL_ICON_POS,
        Icon::Cloud,
        RAINFALL_TEXT_POS,
        Font::Body,
        &rainfall,
    )
}

fn draw_prediction<D: DisplayDriver>(
    display: &mut D,
    cursor: &ScrollCursor,
    prediction: &PredictionResult,
) -> Result<(), DisplayError> {
    draw_icon_line(
        display,
        CROP_ICON_POS,
        Icon::Lightbulb,
        CROP_TEXT_POS,
        Font::BodyBold,
        prediction.best_crop.as_str(),
    )?;

    let (x, y) = ALTERNATIVES_ICON_POS;
    display.draw_glyph(x, y, Icon::List)?;
    let (x, y) = ALTERNATIVES_CAPTION_POS;
    display.draw_text(x, y, Font::Small, ALTERNATIVES_CAPTION)?;

    let alternative = cursor
        .suggestion_for(prediction.alternatives.len())
        .and_then(|i| prediction.alternatives.get(i))
        .unwrap_or(NO_ALTERNATIVES);
    let (x, y) = ALTERNATIVE_TEXT_POS;
    display.draw_text(x, y, Font::Body, alternative)
}

fn draw_icon_line<D: DisplayDriver>(
    display: &mut D,
    icon_pos: (i32, i32),
    icon: Icon,
    text_pos: (i32, i32),
    font: Font,
    text: &str,
) -> Result<(), DisplayError> {
    display.draw_glyph(icon_pos.0, icon_pos.1, icon)?;
    display.draw_text(text_pos.0, text_pos.1, font, text)
}

/// Format a reading to one decimal place, or a placeholder when absent
fn reading<const N: usize>(value: Option<f32>, unit: &str) -> String<N> {
    let mut line = String::new();
    // Overflow leaves a truncated line, which is still drawable
    let _ = match value {
        Some(v) => write!(line, "{:.1} {}", v, unit),
        None => write!(line, "--.- {}", unit),
    };
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{DrawOp, RecordingDisplay};
    use cropcast_protocol::PredictionResponse;

    fn snapshot() -> SensorSnapshot {
        let mut snapshot = SensorSnapshot::new();
        snapshot.temperature_c = Some(25.3);
        snapshot.humidity_pct = Some(60.1);
        snapshot.set_moisture_voltage(2.1);
        snapshot
    }

    fn prediction(body: &[u8]) -> PredictionResult {
        let mut result = PredictionResult::new();
        result.apply(PredictionResponse::decode(body).unwrap());
        result
    }

    fn rice() -> PredictionResult {
        prediction(br#"{"best_crop":"Rice","rainfall_used":120.5,"other_suggestions":["Maize","Wheat"]}"#)
    }

    fn on(screen: Screen) -> ScrollCursor {
        ScrollCursor {
            screen,
            suggestion: 0,
        }
    }

    fn text(x: i32, y: i32, font: Font, text: &str) -> DrawOp {
        DrawOp::Text {
            x,
            y,
            font,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_primary_screen_frame() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Primary);

        presenter
            .render(&mut display, &mut cursor, &snapshot(), &rice(), 0)
            .unwrap();

        assert_eq!(display.frames().len(), 1);
        assert_eq!(
            display.last_frame(),
            &[
                text(0, 12, Font::Title, "Environment"),
                DrawOp::Line(0, 16, 127, 16),
                DrawOp::Glyph {
                    x: 0,
                    y: 42,
                    icon: Icon::Thermometer
                },
                text(32, 40, Font::Body, "25.3 C"),
                DrawOp::Glyph {
                    x: 0,
                    y: 64,
                    icon: Icon::Droplet
                },
                text(32, 62, Font::Body, "60.1 %"),
            ]
        );
    }

    #[test]
    fn test_absent_readings_show_placeholder() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Primary);

        presenter
            .render(
                &mut display,
                &mut cursor,
                &SensorSnapshot::new(),
                &PredictionResult::new(),
                0,
            )
            .unwrap();

        assert_eq!(display.last_texts(), ["Environment", "--.- C", "--.- %"]);
    }

    #[test]
    fn test_secondary_screen_texts() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Secondary);

        presenter
            .render(&mut display, &mut cursor, &snapshot(), &rice(), 0)
            .unwrap();

        assert_eq!(display.last_texts(), ["Soil & Weather", "Wet", "120.5 mm"]);
    }

    #[test]
    fn test_prediction_screen_scrolls_alternatives() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Prediction);
        let (snapshot, rice) = (snapshot(), rice());

        let mut shown = Vec::new();
        for now in [0, 1000, 2000, 2001, 3000, 4001, 4002] {
            presenter
                .render(&mut display, &mut cursor, &snapshot, &rice, now)
                .unwrap();
            let texts = display.last_texts();
            assert_eq!(texts[..3], ["Crop Suggestion", "Rice", "Alternatives:"]);
            shown.push(texts[3].to_string());
        }

        assert_eq!(
            shown,
            ["Maize", "Maize", "Maize", "Wheat", "Wheat", "Wheat", "Maize"]
        );
    }

    #[test]
    fn test_prediction_crop_is_bold() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Prediction);

        presenter
            .render(&mut display, &mut cursor, &snapshot(), &rice(), 0)
            .unwrap();

        assert!(display
            .last_frame()
            .contains(&text(24, 38, Font::BodyBold, "Rice")));
        assert!(display
            .last_frame()
            .contains(&text(24, 54, Font::Small, "Alternatives:")));
    }

    #[test]
    fn test_empty_alternatives_show_none_and_keep_timer() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Prediction);
        let empty = prediction(br#"{"best_crop":"Coffee","other_suggestions":[]}"#);

        for now in [0, 3000, 6000] {
            presenter
                .render(&mut display, &mut cursor, &snapshot(), &empty, now)
                .unwrap();
            assert_eq!(display.last_texts()[3], "None");
        }
        assert_eq!(cursor.suggestion, 0);

        // Timer was never reset, so the first render with a list moves at once
        presenter
            .render(&mut display, &mut cursor, &snapshot(), &rice(), 6500)
            .unwrap();
        assert_eq!(display.last_texts()[3], "Wheat");
    }

    #[test]
    fn test_single_alternative_always_shown() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Prediction);
        let one = prediction(br#"{"best_crop":"Rice","other_suggestions":["Maize"]}"#);

        for now in [0, 2500, 5000, 7500] {
            presenter
                .render(&mut display, &mut cursor, &snapshot(), &one, now)
                .unwrap();
            assert_eq!(display.last_texts()[3], "Maize");
            assert_eq!(cursor.suggestion, 0);
        }
    }

    #[test]
    fn test_other_screens_do_not_scroll() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();
        let mut cursor = on(Screen::Primary);

        presenter
            .render(&mut display, &mut cursor, &snapshot(), &rice(), 10_000)
            .unwrap();
        assert_eq!(cursor.suggestion, 0);
    }

    #[test]
    fn test_status_screen() {
        let presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::new();

        presenter
            .render_status(&mut display, "System Booting...")
            .unwrap();

        assert_eq!(
            display.last_frame(),
            &[text(0, 35, Font::Body, "System Booting...")]
        );
    }

    #[test]
    fn test_flush_error_is_returned() {
        let mut presenter = DisplayPresenter::new(2000);
        let mut display = RecordingDisplay::failing();
        let mut cursor = on(Screen::Primary);

        assert_eq!(
            presenter.render(&mut display, &mut cursor, &snapshot(), &rice(), 0),
            Err(DisplayError::Bus)
        );
        assert!(display.frames().is_empty());
    }

    #[test]
    fn test_reading_format() {
        let line: String<LINE_CAPACITY> = reading(Some(-3.26), "C");
        assert_eq!(line.as_str(), "-3.3 C");
        let line: String<LINE_CAPACITY> = reading(Some(0.0), "mm");
        assert_eq!(line.as_str(), "0.0 mm");
    }
}
