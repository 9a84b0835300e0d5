//! Scripted collaborators for host tests

use core::cell::Cell;
use std::collections::VecDeque;

use embedded_hal_async::delay::DelayNs;

use crate::traits::{
    AnalogInput, ClimateSensor, Clock, DisplayDriver, DisplayError, Font, HttpResponse,
    HttpTransport, Icon, LinkError, NetworkLink, SensorError, TransportError,
};

/// Climate sensor that replays queued readings, then times out
#[derive(Default)]
pub struct ScriptedClimate {
    temperatures: VecDeque<Result<f32, SensorError>>,
    humidities: VecDeque<Result<f32, SensorError>>,
}

impl ScriptedClimate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, reading: Result<f32, SensorError>) -> Self {
        self.temperatures.push_back(reading);
        self
    }

    pub fn humidity(mut self, reading: Result<f32, SensorError>) -> Self {
        self.humidities.push_back(reading);
        self
    }
}

impl ClimateSensor for ScriptedClimate {
    fn read_temperature_c(&mut self) -> Result<f32, SensorError> {
        self.temperatures
            .pop_front()
            .unwrap_or(Err(SensorError::Timeout))
    }

    fn read_humidity_pct(&mut self) -> Result<f32, SensorError> {
        self.humidities.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}

/// ADC that replays queued conversions, then returns a constant
pub struct ScriptedAdc {
    queued: VecDeque<Result<u16, SensorError>>,
    fallback: u16,
}

impl ScriptedAdc {
    pub fn constant(raw: u16) -> Self {
        Self {
            queued: VecDeque::new(),
            fallback: raw,
        }
    }

    pub fn then(mut self, reading: Result<u16, SensorError>) -> Self {
        self.queued.push_back(reading);
        self
    }
}

impl AnalogInput for ScriptedAdc {
    fn read_raw(&mut self, _channel: u8) -> Result<u16, SensorError> {
        self.queued.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Delay that returns immediately and records what was asked
#[derive(Default)]
pub struct RecordingDelay {
    calls_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls_ms(&self) -> &[u32] {
        &self.calls_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.calls_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
    }
}

/// Clock set by the test
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Link that connects on a given attempt, or never
pub struct MockLink {
    connect_on_attempt: Option<u32>,
    attempts: u32,
    connected: bool,
}

impl MockLink {
    pub fn connected() -> Self {
        Self {
            connect_on_attempt: Some(1),
            attempts: 0,
            connected: true,
        }
    }

    pub fn connects_on(attempt: u32) -> Self {
        Self {
            connect_on_attempt: Some(attempt),
            attempts: 0,
            connected: false,
        }
    }

    pub fn never() -> Self {
        Self {
            connect_on_attempt: None,
            attempts: 0,
            connected: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn drop_link(&mut self) {
        self.connected = false;
    }
}

impl NetworkLink for MockLink {
    async fn join(&mut self, _ssid: &str, _password: &str) -> Result<(), LinkError> {
        self.attempts += 1;
        if self.connect_on_attempt == Some(self.attempts) {
            self.connected = true;
        }
        if self.connected {
            Ok(())
        } else {
            Err(LinkError::JoinFailed)
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// A request seen by [`ScriptedTransport`]
pub struct SentRequest {
    pub url: String,
    pub content_type: String,
    pub body: String,
}

/// Transport that replays queued replies and records requests
#[derive(Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Result<(u16, &'static [u8]), TransportError>>,
    sent: Vec<SentRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, status: u16, body: &'static [u8]) -> Self {
        self.replies.push_back(Ok((status, body)));
        self
    }

    pub fn fail(mut self, error: TransportError) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    pub fn sent(&self) -> &[SentRequest] {
        &self.sent
    }
}

impl HttpTransport for ScriptedTransport {
    async fn post(
        &mut self,
        url: &str,
        content_type: &str,
        body: &[u8],
        response: &mut [u8],
    ) -> Result<HttpResponse, TransportError> {
        self.sent.push(SentRequest {
            url: url.to_string(),
            content_type: content_type.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        });

        let (status, reply) = self
            .replies
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))?;
        if reply.len() > response.len() {
            return Err(TransportError::ResponseTooLarge);
        }
        response[..reply.len()].copy_from_slice(reply);
        Ok(HttpResponse {
            status,
            body_len: reply.len(),
        })
    }
}

/// One drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: i32,
        y: i32,
        font: Font,
        text: String,
    },
    Line(i32, i32, i32, i32),
    Glyph {
        x: i32,
        y: i32,
        icon: Icon,
    },
}

/// Display that records drawing calls per flushed frame
#[derive(Default)]
pub struct RecordingDisplay {
    pending: Vec<DrawOp>,
    frames: Vec<Vec<DrawOp>>,
    fail_flush: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_flush: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    pub fn last_frame(&self) -> &[DrawOp] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text drawn in the last flushed frame, in draw order
    pub fn last_texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DisplayDriver for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.pending.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, font: Font, text: &str) -> Result<(), DisplayError> {
        self.pending.push(DrawOp::Text {
            x,
            y,
            font,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        self.pending.push(DrawOp::Line(x0, y0, x1, y1));
        Ok(())
    }

    fn draw_glyph(&mut self, x: i32, y: i32, icon: Icon) -> Result<(), DisplayError> {
        self.pending.push(DrawOp::Glyph { x, y, icon });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.fail_flush {
            return Err(DisplayError::Bus);
        }
        self.frames.push(core::mem::take(&mut self.pending));
        Ok(())
    }
}
