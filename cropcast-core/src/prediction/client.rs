//! Prediction client

use heapless::String;

use cropcast_protocol::{
    Endpoint, PredictionRequest, PredictionResponse, CONTENT_TYPE_JSON, PREDICT_PATH,
};

use crate::config::{ConfigError, SOIL_NITROGEN, SOIL_PH, SOIL_PHOSPHORUS, SOIL_POTASSIUM};
use crate::state::{PredictionResult, SensorSnapshot, HTTP_ERROR_LABEL, PARSE_ERROR_LABEL};
use crate::traits::{HttpTransport, NetworkLink, TransportError};

/// Capacity of the full endpoint URL
pub const MAX_URL_LEN: usize = 96;

/// Request body buffer size
pub const REQUEST_BUF_LEN: usize = 256;

/// Response body buffer size
pub const RESPONSE_BUF_LEN: usize = 512;

/// Result of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchOutcome {
    /// Link was down; nothing was sent or changed
    Skipped,
    /// Prediction replaced from a good response
    Updated,
    /// No usable response; crop shows the HTTP error label
    TransportFailed(TransportError),
    /// Response was not a prediction; crop shows the parse error label
    ParseFailed,
}

/// Client for the crop server's prediction endpoint
pub struct PredictionClient {
    url: String<MAX_URL_LEN>,
    request_buf: [u8; REQUEST_BUF_LEN],
    response_buf: [u8; RESPONSE_BUF_LEN],
}

impl PredictionClient {
    /// Create a client posting to `<base_url>/predict`
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = String::new();
        url.push_str(base_url).map_err(|_| ConfigError::UrlTooLong)?;
        url.push_str(PREDICT_PATH)
            .map_err(|_| ConfigError::UrlTooLong)?;
        Endpoint::parse(&url).map_err(ConfigError::InvalidUrl)?;

        Ok(Self {
            url,
            request_buf: [0; REQUEST_BUF_LEN],
            response_buf: [0; RESPONSE_BUF_LEN],
        })
    }

    /// Full endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch a prediction for the current readings
    ///
    /// Only `best_crop` changes on failure; rainfall and alternatives from the
    /// last good response are kept. Nothing is retried here.
    pub async fn fetch<L, T>(
        &mut self,
        link: &L,
        transport: &mut T,
        snapshot: &SensorSnapshot,
        prediction: &mut PredictionResult,
    ) -> FetchOutcome
    where
        L: NetworkLink,
        T: HttpTransport,
    {
        if !link.is_connected() {
            warn!("WiFi not connected, skipping prediction");
            return FetchOutcome::Skipped;
        }

        let request = PredictionRequest {
            nitrogen: SOIL_NITROGEN,
            phosphorus: SOIL_PHOSPHORUS,
            potassium: SOIL_POTASSIUM,
            temperature: snapshot.temperature_c,
            humidity: snapshot.humidity_pct,
            ph: SOIL_PH,
            moisture: snapshot.moisture_voltage(),
            moisture_status: snapshot.moisture_status().label(),
        };

        let len = match request.encode(&mut self.request_buf) {
            Ok(len) => len,
            Err(e) => {
                // Body never left the device
                error!("Request encoding failed: {}", e);
                prediction.set_sentinel(HTTP_ERROR_LABEL);
                return FetchOutcome::TransportFailed(TransportError::SendFailed);
            }
        };
        let body = &self.request_buf[..len];
        info!("Sending JSON: {}", core::str::from_utf8(body).unwrap_or(""));

        let reply = transport
            .post(&self.url, CONTENT_TYPE_JSON, body, &mut self.response_buf)
            .await
            .and_then(|reply| {
                if reply.status == 0 {
                    Err(TransportError::EmptyStatus)
                } else {
                    Ok(reply)
                }
            });

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Error on sending POST: {}", e.code());
                prediction.set_sentinel(HTTP_ERROR_LABEL);
                return FetchOutcome::TransportFailed(e);
            }
        };

        let body = &self.response_buf[..reply.body_len.min(RESPONSE_BUF_LEN)];
        info!(
            "HTTP {}, response: {}",
            reply.status,
            core::str::from_utf8(body).unwrap_or("<binary>")
        );

        // Any status is parsed; error pages fail as parse errors
        match PredictionResponse::decode(body) {
            Ok(response) => {
                prediction.apply(response);
                info!(
                    "Prediction: {} ({} alternatives)",
                    prediction.best_crop.as_str(),
                    prediction.alternatives.len()
                );
                FetchOutcome::Updated
            }
            Err(e) => {
                warn!("Failed to parse JSON response: {}", e);
                prediction.set_sentinel(PARSE_ERROR_LABEL);
                FetchOutcome::ParseFailed
            }
        }
    }
}
