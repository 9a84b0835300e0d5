//! Prediction request and response bodies
//!
//! Request (device → server):
//! ```text
//! {"N":90.0,"P":42.0,"K":43.0,"temperature":25.3,"humidity":60.1,
//!  "ph":6.8,"moisture":2.1,"moisture_status":"Wet"}
//! ```
//!
//! Response (server → device):
//! ```text
//! {"best_crop":"Rice","rainfall_used":120.5,"other_suggestions":["Maize","Wheat"]}
//! ```

use core::fmt;

use heapless::{String, Vec};
use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Path of the prediction endpoint, appended to the configured base URL
pub const PREDICT_PATH: &str = "/predict";

/// Content type declared on every request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Maximum crop label length in bytes
pub const MAX_CROP_NAME_LEN: usize = 24;

/// Maximum number of alternative suggestions retained
pub const MAX_ALTERNATIVES: usize = 4;

/// Scratch space for one string containing JSON escapes
const UNESCAPE_BUF_LEN: usize = 128;

/// Errors from encoding or decoding a JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Output buffer too small for the encoded body
    BufferTooSmall,
    /// Body is not a valid response object
    Malformed,
}

/// Prediction request body
///
/// Absent readings serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest<'a> {
    /// Soil nitrogen
    #[serde(rename = "N")]
    pub nitrogen: f32,
    /// Soil phosphorus
    #[serde(rename = "P")]
    pub phosphorus: f32,
    /// Soil potassium
    #[serde(rename = "K")]
    pub potassium: f32,
    /// Air temperature (°C)
    pub temperature: Option<f32>,
    /// Relative humidity (%)
    pub humidity: Option<f32>,
    /// Soil pH
    pub ph: f32,
    /// Soil probe voltage (V)
    pub moisture: f32,
    /// Moisture band label
    pub moisture_status: &'a str,
}

impl PredictionRequest<'_> {
    /// Encode this request into `buf`
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
        serde_json_core::to_slice(self, buf).map_err(|_| CodecError::BufferTooSmall)
    }
}

/// Crop label with bounded capacity
///
/// Longer names are truncated on a character boundary instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CropName(String<MAX_CROP_NAME_LEN>);

impl CropName {
    /// Create a label, truncating to capacity
    pub fn new(name: &str) -> Self {
        let mut label = String::new();
        for ch in name.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        Self(label)
    }

    /// Get the label text
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<'de> Deserialize<'de> for CropName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CropNameVisitor;

        impl Visitor<'_> for CropNameVisitor {
            type Value = CropName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a crop name string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<CropName, E> {
                Ok(CropName::new(v))
            }
        }

        deserializer.deserialize_str(CropNameVisitor)
    }
}

/// Alternative crop suggestions, in server order
///
/// Capacity is enforced where data enters: anything past the first
/// [`MAX_ALTERNATIVES`] entries is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alternatives(Vec<CropName, MAX_ALTERNATIVES>);

impl Alternatives {
    /// Create an empty list
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    fn push_truncating(&mut self, name: CropName) {
        // Full list drops the name
        let _ = self.0.push(name);
    }

    /// Number of suggestions held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no suggestions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the suggestion at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(CropName::as_str)
    }

    /// Iterate suggestions in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(CropName::as_str)
    }
}

impl<'de> Deserialize<'de> for Alternatives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AlternativesVisitor;

        impl<'de> Visitor<'de> for AlternativesVisitor {
            type Value = Alternatives;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of crop names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Alternatives, A::Error> {
                let mut list = Alternatives::new();
                // Elements past capacity are still consumed so the array parses
                while let Some(name) = seq.next_element::<CropName>()? {
                    list.push_truncating(name);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(AlternativesVisitor)
    }
}

/// Prediction response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    /// Recommended crop
    pub best_crop: CropName,
    /// Rainfall figure the model used (mm)
    #[serde(default)]
    pub rainfall_used: Option<f32>,
    /// Runner-up crops, best first
    #[serde(default)]
    pub other_suggestions: Option<Alternatives>,
}

impl PredictionResponse {
    /// Decode a response body
    ///
    /// Unknown fields are ignored. Trailing whitespace is accepted. Escape
    /// sequences in strings are decoded before names are stored.
    pub fn decode(body: &[u8]) -> Result<Self, CodecError> {
        let mut scratch = [0u8; UNESCAPE_BUF_LEN];
        serde_json_core::from_slice_escaped::<Self>(body, &mut scratch)
            .map(|(response, _)| response)
            .map_err(|_| CodecError::Malformed)
    }

    /// Rainfall in mm, 0.0 when the server omitted it
    pub fn rainfall_mm(&self) -> f32 {
        self.rainfall_used.unwrap_or(0.0)
    }

    /// Take the suggestion list, empty when absent
    pub fn into_alternatives(self) -> Alternatives {
        self.other_suggestions.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(temp: Option<f32>, hum: Option<f32>) -> PredictionRequest<'static> {
        PredictionRequest {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: temp,
            humidity: hum,
            ph: 6.8,
            moisture: 2.5,
            moisture_status: "Moist",
        }
    }

    #[test]
    fn test_request_field_order_and_names() {
        let mut buf = [0u8; 256];
        let len = request(Some(25.5), Some(60.0)).encode(&mut buf).unwrap();
        let json = core::str::from_utf8(&buf[..len]).unwrap();

        assert_eq!(
            json,
            "{\"N\":90.0,\"P\":42.0,\"K\":43.0,\"temperature\":25.5,\"humidity\":60.0,\
             \"ph\":6.8,\"moisture\":2.5,\"moisture_status\":\"Moist\"}"
        );
    }

    #[test]
    fn test_request_absent_readings_are_null() {
        let mut buf = [0u8; 256];
        let len = request(None, None).encode(&mut buf).unwrap();
        let json = core::str::from_utf8(&buf[..len]).unwrap();

        assert!(json.contains("\"temperature\":null"));
        assert!(json.contains("\"humidity\":null"));
    }

    #[test]
    fn test_request_buffer_too_small() {
        let mut buf = [0u8; 16];
        assert_eq!(
            request(Some(20.0), Some(50.0)).encode(&mut buf),
            Err(CodecError::BufferTooSmall)
        );
    }

    #[test]
    fn test_decode_full_response() {
        let body = br#"{"best_crop":"Rice","rainfall_used":120.5,"other_suggestions":["Maize","Wheat"]}"#;
        let response = PredictionResponse::decode(body).unwrap();

        assert_eq!(response.best_crop.as_str(), "Rice");
        assert_eq!(response.rainfall_mm(), 120.5);
        let alternatives = response.into_alternatives();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives.get(0), Some("Maize"));
        assert_eq!(alternatives.get(1), Some("Wheat"));
    }

    #[test]
    fn test_decode_truncates_to_four_suggestions() {
        let body = br#"{"best_crop":"Rice","rainfall_used":1.0,
            "other_suggestions":["A","B","C","D","E","F"]}"#;
        let alternatives = PredictionResponse::decode(body).unwrap().into_alternatives();

        assert_eq!(alternatives.len(), 4);
        let names: std::vec::Vec<&str> = alternatives.iter().collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_decode_without_rainfall_or_suggestions() {
        // The crop server only sends best_crop and other_suggestions
        let body = br#"{"best_crop":"Maize"}"#;
        let response = PredictionResponse::decode(body).unwrap();

        assert_eq!(response.rainfall_mm(), 0.0);
        assert!(response.into_alternatives().is_empty());
    }

    #[test]
    fn test_decode_null_suggestions() {
        let body = br#"{"best_crop":"Maize","other_suggestions":null}"#;
        let response = PredictionResponse::decode(body).unwrap();
        assert!(response.into_alternatives().is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields_and_trailing_newline() {
        let body = b"{\"best_crop\":\"Cotton\",\"model\":\"rf-v2\",\"other_suggestions\":[]}\n";
        let response = PredictionResponse::decode(body).unwrap();
        assert_eq!(response.best_crop.as_str(), "Cotton");
    }

    #[test]
    fn test_decode_missing_best_crop_is_malformed() {
        let body = br#"{"rainfall_used":3.0,"other_suggestions":["Rice"]}"#;
        assert_eq!(PredictionResponse::decode(body), Err(CodecError::Malformed));
    }

    #[test]
    fn test_decode_html_error_page_is_malformed() {
        let body = b"<html><body>Internal Server Error</body></html>";
        assert_eq!(PredictionResponse::decode(body), Err(CodecError::Malformed));
    }

    #[test]
    fn test_crop_name_truncates_long_labels() {
        let name = CropName::new("An extraordinarily long crop name");
        assert_eq!(name.as_str().len(), MAX_CROP_NAME_LEN);
        assert!("An extraordinarily long crop name".starts_with(name.as_str()));
    }

    #[test]
    fn test_decode_unescapes_strings() {
        let body = br#"{"best_crop":"Pigeon peas","other_suggestions":["a\"b","Moth\\beans"]}"#;
        let response = PredictionResponse::decode(body).unwrap();

        assert_eq!(response.best_crop.as_str(), "Pigeon peas");
        let list = response.into_alternatives();
        assert_eq!(list.get(0), Some("a\"b"));
        assert_eq!(list.get(1), Some("Moth\\beans"));
    }

    proptest! {
        #[test]
        fn prop_alternatives_keep_first_four_in_order(
            names in proptest::collection::vec("[a-z]{1,10}", 0..12)
        ) {
            let quoted: std::vec::Vec<std::string::String> =
                names.iter().map(|n| format!("\"{}\"", n)).collect();
            let body = format!(
                r#"{{"best_crop":"Rice","other_suggestions":[{}]}}"#,
                quoted.join(",")
            );
            let list = PredictionResponse::decode(body.as_bytes())
                .unwrap()
                .into_alternatives();
            let expected = names.len().min(MAX_ALTERNATIVES);

            prop_assert_eq!(list.len(), expected);
            for (i, name) in names.iter().take(expected).enumerate() {
                prop_assert_eq!(list.get(i), Some(name.as_str()));
            }
        }
    }
}
