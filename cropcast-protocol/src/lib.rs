//! Crop prediction wire protocol
//!
//! This crate defines the contract between the field device and the remote
//! crop model. The device performs one `POST <base>/predict` per fetch over a
//! fresh connection and reads the response to end of stream.
//!
//! # Protocol Overview
//!
//! ```text
//! device                                   server
//!   │  POST /predict  (application/json)     │
//!   │  {N,P,K,temperature,humidity,ph,       │
//!   │   moisture,moisture_status}            │
//!   │ ─────────────────────────────────────▶ │
//!   │                                        │
//!   │  {best_crop, rainfall_used,            │
//!   │   other_suggestions[]}                 │
//!   │ ◀───────────────────────────────────── │
//! ```
//!
//! Bodies are encoded with `serde-json-core` into caller-provided buffers, so
//! nothing here allocates.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod http;
pub mod messages;

pub use http::{
    parse_response, write_post_head, Endpoint, EndpointError, HttpError, Response,
};
pub use messages::{
    Alternatives, CodecError, CropName, PredictionRequest, PredictionResponse,
    CONTENT_TYPE_JSON, MAX_ALTERNATIVES, MAX_CROP_NAME_LEN, PREDICT_PATH,
};
