//! Remote crop prediction
//!
//! Sends the current readings to the crop server and folds the reply, or
//! the reason there was none, into the prediction state.

pub mod client;

pub use client::{
    FetchOutcome, PredictionClient, MAX_URL_LEN, REQUEST_BUF_LEN, RESPONSE_BUF_LEN,
};
