//! Screen presentation
//!
//! Turns the shared device state into draw calls on a [`DisplayDriver`].
//!
//! [`DisplayDriver`]: crate::traits::DisplayDriver

pub mod layout;
pub mod presenter;

pub use presenter::{DisplayPresenter, LINE_CAPACITY};
