//! Display drivers

pub mod graphics;
pub mod icons;
pub mod sh1106;

pub use graphics::{FrameBuffer, GraphicsDisplay};
pub use sh1106::{Sh1106, SH1106_ADDR};
