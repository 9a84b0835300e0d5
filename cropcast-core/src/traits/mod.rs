//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the board's sensors, radio, display and timebase.

pub mod clock;
pub mod display;
pub mod network;
pub mod sensor;

pub use clock::Clock;
pub use display::{DisplayDriver, DisplayError, Font, Icon};
pub use network::{HttpResponse, HttpTransport, LinkError, NetworkLink, TransportError};
pub use sensor::{AnalogInput, ClimateSensor, SensorError};
