//! Status LED for the OpenThread border router board.
//!
//! A single WS2812 pixel driven from an RMT channel: red while booting, green
//! once the radio is up. The RMT backend is only built for ESP-IDF targets;
//! everything else runs on the host as well.

pub mod error;
pub mod led;
pub mod status;
pub mod transmitter;
pub mod ws2812;

#[cfg(target_os = "espidf")]
pub mod rmt;

pub use error::LedError;
pub use led::Led;
pub use status::{Status, StatusLed, STATUS_BRIGHTNESS};
pub use transmitter::SymbolTransmitter;
pub use ws2812::{Frame, Symbol};
