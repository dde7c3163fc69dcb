use std::time::Duration;

use crate::error::LedError;
use crate::ws2812::Frame;

/// Hardware seam between the WS2812 driver and the pulse peripheral.
pub trait SymbolTransmitter {
    /// Sets up the output pin and the pulse channel at 10 MHz.
    ///
    /// Calling this on an already configured transmitter reconfigures it.
    fn configure(&mut self) -> Result<(), LedError>;

    /// Sends one frame and blocks until the peripheral reports completion,
    /// or fails with [`LedError::Timeout`] after `timeout`.
    fn transmit(&mut self, frame: &Frame, timeout: Duration) -> Result<(), LedError>;

    /// Holds the line idle for `gap` so the LED latches the frame.
    fn latch(&mut self, gap: Duration);
}

impl<T: SymbolTransmitter + ?Sized> SymbolTransmitter for &mut T {
    fn configure(&mut self) -> Result<(), LedError> {
        (**self).configure()
    }

    fn transmit(&mut self, frame: &Frame, timeout: Duration) -> Result<(), LedError> {
        (**self).transmit(frame, timeout)
    }

    fn latch(&mut self, gap: Duration) {
        (**self).latch(gap)
    }
}
