use log::{debug, info};
use smart_leds::{SmartLedsWrite, RGB8};

use crate::error::LedError;
use crate::transmitter::SymbolTransmitter;
use crate::ws2812::{Frame, RESET_GAP, TX_DONE_TIMEOUT};

/// A single WS2812 LED behind a [`SymbolTransmitter`].
///
/// Owns the brightness scale and the initialization state; nothing about the
/// LED lives in globals.
pub struct Led<T> {
    transmitter: T,
    brightness: u8,
    initialized: bool,
    last_color: Option<RGB8>,
}

impl<T: SymbolTransmitter> Led<T> {
    pub fn new(transmitter: T) -> Led<T> {
        Led {
            transmitter,
            brightness: u8::MAX,
            initialized: false,
            last_color: None,
        }
    }

    /// Configures the transmitter. Not idempotent: a second call reconfigures
    /// the peripheral.
    pub fn initialize(&mut self) -> Result<(), LedError> {
        // A failed reconfigure leaves no usable channel behind.
        self.initialized = false;
        self.transmitter.configure()?;
        self.initialized = true;
        info!("WS2812 transmitter configured");

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Scales, encodes and sends one color, then waits out the reset gap.
    ///
    /// Initializes the transmitter first if nobody did, so a caller can skip
    /// `initialize` entirely.
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) -> Result<(), LedError> {
        self.set_rgb(RGB8::new(red, green, blue))
    }

    pub fn set_rgb(&mut self, color: RGB8) -> Result<(), LedError> {
        if !self.initialized {
            self.initialize()?;
        }

        let frame = self.frame_for(color);
        debug!(
            "WS2812 rgb({}, {}, {}) at brightness {} -> grb {:?}",
            color.r,
            color.g,
            color.b,
            self.brightness,
            frame.decode()
        );

        self.transmitter.transmit(&frame, TX_DONE_TIMEOUT)?;
        self.transmitter.latch(RESET_GAP);
        self.last_color = Some(color);

        Ok(())
    }

    /// Takes effect on the next `set_color`.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Unscaled color of the last frame that was sent successfully.
    pub fn last_color(&self) -> Option<RGB8> {
        self.last_color
    }

    /// The frame `set_rgb` would send for `color` at the current brightness.
    pub fn frame_for(&self, color: RGB8) -> Frame {
        Frame::for_color(color, self.brightness)
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }
}

/// Single pixel: the first color is written and the rest are ignored.
impl<T: SymbolTransmitter> SmartLedsWrite for Led<T> {
    type Error = LedError;
    type Color = RGB8;

    fn write<I, C>(&mut self, iterator: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        match iterator.into_iter().next() {
            Some(color) => self.set_rgb(color.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeRmt {
        configured: usize,
        configure_attempts: usize,
        fail_configure_on: Option<usize>,
        sent: Vec<Frame>,
        gaps: Vec<Duration>,
        fail_transmit: Option<LedError>,
    }

    impl SymbolTransmitter for FakeRmt {
        fn configure(&mut self) -> Result<(), LedError> {
            self.configure_attempts += 1;
            if self.fail_configure_on == Some(self.configure_attempts) {
                return Err(LedError::Config(-1));
            }
            self.configured += 1;
            Ok(())
        }

        fn transmit(&mut self, frame: &Frame, timeout: Duration) -> Result<(), LedError> {
            assert_eq!(timeout, TX_DONE_TIMEOUT);
            if let Some(err) = self.fail_transmit {
                return Err(err);
            }
            self.sent.push(frame.clone());
            Ok(())
        }

        fn latch(&mut self, gap: Duration) {
            self.gaps.push(gap);
        }
    }

    #[test]
    fn defaults_to_full_brightness() {
        let led = Led::new(FakeRmt::default());
        assert_eq!(led.brightness(), 255);
        assert!(!led.is_initialized());
    }

    #[test]
    fn set_color_initializes_lazily_once() {
        let mut led = Led::new(FakeRmt::default());

        led.set_color(1, 2, 3).unwrap();
        led.set_color(4, 5, 6).unwrap();

        assert!(led.is_initialized());
        assert_eq!(led.transmitter().configured, 1);
        assert_eq!(led.transmitter().sent.len(), 2);
        assert_eq!(led.transmitter().gaps, vec![RESET_GAP, RESET_GAP]);
    }

    #[test]
    fn initialize_twice_reconfigures() {
        let mut led = Led::new(FakeRmt::default());
        led.initialize().unwrap();
        led.initialize().unwrap();
        assert_eq!(led.transmitter().configured, 2);
    }

    #[test]
    fn failed_reconfigure_clears_initialized() {
        let rmt = FakeRmt {
            fail_configure_on: Some(2),
            ..FakeRmt::default()
        };
        let mut led = Led::new(rmt);

        led.initialize().unwrap();
        assert_eq!(led.initialize(), Err(LedError::Config(-1)));
        assert!(!led.is_initialized());

        led.set_color(1, 2, 3).unwrap();
        assert_eq!(led.transmitter().configure_attempts, 3);
        assert!(led.is_initialized());
        assert_eq!(led.transmitter().sent.len(), 1);
    }

    #[test]
    fn failed_transmit_skips_latch_and_last_color() {
        let rmt = FakeRmt {
            fail_transmit: Some(LedError::Timeout),
            ..FakeRmt::default()
        };
        let mut led = Led::new(rmt);

        assert_eq!(led.set_color(1, 1, 1), Err(LedError::Timeout));
        assert!(led.is_initialized());
        assert!(led.transmitter().gaps.is_empty());
        assert_eq!(led.last_color(), None);
    }

    #[test]
    fn smart_leds_write_uses_first_pixel() {
        let mut led = Led::new(FakeRmt::default());

        led.write([RGB8::new(10, 20, 30), RGB8::new(1, 1, 1)].into_iter())
            .unwrap();
        led.write(std::iter::empty::<RGB8>()).unwrap();

        assert_eq!(led.transmitter().sent.len(), 1);
        assert_eq!(led.transmitter().sent[0].decode(), Some([20, 10, 30]));
    }
}
