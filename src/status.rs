use log::info;
use smart_leds::RGB8;

use crate::error::LedError;
use crate::led::Led;
use crate::transmitter::SymbolTransmitter;

/// Operating brightness of the status LED. Dim on purpose, a single
/// indicator does not need full current. Tunable, not a protocol value.
pub const STATUS_BRIGHTNESS: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Boot,
    Ready,
}

impl Status {
    pub fn color(self) -> RGB8 {
        match self {
            Status::Boot => RGB8::new(255, 0, 0),
            Status::Ready => RGB8::new(0, 255, 0),
        }
    }
}

/// Boot/ready indicator on top of a [`Led`].
///
/// Keeps its own one-time setup flag, independent of the LED's, so it works
/// whether or not anyone initialized the LED before.
pub struct StatusLed<T> {
    led: Led<T>,
    brightness: u8,
    setup_done: bool,
    current: Option<Status>,
}

impl<T: SymbolTransmitter> StatusLed<T> {
    pub fn new(led: Led<T>) -> StatusLed<T> {
        StatusLed::with_brightness(led, STATUS_BRIGHTNESS)
    }

    pub fn with_brightness(led: Led<T>, brightness: u8) -> StatusLed<T> {
        StatusLed {
            led,
            brightness,
            setup_done: false,
            current: None,
        }
    }

    pub fn boot(&mut self) -> Result<(), LedError> {
        self.signal(Status::Boot)
    }

    pub fn ready(&mut self) -> Result<(), LedError> {
        self.signal(Status::Ready)
    }

    pub fn signal(&mut self, status: Status) -> Result<(), LedError> {
        self.ensure_setup()?;

        let color = status.color();
        self.led.set_rgb(color)?;
        self.current = Some(status);
        info!("Status LED: {:?}", status);

        Ok(())
    }

    /// Last status that reached the LED.
    pub fn status(&self) -> Option<Status> {
        self.current
    }

    pub fn led(&self) -> &Led<T> {
        &self.led
    }

    pub fn led_mut(&mut self) -> &mut Led<T> {
        &mut self.led
    }

    fn ensure_setup(&mut self) -> Result<(), LedError> {
        if self.setup_done {
            return Ok(());
        }

        self.led.initialize()?;
        self.led.set_brightness(self.brightness);
        self.setup_done = true;
        info!("Status LED set up at brightness {}", self.brightness);

        Ok(())
    }
}
