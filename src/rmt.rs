//! ESP-IDF RMT backend for the WS2812 driver.

use std::time::Duration;

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::AnyOutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::rmt::{FixedLengthSignal, PinState, Pulse, PulseTicks, RmtChannel, TxRmtDriver};
use esp_idf_hal::units::Hertz;
use esp_idf_sys::{configTICK_RATE_HZ, esp, rmt_wait_tx_done, EspError, ESP_ERR_TIMEOUT};
use log::error;

use crate::error::LedError;
use crate::transmitter::SymbolTransmitter;
use crate::ws2812::{Frame, Symbol, FRAME_SYMBOLS, RMT_RESOLUTION_HZ};

// 80 MHz APB clock / 8 = 10 MHz
const CLOCK_DIVIDER: u8 = 8;

pub struct RmtTransmitter<C> {
    channel: C,
    pin: AnyOutputPin,
    tx: Option<TxRmtDriver<'static>>,
}

impl<C> RmtTransmitter<C>
where
    C: RmtChannel + Peripheral<P = C> + 'static,
{
    /// Nothing touches the hardware until `configure`.
    pub fn new(channel: C, pin: AnyOutputPin) -> RmtTransmitter<C> {
        RmtTransmitter {
            channel,
            pin,
            tx: None,
        }
    }

    fn build_driver(&mut self) -> Result<TxRmtDriver<'static>, EspError> {
        let config = TransmitConfig::new()
            .clock_divider(CLOCK_DIVIDER)
            .idle(Some(PinState::Low));

        // SAFETY: any previous driver holding the channel and pin was dropped
        // before this call, so the clones are the only live handles.
        let (channel, pin) = unsafe { (self.channel.clone_unchecked(), self.pin.clone_unchecked()) };

        TxRmtDriver::new(channel, pin, &config)
    }

    fn signal(frame: &Frame) -> Result<FixedLengthSignal<FRAME_SYMBOLS>, EspError> {
        let mut signal = FixedLengthSignal::<FRAME_SYMBOLS>::new();
        for (i, symbol) in frame.symbols().iter().enumerate() {
            signal.set(i, &pulse_pair(*symbol)?)?;
        }

        Ok(signal)
    }
}

fn pulse_pair(symbol: Symbol) -> Result<(Pulse, Pulse), EspError> {
    Ok((
        Pulse::new(PinState::High, PulseTicks::new(symbol.high)?),
        Pulse::new(PinState::Low, PulseTicks::new(symbol.low)?),
    ))
}

fn timeout_ticks(timeout: Duration) -> u32 {
    ((timeout.as_millis() as u32).saturating_mul(configTICK_RATE_HZ) / 1000).max(1)
}

impl<C> SymbolTransmitter for RmtTransmitter<C>
where
    C: RmtChannel + Peripheral<P = C> + 'static,
{
    fn configure(&mut self) -> Result<(), LedError> {
        self.tx = None;

        let tx = self.build_driver().map_err(|e| {
            error!("RMT channel setup failed: {}", e);
            LedError::Config(e.code())
        })?;

        let clock = tx.counter_clock().map_err(|e| LedError::Config(e.code()))?;
        if clock != Hertz(RMT_RESOLUTION_HZ) {
            error!("RMT counter runs at {:?}, expected {} Hz", clock, RMT_RESOLUTION_HZ);
            return Err(LedError::Config(-1));
        }

        self.tx = Some(tx);

        Ok(())
    }

    fn transmit(&mut self, frame: &Frame, timeout: Duration) -> Result<(), LedError> {
        let tx = self.tx.as_mut().ok_or(LedError::Transmit(-1))?;
        let signal = Self::signal(frame).map_err(|e| LedError::Transmit(e.code()))?;

        tx.start(signal).map_err(|e| {
            error!("RMT transmit failed: {}", e);
            LedError::Transmit(e.code())
        })?;

        // SAFETY: the channel belongs to the driver owned by `self`.
        esp!(unsafe { rmt_wait_tx_done(tx.channel(), timeout_ticks(timeout)) }).map_err(|e| {
            error!("RMT transmit did not complete: {}", e);
            if e.code() == ESP_ERR_TIMEOUT as i32 {
                LedError::Timeout
            } else {
                LedError::Transmit(e.code())
            }
        })
    }

    fn latch(&mut self, gap: Duration) {
        Ets::delay_us(gap.as_micros() as u32);
    }
}
