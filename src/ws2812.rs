//! WS2812 bit encoding.
//!
//! A color update is 24 pulse symbols, one per bit, sent GREEN, RED, BLUE
//! with the most significant bit first. Durations are RMT ticks at 10 MHz.

use smart_leds::RGB8;
use std::time::Duration;

/// RMT counter resolution, 0.1 µs per tick.
pub const RMT_RESOLUTION_HZ: u32 = 10_000_000;

pub const FRAME_SYMBOLS: usize = 24;

/// Idle time after a frame that makes the LED latch the color.
pub const RESET_GAP: Duration = Duration::from_micros(80);

/// Upper bound on waiting for the peripheral to finish a frame.
pub const TX_DONE_TIMEOUT: Duration = Duration::from_millis(50);

const T0H_TICKS: u16 = 4;
const T0L_TICKS: u16 = 8;
const T1H_TICKS: u16 = 7;
const T1L_TICKS: u16 = 6;

const TICK_NANOS: u64 = 1_000_000_000 / RMT_RESOLUTION_HZ as u64;

/// Linear brightness scaling, truncating: `value * brightness / 255`.
pub fn scale(value: u8, brightness: u8) -> u8 {
    (u16::from(value) * u16::from(brightness) / 255) as u8
}

/// Scales `color` and reorders it into wire order.
pub fn grb(color: RGB8, brightness: u8) -> [u8; 3] {
    [
        scale(color.g, brightness),
        scale(color.r, brightness),
        scale(color.b, brightness),
    ]
}

/// One encoded bit: a high pulse followed by a low pulse, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub high: u16,
    pub low: u16,
}

impl Symbol {
    pub const ZERO: Symbol = Symbol {
        high: T0H_TICKS,
        low: T0L_TICKS,
    };

    pub const ONE: Symbol = Symbol {
        high: T1H_TICKS,
        low: T1L_TICKS,
    };

    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// The bit this symbol encodes, or `None` for a non-canonical shape.
    pub fn bit(&self) -> Option<bool> {
        match *self {
            Self::ONE => Some(true),
            Self::ZERO => Some(false),
            _ => None,
        }
    }

    pub fn high_duration(&self) -> Duration {
        Duration::from_nanos(u64::from(self.high) * TICK_NANOS)
    }

    pub fn low_duration(&self) -> Duration {
        Duration::from_nanos(u64::from(self.low) * TICK_NANOS)
    }
}

/// A complete color update, built per call and handed straight to the
/// transmitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    symbols: [Symbol; FRAME_SYMBOLS],
}

impl Frame {
    /// Encodes bytes already in wire order.
    pub fn encode(grb: [u8; 3]) -> Self {
        let mut symbols = [Symbol::ZERO; FRAME_SYMBOLS];

        for (chunk, byte) in symbols.chunks_exact_mut(8).zip(grb) {
            for (i, symbol) in chunk.iter_mut().enumerate() {
                *symbol = Symbol::from_bit(byte & (0x80 >> i) != 0);
            }
        }

        Frame { symbols }
    }

    pub fn for_color(color: RGB8, brightness: u8) -> Self {
        Self::encode(grb(color, brightness))
    }

    pub fn symbols(&self) -> &[Symbol; FRAME_SYMBOLS] {
        &self.symbols
    }

    /// Reads the wire-order bytes back out of the symbols.
    ///
    /// Returns `None` if any symbol does not have one of the two canonical
    /// shapes.
    pub fn decode(&self) -> Option<[u8; 3]> {
        let mut grb = [0u8; 3];

        for (byte, chunk) in grb.iter_mut().zip(self.symbols.chunks_exact(8)) {
            for symbol in chunk {
                *byte = (*byte << 1) | u8::from(symbol.bit()?);
            }
        }

        Some(grb)
    }

    pub fn duration(&self) -> Duration {
        self.symbols
            .iter()
            .map(|s| s.high_duration() + s.low_duration())
            .sum()
    }
}
