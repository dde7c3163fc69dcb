//! Recording test double for the RMT seam.
//!
//! Captures every call so tests can assert on the full hardware history
//! without a peripheral.

use std::time::Duration;

use rcp_status_led::{Frame, LedError, SymbolTransmitter};

#[derive(Debug, Clone, PartialEq)]
pub enum RmtCall {
    Configure,
    Transmit { frame: Frame, timeout: Duration },
    Latch(Duration),
}

#[derive(Default)]
pub struct RecordingTransmitter {
    pub calls: Vec<RmtCall>,
    pub fail_configure: Option<LedError>,
    pub fail_transmit: Option<LedError>,
}

#[allow(dead_code)]
impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RmtCall::Configure))
            .count()
    }

    pub fn frames(&self) -> Vec<&Frame> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RmtCall::Transmit { frame, .. } => Some(frame),
                _ => None,
            })
            .collect()
    }

    pub fn last_grb(&self) -> Option<[u8; 3]> {
        self.frames().last().and_then(|f| f.decode())
    }
}

impl SymbolTransmitter for RecordingTransmitter {
    fn configure(&mut self) -> Result<(), LedError> {
        if let Some(err) = self.fail_configure {
            return Err(err);
        }
        self.calls.push(RmtCall::Configure);
        Ok(())
    }

    fn transmit(&mut self, frame: &Frame, timeout: Duration) -> Result<(), LedError> {
        if let Some(err) = self.fail_transmit {
            return Err(err);
        }
        self.calls.push(RmtCall::Transmit {
            frame: frame.clone(),
            timeout,
        });
        Ok(())
    }

    fn latch(&mut self, gap: Duration) {
        self.calls.push(RmtCall::Latch(gap));
    }
}
