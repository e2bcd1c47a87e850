//! Audible alert driver.
//!
//! A passive buzzer on a plain output line, toggled in software. One burst
//! is a short train of on/off pulses; the whole burst blocks the caller for
//! `pulses * (on_us + off_us)` (75 ms with the defaults), which is why it
//! only ever runs from the main loop.
//!
//! Generic over `embedded_hal` pin and delay traits so the same driver runs
//! on `PinDriver` + `Ets` on the device and on mocks in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;
use log::warn;

use crate::config::{MonitorConfig, MAX_BUZZER_PULSES};
use crate::error::PeripheralError;

/// One on/off step of a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub on_us: u32,
    pub off_us: u32,
}

/// Bounded pulse train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuzzerPattern {
    pulses: Vec<Pulse, { MAX_BUZZER_PULSES as usize }>,
}

impl BuzzerPattern {
    /// `count` identical pulses, truncated to the pattern capacity.
    pub fn uniform(count: u8, on_us: u32, off_us: u32) -> Self {
        let mut pulses = Vec::new();
        for _ in 0..count.min(MAX_BUZZER_PULSES) {
            // Cannot overflow: count is capped to the capacity above.
            let _ = pulses.push(Pulse { on_us, off_us });
        }
        Self { pulses }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::uniform(config.buzzer_pulses, config.buzzer_on_us, config.buzzer_off_us)
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Total time the burst blocks, in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.pulses
            .iter()
            .map(|p| u64::from(p.on_us) + u64::from(p.off_us))
            .sum()
    }
}

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
    pattern: BuzzerPattern,
    bursts: u32,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    pub fn new(pin: P, delay: D, pattern: BuzzerPattern) -> Self {
        Self {
            pin,
            delay,
            pattern,
            bursts: 0,
        }
    }

    /// Play the configured burst. The line is left low even on error.
    pub fn burst(&mut self) -> Result<(), PeripheralError> {
        self.bursts = self.bursts.wrapping_add(1);
        let Self {
            pin,
            delay,
            pattern,
            ..
        } = self;
        for &Pulse { on_us, off_us } in pattern.pulses() {
            if pin.set_high().is_err() {
                let _ = pin.set_low();
                warn!("buzzer: pin write failed");
                return Err(PeripheralError::GpioWriteFailed);
            }
            delay.delay_us(on_us);
            if pin.set_low().is_err() {
                warn!("buzzer: pin write failed");
                return Err(PeripheralError::GpioWriteFailed);
            }
            delay.delay_us(off_us);
        }
        Ok(())
    }

    /// Silence the line.
    pub fn off(&mut self) -> Result<(), PeripheralError> {
        self.pin.set_low().map_err(|_| PeripheralError::GpioWriteFailed)
    }

    pub fn pattern(&self) -> &BuzzerPattern {
        &self.pattern
    }

    /// Bursts requested since boot.
    pub fn burst_count(&self) -> u32 {
        self.bursts
    }
}
