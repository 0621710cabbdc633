//! PWM-to-PCM decimation.
//!
//! The hardware drives its 1-bit PWM pin into an external analog stage.
//! The host preview stands in for that stage with a boxcar average: one
//! output frame per `clock_hz / sample_rate` cycles, window duty mapped
//! to a centered 16-bit value.

use crate::frame::Frame;

/// Output amplitude of a full-scale (always-high) window.
const AMPLITUDE: i64 = 20_000;

/// Decimates the 1-bit PWM stream to host PCM frames.
#[derive(Clone, Copy, Debug)]
pub struct PwmDownsampler {
    cycles_per_frame: u32,
    high: u32,
    elapsed: u32,
}

impl PwmDownsampler {
    /// `clock_hz` is the simulation rate, `sample_rate` the host rate.
    pub fn new(clock_hz: u32, sample_rate: u32) -> Self {
        assert!(sample_rate > 0, "sample rate must be nonzero");
        assert!(
            clock_hz >= sample_rate,
            "clock must not be slower than the sample rate"
        );
        Self {
            cycles_per_frame: clock_hz / sample_rate,
            high: 0,
            elapsed: 0,
        }
    }

    /// Cycles folded into each output frame.
    pub const fn cycles_per_frame(&self) -> u32 {
        self.cycles_per_frame
    }

    /// Feed one cycle's PWM level; returns a frame when a window closes.
    pub fn push(&mut self, pwm: bool) -> Option<Frame> {
        self.high += pwm as u32;
        self.elapsed += 1;
        if self.elapsed < self.cycles_per_frame {
            return None;
        }

        let window = self.elapsed as i64;
        let value = ((self.high as i64 * 2 - window) * AMPLITUDE) / window;
        self.high = 0;
        self.elapsed = 0;
        Some(Frame::new(value as i16))
    }
}
