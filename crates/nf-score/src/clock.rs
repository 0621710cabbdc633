//! Clock-rate-derived timing parameters.
//!
//! Every duration in the core is a cycle count derived from the
//! reference design's 100 MHz clock. A target with a different tick rate
//! retunes the whole set proportionally instead of patching individual
//! constants, so tempo, pulse widths, and envelope lengths keep their
//! wall-clock meaning.

/// Clock rate the reference constants were derived for (Hz).
pub const REFERENCE_CLOCK_HZ: u32 = 100_000_000;

/// Tempo divider bit at the reference clock: one tempo tick per 2^23
/// cycles (≈ 84 ms).
pub const REFERENCE_TEMPO_BIT: u32 = 23;

/// Width of the free-running tempo counter at the reference clock.
pub const REFERENCE_COUNTER_BITS: u32 = 26;

/// Note-pulse hold after a tempo tick, in cycles (≈ 5.2 ms). Sized to
/// outlast the display scanner's sample window.
pub const REFERENCE_PULSE_HOLD: u32 = 1 << 19;

/// Tone duration envelope, in cycles (150 ms).
pub const REFERENCE_TONE_DURATION: u32 = 15_000_000;

/// Timing parameters for one clock rate.
///
/// `Default` is the reference design. The fields are plain data so tests
/// and tools can build degenerate configurations (tiny tempo periods,
/// short envelopes) directly; `validate` enforces the range contracts
/// the hardware declared at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Simulated clock rate in Hz.
    pub clock_hz: u32,
    /// Rising edges of this bit of the free-running counter are tempo
    /// ticks.
    pub tempo_bit: u32,
    /// Width of the free-running counter, in bits.
    pub counter_bits: u32,
    /// Cycles the latched note outputs stay asserted after a tempo tick.
    pub pulse_hold: u32,
    /// Cycles a tone sounds before auto-silencing.
    pub tone_duration: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            clock_hz: REFERENCE_CLOCK_HZ,
            tempo_bit: REFERENCE_TEMPO_BIT,
            counter_bits: REFERENCE_COUNTER_BITS,
            pulse_hold: REFERENCE_PULSE_HOLD,
            tone_duration: REFERENCE_TONE_DURATION,
        }
    }
}

impl ClockConfig {
    /// Retune the reference parameters for a different clock rate.
    ///
    /// The tempo period must stay a power of two (the sequencer detects
    /// tempo ticks as divider-bit edges), so it lands on the nearest
    /// power of two to the reference period's wall-clock length.
    pub fn for_clock_hz(clock_hz: u32) -> Self {
        assert!(clock_hz > 0, "clock rate must be nonzero");

        let scale = clock_hz as f64 / REFERENCE_CLOCK_HZ as f64;
        let tempo_bit = libm::round(REFERENCE_TEMPO_BIT as f64 + libm::log2(scale));
        assert!(
            (1.0..=30.0).contains(&tempo_bit),
            "no usable tempo divider bit at {} Hz",
            clock_hz
        );
        let tempo_bit = tempo_bit as u32;

        let config = Self {
            clock_hz,
            tempo_bit,
            counter_bits: tempo_bit + (REFERENCE_COUNTER_BITS - REFERENCE_TEMPO_BIT),
            pulse_hold: scale_cycles(REFERENCE_PULSE_HOLD, clock_hz),
            tone_duration: scale_cycles(REFERENCE_TONE_DURATION, clock_hz),
        };
        config.validate();
        config
    }

    /// Cycles between tempo ticks.
    pub const fn tempo_period(&self) -> u64 {
        1u64 << self.tempo_bit
    }

    /// Wrap mask for the free-running counter.
    pub const fn counter_mask(&self) -> u32 {
        ((1u64 << self.counter_bits) - 1) as u32
    }

    /// Assert the range contracts of the original compile-time
    /// declarations; construction errors, not runtime conditions.
    pub fn validate(&self) {
        assert!(self.clock_hz > 0, "clock rate must be nonzero");
        assert!(self.counter_bits <= 32, "counter wider than its register");
        assert!(
            self.tempo_bit < self.counter_bits,
            "tempo bit outside the counter"
        );
        assert!(self.pulse_hold > 0, "pulse hold must be nonzero");
        assert!(self.tone_duration > 0, "tone duration must be nonzero");
    }
}

fn scale_cycles(reference: u32, clock_hz: u32) -> u32 {
    ((reference as u64 * clock_hz as u64) / REFERENCE_CLOCK_HZ as u64) as u32
}
