//! Score data and timing parameters for notefall.
//!
//! This crate defines everything the audio core consumes as data: the
//! four-column note score and its bit-packing convention, the
//! clock-rate-derived timing parameters, and the per-column square-wave
//! dividers.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod analysis;
mod clock;
mod column;
mod score;
mod tones;
mod track;

pub use analysis::{summarize, ScoreSummary};
pub use clock::{
    ClockConfig, REFERENCE_CLOCK_HZ, REFERENCE_COUNTER_BITS, REFERENCE_PULSE_HOLD,
    REFERENCE_TEMPO_BIT, REFERENCE_TONE_DURATION,
};
pub use column::Column;
pub use score::Score;
pub use tones::{divider_for, ToneTable, MAX_DIVIDER};
pub use track::{Track, STEPS};
