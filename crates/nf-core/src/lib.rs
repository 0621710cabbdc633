//! Cycle-accurate audio core for notefall.
//!
//! Models the game's two synchronous audio state machines, the song
//! sequencer and the hit-triggered tone generator, exactly as the
//! hardware runs them: one `tick` call per rising clock edge, state held
//! in fixed-width counters, reset overriding everything else within the
//! same tick. There is no other way time passes here.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod chip;
mod downsample;
mod edge;
mod frame;
mod sequencer;
mod tone;

pub use chip::{AudioChip, ChipInput, ChipOutput};
pub use downsample::PwmDownsampler;
pub use edge::EdgeDetector;
pub use frame::Frame;
pub use sequencer::{SequencerOutput, SongSequencer};
pub use tone::{ToneGenerator, ToneOutput, AUDIO_ENABLE};
