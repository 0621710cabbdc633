//! The assembled audio core.
//!
//! Composes the sequencer and the tone generator behind the signal
//! boundary the rest of the game sees. The two machines share nothing
//! but the clock: one `tick` advances both.

use nf_score::{ClockConfig, Column, Score, ToneTable};

use crate::sequencer::SongSequencer;
use crate::tone::ToneGenerator;

/// Input signals for one clock cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChipInput {
    /// Synchronous reset; overrides every other transition this cycle.
    pub reset: bool,
    /// Momentary play trigger; a rising edge starts the song when idle.
    pub start: bool,
    /// Player hit lines, green first.
    pub hits: [bool; 4],
}

impl ChipInput {
    /// All lines low.
    pub const fn idle() -> Self {
        Self {
            reset: false,
            start: false,
            hits: [false; 4],
        }
    }

    /// Idle except for a high start line.
    pub const fn press_start() -> Self {
        Self {
            reset: false,
            start: true,
            hits: [false; 4],
        }
    }

    /// Idle except for one high hit line.
    pub const fn press(column: Column) -> Self {
        let mut hits = [false; 4];
        hits[column.index()] = true;
        Self {
            reset: false,
            start: false,
            hits,
        }
    }
}

/// Output signals after one clock cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChipOutput {
    /// Note pulses, high while the current step's latch is held.
    pub notes: [bool; 4],
    /// Current step index, 0..=256.
    pub position: u16,
    pub playing: bool,
    pub done: bool,
    /// Square-wave tone line.
    pub pwm: bool,
    /// Amplifier enable; tied high.
    pub audio_enable: bool,
}

/// The two audio state machines behind the game's signal boundary.
#[derive(Clone, Debug)]
pub struct AudioChip {
    sequencer: SongSequencer,
    tones: ToneGenerator,
    config: ClockConfig,
}

impl AudioChip {
    pub fn new(score: Score, config: ClockConfig) -> Self {
        config.validate();
        Self {
            sequencer: SongSequencer::new(score, config),
            tones: ToneGenerator::new(
                ToneTable::for_clock_hz(config.clock_hz),
                config.tone_duration,
            ),
            config,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &SongSequencer {
        &self.sequencer
    }

    pub fn tones(&self) -> &ToneGenerator {
        &self.tones
    }

    /// Advance one clock cycle.
    pub fn tick(&mut self, input: ChipInput) -> ChipOutput {
        let seq = self.sequencer.tick(input.start, input.reset);
        let tone = self.tones.tick(input.hits, input.reset);
        ChipOutput {
            notes: seq.notes,
            position: seq.position,
            playing: seq.playing,
            done: seq.done,
            pwm: tone.pwm,
            audio_enable: tone.audio_enable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_chip() -> AudioChip {
        let config = ClockConfig {
            clock_hz: 1_000_000,
            tempo_bit: 4,
            counter_bits: 7,
            pulse_hold: 8,
            tone_duration: 64,
        };
        AudioChip::new(Score::builtin(), config)
    }

    #[test]
    fn start_drives_the_sequencer_only() {
        let mut chip = test_chip();
        let out = chip.tick(ChipInput::press_start());
        assert!(out.playing);
        assert!(!out.pwm);
        assert!(!chip.tones().is_active());
    }

    #[test]
    fn hits_drive_the_tones_only() {
        let mut chip = test_chip();
        let out = chip.tick(ChipInput::press(Column::Blue));
        assert!(!out.playing);
        assert!(chip.tones().is_active());
        assert_eq!(out.position, 0);
    }

    #[test]
    fn reset_clears_both_machines() {
        let mut chip = test_chip();
        chip.tick(ChipInput::press_start());
        chip.tick(ChipInput::press(Column::Green));
        for _ in 0..20 {
            chip.tick(ChipInput::idle());
        }

        let out = chip.tick(ChipInput {
            reset: true,
            ..ChipInput::idle()
        });
        assert!(!out.playing);
        assert!(!out.done);
        assert_eq!(out.position, 0);
        assert_eq!(out.notes, [false; 4]);
        assert!(!out.pwm);
        assert!(!chip.tones().is_active());
    }

    #[test]
    fn enable_is_high_from_the_first_cycle() {
        let mut chip = test_chip();
        assert!(chip.tick(ChipInput::idle()).audio_enable);
    }
}
