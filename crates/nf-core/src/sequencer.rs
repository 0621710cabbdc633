//! The song sequencer.
//!
//! Walks the score's 256-step bitmap at a fixed tempo. The tempo comes
//! from a free-running divider: one step per flank of a single counter
//! bit, so the per-tick cost does not depend on the divider width. Each
//! step latches the four note bits and holds them on the
//! outputs for a fixed pulse window so downstream samplers cannot miss
//! them.

use nf_score::{ClockConfig, Score, STEPS};

use crate::edge::EdgeDetector;

/// Output signals after one sequencer tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequencerOutput {
    /// Per-column note pulses, green first.
    pub notes: [bool; 4],
    /// Current step index, 0..=256.
    pub position: u16,
    /// High while the song is stepping.
    pub playing: bool,
    /// High once the whole score has been stepped.
    pub done: bool,
}

/// The sequencer state machine.
#[derive(Clone, Debug)]
pub struct SongSequencer {
    score: Score,
    config: ClockConfig,
    playing: bool,
    position: u16,
    /// Free-running tempo divider; wraps at the configured width.
    tempo_counter: u32,
    /// Cycles left to hold the latched notes on the outputs.
    pulse_counter: u32,
    latched: [bool; 4],
    start_edge: EdgeDetector,
    tempo_edge: EdgeDetector,
}

impl SongSequencer {
    pub fn new(score: Score, config: ClockConfig) -> Self {
        config.validate();
        Self {
            score,
            config,
            playing: false,
            position: 0,
            tempo_counter: 0,
            pulse_counter: 0,
            latched: [false; 4],
            start_edge: EdgeDetector::new(),
            tempo_edge: EdgeDetector::new(),
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn position(&self) -> u16 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_done(&self) -> bool {
        self.position >= STEPS
    }

    /// Advance one clock cycle.
    ///
    /// `reset` is synchronous and overrides every transition computed
    /// this cycle; `start` is edge-triggered and only honored while
    /// idle.
    pub fn tick(&mut self, start: bool, reset: bool) -> SequencerOutput {
        // The divider runs whether or not anything is playing. A tempo
        // tick is any flank of the divider bit, so the period is exactly
        // 2^tempo_bit cycles.
        self.tempo_counter = self.tempo_counter.wrapping_add(1) & self.config.counter_mask();
        let tempo_tick = self
            .tempo_edge
            .toggled((self.tempo_counter >> self.config.tempo_bit) & 1 != 0);
        let started = self.start_edge.rising(start);

        if self.pulse_counter > 0 {
            self.pulse_counter -= 1;
        }

        if !self.playing {
            if started {
                self.playing = true;
                self.position = 0;
                // Realign the tempo phase to the start of playback. The
                // phase register resets with the counter, otherwise the
                // flank of the old phase would read as a tempo tick.
                self.tempo_counter = 0;
                self.tempo_edge = EdgeDetector::new();
            }
        } else if tempo_tick {
            if self.position < STEPS {
                self.latched = self.score.step_notes(self.position);
                self.pulse_counter = self.config.pulse_hold;
                self.position += 1;
            } else {
                // Song end: one trailing tempo tick clears the machine.
                self.playing = false;
                self.pulse_counter = 0;
                self.latched = [false; 4];
            }
        }

        // Synchronous reset overwrites whatever was decided above.
        if reset {
            self.playing = false;
            self.position = 0;
            self.pulse_counter = 0;
            self.latched = [false; 4];
        }

        self.output()
    }

    fn output(&self) -> SequencerOutput {
        let hold = self.pulse_counter > 0;
        SequencerOutput {
            notes: [
                hold && self.latched[0],
                hold && self.latched[1],
                hold && self.latched[2],
                hold && self.latched[3],
            ],
            position: self.position,
            playing: self.playing,
            done: self.position >= STEPS,
        }
    }
}
