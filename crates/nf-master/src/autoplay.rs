//! Perfect-player input harness.
//!
//! The tone generator only sounds on player hits. Headless runs loop
//! the sequencer's note pulses back as hits, one cycle per rising
//! pulse, so a render is audible without a player. Chord steps raise
//! several hit lines at once and arbitrate exactly as they would for a
//! strummed chord.

use nf_core::{ChipOutput, EdgeDetector};

#[derive(Clone, Copy, Debug, Default)]
pub struct Autoplayer {
    note_edges: [EdgeDetector; 4],
}

impl Autoplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit lines to drive on the next cycle, given this cycle's outputs.
    pub fn hits(&mut self, output: &ChipOutput) -> [bool; 4] {
        let mut hits = [false; 4];
        for (i, hit) in hits.iter_mut().enumerate() {
            *hit = self.note_edges[i].rising(output.notes[i]);
        }
        hits
    }
}
