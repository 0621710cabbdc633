//! The score: one note track per column, plus the shipped song.

use arrayvec::ArrayString;

use crate::column::Column;
use crate::track::Track;

const BUILTIN_TITLE: &str = "Overclocked";

/// The shipped song, one 256-bit vector per column in priority order,
/// step 0 at the top bit. These constants are the persisted musical
/// asset; everything else in the crate is derived.
const BUILTIN_WORDS: [[u64; 4]; 4] = [
    // green
    [
        0x8080_8080_8888_8888,
        0x8888_888A_8888_888A,
        0x8000_8888_8888_888A,
        0xA8A8_8888_A8A8_8008,
    ],
    // red
    [
        0x0000_0020_2222_2222,
        0x2222_2226_2222_2226,
        0x0002_2222_2222_2226,
        0x6262_2222_6262_2000,
    ],
    // purple
    [
        0x0000_0000_1010_1010,
        0x1012_1010_1012_1010,
        0x0080_1010_1012_1010,
        0x1212_1212_1212_0800,
    ],
    // blue
    [
        0x0000_0000_0000_0005,
        0x0000_0005_0000_0105,
        0x0000_0005_0000_0105,
        0x8081_0005_8081_0800,
    ],
];

/// A four-column note score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    /// Song title
    pub title: ArrayString<32>,
    tracks: [Track; 4],
}

impl Score {
    /// Create an empty score. Over-long titles are truncated.
    pub fn new(title: &str) -> Self {
        let mut t = ArrayString::new();
        for c in title.chars() {
            if t.try_push(c).is_err() {
                break;
            }
        }
        Self {
            title: t,
            tracks: [Track::empty(); 4],
        }
    }

    /// The song shipped with the hardware.
    pub fn builtin() -> Self {
        let mut score = Self::new(BUILTIN_TITLE);
        for (track, words) in score.tracks.iter_mut().zip(BUILTIN_WORDS) {
            *track = Track::from_words(words);
        }
        score
    }

    /// One column's track.
    pub fn track(&self, column: Column) -> &Track {
        &self.tracks[column.index()]
    }

    pub fn track_mut(&mut self, column: Column) -> &mut Track {
        &mut self.tracks[column.index()]
    }

    /// The four note bits at `step`, green first.
    pub fn step_notes(&self, step: u16) -> [bool; 4] {
        [
            self.tracks[0].step(step),
            self.tracks[1].step(step),
            self.tracks[2].step(step),
            self.tracks[3].step(step),
        ]
    }

    /// Total notes across all columns.
    pub fn note_count(&self) -> u32 {
        self.tracks.iter().map(Track::note_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(Track::is_empty)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_opens_with_a_lone_green_note() {
        let score = Score::builtin();
        assert_eq!(score.step_notes(0), [true, false, false, false]);
    }

    #[test]
    fn builtin_step_probes() {
        let score = Score::builtin();
        // Silence right after the downbeat
        assert_eq!(score.step_notes(1), [false, false, false, false]);
        // Offbeat red, then a purple answer
        assert_eq!(score.step_notes(34), [false, true, false, false]);
        assert_eq!(score.step_notes(35), [false, false, true, false]);
        // Chorus doubles green with a high blue accent
        assert_eq!(score.step_notes(192), [true, false, false, true]);
        assert_eq!(score.step_notes(255), [false, false, false, false]);
    }

    #[test]
    fn builtin_note_counts() {
        let score = Score::builtin();
        assert_eq!(score.track(Column::Green).note_count(), 62);
        assert_eq!(score.track(Column::Red).note_count(), 58);
        assert_eq!(score.track(Column::Purple).note_count(), 35);
        assert_eq!(score.track(Column::Blue).note_count(), 21);
        assert_eq!(score.note_count(), 176);
    }

    #[test]
    fn builtin_ends_before_the_final_steps() {
        let score = Score::builtin();
        assert_eq!(score.track(Column::Green).last_note(), Some(252));
        for step in 253..crate::STEPS {
            assert_eq!(score.step_notes(step), [false; 4]);
        }
    }

    #[test]
    fn step_notes_follows_column_order() {
        let mut score = Score::new("probe");
        score.track_mut(Column::Red).set_step(7, true);
        score.track_mut(Column::Blue).set_step(7, true);
        assert_eq!(score.step_notes(7), [false, true, false, true]);
    }

    #[test]
    fn long_titles_truncate() {
        let score = Score::new("a title far longer than the thirty-two byte field");
        assert_eq!(score.title.len(), 32);
    }
}
