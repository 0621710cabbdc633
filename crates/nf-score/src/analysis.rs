//! Score statistics for display.

use core::fmt;

use arrayvec::ArrayString;

use crate::column::Column;
use crate::score::Score;
use crate::track::STEPS;

/// Summary of a score's content.
pub struct ScoreSummary {
    pub title: ArrayString<32>,
    /// Notes per column, green first.
    pub notes: [u32; 4],
    pub total_notes: u32,
    /// Steps where two or more columns sound together.
    pub chord_steps: u32,
    /// First and last steps with any note.
    pub first_step: Option<u16>,
    pub last_step: Option<u16>,
}

/// Scan a score and summarize its content.
pub fn summarize(score: &Score) -> ScoreSummary {
    let mut notes = [0u32; 4];
    for column in Column::ALL {
        notes[column.index()] = score.track(column).note_count();
    }

    let mut chord_steps = 0;
    let mut first_step = None;
    let mut last_step = None;
    for step in 0..STEPS {
        let sounding = score.step_notes(step).iter().filter(|&&n| n).count();
        if sounding > 0 {
            if first_step.is_none() {
                first_step = Some(step);
            }
            last_step = Some(step);
        }
        if sounding >= 2 {
            chord_steps += 1;
        }
    }

    ScoreSummary {
        title: score.title,
        notes,
        total_notes: notes.iter().sum(),
        chord_steps,
        first_step,
        last_step,
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Notes:    {} total", self.total_notes)?;
        for column in Column::ALL {
            writeln!(f, "  {:<7} {}", column.label(), self.notes[column.index()])?;
        }
        writeln!(f, "Chords:   {} steps", self.chord_steps)?;
        match (self.first_step, self.last_step) {
            (Some(first), Some(last)) => {
                writeln!(f, "Active:   steps {} - {} of {}", first, last, STEPS)
            }
            _ => writeln!(f, "Active:   empty score"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_summary() {
        let summary = summarize(&Score::builtin());
        assert_eq!(summary.notes, [62, 58, 35, 21]);
        assert_eq!(summary.total_notes, 176);
        assert_eq!(summary.chord_steps, 24);
        assert_eq!(summary.first_step, Some(0));
        assert_eq!(summary.last_step, Some(252));
    }

    #[test]
    fn empty_score_summary() {
        let summary = summarize(&Score::new("empty"));
        assert_eq!(summary.total_notes, 0);
        assert_eq!(summary.chord_steps, 0);
        assert_eq!(summary.first_step, None);
        assert_eq!(summary.last_step, None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_mentions_every_column() {
        let text = format!("{}", summarize(&Score::builtin()));
        for column in Column::ALL {
            assert!(text.contains(column.label()));
        }
    }
}
