//! Integration: sequencer timing at the reference clock.
//!
//! These tests step the assembled chip cycle by cycle at the full
//! reference configuration, so the cycle counts below are the ones the
//! hardware contract names.

use nf_core::{AudioChip, ChipInput, ChipOutput};
use nf_score::{ClockConfig, Score, STEPS};

const TEMPO_PERIOD: u64 = 1 << 23;
const PULSE_HOLD: u64 = 1 << 19;

fn reference_chip() -> AudioChip {
    AudioChip::new(Score::builtin(), ClockConfig::default())
}

fn idle_ticks(chip: &mut AudioChip, cycles: u64) -> ChipOutput {
    let mut out = chip.tick(ChipInput::idle());
    for _ in 1..cycles {
        out = chip.tick(ChipInput::idle());
    }
    out
}

#[test]
fn first_step_latches_one_tempo_period_after_start() {
    let mut chip = reference_chip();
    let out = chip.tick(ChipInput::press_start());
    assert!(out.playing);
    assert_eq!(out.position, 0);

    let out = idle_ticks(&mut chip, TEMPO_PERIOD - 1);
    assert_eq!(out.position, 0, "no tempo tick before 2^23 cycles");
    assert_eq!(out.notes, [false; 4]);

    let out = chip.tick(ChipInput::idle());
    assert_eq!(out.position, 1);
    assert_eq!(out.notes, Score::builtin().step_notes(0));
}

#[test]
fn note_pulse_holds_for_the_documented_width() {
    let mut chip = reference_chip();
    chip.tick(ChipInput::press_start());
    let out = idle_ticks(&mut chip, TEMPO_PERIOD);
    assert!(out.notes[0], "builtin song opens on green");

    let out = idle_ticks(&mut chip, PULSE_HOLD - 1);
    assert!(out.notes[0]);

    let out = chip.tick(ChipInput::idle());
    assert!(!out.notes[0], "pulse drops after exactly 2^19 cycles");
}

#[test]
fn tempo_ticks_are_exactly_one_period_apart() {
    let mut chip = reference_chip();
    chip.tick(ChipInput::press_start());
    idle_ticks(&mut chip, TEMPO_PERIOD);

    let mut cycles: u64 = 0;
    loop {
        let out = chip.tick(ChipInput::idle());
        cycles += 1;
        if out.position == 2 {
            break;
        }
        assert!(cycles <= TEMPO_PERIOD, "second step is late");
    }
    assert_eq!(cycles, TEMPO_PERIOD);
}

#[test]
fn reset_overrides_everything_in_one_cycle() {
    let mut chip = reference_chip();
    chip.tick(ChipInput::press_start());
    let out = idle_ticks(&mut chip, TEMPO_PERIOD + 100);
    assert!(out.playing);
    assert!(out.notes.iter().any(|&n| n));

    let out = chip.tick(ChipInput {
        reset: true,
        ..ChipInput::idle()
    });
    assert!(!out.playing);
    assert!(!out.done);
    assert_eq!(out.position, 0);
    assert_eq!(out.notes, [false; 4]);
    assert!(!out.pwm);
}

#[test]
fn start_while_playing_is_ignored() {
    let mut chip = reference_chip();
    chip.tick(ChipInput::press_start());
    let out = idle_ticks(&mut chip, TEMPO_PERIOD + 10);
    assert_eq!(out.position, 1);

    let out = chip.tick(ChipInput::press_start());
    assert_eq!(out.position, 1, "start must not rewind an active song");
    assert!(out.playing);
}

#[test]
fn song_plays_to_completion_at_a_reduced_tempo() {
    // The full 256-step walk, on the same machine with a faster divider
    // bit so the test stays cheap
    let config = ClockConfig {
        tempo_bit: 10,
        counter_bits: 13,
        ..ClockConfig::default()
    };
    let period = config.tempo_period();

    let mut chip = AudioChip::new(Score::builtin(), config);
    chip.tick(ChipInput::press_start());

    for step in 1..=256u16 {
        let out = idle_ticks(&mut chip, period);
        assert_eq!(out.position, step);
        assert_eq!(out.done, step >= STEPS, "done tracks position");
        assert!(out.playing);
    }

    // One trailing tempo tick shuts the sequencer down
    let out = idle_ticks(&mut chip, period);
    assert!(!out.playing);
    assert!(out.done);
    assert_eq!(out.notes, [false; 4]);

    // A fresh start replays from the top
    let out = chip.tick(ChipInput::press_start());
    assert!(out.playing);
    assert_eq!(out.position, 0);
    assert!(!out.done);
}
