//! Allocation-free tick path.
//!
//! The chip tick and downsampling loop is the realtime phase of live
//! playback; it must never touch the heap. This test runs a second of
//! simulated time under an aborting allocator.
//!
//! Just run `cargo test` — no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use nf_core::{AudioChip, ChipInput, PwmDownsampler};
use nf_master::Autoplayer;
use nf_score::{ClockConfig, Score};

#[test]
fn tick_and_downsample_do_not_allocate() {
    let config = ClockConfig::for_clock_hz(1_000_000);
    let mut chip = AudioChip::new(Score::builtin(), config);
    let mut auto = Autoplayer::new();
    let mut down = PwmDownsampler::new(config.clock_hz, 8_000);

    let mut input = ChipInput::press_start();
    let mut lo = i16::MAX;
    let mut hi = i16::MIN;

    assert_no_alloc(|| {
        for _ in 0..1_000_000 {
            let out = chip.tick(input);
            input = ChipInput {
                reset: false,
                start: false,
                hits: auto.hits(&out),
            };
            if let Some(frame) = down.push(out.pwm) {
                lo = lo.min(frame.sample);
                hi = hi.max(frame.sample);
            }
        }
    });

    // A second of song crosses several tempo ticks; something sounded
    assert!(lo < hi, "expected the pwm line to move");
}
