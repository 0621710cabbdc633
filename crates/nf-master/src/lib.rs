//! Headless controller for notefall.
//!
//! Owns a score and a clock configuration, and drives the audio core
//! for live playback or offline rendering. Both the CLI and the
//! integration tests sit on top of this crate.

mod autoplay;
mod wav;

use nf_audio::{AudioOutput, CpalOutput};
use nf_core::{AudioChip, ChipInput, Frame, PwmDownsampler};
use nf_score::{ClockConfig, Score};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

pub use autoplay::Autoplayer;
pub use nf_formats::FormatError;
pub use wav::{frames_to_wav, write_wav};

/// Headless controller — owns a score and manages playback.
pub struct Controller {
    score: Score,
    config: ClockConfig,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    current_step: Arc<AtomicU32>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    /// The built-in score at the reference clock.
    pub fn new() -> Self {
        Self {
            score: Score::builtin(),
            config: ClockConfig::default(),
            playback: None,
        }
    }

    /// The built-in score, retuned for a different simulation clock.
    pub fn with_clock_hz(clock_hz: u32) -> Self {
        Self {
            score: Score::builtin(),
            config: ClockConfig::for_clock_hz(clock_hz),
            playback: None,
        }
    }

    // --- Score management ---

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn set_score(&mut self, score: Score) {
        self.stop();
        self.score = score;
    }

    pub fn load_score(&mut self, data: &[u8]) -> Result<(), FormatError> {
        self.stop();
        self.score = nf_formats::load_score(data)?;
        Ok(())
    }

    // --- Real-time playback ---

    pub fn play(&mut self) {
        self.stop();

        let score = self.score;
        let config = self.config;
        let stop_signal = Arc::new(AtomicBool::new(false));
        let current_step = Arc::new(AtomicU32::new(0));
        let finished = Arc::new(AtomicBool::new(false));

        let stop = stop_signal.clone();
        let step = current_step.clone();
        let done = finished.clone();

        let thread = std::thread::spawn(move || {
            audio_thread(score, config, stop, step, done);
        });

        self.playback = Some(PlaybackHandle {
            stop_signal,
            current_step,
            finished,
            thread: Some(thread),
        });
    }

    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.finished.load(Ordering::Relaxed))
    }

    /// Current step while playing.
    pub fn position(&self) -> Option<u16> {
        let pb = self.playback.as_ref()?;
        if pb.finished.load(Ordering::Relaxed) {
            return None;
        }
        Some(pb.current_step.load(Ordering::Relaxed) as u16)
    }

    // --- Offline rendering ---

    /// Render the autoplayed song to PCM frames.
    ///
    /// Stops at `max_frames` or when the song has finished and the last
    /// tone has rung out, whichever comes first.
    pub fn render_frames(&self, sample_rate: u32, max_frames: usize) -> Vec<Frame> {
        let mut session = RenderSession::new(self.score, self.config, sample_rate);
        let mut frames = Vec::with_capacity(max_frames);

        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| session.fill(&mut frames, max_frames));
        #[cfg(not(feature = "alloc_check"))]
        session.fill(&mut frames, max_frames);

        frames
    }

    pub fn render_to_wav(&self, sample_rate: u32, max_seconds: u32) -> Vec<u8> {
        let max_frames = (sample_rate * max_seconds) as usize;
        let frames = self.render_frames(sample_rate, max_frames);
        wav::frames_to_wav(&frames, sample_rate)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// One autoplayed run of the chip.
struct RenderSession {
    chip: AudioChip,
    auto: Autoplayer,
    down: PwmDownsampler,
    input: ChipInput,
    /// Cycles left after song end for the last tone to ring out.
    tail: u64,
}

impl RenderSession {
    fn new(score: Score, config: ClockConfig, sample_rate: u32) -> Self {
        Self {
            chip: AudioChip::new(score, config),
            auto: Autoplayer::new(),
            down: PwmDownsampler::new(config.clock_hz, sample_rate),
            input: ChipInput::press_start(),
            tail: config.tone_duration as u64,
        }
    }

    /// Step cycles until `frames` is full or the song (plus tail) ends.
    ///
    /// `frames` must be preallocated to `max_frames`; pushes stay within
    /// capacity, keeping the loop allocation-free.
    fn fill(&mut self, frames: &mut Vec<Frame>, max_frames: usize) {
        while frames.len() < max_frames {
            let out = self.chip.tick(self.input);
            self.input = ChipInput {
                reset: false,
                start: false,
                hits: self.auto.hits(&out),
            };

            if let Some(frame) = self.down.push(out.pwm) {
                frames.push(frame);
            }

            if out.done && !out.playing {
                if self.tail == 0 {
                    break;
                }
                self.tail -= 1;
            }
        }
    }
}

fn audio_thread(
    score: Score,
    config: ClockConfig,
    stop_signal: Arc<AtomicBool>,
    current_step: Arc<AtomicU32>,
    finished: Arc<AtomicBool>,
) {
    let Ok((mut output, consumer)) = CpalOutput::new() else {
        finished.store(true, Ordering::Relaxed);
        return;
    };

    if output.build_stream(consumer).is_err() {
        finished.store(true, Ordering::Relaxed);
        return;
    }
    let _ = output.start();

    let sample_rate = output.sample_rate();
    let mut chip = AudioChip::new(score, config);
    let mut auto = Autoplayer::new();
    let mut down = PwmDownsampler::new(config.clock_hz, sample_rate);

    let mut input = ChipInput::press_start();
    let mut tail = config.tone_duration as u64;
    let mut last_step = u32::MAX;

    while !stop_signal.load(Ordering::Relaxed) {
        let out = chip.tick(input);
        input = ChipInput {
            reset: false,
            start: false,
            hits: auto.hits(&out),
        };

        if let Some(frame) = down.push(out.pwm) {
            output.write_spin(frame);
        }

        if out.position as u32 != last_step {
            last_step = out.position as u32;
            current_step.store(last_step, Ordering::Relaxed);
        }

        if out.done && !out.playing {
            if tail == 0 {
                break;
            }
            tail -= 1;
        }
    }

    // Flush a short silence so the device doesn't clip the final edge
    for _ in 0..sample_rate / 10 {
        output.write_spin(Frame::silence());
    }

    finished.store(true, Ordering::Relaxed);
}
