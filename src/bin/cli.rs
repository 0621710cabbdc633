//! notefall CLI: headless score playback and WAV export.
//!
//! Usage:
//!   nf-cli [score.nfs]
//!   nf-cli [score.nfs] --wav output.wav [--seconds N]
//!   nf-cli --clock 8000000

use nf_master::Controller;
use nf_score::{summarize, STEPS};
use std::io::Write;
use std::{env, fs};

struct CliArgs {
    score_path: Option<String>,
    wav_path: Option<String>,
    seconds: u32,
    clock_hz: Option<u32>,
}

fn main() {
    let args = parse_args();

    let mut ctrl = match args.clock_hz {
        Some(hz) => Controller::with_clock_hz(hz),
        None => Controller::new(),
    };

    if let Some(ref path) = args.score_path {
        let data = fs::read(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        });
        ctrl.load_score(&data).unwrap_or_else(|e| {
            eprintln!("Failed to parse {}: {}", path, e);
            std::process::exit(1);
        });
    }

    let config = *ctrl.config();
    let length_secs = (STEPS as u64 * config.tempo_period()) as f64 / config.clock_hz as f64;
    println!("Title:    {}", ctrl.score().title);
    println!("Clock:    {} Hz", config.clock_hz);
    println!(
        "Tempo:    {} cycles/step ({:.1} s song)",
        config.tempo_period(),
        length_secs
    );
    println!();
    print!("{}", summarize(ctrl.score()));
    println!();

    match args.wav_path {
        Some(path) => render_to_wav(&ctrl, &path, args.seconds),
        None => play_audio(&mut ctrl),
    }
}

fn parse_args() -> CliArgs {
    let raw: Vec<String> = env::args().collect();
    let mut args = CliArgs {
        score_path: None,
        wav_path: None,
        seconds: 30,
        clock_hz: None,
    };

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--wav" => {
                args.wav_path = Some(take_value(&raw, i, "--wav"));
                i += 2;
            }
            "--seconds" => {
                args.seconds = parse_number(&take_value(&raw, i, "--seconds"));
                i += 2;
            }
            "--clock" => {
                args.clock_hz = Some(parse_number(&take_value(&raw, i, "--clock")));
                i += 2;
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown flag: {}", flag);
                usage();
            }
            path => {
                args.score_path = Some(path.to_string());
                i += 1;
            }
        }
    }

    args
}

fn take_value(raw: &[String], i: usize, flag: &str) -> String {
    raw.get(i + 1).cloned().unwrap_or_else(|| {
        eprintln!("{} needs a value", flag);
        usage();
    })
}

fn parse_number(value: &str) -> u32 {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number: {}", value);
        usage();
    })
}

fn usage() -> ! {
    eprintln!("Usage: nf-cli [score.nfs] [--wav output.wav] [--seconds N] [--clock HZ]");
    std::process::exit(1);
}

fn play_audio(ctrl: &mut Controller) {
    ctrl.play();
    println!("Playing...");

    while ctrl.is_playing() {
        if let Some(step) = ctrl.position() {
            print!("\rStep: {:>3} / {}", step, STEPS);
            let _ = std::io::stdout().flush();
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }

    println!("\rDone.          ");
}

fn render_to_wav(ctrl: &Controller, path: &str, seconds: u32) {
    let sample_rate: u32 = 44_100;
    println!("Rendering to {} at {} Hz...", path, sample_rate);

    let wav = ctrl.render_to_wav(sample_rate, seconds);
    println!("Rendered {} bytes", wav.len());

    fs::write(path, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", path, e);
        std::process::exit(1);
    });

    println!("Done.");
}
