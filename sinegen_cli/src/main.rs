//! Reference driver: runs an A/B pair of sine generators - identical
//! parameters, postprocessing disabled on the first and enabled on the
//! second - and saves both output streams to a CSV file for comparison.
//!
//! Each line holds `phi; sample1; sample2`: the momentary phase code in
//! [0, 65535] followed by the two momentary amplitude codes in
//! [-32768, 32767]. One line per sample period; the file is flushed after
//! every full period of the fundamental.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use sinegen::{ScalarFxP, SineGen};

/// Render a dithered/undithered sine generator pair to CSV
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output CSV file
    #[arg(default_value = "sine.csv")]
    output: PathBuf,

    /// Number of fundamental periods to render
    #[arg(long, default_value_t = 1)]
    cycles: u32,

    /// Frequency control word: phase increment per sample, 1..=16384
    /// (Fo = freq * Fs / 65536)
    #[arg(long, default_value_t = 4)]
    freq: u16,

    /// Initial phase code
    #[arg(long, default_value_t = 0)]
    phi: u16,

    /// Attenuation code: amplitude is (65536 - att) / 65536
    #[arg(long, default_value_t = 65528)]
    att: u16,
}

fn run<W: Write>(out: &mut W, args: &Args) -> std::io::Result<()> {
    let mut plain = SineGen::new();
    plain.set_freq(ScalarFxP::from_bits(args.freq));
    plain.set_phi(ScalarFxP::from_bits(args.phi));
    plain.set_att(ScalarFxP::from_bits(args.att));
    plain.set_pp(false);

    let mut dithered = plain;
    dithered.set_pp(true);

    let mut cnt = 0u32;
    while cnt < args.cycles {
        let phi = plain.phi();
        writeln!(
            out,
            "{}; {}; {}",
            phi.to_bits(),
            plain.output().to_bits(),
            dithered.output().to_bits()
        )?;
        plain.step();
        dithered.step();
        if plain.phi() < phi {
            cnt += 1;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() {
    colog::init();
    let args = Args::parse();

    if args.freq == 0 || args.freq > 0x4000 {
        eprintln!(
            "Error: freq must be in 1..=16384 (got {})",
            args.freq
        );
        std::process::exit(1);
    }

    let file = File::create(&args.output).unwrap_or_else(|e| {
        eprintln!("Error creating '{}': {}", args.output.display(), e);
        std::process::exit(1);
    });
    let mut out = BufWriter::new(file);

    log::info!(
        "rendering {} cycle(s) at freq={} att={} to {}",
        args.cycles,
        args.freq,
        args.att,
        args.output.display()
    );
    if let Err(e) = run(&mut out, &args) {
        eprintln!("Error writing '{}': {}", args.output.display(), e);
        std::process::exit(1);
    }
    log::info!("done");
}
