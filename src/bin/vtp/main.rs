//! VTP CLI tool for inspecting, encoding and replaying instruction streams.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use vtp::{Accumulator, Instruction, InstructionKind, Sampler, SamplerConfig};

mod generators;
mod report;

use generators::{generate_stream, StreamOptions, StreamPattern};
use report::{exit_code_for, exit_codes, print_error, ColorScheme};

#[derive(Debug, Parser)]
#[command(name = "vtp")]
#[command(about = "Vibrotactile instruction protocol toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a binary instruction stream into a listing
    Decode(DecodeArgs),
    /// Encode a JSON array of instructions into a binary stream
    Encode(EncodeArgs),
    /// Fold a binary stream into a display state
    Fold(FoldArgs),
    /// Sample the display state of a binary stream at a fixed interval
    Sample(SampleArgs),
    /// Generate a synthetic binary stream for benchmarking and testing
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
struct DecodeArgs {
    /// Binary stream to decode (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Print instructions as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct EncodeArgs {
    /// JSON file holding an array of instructions (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct FoldArgs {
    /// Binary stream to fold (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Number of channels of the display
    #[arg(short, long, default_value = "1")]
    channels: usize,

    /// Stop before the first instruction that would pass this time
    #[arg(short, long)]
    until: Option<u64>,

    /// Print the state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct SampleArgs {
    /// Binary stream to sample (reads from stdin if omitted)
    input: Option<PathBuf>,

    /// Number of channels of the display
    #[arg(short, long, default_value = "1")]
    channels: usize,

    /// Milliseconds between samples
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Time of the first sample
    #[arg(long, default_value = "0")]
    start: u64,

    /// Print one JSON object per sample instead of CSV
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Number of instructions to generate
    count: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stream pattern to generate
    #[arg(short, long, default_value = "random")]
    pattern: PatternArg,

    /// Number of channels of the target display
    #[arg(short, long, default_value = "4")]
    channels: usize,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Largest time offset between two instructions
    #[arg(long, default_value = "100")]
    max_gap: u32,

    /// Instruction kinds to draw from (random pattern only), e.g. set-amplitude,increment-time
    #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
    kinds: Vec<InstructionKind>,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Uniform mix of instruction kinds (default)
    Random,
    /// Amplitude pulses on single channels
    Pulses,
    /// Broadcast frequency sweep
    Sweep,
}

impl From<PatternArg> for StreamPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Random => StreamPattern::Random,
            PatternArg::Pulses => StreamPattern::Pulses,
            PatternArg::Sweep => StreamPattern::Sweep,
        }
    }
}

fn parse_kind(s: &str) -> Result<InstructionKind, String> {
    s.parse::<InstructionKind>().map_err(|e| e.to_string())
}

/// Read a whole file, or stdin when no path (or `-`) is given.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read from stdin")?;
            Ok(input)
        }
    }
}

/// Write bytes to a file, or stdout when no path is given.
fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn load_instructions(path: Option<&Path>) -> Result<Vec<Instruction>> {
    let bytes = read_input(path)?;
    vtp::read_instructions(&bytes).context("failed to decode instruction stream")
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let bytes = read_input(args.input.as_deref())?;
    let words = vtp::read_instruction_words(&bytes).context("failed to read instruction words")?;

    if args.json {
        let instructions =
            vtp::decode_instructions(&words).context("failed to decode instruction stream")?;
        println!("{}", serde_json::to_string_pretty(&instructions)?);
        return Ok(());
    }

    for (index, &word) in words.iter().enumerate() {
        let instruction = vtp::decode_instruction(word)
            .with_context(|| format!("failed to decode word {} ({:#010x})", index, word))?;
        println!("{:>6}  {:#010x}  {}", index, word, instruction);
    }

    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let instructions: Vec<Instruction> =
        serde_json::from_slice(&input).context("invalid instruction JSON")?;

    write_output(args.output.as_deref(), &vtp::write_instructions(&instructions))
}

fn run_fold(args: FoldArgs) -> Result<()> {
    let instructions = load_instructions(args.input.as_deref())?;
    let mut accumulator = Accumulator::new(args.channels);

    match args.until {
        Some(until_ms) => {
            let applied = accumulator
                .fold_until(&instructions, until_ms)
                .context("failed to fold instruction stream")?;
            eprintln!("✓ Applied {} of {} instructions", applied, instructions.len());
        }
        None => accumulator
            .fold(&instructions)
            .context("failed to fold instruction stream")?,
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&accumulator)?);
    } else {
        print_state(&accumulator);
    }

    Ok(())
}

fn print_state(accumulator: &Accumulator) {
    println!("elapsed: {} ms", accumulator.milliseconds_elapsed());
    println!("{:>7}  {:>9}  {:>9}", "channel", "amplitude", "frequency");
    for (index, channel) in accumulator.channels().iter().enumerate() {
        println!(
            "{:>7}  {:>9}  {:>9}",
            index + 1,
            channel.amplitude,
            channel.frequency
        );
    }
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let instructions = load_instructions(args.input.as_deref())?;
    let config = SamplerConfig::new(args.channels)
        .with_interval_ms(args.interval)
        .with_start_ms(args.start);
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid sampling options")?;
    eprintln!("✓ Sampling at {:.1} Hz", config.rate_hz());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if !args.json {
        let mut header = String::from("ms");
        for channel in 1..=args.channels {
            header.push_str(&format!(",ch{}_amplitude,ch{}_frequency", channel, channel));
        }
        writeln!(out, "{}", header)?;
    }

    for sample in Sampler::new(&instructions, &config) {
        let sample = sample.context("failed to sample instruction stream")?;
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&sample)?)?;
        } else {
            let mut row = sample.at_ms.to_string();
            for channel in &sample.channels {
                row.push_str(&format!(",{},{}", channel.amplitude, channel.frequency));
            }
            writeln!(out, "{}", row)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let options = StreamOptions {
        count: args.count,
        channels: args.channels,
        max_gap_ms: args.max_gap,
        seed: args.seed,
        kinds: args.kinds,
    };
    let instructions = generate_stream(args.pattern.into(), &options);

    write_output(args.output.as_deref(), &vtp::write_instructions(&instructions))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Decode(args) => run_decode(args),
        Command::Encode(args) => run_encode(args),
        Command::Fold(args) => run_fold(args),
        Command::Sample(args) => run_sample(args),
        Command::Generate(args) => run_generate(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            print_error(&err, &ColorScheme::for_stderr());
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}
