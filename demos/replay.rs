//! Replay a short haptic pattern and print the amplitude of each channel over time.
//!
//! Run with: `cargo run --example replay`

use std::time::Instant;
use vtp::{read_instructions, write_instructions, Instruction, Sampler, SamplerConfig};

const CHANNELS: usize = 4;

/// A "wave" running across the channels, then a broadcast fade out.
fn pattern() -> Vec<Instruction> {
    let mut stream = vec![Instruction::SetFrequency {
        channel_select: 0,
        time_offset: 0,
        frequency: 250,
    }];

    for channel in 1..=CHANNELS as u8 {
        stream.push(Instruction::SetAmplitude {
            channel_select: channel,
            time_offset: 40,
            amplitude: 1023,
        });
        if channel > 1 {
            stream.push(Instruction::SetAmplitude {
                channel_select: channel - 1,
                time_offset: 0,
                amplitude: 256,
            });
        }
    }

    for amplitude in [768, 512, 256, 0] {
        stream.push(Instruction::SetAmplitude {
            channel_select: 0,
            time_offset: 60,
            amplitude,
        });
    }

    stream
}

fn main() -> Result<(), vtp::Error> {
    let bytes = write_instructions(&pattern());
    println!("Encoded {} instructions into {} bytes\n", bytes.len() / 4, bytes.len());

    let start = Instant::now();
    let instructions = read_instructions(&bytes)?;

    let config = SamplerConfig::new(CHANNELS).with_interval_ms(20);
    for sample in Sampler::new(&instructions, &config) {
        let sample = sample?;
        let bars: Vec<String> = sample
            .channels
            .iter()
            .map(|c| format!("{:<8}", "#".repeat(usize::from(c.amplitude / 128))))
            .collect();
        println!("{:>5} ms |{}|", sample.at_ms, bars.join("|"));
    }

    println!("\nReplayed in {:.2}us", start.elapsed().as_secs_f64() * 1e6);
    Ok(())
}
