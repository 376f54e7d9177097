use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use qoadec::{DecoderConfig, FrameLimit, SampleRatePolicy};

/// Decodes a QOA file to 16-bit PCM WAV.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path for the input QOA file.
    input: PathBuf,
    /// Path for the output WAV file.
    output: PathBuf,
    /// Read exactly the frame count derived from the file header.
    #[clap(long)]
    declared_frames: bool,
    /// Reject streams whose frames change the sample rate.
    #[clap(long)]
    constant_sample_rate: bool,
    /// Reject frames with no channels, a zero sample rate or an advisory byte
    /// size that does not match their contents.
    #[clap(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env("QOADEC_LOG")
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    let config = DecoderConfig {
        frame_limit: if args.declared_frames {
            FrameLimit::Declared
        } else {
            FrameLimit::UntilExhausted
        },
        sample_rate_policy: if args.constant_sample_rate {
            SampleRatePolicy::RequireConstant
        } else {
            SampleRatePolicy::LastFrame
        },
        verify_frame_size: args.strict,
    };

    info!("Decoding QOA file: {}", args.input.display());
    let reader = BufReader::new(File::open(&args.input)?);
    let decoded = qoadec::decode_all_with(reader, &config)?;

    info!(
        "{} channels, {} Hz, {} samples per channel, {:.2} seconds",
        decoded.channel_count,
        decoded.sample_rate,
        decoded.samples_per_channel(),
        decoded.duration().as_secs_f64()
    );

    let spec = hound::WavSpec {
        channels: decoded.channel_count as u16,
        sample_rate: decoded.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&args.output, spec)?;
    for &sample in &decoded.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!("Decoded to: {}", args.output.display());
    Ok(())
}
