use std::thread::sleep;

use rodio::{OutputStream, Sink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env("QOADEC_LOG")
        .format_timestamp(None)
        .init();
    let Some(audio_path) = std::env::args().nth(1) else {
        eprintln!("Usage: play <path to qoa file>");
        return Ok(());
    };

    let bytes = std::fs::read(audio_path)?;
    let audio = qoadec::decode_bytes(&bytes)?;
    println!("Decoded stream:");
    println!("\tchannels: {}", audio.channels());
    println!("\tsample rate: {}", audio.sample_rate());
    println!("\tDuration: {:?}", audio.duration());

    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;

    println!("Playing...");
    let dur = audio.duration();
    sink.append(audio.into_source());
    sleep(dur);
    Ok(())
}
