//! Command-line front end for the container format.
//!
//! ```bash
//! huffpack compress input.txt input.huf
//! huffpack decompress input.huf output.txt
//! huffpack inspect input.huf
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack::container;

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman compression of whole files", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress a file produced by `compress`
    Decompress { input: PathBuf, output: PathBuf },
    /// Print the header of a compressed file
    Inspect { input: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Compress { input, output } => {
            let data = fs::read(&input)?;
            let packed = container::encode(&data)?;
            fs::write(&output, &packed)?;
            let ratio = if data.is_empty() {
                0.0
            } else {
                packed.len() as f64 / data.len() as f64 * 100.0
            };
            info!(
                "Compressed {} ({} bytes) -> {} ({} bytes, {:.1}%)",
                input.display(),
                data.len(),
                output.display(),
                packed.len(),
                ratio
            );
        }
        Command::Decompress { input, output } => {
            let packed = fs::read(&input)?;
            let data = container::decode(&packed)?;
            fs::write(&output, &data)?;
            info!(
                "Decompressed {} ({} bytes) -> {} ({} bytes)",
                input.display(),
                packed.len(),
                output.display(),
                data.len()
            );
        }
        Command::Inspect { input } => {
            let packed = fs::read(&input)?;
            let summary = container::inspect(&packed)?;
            println!("symbols:       {}", summary.symbols);
            println!("original size: {} bytes", summary.original_len);
            println!("header size:   {} bytes", summary.header_len);
            println!("stream size:   {} bytes", summary.stream_len);
            println!("padding:       {} bits", summary.padding);
        }
    }

    Ok(())
}
