#[path = "huffpass/progress.rs"]
mod progress;

use std::{
    fs::{File, OpenOptions},
    io::Write,
    num::NonZeroU8,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use console::style;
use huffpass::{decoding::MultiPassDecoder, encoding::MultiPassCompressor, PassLimit};
use indicatif::{HumanBytes, HumanDuration};
use progress::{read_with_progress, spinner};
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extension appended to compressed files
const EXTENSION: &str = "huf";

#[derive(Parser)]
#[command(version, about = "Multi-pass Huffman compression", long_about = None)]
struct Cli {
    /// Print more details, repeat for even more (-vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// File to compress
        input_file: PathBuf,
        /// Where the compressed file is written, defaults to the input with `.huf` appended
        #[arg(short, long)]
        output_file: Option<PathBuf>,
        /// Overwrite the output file if it already exists
        #[arg(short, long)]
        force: bool,
        /// Stop after this many passes even if another pass would still shrink the output
        #[arg(long)]
        max_passes: Option<NonZeroU8>,
    },
    /// Decompress a file created by `huffpass compress`
    Decompress {
        /// File to decompress
        input_file: PathBuf,
        /// Where the decompressed file is written, defaults to the input without `.huf`
        #[arg(short, long)]
        output_file: Option<PathBuf>,
        /// Overwrite the output file if it already exists
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .init();

    match cli.command {
        Commands::Compress {
            input_file,
            output_file,
            force,
            max_passes,
        } => {
            let output_file = output_file.unwrap_or_else(|| compressed_path(&input_file));
            let pass_limit = max_passes.map_or(PassLimit::UntilNoGain, PassLimit::AtMost);
            compress(&input_file, &output_file, force, pass_limit)
        }
        Commands::Decompress {
            input_file,
            output_file,
            force,
        } => {
            let output_file = output_file.unwrap_or_else(|| decompressed_path(&input_file));
            decompress(&input_file, &output_file, force)
        }
    }
}

fn compress(
    input: &Path,
    output: &Path,
    force: bool,
    pass_limit: PassLimit,
) -> color_eyre::Result<()> {
    info!("compressing {input:?} to {output:?}");
    let source = read_input(input)?;

    let working = spinner(format!("compressing {}", HumanBytes(source.len() as u64)));
    let compressor = MultiPassCompressor::new(pass_limit);
    let compressed = compressor.compress(&source);
    working.finish_and_clear();
    let compressed = compressed.wrap_err("compression failed")?;
    debug!("compressed in {}", HumanDuration(working.elapsed()));

    write_output(output, &compressed.data, force)?;
    info!(
        "{} → {} ({} of the original, {} {})",
        style(HumanBytes(source.len() as u64)).cyan(),
        style(HumanBytes(compressed.data.len() as u64)).green(),
        style(fmt_ratio(compressed.data.len(), source.len())).bold(),
        compressed.passes,
        if compressed.passes == 1 { "pass" } else { "passes" },
    );
    Ok(())
}

fn decompress(input: &Path, output: &Path, force: bool) -> color_eyre::Result<()> {
    info!("decompressing {input:?} to {output:?}");
    let source = read_input(input)?;

    let working = spinner(format!("decompressing {}", HumanBytes(source.len() as u64)));
    let mut decoder = MultiPassDecoder::new();
    let decompressed = decoder.decode_all(&source);
    working.finish_and_clear();
    let decompressed =
        decompressed.wrap_err_with(|| format!("{input:?} is not a valid huffpass file"))?;
    debug!("decompressed in {}", HumanDuration(working.elapsed()));

    write_output(output, &decompressed, force)?;
    info!(
        "{} → {} (undid {} {})",
        style(HumanBytes(source.len() as u64)).cyan(),
        style(HumanBytes(decompressed.len() as u64)).green(),
        decoder.passes_decoded(),
        if decoder.passes_decoded() == 1 {
            "pass"
        } else {
            "passes"
        },
    );
    Ok(())
}

fn read_input(path: &Path) -> color_eyre::Result<Vec<u8>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {path:?}"))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to read metadata of {path:?}"))?
        .len();
    let label = path.display().to_string();
    read_with_progress(file, size, &label).wrap_err_with(|| format!("failed to read {path:?}"))
}

fn write_output(path: &Path, data: &[u8], force: bool) -> color_eyre::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path).wrap_err_with(|| {
        if path.exists() && !force {
            format!("{path:?} already exists, pass --force to overwrite it")
        } else {
            format!("failed to create {path:?}")
        }
    })?;
    file.write_all(data)
        .wrap_err_with(|| format!("failed to write {path:?}"))?;
    Ok(())
}

fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// Formats `part / whole` as a percentage
fn fmt_ratio(part: usize, whole: usize) -> String {
    if whole == 0 {
        return String::from("n/a");
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}
