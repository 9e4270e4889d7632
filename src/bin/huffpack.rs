//! huffpack CLI - Huffman file compression tool.
//!
//! `huff` compresses a file into a `.huff` bit stream plus a `.code`
//! text file holding the code table; `unhuff` reverses the process.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use huffpack::{decode, encode, read_code_table, write_code_table, FrequencyTable, HuffmanTree};

/// Huffman compression for arbitrary byte streams.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Huff {
        /// File to compress
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Compressed output path (defaults to INPUT with a .huff extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Code table path (defaults to INPUT with a .code extension)
        #[arg(short, long, value_name = "CODE")]
        code: Option<PathBuf>,
    },
    /// Decompress a .huff file
    Unhuff {
        /// File to decompress
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Decompressed output path (defaults to INPUT with a .unhuff extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Code table path (defaults to INPUT with a .code extension)
        #[arg(short, long, value_name = "CODE")]
        code: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Command::Huff {
            input,
            output,
            code,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("huff"));
            let code = code.unwrap_or_else(|| input.with_extension("code"));
            huff(&input, &output, &code, args.verbose)
        }
        Command::Unhuff {
            input,
            output,
            code,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("unhuff"));
            let code = code.unwrap_or_else(|| input.with_extension("code"));
            unhuff(&input, &output, &code, args.verbose)
        }
    }
}

fn huff(
    input: &Path,
    output: &Path,
    code: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    // First pass: count byte frequencies and build the tree.
    let frequencies = FrequencyTable::from_reader(BufReader::new(File::open(input)?))?;
    let tree = HuffmanTree::from_frequencies(&frequencies);

    // Write the code table so the decompressor can rebuild the tree.
    write_code_table(&tree, BufWriter::new(File::create(code)?))?;

    // Second pass: encode the input through the code book.
    let book = tree.code_book();
    encode(
        BufReader::new(File::open(input)?),
        &book,
        BufWriter::new(File::create(output)?),
    )?;

    let elapsed = start.elapsed();
    let input_size = fs::metadata(input)?.len();
    let output_size = fs::metadata(output)?.len();
    let ratio = if input_size > 0 {
        (output_size as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if verbose {
        eprintln!("Compressed: {}", input.display());
        eprintln!("  Output: {}", output.display());
        eprintln!("  Code table: {}", code.display());
        eprintln!("  Distinct bytes: {}", frequencies.distinct());
        eprintln!("  Tree leaves: {}", tree.leaf_count());
        eprintln!("  Time: {:.2?}", elapsed);
        eprintln!(
            "  Size: {} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    } else {
        println!(
            "{} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    }

    Ok(())
}

fn unhuff(
    input: &Path,
    output: &Path,
    code: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let tree = read_code_table(BufReader::new(File::open(code)?))?;
    decode(
        BufReader::new(File::open(input)?),
        &tree,
        BufWriter::new(File::create(output)?),
    )?;

    let elapsed = start.elapsed();
    let input_size = fs::metadata(input)?.len();
    let output_size = fs::metadata(output)?.len();

    if verbose {
        eprintln!("Decompressed: {}", input.display());
        eprintln!("  Output: {}", output.display());
        eprintln!("  Code table: {}", code.display());
        eprintln!("  Tree leaves: {}", tree.leaf_count());
        eprintln!("  Time: {:.2?}", elapsed);
        eprintln!(
            "  Size: {} -> {}",
            format_size(input_size),
            format_size(output_size)
        );
    } else {
        println!(
            "{} -> {}",
            format_size(input_size),
            format_size(output_size)
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
