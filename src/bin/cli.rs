//! This is the command line tool that loads an input file and either compresses
//! or decompresses it.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use compression::utils::signatures::{
    match_signature, FILE_EXTENSION, HUFFMAN_SIG, LZW_SIG,
};
use compression::{CodecKind, Context, FormatError, PointerWidth};

use std::process::ExitCode;
use std::{fs, time::Instant};
use std::{fs::File, io::Write};

fn save_file(data: &[u8], path: &str) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    log::info!("Wrote {}.", &path);
    Ok(())
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn signature_of(kind: CodecKind) -> &'static [u8; 4] {
    match kind {
        CodecKind::Lzw => &LZW_SIG,
        CodecKind::Huffman => &HUFFMAN_SIG,
    }
}

/// Compress 'input' and prefix the container with the codec signature.
fn compress(kind: CodecKind, ctx: Context, input: &[u8]) -> Vec<u8> {
    let codec = kind.build(ctx);
    log::info!("Compressing using the {} compressor", codec.name());
    let mut output = signature_of(kind).to_vec();
    output.extend(codec.encode(input));
    output
}

/// Pick the codec from the signature and decompress 'input'. Returns None if
/// the signature is unknown.
fn decompress(input: &[u8]) -> Option<Result<Vec<u8>, FormatError>> {
    for kind in [CodecKind::Lzw, CodecKind::Huffman] {
        let sig = signature_of(kind);
        if match_signature(input, sig) {
            let codec = kind.build(Context::default());
            log::info!("Decompressing {} compression", codec.name());
            return Some(codec.decode(&input[sig.len()..]));
        }
    }
    None
}

fn main() -> ExitCode {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Decompress the result and compare it to the input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .help("Try to decompress the input")
                .action(ArgAction::SetTrue)
                .conflicts_with("compress"),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .help("Compress the input")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("The algorithm used for compression.")
                .value_parser(["lzw", "huffman"])
                .num_args(1),
        )
        .arg(
            Arg::new("legacy")
                .long("legacy-pointers")
                .help("Use the historical LZW pointer width")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-normalize")
                .long("no-normalize")
                .help("Store the raw Huffman frequencies")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let mut cli_compress = matches.get_flag("compress");
    let cli_decompress = matches.get_flag("decompress");
    let cli_checked_mode = matches.get_flag("checked");
    let mut cli_output_path = matches.get_one::<String>("output").cloned();
    let kind = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("huffman") => CodecKind::Huffman,
        _ => CodecKind::Lzw,
    };
    let pointer_width = if matches.get_flag("legacy") {
        PointerWidth::Legacy
    } else {
        PointerWidth::Strict
    };
    let ctx = Context::new(pointer_width, !matches.get_flag("no-normalize"));

    let Some(input_path) = matches.get_one::<String>("INPUT") else {
        return ExitCode::FAILURE;
    };
    let input = match fs::read(input_path) {
        Ok(input) => input,
        Err(err) => {
            log::error!("Can't open {}: {}", input_path, err);
            return ExitCode::FAILURE;
        }
    };

    // The user did not specify if this is compress or decompress. Try to figure
    // out using the extension.
    let ends_with_ext = input_path.ends_with(FILE_EXTENSION);
    if !cli_compress && !cli_decompress && !ends_with_ext {
        cli_compress = true;
    }

    // Come up with a file name.
    if cli_output_path.is_none() {
        if ends_with_ext {
            // remove the extension.
            let end = input_path.len() - FILE_EXTENSION.len();
            cli_output_path = Some(String::from(&input_path[0..end]));
        } else {
            // Add the extension.
            cli_output_path = Some(input_path.clone() + FILE_EXTENSION);
        }
    }
    let out = cli_output_path.unwrap_or_default();
    let timer = Timer::new();

    if cli_compress {
        let dest = compress(kind, ctx, &input);
        let (from, to) = (input.len(), dest.len());
        log::info!("Compressed from {} to {} bytes.", from, to);
        log::info!("Compression ratio is {:.4}x.", from as f64 / to as f64);

        if cli_checked_mode {
            match decompress(&dest) {
                Some(Ok(decoded)) if decoded == input => log::info!("Correct!"),
                Some(Ok(_)) => {
                    log::error!("Incorrect!");
                    return ExitCode::FAILURE;
                }
                Some(Err(err)) => {
                    log::error!("Could not decompress the file: {}", err);
                    return ExitCode::FAILURE;
                }
                None => unreachable!("The signature was just written"),
            }
        }

        if let Err(err) = save_file(&dest, &out) {
            log::error!("Unable to write {}: {}", out, err);
            return ExitCode::FAILURE;
        }
        drop(timer);
        return ExitCode::SUCCESS;
    }

    match decompress(&input) {
        Some(Ok(dest)) => {
            log::info!("Decompressed from {} to {} bytes.", input.len(), dest.len());
            if let Err(err) = save_file(&dest, &out) {
                log::error!("Unable to write {}: {}", out, err);
                return ExitCode::FAILURE;
            }
        }
        Some(Err(err)) => {
            log::error!("Decompression failed: {}", err);
            return ExitCode::FAILURE;
        }
        None => {
            log::error!("Unknown file signature");
            return ExitCode::FAILURE;
        }
    }

    drop(timer);
    ExitCode::SUCCESS
}
