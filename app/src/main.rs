use std::error::Error;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use fwf_core::extract;
use fwf_exporter::writer::write_colorized_las;
use fwf_parser::reader::{las::LasSourceReader, SourceReader as _};

#[derive(Parser, Debug)]
#[command(
    name = "fwf",
    about = "Extracts full-waveform LIDAR samples from LAS/WDP file pairs",
    version = "0.1.0"
)]
struct Cli {
    /// Input LAS/LAZ files or glob patterns
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    /// Waveform data file; defaults to the input path with a .wdp extension
    #[arg(short, long, value_name = "FILE")]
    wdp: Option<String>,

    /// Output directory for the colorized LAS files
    #[arg(short, long, required = true, value_name = "DIR")]
    output: String,
}

fn expand_globs(input_patterns: Vec<String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob(&pattern).expect("Failed to read glob pattern") {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => eprintln!("Error: {:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("waveforms");
    output_dir.join(format!("fwf-{}.las", stem))
}

fn process_file(input: &Path, wdp: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();

    let source = LasSourceReader::new(input.to_path_buf()).read_source()?;
    let result = extract(&source, wdp, None)?;
    log::info!(
        "{}: {} waveforms, {} samples",
        input.display(),
        result.record_count(),
        result.samples.len()
    );

    let out = output_path(output_dir, input);
    write_colorized_las(&out, &result.samples)?;
    log::info!("wrote {} in {:?}", out.display(), start.elapsed());

    Ok(())
}

fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let input_files = expand_globs(args.input);
    if input_files.is_empty() {
        return Err("no input files matched".into());
    }
    if args.wdp.is_some() && input_files.len() > 1 {
        return Err("--wdp only applies to a single input file".into());
    }

    let output_dir = PathBuf::from(args.output);
    std::fs::create_dir_all(&output_dir)?;

    for input in &input_files {
        let wdp = match &args.wdp {
            Some(path) => PathBuf::from(path),
            None => input.with_extension("wdp"),
        };
        process_file(input, &wdp, &output_dir)?;
    }

    Ok(())
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();
    log::info!("input files: {:?}", args.input);
    log::info!("output folder: {}", args.output);

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
