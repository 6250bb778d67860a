use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

mod classify;
mod materialize;
mod metadata;
mod photo_exif;
mod resolve;
mod rewrite;
mod time;
mod video_meta;

use metadata::ContainerSet;
use resolve::ResolvedDate;
use time::format_dt;

#[derive(Debug, Clone)]
pub struct Config {
    pub dry_run: bool,
    pub input: PathBuf,
    pub output: PathBuf,
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config {
        dry_run: false,
        input: PathBuf::from("./test-data"),
        output: PathBuf::from("./output"),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--dry-run" => config.dry_run = true,
            "-i" | "--input" => {
                i += 1;
                let value = args.get(i).context("missing value for --input")?;
                config.input = PathBuf::from(value);
            }
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).context("missing value for --output")?;
                config.output = PathBuf::from(value);
            }
            other => println!("Unknown argument: {other}"),
        }
        i += 1;
    }

    Ok(config)
}

fn discover(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if entry.file_type().is_file() && classify::is_media_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files
}

#[derive(Debug, PartialEq)]
enum Decision {
    /// Metadata date qualifies and predates the file's creation time.
    UseMetadata(ResolvedDate),
    /// Fall back to the path-derived date and rewrite embedded metadata.
    UsePathDate,
}

fn decide(resolved: Option<ResolvedDate>, file_created: Option<NaiveDateTime>) -> Decision {
    match (resolved, file_created) {
        (Some(res), Some(created)) if res.date < created => Decision::UseMetadata(res),
        _ => Decision::UsePathDate,
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub found: u64,
    pub used_metadata_date: u64,
    pub used_path_date: u64,
    pub skipped_bad_path: u64,
}

fn run(config: &Config) -> Result<RunSummary> {
    let files = discover(&config.input);
    println!("Found {} files in {}", files.len(), config.input.display());

    let mut summary = RunSummary {
        found: files.len() as u64,
        ..Default::default()
    };

    for file in &files {
        let created = time::file_created(file);
        println!("File: {}", file.display());
        println!(
            "\tDate: {}",
            created.map(format_dt).unwrap_or_else(|| "unknown".into())
        );

        let dir = file.parent().context("file has no containing directory")?;
        let reference = match resolve::path_reference_date(dir) {
            Ok(reference) => reference,
            Err(e) => {
                eprintln!("\tSkipping: directory does not follow <year>/<month> convention ({e:#})");
                summary.skipped_bad_path += 1;
                continue;
            }
        };

        let mut containers = ContainerSet::read(file);

        match decide(resolve::resolve_date(&containers, reference), created) {
            Decision::UseMetadata(res) => {
                println!("\tMetadata date: {} ({})", format_dt(res.date), res.source.as_str());
                if config.dry_run {
                    println!(
                        "\tDry run: would copy as {}",
                        materialize::output_filename(file, res.date)
                    );
                } else {
                    materialize::materialize(file, res.date, &config.output, false)?;
                }
                summary.used_metadata_date += 1;
            }
            Decision::UsePathDate => {
                println!("\tNo metadata date found or it is not earlier than file date.");
                println!("\tUsing path date: {}", format_dt(reference));
                containers.set_all_dates(reference);
                if config.dry_run {
                    println!(
                        "\tDry run: would copy as {}",
                        materialize::output_filename(file, reference)
                    );
                } else {
                    materialize::materialize(file, reference, &config.output, true)?;
                }
                summary.used_path_date += 1;
            }
        }
    }

    Ok(summary)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    if config.dry_run {
        println!("Dry run: no files will be written.");
    }

    let summary = run(&config)?;

    println!("Files found:          {}", summary.found);
    println!("Used metadata date:   {}", summary.used_metadata_date);
    println!("Used path date:       {}", summary.used_path_date);
    println!("Skipped (bad path):   {}", summary.skipped_bad_path);
    println!("Output:               {}", config.output.display());

    Ok(())
}
