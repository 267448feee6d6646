//! ROM collection deduplicator (romsweep) - Main binary entry point

use romsweep::cli::args::{Command, parse_args};
use romsweep::cli::output::{format_json, format_text};
use romsweep::io::{cache, report};
use romsweep::models::{CacheMeta, CacheRecord, RemovalDecision};
use romsweep::services::format::format_size;
use romsweep::services::hash::HASH_ALGORITHM;
use romsweep::services::purge::{PurgeMode, purge};
use romsweep::{Policy, ScanOptions, Summary, resolve};
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug romsweep scan /path
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    // Parse arguments
    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    // Execute command
    let exit_code = match &cli_args.command {
        Command::Scan(scan_args) => handle_scan(scan_args),
        Command::Report(report_args) => handle_report(report_args),
        Command::Purge(purge_args) => handle_purge(purge_args),
    };

    process::exit(exit_code);
}

/// Scan a collection, reusing hashes from a prior cache when present, and
/// persist a fresh cache afterwards.
fn run_scan(
    path: &str,
    cache_path: Option<&str>,
    no_hash: bool,
    platform: Option<&str>,
    quiet: bool,
    policy: &Policy,
) -> Result<Summary, i32> {
    let mut opts = ScanOptions {
        compute_hashes: !no_hash,
        platform_filter: platform.map(str::to_string),
        ..ScanOptions::default()
    };

    if let Some(cache_file) = cache_path
        && Path::new(cache_file).exists()
    {
        match cache::read_cache(cache_file) {
            Ok((meta, records)) => {
                if meta.hash_algorithm == HASH_ALGORITHM {
                    if !quiet {
                        eprintln!("Loaded cache: {} ({} entries)", cache_file, records.len());
                    }
                    let prior: HashMap<String, CacheRecord> =
                        records.into_iter().map(|r| (r.path.clone(), r)).collect();
                    opts.prior_hashes = Some(prior);
                } else {
                    log::warn!(
                        "Ignoring cache with unknown hash algorithm: {}",
                        meta.hash_algorithm
                    );
                }
            }
            Err(e) => {
                log::warn!("Failed to read cache {cache_file}: {e}");
            }
        }
    }

    if !quiet {
        eprintln!("Scanning: {path}");
    }

    let summary = match romsweep::scan_collection(path, policy, &opts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(match e {
                romsweep::Error::InvalidInput(_) => 2,
                _ => 4,
            });
        }
    };

    if !quiet {
        eprintln!("Found {} files", summary.collection.roms.len());
    }

    if let Some(cache_file) = cache_path {
        let meta = CacheMeta {
            scan_root: summary.root.clone(),
            scanned_at: format!("{:?}", summary.finished_at),
            hash_algorithm: HASH_ALGORITHM.to_string(),
        };
        let records: Vec<CacheRecord> = summary
            .collection
            .roms
            .iter()
            .map(|rom| CacheRecord {
                path: rom.rel_path.clone(),
                hash: rom.hash.clone(),
                size: rom.size,
            })
            .collect();

        if let Err(e) = cache::write_cache(cache_file, &meta, &records) {
            eprintln!("Error: Failed to save cache: {e}");
            return Err(4);
        }

        if !quiet {
            eprintln!("Cache saved: {} ({} entries)", cache_file, records.len());
        }
    }

    Ok(summary)
}

fn handle_scan(args: &romsweep::cli::args::ScanArgs) -> i32 {
    let policy = Policy::default();

    let summary = match run_scan(
        &args.path,
        args.cache.as_deref(),
        args.no_hash,
        args.platform.as_deref(),
        args.quiet,
        &policy,
    ) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let decisions = resolve(&summary.collection, &policy);

    if args.json {
        let json = format_json(&summary, &decisions);
        println!("{json}");
    } else {
        format_text(&summary, &decisions);
    }

    if summary.errors.is_empty() { 0 } else { 3 }
}

fn handle_report(args: &romsweep::cli::args::ReportArgs) -> i32 {
    let policy = Policy::default();

    let summary = match run_scan(
        &args.path,
        args.cache.as_deref(),
        args.no_hash,
        args.platform.as_deref(),
        args.quiet,
        &policy,
    ) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let decisions = resolve(&summary.collection, &policy);

    if let Err(e) = report::write_report(&args.output, &decisions) {
        eprintln!("Error: Failed to write report: {e}");
        return 4;
    }

    if !args.quiet {
        let total: u64 = decisions.iter().map(|d| d.size).sum();
        eprintln!(
            "Report saved: {} ({} decisions, {} reclaimable)",
            args.output,
            decisions.len(),
            format_size(total)
        );
    }

    if summary.errors.is_empty() { 0 } else { 3 }
}

fn handle_purge(args: &romsweep::cli::args::PurgeArgs) -> i32 {
    let policy = Policy::default();

    // Decisions come either from a saved report or a fresh scan
    let decisions: Vec<RemovalDecision> = if let Some(ref report_path) = args.report {
        match report::read_report(report_path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error reading report: {e}");
                return 4;
            }
        }
    } else {
        let summary = match run_scan(&args.path, None, false, None, args.quiet, &policy) {
            Ok(s) => s,
            Err(code) => return code,
        };
        resolve(&summary.collection, &policy)
    };

    if decisions.is_empty() {
        if !args.quiet {
            eprintln!("Nothing to remove.");
        }
        return 0;
    }

    let mode = if args.delete {
        PurgeMode::Delete
    } else if args.quarantine.is_some() {
        PurgeMode::Quarantine
    } else {
        PurgeMode::DryRun
    };

    if mode == PurgeMode::Delete && !args.yes && !confirm_delete(decisions.len()) {
        eprintln!("Aborted.");
        return 2;
    }

    let root = Path::new(&args.path);
    let default_quarantine = root.join("_quarantine");
    let quarantine_root = args
        .quarantine
        .as_deref()
        .map_or(default_quarantine.as_path(), Path::new);

    let outcome = purge(root, quarantine_root, &decisions, mode);

    if !args.quiet && mode != PurgeMode::DryRun {
        eprintln!(
            "Removed {} files, reclaimed {}",
            outcome.removed,
            format_size(outcome.reclaimed_bytes)
        );
    }

    if outcome.errors.is_empty() { 0 } else { 3 }
}

/// Prompt for the literal word DELETE before destructive removal
fn confirm_delete(count: usize) -> bool {
    eprint!("About to permanently delete {count} files. Type DELETE to confirm: ");
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    let stdin = std::io::stdin();
    if stdin.lock().read_line(&mut line).is_err() {
        return false;
    }

    line.trim() == "DELETE"
}

fn print_help() {
    println!("ROM Sweep (romsweep) - Deduplicate ROM collections organized by platform");
    println!();
    println!("USAGE:");
    println!("    romsweep scan <ROMS_DIR> [OPTIONS]");
    println!("    romsweep report <ROMS_DIR> --output <FILE> [OPTIONS]");
    println!("    romsweep purge <ROMS_DIR> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    scan      Scan a collection and print removal decisions");
    println!("    report    Scan a collection and save decisions to a CSV report");
    println!("    purge     Apply removal decisions (dry-run unless told otherwise)");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("SCAN / REPORT OPTIONS:");
    println!("    --output <FILE>           CSV report destination (report only, required)");
    println!("    --cache <FILE>            Reuse and refresh a Parquet hash cache");
    println!("    --no-hash                 Skip content hashing (name matching only)");
    println!("    --platform <NAME>         Restrict to a single platform directory");
    println!("    --json                    Emit machine-readable output (scan only)");
    println!("    --quiet                   Suppress non-error output");
    println!();
    println!("PURGE OPTIONS:");
    println!("    --report <FILE>           Replay a saved CSV report instead of re-scanning");
    println!("    --quarantine <DIR>        Move files into DIR instead of deleting");
    println!("    --delete                  Permanently delete files (asks for confirmation)");
    println!("    --yes                     Skip the delete confirmation prompt");
    println!("    --quiet                   Suppress non-error output");
    println!();
    println!("WORKFLOW:");
    println!("    1. Preview:     romsweep scan ~/roms --cache roms.parquet");
    println!("    2. Save plan:   romsweep report ~/roms --output cleanup.csv --cache roms.parquet");
    println!("    3. Apply:       romsweep purge ~/roms --report cleanup.csv --quarantine ~/roms-removed");
    println!();
    println!("EXAMPLES:");
    println!("    romsweep scan ~/roms --platform snes --json");
    println!("    romsweep report ~/roms --output cleanup.csv --no-hash");
    println!("    romsweep purge ~/roms --report cleanup.csv --delete --yes");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("romsweep {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
