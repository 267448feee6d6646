//! CLI argument parsing

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Scan(ScanArgs),
    Report(ReportArgs),
    Purge(PurgeArgs),
}

#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub path: String,
    pub cache: Option<String>,
    pub no_hash: bool,
    pub platform: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub path: String,
    pub output: String,
    pub cache: Option<String>,
    pub no_hash: bool,
    pub platform: Option<String>,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct PurgeArgs {
    pub path: String,
    pub report: Option<String>,
    pub quarantine: Option<String>,
    pub delete: bool,
    pub yes: bool,
    pub quiet: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            cache: None,
            no_hash: false,
            platform: None,
            json: false,
            quiet: false,
        }
    }
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let command = match args[1].as_str() {
        "scan" => Command::Scan(parse_scan_args(&args[2..])?),
        "report" => Command::Report(parse_report_args(&args[2..])?),
        "purge" => Command::Purge(parse_purge_args(&args[2..])?),
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

fn parse_scan_args(args: &[String]) -> Result<ScanArgs, String> {
    let mut scan_args = ScanArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--cache" => {
                i += 1;
                if i >= args.len() {
                    return Err("--cache requires a file path".to_string());
                }
                scan_args.cache = Some(args[i].clone());
            }
            "--platform" => {
                i += 1;
                if i >= args.len() {
                    return Err("--platform requires a value".to_string());
                }
                scan_args.platform = Some(args[i].clone());
            }
            "--no-hash" => {
                scan_args.no_hash = true;
            }
            "--json" => {
                scan_args.json = true;
            }
            "--quiet" => {
                scan_args.quiet = true;
            }
            arg if !arg.starts_with("--") => {
                if scan_args.path.is_empty() {
                    scan_args.path = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if scan_args.path.is_empty() {
        return Err("Missing required argument: ROMS_DIR".to_string());
    }

    Ok(scan_args)
}

fn parse_report_args(args: &[String]) -> Result<ReportArgs, String> {
    let mut path = String::new();
    let mut output = String::new();
    let mut cache = None;
    let mut no_hash = false;
    let mut platform = None;
    let mut quiet = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("--output requires a file path".to_string());
                }
                output.clone_from(&args[i]);
            }
            "--cache" => {
                i += 1;
                if i >= args.len() {
                    return Err("--cache requires a file path".to_string());
                }
                cache = Some(args[i].clone());
            }
            "--platform" => {
                i += 1;
                if i >= args.len() {
                    return Err("--platform requires a value".to_string());
                }
                platform = Some(args[i].clone());
            }
            "--no-hash" => {
                no_hash = true;
            }
            "--quiet" => {
                quiet = true;
            }
            arg if !arg.starts_with("--") => {
                if path.is_empty() {
                    path = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if path.is_empty() {
        return Err("Missing required argument: ROMS_DIR".to_string());
    }
    if output.is_empty() {
        return Err("Missing required option: --output".to_string());
    }

    Ok(ReportArgs {
        path,
        output,
        cache,
        no_hash,
        platform,
        quiet,
    })
}

fn parse_purge_args(args: &[String]) -> Result<PurgeArgs, String> {
    let mut path = String::new();
    let mut report = None;
    let mut quarantine = None;
    let mut delete = false;
    let mut yes = false;
    let mut quiet = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--report" => {
                i += 1;
                if i >= args.len() {
                    return Err("--report requires a file path".to_string());
                }
                report = Some(args[i].clone());
            }
            "--quarantine" => {
                i += 1;
                if i >= args.len() {
                    return Err("--quarantine requires a directory".to_string());
                }
                quarantine = Some(args[i].clone());
            }
            "--delete" => {
                delete = true;
            }
            "--yes" => {
                yes = true;
            }
            "--quiet" => {
                quiet = true;
            }
            arg if !arg.starts_with("--") => {
                if path.is_empty() {
                    path = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if path.is_empty() {
        return Err("Missing required argument: ROMS_DIR".to_string());
    }
    if delete && quarantine.is_some() {
        return Err("--delete and --quarantine are mutually exclusive".to_string());
    }

    Ok(PurgeArgs {
        path,
        report,
        quarantine,
        delete,
        yes,
        quiet,
    })
}
