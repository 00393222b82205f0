//! Command-line interface for scopefmt
//!
//! Usage:
//!   scopefmt format `<paths>...` [--rules `<a,b>`] [--config `<file>`]  - Rewrite files in place
//!   scopefmt check `<paths>...` [--report json]                    - Exit 1 if any file would change
//!   scopefmt rules                                                - List available rules
//!   scopefmt tokens `<path>`                                       - Dump the token stream
//!   scopefmt scopes `<path>`                                       - Dump the scope tree
//!
//! Without `--config`, `.scopefmt.yaml` in the working directory is used when present.
//! Fatal errors in any file exit with status 2.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rayon::prelude::*;
use scopefmt::formats::{scope_outline, token_listing};
use scopefmt::pipeline::Loader;
use scopefmt::{Diagnostic, FormatConfig, Formatted, Formatter};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

const LOCAL_CONFIG: &str = ".scopefmt.yaml";

fn main() {
    let matches = Command::new("scopefmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Blank-line formatter for brace-scoped, Swift-like source")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_rule_args(
            Command::new("format")
                .about("Format files in place")
                .arg(paths_arg()),
        ))
        .subcommand(with_rule_args(
            Command::new("check")
                .about("Report files that would change, without writing them")
                .arg(paths_arg())
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Report format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        ))
        .subcommand(Command::new("rules").about("List available rules"))
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("scopes")
                .about("Print the scope tree of a file")
                .arg(path_arg()),
        )
        .get_matches();

    let code = match matches.subcommand() {
        Some(("format", sub)) => handle_format_command(sub),
        Some(("check", sub)) => handle_check_command(sub),
        Some(("rules", _)) => handle_rules_command(),
        Some(("tokens", sub)) => handle_dump_command(sub, |formatter, source| {
            let analysis = formatter.analyze(source)?;
            Ok(token_listing(&analysis.tokens))
        }),
        Some(("scopes", sub)) => handle_dump_command(sub, |formatter, source| {
            let analysis = formatter.analyze(source)?;
            Ok(scope_outline(&analysis))
        }),
        _ => unreachable!("clap requires a subcommand"),
    };
    process::exit(code);
}

fn paths_arg() -> Arg {
    Arg::new("paths")
        .help("Files to process")
        .required(true)
        .num_args(1..)
        .value_parser(clap::value_parser!(PathBuf))
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("File to inspect")
        .required(true)
        .index(1)
        .value_parser(clap::value_parser!(PathBuf))
}

fn with_rule_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("rules")
                .long("rules")
                .short('r')
                .help("Comma-separated rules to run, in order (overrides the configuration)")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (YAML, or JSON by extension)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Defaults, then the configuration file, then `--rules`. Unknown rule names are rejected
/// here, before any file is read.
fn load_config(matches: &ArgMatches, formatter: &Formatter) -> Result<FormatConfig, String> {
    let mut loader = match matches.get_one::<PathBuf>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(rules) = matches.get_many::<String>("rules") {
        loader = loader.with_rules(rules.cloned()).map_err(|e| e.to_string())?;
    }
    let config = loader.build().map_err(|e| e.to_string())?;
    formatter
        .registry()
        .resolve(&config.rules)
        .map_err(|e| e.to_string())?;
    Ok(config)
}

fn paths(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn format_file(formatter: &Formatter, config: &FormatConfig, path: &Path) -> Result<Formatted, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("failed to read: {e}"))?;
    formatter
        .format_with_config(&source, config)
        .map_err(|e| e.to_string())
}

fn report_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}: warning: {}", path.display(), diagnostic.message);
    }
}

/// Handle the format command
fn handle_format_command(matches: &ArgMatches) -> i32 {
    let formatter = Formatter::new();
    let config = match load_config(matches, &formatter) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let results: Vec<(PathBuf, Result<bool, String>)> = paths(matches)
        .into_par_iter()
        .map(|path| {
            let result = format_file(&formatter, &config, &path).and_then(|formatted| {
                report_diagnostics(&path, &formatted.diagnostics);
                if formatted.changed() {
                    fs::write(&path, &formatted.output)
                        .map_err(|e| format!("failed to write: {e}"))?;
                }
                Ok(formatted.changed())
            });
            (path, result)
        })
        .collect();

    let mut failed = false;
    for (path, result) in &results {
        match result {
            Ok(true) => println!("formatted {}", path.display()),
            Ok(false) => {}
            Err(e) => {
                eprintln!("{}: error: {}", path.display(), e);
                failed = true;
            }
        }
    }
    if failed {
        2
    } else {
        0
    }
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    changed: bool,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    files: Vec<FileReport>,
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> i32 {
    let formatter = Formatter::new();
    let config = match load_config(matches, &formatter) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let files: Vec<FileReport> = paths(matches)
        .into_par_iter()
        .map(|path| match format_file(&formatter, &config, &path) {
            Ok(formatted) => FileReport {
                changed: formatted.changed(),
                diagnostics: formatted.diagnostics,
                error: None,
                path,
            },
            Err(error) => FileReport {
                changed: false,
                diagnostics: Vec::new(),
                error: Some(error),
                path,
            },
        })
        .collect();

    let failed = files.iter().any(|file| file.error.is_some());
    let changed = files.iter().any(|file| file.changed);

    if matches.get_one::<String>("report").map(String::as_str) == Some("json") {
        match serde_json::to_string_pretty(&CheckReport { files }) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 2;
            }
        }
    } else {
        for file in &files {
            report_diagnostics(&file.path, &file.diagnostics);
            match &file.error {
                Some(e) => eprintln!("{}: error: {}", file.path.display(), e),
                None if file.changed => println!("would format {}", file.path.display()),
                None => {}
            }
        }
    }

    if failed {
        2
    } else if changed {
        1
    } else {
        0
    }
}

/// Handle the rules command
fn handle_rules_command() -> i32 {
    let formatter = Formatter::new();
    let defaults = FormatConfig::default();
    println!("Available rules:\n");
    for (name, description) in formatter.registry().list() {
        let marker = if defaults.rules.iter().any(|rule| rule == name) {
            " (default)"
        } else {
            ""
        };
        println!("  {name}{marker}");
        println!("    {description}");
    }
    0
}

/// Handle the tokens and scopes commands
fn handle_dump_command(
    matches: &ArgMatches,
    dump: impl Fn(&Formatter, &str) -> Result<String, scopefmt::FormatError>,
) -> i32 {
    let Some(path) = matches.get_one::<PathBuf>("path") else {
        return 2;
    };
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: error: failed to read: {}", path.display(), e);
            return 2;
        }
    };
    match dump(&Formatter::new(), &source) {
        Ok(output) => {
            print!("{output}");
            0
        }
        Err(e) => {
            eprintln!("{}: error: {}", path.display(), e);
            2
        }
    }
}
