//! Command-line interface for quizbank
//! Converts quiz files into question banks and inspects each stage of the pipeline.
//!
//! Usage:
//!   quizbank convert `<path>` [-o `<output>`]    - Write the question bank (stdout without -o)
//!   quizbank inspect `<path>` [--format `<fmt>`] - Print tokens, the parse tree or the bank
//!   quizbank check `<path>`                      - Validate a file and count its questions
//!   quizbank formats                           - List inspect formats
//!
//! `--engine`, `--spacing`, `--config` and `-v` apply to every subcommand.

use clap::{Arg, ArgAction, ArgMatches, Command};
use quizbank::quiz::config::{BankFormat, Loader, QuizConfig};
use quizbank::quiz::processor::{available_formats, process_file, ProcessingSpec};
use quizbank::quiz::{convert, QuizError};
use std::fmt::Display;
use std::fs;
use std::path::Path;

fn main() {
    let matches = Command::new("quizbank")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert plain-text quiz files into question banks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .global(true)
                .value_parser(["reference", "line-based"])
                .help("Parsing engine"),
        )
        .arg(
            Arg::new("spacing")
                .long("spacing")
                .global(true)
                .value_parser(["designed", "source"])
                .help("How the reference parser rebuilds prose"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a quiz file into a question bank")
                .arg(
                    Arg::new("path")
                        .help("Path to the quiz file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Where to write the bank (printed when omitted)"),
                )
                .arg(
                    Arg::new("bank-format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "yaml"])
                        .help("Bank serialization"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print one stage of the pipeline")
                .arg(
                    Arg::new("path")
                        .help("Path to the quiz file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Stage and format (e.g., 'token-simple', 'ast-treeviz')")
                        .default_value("ast-treeviz"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a quiz file and report its question count")
                .arg(
                    Arg::new("path")
                        .help("Path to the quiz file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("formats").about("List available inspect formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches),
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("formats", _)) => handle_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a single diagnostic line and exit with status 1
fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Defaults, then the config file, then command-line flags
fn load_config(matches: &ArgMatches) -> Result<QuizConfig, QuizError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("quizbank.toml"),
    };
    for (flag, key) in [
        ("engine", "parsing.engine"),
        ("spacing", "parsing.spacing"),
        ("bank-format", "output.format"),
    ] {
        if let Ok(Some(value)) = matches.try_get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    Ok(loader.build()?)
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
}

fn handle_convert_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let config = load_config(matches).unwrap_or_else(|e| fail(e));
    let source = read_source(path);

    let bank = convert(&source, &config.parse_options()).unwrap_or_else(|e| fail(e));

    let result = match (matches.get_one::<String>("output"), config.output.format) {
        (Some(output), BankFormat::Json) => bank.write_to(output),
        (Some(output), BankFormat::Yaml) => bank.to_yaml().and_then(|yaml| {
            fs::write(Path::new(output), yaml)?;
            tracing::info!(path = %output, records = bank.len(), "wrote question bank");
            Ok(())
        }),
        (None, BankFormat::Json) => bank.to_json().map(|json| println!("{}", json)),
        (None, BankFormat::Yaml) => bank.to_yaml().map(|yaml| print!("{}", yaml)),
    };
    result.unwrap_or_else(|e| fail(e));
}

fn handle_inspect_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let config = load_config(matches).unwrap_or_else(|e| fail(e));

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| fail(e));
    let output = process_file(path, &spec, &config.parse_options()).unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

fn handle_check_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let config = load_config(matches).unwrap_or_else(|e| fail(e));
    let source = read_source(path);

    let bank = convert(&source, &config.parse_options()).unwrap_or_else(|e| fail(e));
    println!("{}: {} question(s)", path, bank.len());
}

fn handle_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
