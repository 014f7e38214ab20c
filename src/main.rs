//! Purpose: `underline` CLI entry point: apply collection combinators to JSON documents.
//! Role: Binary crate root; parses args, reads the input document, emits JSON on stdout.
//! Invariants: Results go to stdout as JSON; diagnostics and logs go to stderr only.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use underline::api::{Error, ErrorKind, to_exit_code};
use underline::json::parse;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `underline --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let options = OutputOptions { pretty: cli.pretty };
    tracing::debug!(command = cli.command.name(), "dispatching command");
    command_dispatch::dispatch_command(cli.command, cli.input.as_deref(), options)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser, Debug)]
#[command(
    name = "underline",
    version,
    about = "Apply functional collection combinators to JSON documents",
    long_about = "Reads one JSON document (stdin or --input) and prints the result of the chosen combinator as JSON.\nSet RUST_LOG=debug for diagnostic logs on stderr."
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Read the input document from a file instead of stdin",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pretty: bool,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct OutputOptions {
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Print integers from START (inclusive) to END (exclusive) by STEP")]
    Range {
        #[arg(
            value_name = "ARGS",
            allow_negative_numbers = true,
            help = "END | START END | START END STEP"
        )]
        args: Vec<i64>,
        #[arg(
            long,
            value_name = "JSON",
            help = "Range as JSON, e.g. '{\"start\":5,\"end\":2,\"step\":-1}'"
        )]
        spec: Option<String>,
    },
    #[command(about = "Print the value at a period-delimited PATH")]
    Get { path: String },
    #[command(about = "Print the keys (or indices) of the input collection")]
    Keys,
    #[command(about = "Print the values of the input collection")]
    Values,
    #[command(about = "Flatten nested arrays to any depth")]
    Flatten,
    #[command(about = "Drop falsy elements (false, null, 0, \"\")")]
    Compact,
    #[command(about = "Drop repeated elements, keeping first occurrences")]
    Unique,
    #[command(about = "Sum numeric elements")]
    Sum,
    #[command(about = "Extract KEY from every element")]
    Pluck { key: String },
    #[command(about = "Remove every element equal to one of the JSON VALUES")]
    Without {
        #[arg(value_name = "VALUES", allow_hyphen_values = true)]
        values: Vec<String>,
    },
    #[command(about = "Print whether the JSON VALUE is an element of the input")]
    Contains {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    #[command(about = "Copy properties of JSON object SOURCES onto the input object")]
    Extend {
        #[arg(value_name = "SOURCES")]
        sources: Vec<String>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Range { .. } => "range",
            Command::Get { .. } => "get",
            Command::Keys => "keys",
            Command::Values => "values",
            Command::Flatten => "flatten",
            Command::Compact => "compact",
            Command::Unique => "unique",
            Command::Sum => "sum",
            Command::Pluck { .. } => "pluck",
            Command::Without { .. } => "without",
            Command::Contains { .. } => "contains",
            Command::Extend { .. } => "extend",
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn read_document(input: Option<&Path>) -> Result<Value, Error> {
    let (text, context) = match input {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| {
                let kind = if err.kind() == io::ErrorKind::NotFound {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Io
                };
                Error::new(kind)
                    .with_message(format!("failed to read input {}", path.display()))
                    .with_source(err)
            })?;
            (text, path.display().to_string())
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            (text, "stdin".to_string())
        }
    };
    parse_json_arg(&text, &context)
}

fn parse_json_arg(text: &str, context: &str) -> Result<Value, Error> {
    parse::from_str::<Value>(text).map_err(|err| {
        let hint = parse::hint_for_error(&err, context);
        Error::new(ErrorKind::Usage)
            .with_message(format!("invalid JSON in {context}"))
            .with_hint(hint)
            .with_source(err)
    })
}

fn emit_json(value: Value, options: OutputOptions) {
    let json = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Arity => "wrong number of arguments".to_string(),
        ErrorKind::Type => "unexpected value type".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, use_color: bool, color: AnsiColor) -> String {
    if !use_color {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(key) = err.key() {
        lines.push(format!(
            "{} {key}",
            colorize_label("key:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}
