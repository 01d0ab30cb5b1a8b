//! # EasyLang
//!
//! Command line entry point of the EasyLang interpreter. It reads a source
//! file, parses it, and either runs the program or pretty-prints it.

use std::{fs, io, path::PathBuf, process};

use clap::{Parser as CliParser, ValueEnum};
use log::{debug, info};

use easylang::{formatter::format_ast, interpreter::Interpreter, parser::Parser};

/// Struct containing the CLI configuration for the interpreter.
#[derive(CliParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The path to the EasyLang source file.
    #[arg(index = 1)]
    file: PathBuf,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,

    /// Whether to dump the parsed AST (for debugging).
    #[arg(long)]
    dump_ast: bool,

    /// Pretty-print the program instead of running it.
    #[arg(long)]
    format: bool,
}

/// Enum for specifying the log level of the interpreter.
#[derive(ValueEnum, Clone, Copy, Default, Debug)]
enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    Error,

    /// Also log warnings.
    Warn,

    /// Also log information about the general state of the interpreter.
    Info,

    /// Log everything which happens internally in the interpreter.
    Debug,

    /// Log extra information, e.g., single function calls.
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() {
    let args = Cli::parse();

    simple_logger::init_with_level(args.verbosity.into()).unwrap();

    debug!("reading source file '{}'", args.file.display());

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: could not read '{}': {err}", args.file.display());
            process::exit(1);
        }
    };

    let ast = match Parser::new(&source).parse_program() {
        Ok(ast) => ast,
        Err(parse_error) => {
            eprintln!("{parse_error}");
            process::exit(1);
        }
    };

    if args.dump_ast {
        info!("Parsed AST:\n{ast:#?}");
    }

    if args.format {
        print!("{}", format_ast(&ast));
        return;
    }

    let interpreter = Interpreter::from_ast(ast, io::stdin().lock(), io::stdout().lock());
    if let Err(runtime_error) = interpreter.run() {
        eprintln!("{runtime_error}");
        process::exit(1);
    }
}
