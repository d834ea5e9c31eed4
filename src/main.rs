use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use dcc::{
    check_source,
    compiler::{bytecode::BytecodeBackend, compiler::Compiler, vm::Machine},
    driver::{compile_file, display_name, read_source, DriverError},
    errors::errors::Error,
    parse_source, render_error, CompileOptions, Target,
};

#[derive(Parser)]
#[command(name = "dcc", about = "Compiles a tiny int/float language to dc", version)]
struct Cli {
    /// Log pipeline stages to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a source file.
    Compile {
        file: PathBuf,
        /// Output path. Defaults to out.dc or out.bc depending on the target.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Target::Dc)]
        target: Target,
        /// Fractional digits dc computes with.
        #[arg(long, default_value_t = dcc::compiler::backend::DEFAULT_PRECISION)]
        precision: u32,
    },
    /// Print the syntax tree of a source file.
    Ast {
        file: PathBuf,
        /// Print as JSON instead of source-like text.
        #[arg(long)]
        json: bool,
        /// Type check first, so inserted conversions show up.
        #[arg(long)]
        checked: bool,
    },
    /// Compile to bytecode and run it on the built-in stack machine.
    Run { file: PathBuf },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Turns a compile error into a rendered diagnostic.
fn report(error: &Error, source: &str) -> anyhow::Error {
    anyhow!(render_error(error, source))
}

fn load(file: &Path) -> anyhow::Result<(String, String)> {
    let source = read_source(file)?;
    Ok((source, display_name(file)))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compile {
            file,
            output,
            target,
            precision,
        } => {
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("out.{}", target.extension())));
            let options = CompileOptions { target, precision };

            match compile_file(&file, &output, &options) {
                Ok(_) => Ok(()),
                Err(DriverError::Compile(error)) => {
                    let source = read_source(&file).unwrap_or_default();
                    Err(report(&error, &source))
                }
                Err(error) => Err(error.into()),
            }
        }
        Command::Ast {
            file,
            json,
            checked,
        } => {
            let (source, name) = load(&file)?;
            let program = if checked {
                check_source(&source, Some(&name))
            } else {
                parse_source(&source, Some(&name))
            }
            .map_err(|error| report(&error, &source))?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&program).context("failed to serialize tree")?
                );
            } else {
                print!("{}", program);
            }
            Ok(())
        }
        Command::Run { file } => {
            let (source, name) = load(&file)?;
            let program =
                check_source(&source, Some(&name)).map_err(|error| report(&error, &source))?;
            let bytecode = Compiler::new(BytecodeBackend::new(), Some(&name))
                .gen(&program)
                .map_err(|error| report(&error, &source))?;

            let values = Machine::new()
                .run(&bytecode)
                .with_context(|| format!("runtime error in {}", name))?;
            for value in values {
                println!("{}", value);
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}
