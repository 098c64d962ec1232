use std::{env, fs::read_to_string, path::PathBuf, process::ExitCode};

use cylli::{display_error, errors::errors::ExecError, exec, DEFAULT_OUTPUT_PATH, DEMO_PROGRAM};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

struct Args {
    source: Option<PathBuf>,
    output: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut source = None;
    let mut output = PathBuf::from(DEFAULT_OUTPUT_PATH);

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" => {
                output = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| String::from("`-o` expects an output path"))?;
            }
            _ if source.is_none() => source = Some(PathBuf::from(arg)),
            _ => return Err(format!("Unexpected argument `{}`", arg)),
        }
    }

    Ok(Args { source, output })
}

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Usage: cylli [source.cyl] [-o output.ll]");
            return ExitCode::FAILURE;
        }
    };

    let (source, file_name) = match &args.source {
        Some(path) => match read_to_string(path) {
            Ok(source) => (source, path.to_string_lossy().into_owned()),
            Err(error) => {
                eprintln!("Failed to read {}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        },
        None => (String::from(DEMO_PROGRAM), String::from("shell")),
    };

    match exec(&source, &file_name, &args.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExecError::Syntax(error)) => {
            display_error(&error, &source);
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
