//! Pegasus Bridge CLI
//!
//! Entry point for the `pegasus-bridge` command-line tool.

use clap::error::ErrorKind;
use clap::Parser;
use pegasus_bridge::encoder::write_response;
use pegasus_bridge::{start, CommandDispatcher};
use pegasus_protocol::{BridgeError, BridgeResponse, BINDINGS};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "pegasus-bridge")]
#[command(about = "Route one JSON command to its analyzer", version)]
struct Cli {
    /// JSON request, or `-` to read it from stdin
    request: Option<String>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    _rest: Vec<String>,

    /// Path to config file (also PEGASUS_BRIDGE_CONFIG)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print the command binding table as JSON and exit
    #[arg(long)]
    describe: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered.lines().next().unwrap_or_default().trim_start_matches("error: ");
            emit(&BridgeResponse::execution_error(BridgeError::Arguments(message.to_string())));
            process::exit(0);
        }
    };

    if cli.describe {
        run_describe();
        return;
    }

    let toolkit = match start(cli.config.as_deref()) {
        Ok(toolkit) => toolkit,
        Err(e) => {
            emit(&BridgeResponse::import_error(e));
            process::exit(1);
        }
    };

    let dispatcher = CommandDispatcher::new(toolkit);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = dispatcher.run_with_io(cli.request.as_deref(), &mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("Error writing response: {}", e);
        process::exit(1);
    }
}

fn run_describe() {
    match serde_json::to_string(&BINDINGS) {
        Ok(json) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{}", json).and_then(|_| stdout.flush()).is_err() {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error serializing bindings: {}", e);
            process::exit(1);
        }
    }
}

fn emit(response: &BridgeResponse) {
    let stdout = io::stdout();
    if let Err(e) = write_response(&mut stdout.lock(), response) {
        eprintln!("Error writing response: {}", e);
        process::exit(1);
    }
}
