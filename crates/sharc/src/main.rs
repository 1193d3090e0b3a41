//! sharc entry point
//!
//! The binary is a thin composition root: parse the command line, wire
//! tracing, run the [`Driver`](sharc::Driver), and map the outcome to the
//! process exit code. All diagnostics are rendered by the driver itself.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sharc::args::SHARK_ASCII;
use sharc::{Args, Driver};

fn main() -> ExitCode {
    let args = Args::parse_or_exit();

    if args.wants_shark() {
        println!("\x1b[34m{SHARK_ASCII}\x1b[0m");
        return ExitCode::FAILURE;
    }

    init_tracing(args.debug);

    let mut driver = Driver::new(args);
    if driver.run() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `--debug` turns on debug-level events for our crates; otherwise
/// `RUST_LOG` decides, defaulting to warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sharc=debug,sharc_report=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
