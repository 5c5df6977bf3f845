//! Sidekick - a desktop companion shell that turns activations into
//! structured host actions.
//!
//! This binary serves as both the launch entry and the long-lived primary:
//! - The first launch wins the singleton election and runs the event loop
//! - Later launches forward their arguments to the primary and exit
//! - `--generate-schema` prints the config JSON Schema and exits

// Emit a clear compile-time error if attempted to compile on unsupported platforms
#[cfg(not(unix))]
compile_error!("This application only supports unix platforms.");

use clap::Parser;

fn main() {
    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let cli = sidekick_lib::cli::Cli::parse();

    if cli.generate_schema {
        println!("{}", sidekick_lib::config::schema_json());
        return;
    }

    sidekick_lib::logging::init();

    if let Err(err) = sidekick_lib::run(&cli, &raw_args) {
        eprintln!("sidekick: {err}");
        std::process::exit(1);
    }
}
