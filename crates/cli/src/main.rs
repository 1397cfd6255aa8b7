use clap::Parser;

use run_in_terminal::Cli;

fn main() {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = Cli::parse().execute() {
        eprintln!("run-in-terminal: {e:#}");
        std::process::exit(1);
    }
}
