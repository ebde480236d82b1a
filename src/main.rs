use anyhow::{anyhow, Result};
use clap::Parser;
use console::Term;
use ioprobe::cli::Cli;
use ioprobe::output::print_error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if let Err(e) = cli.execute() {
        print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr, unless the full-screen UI shares it. `RUST_LOG` overrides
/// the default filter.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(default) = cli.log_filter(Term::stderr().is_term()) else {
        return Ok(());
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
