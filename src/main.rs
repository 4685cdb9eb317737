use clap::Parser;
use tracing::debug;

use schemagen::cli::{Args, LogLevel};
use schemagen::commands::{CommandRunner, Context};
use schemagen::config::ConfigFile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.log_level);

    let config = ConfigFile::load(args.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let ctx = Context::new(config, std::env::var("DATABASE_URL").ok())?;
    let output = args.command.run(&ctx, args.format)?;
    println!("{}", output);
    Ok(())
}

/// Logs go to stderr; stdout carries command output only.
fn setup_logging(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
