use clap::Parser;
use tracing::debug;

use profit_cli::{Cli, app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "starting");

    app::run(&cli)
}
