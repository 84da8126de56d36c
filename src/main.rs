use clap::Parser;

use eurorack_panel::cli::{run, Cli};
use eurorack_panel::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    run(cli)
}
