//! CLI entry point for the grid pattern designer

use clap::Parser;
use quiltgrid::io::cli::{Cli, Session};

fn main() -> quiltgrid::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    Session::new(cli).run()
}
