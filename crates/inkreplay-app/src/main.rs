//! Main application entry point.

use clap::Parser;
use inkreplay_app::{Cli, open_storage, run};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = open_storage(cli.dir.clone()).and_then(|storage| {
        log::info!("Using drawings in {}", storage.base_path().display());
        run(cli.command, &storage, &mut std::io::stdout().lock())
    });

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
