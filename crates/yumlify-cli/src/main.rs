//! yumlify CLI - Render JSON type models as yUML class diagrams

mod cli;

use clap::Parser;

fn main() {
    // Logging is configured inside run() once flags and env are known
    let cli_args = cli::Cli::parse();

    let app = cli::YumlifyApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
