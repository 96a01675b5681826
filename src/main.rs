mod app;
mod cli;

use tidstreneren::logging::{self, LogTarget};

fn main() {
    let cli = cli::parse();

    // The TUI draws on the terminal, so it logs to a file instead
    let target = if cli.command.is_none() {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    app::run(cli);
}
