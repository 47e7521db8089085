mod cli;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    cli::init_logging();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
