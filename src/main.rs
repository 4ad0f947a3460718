use clap::Parser;

use loadplot::cli::Cli;
use loadplot::pipeline;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Cli::parse();
    // Argument validation fails fast, before anything is written
    if let Err(e) = args.validate() {
        eprintln!("{e}");
        std::process::exit(2);
    }

    if let Err(e) = pipeline::run(&args) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
