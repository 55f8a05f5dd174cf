use clap::Parser;
use ecommerce_cleaner::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments; no subcommand means `clean` with defaults
    let args = Args::parse();

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
