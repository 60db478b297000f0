use clap::Parser;
use roster_processor::cli::{self, Args};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging before any parsing work happens
    cli::setup_logging(&args);

    match cli::run(&args) {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
