//! studyhall - community Q&A and course reviews from the terminal
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the interactive menu
//! studyhall
//!
//! # With info-level logging
//! studyhall -v
//!
//! # With a specific configuration file
//! studyhall --config studyhall.toml
//! ```

mod cli;
mod config;
mod shell;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
