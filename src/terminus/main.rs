//! The binary only invokes `cli::run()` and handles process termination; the
//! CLI lives in `cli/` and everything it calls lives in the library.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
