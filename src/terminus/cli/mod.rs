//! # CLI Layer
//!
//! One possible UI client for terminus. This is the only place that knows
//! about stdout/stderr, exit codes and argument parsing.
//!
//! Every invocation is one session: load the registry, run one command,
//! flush on shutdown. Running `terminus` with no command lists the modules.
//!
//! ```text
//! terminus module add CS2103
//! terminus note CS2103 add lecture1 "Intro to SE"
//! echo "from a pipe" | terminus note CS2103 add lecture2
//! terminus question CS2103 add "What is SLAP?" "Single level of abstraction"
//! terminus link CS2103 add "Lecture" Friday 16:00 https://zoom.us/j/1
//! terminus note CS2103 view 1
//! terminus note CS2103 delete 1
//! ```
//!
//! ## Module Structure
//!
//! - `commands`: dispatch to the API and printing of results
//! - `render`: output formatting (listings, colors, messages)
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
