use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "terminus", bin_name = "terminus", version = get_version())]
#[command(about = "Study organizer for university modules: notes, questions and links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the module file and note folders
    #[arg(long, global = true, env = "TERMINUS_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage modules
    #[command(alias = "m", display_order = 1)]
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },

    /// Manage the notes of a module
    #[command(alias = "n", display_order = 2)]
    Note {
        /// Module name or index
        module: String,

        #[command(subcommand)]
        action: NoteAction,
    },

    /// Manage the flashcard questions of a module
    #[command(alias = "q", display_order = 3)]
    Question {
        /// Module name or index
        module: String,

        #[command(subcommand)]
        action: QuestionAction,
    },

    /// Manage the scheduled links of a module
    #[command(alias = "l", display_order = 4)]
    Link {
        /// Module name or index
        module: String,

        #[command(subcommand)]
        action: LinkAction,
    },

    /// Get or set configuration
    #[command(display_order = 5)]
    Config {
        /// Configuration key (file-ext, data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModuleAction {
    /// Add a module
    Add { name: String },

    /// Delete a module with all of its content
    #[command(alias = "rm")]
    Delete {
        /// Module name or index
        module: String,
    },

    /// Rename a module
    #[command(alias = "mv")]
    Rename {
        /// Module name or index
        module: String,
        new_name: String,
    },

    /// List modules
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Add a note (reads the body from stdin when omitted)
    Add {
        name: String,
        data: Option<String>,
    },

    /// Replace the body of a note
    Edit { index: usize, data: String },

    /// List notes, or show one in full
    #[command(alias = "v")]
    View { index: Option<usize> },

    /// Delete a note
    #[command(alias = "rm")]
    Delete { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum QuestionAction {
    /// Add a question and its answer
    Add { question: String, answer: String },

    /// List questions, or show one in full
    #[command(alias = "v")]
    View { index: Option<usize> },

    /// Delete a question
    #[command(alias = "rm")]
    Delete { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum LinkAction {
    /// Add a link, e.g. `add "Lecture" Monday 10:00 https://zoom.us/j/1`
    Add {
        description: String,
        /// Day of the week
        day: String,
        /// Start time as HH:MM
        time: String,
        url: String,
    },

    /// List links, or show one in full
    #[command(alias = "v")]
    View { index: Option<usize> },

    /// Delete a link
    #[command(alias = "rm")]
    Delete { index: usize },
}
