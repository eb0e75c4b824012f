use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "attrquery", bin_name = "attrquery", version = get_version())]
#[command(about = "Explore catalog attributes and build search queries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Extra value file to load (may be repeated)
    #[arg(long = "values", value_name = "FILE", global = true)]
    pub values: Vec<PathBuf>,

    /// Config directory (defaults to ./.attrquery, then the user config dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List attribute kinds
    #[command(alias = "k")]
    Kinds,

    /// Show the registered values of one kind, or of every kind
    #[command(alias = "ls")]
    Values {
        /// Kind name (e.g. Instrument), case-insensitive
        kind: Option<String>,
    },

    /// Build the leaf for a registered value
    #[command(alias = "r")]
    Resolve {
        /// Kind name (e.g. Instrument), case-insensitive
        kind: String,

        /// Accessor name (e.g. aia)
        name: String,
    },

    /// Combine KIND=NAME terms into a query
    ///
    /// Terms of the same kind are OR-ed, different kinds are AND-ed.
    #[command(alias = "q")]
    Query {
        /// Terms such as Instrument=aia
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Print the query blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a time string to UTC
    #[command(alias = "t")]
    Time {
        /// Time string (e.g. "2012/03/04 05:06", "2012:124:21:08:12")
        input: String,
    },
}
