use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verbum",
    about = "Verbum: read-only scripture corpus service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List the books of a version
    Books(BooksArgs),
    /// Count the chapters of a book
    Chapters(ChaptersArgs),
    /// Print one chapter
    Verses(VersesArgs),
    /// Find verses containing a phrase
    Search(SearchArgs),
    /// Print a random verse
    Random(RandomArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Where to read versions from and which one to query.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Version code, e.g. ARA or NVI
    #[arg(short = 't', long, default_value = "ARA")]
    pub translation: String,
    #[arg(long, default_value = "versoes")]
    pub data_dir: PathBuf,
}

#[derive(Args)]
pub struct BooksArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Show chapter counts instead of abbreviations and groups
    #[arg(long)]
    pub with_chapters: bool,
    /// Only print the number of books
    #[arg(long, conflicts_with = "with_chapters")]
    pub count: bool,
}

#[derive(Args)]
pub struct ChaptersArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    pub book: String,
}

#[derive(Args)]
pub struct VersesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    pub book: String,
    pub chapter: String,
}

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    pub theme: String,
}

#[derive(Args)]
pub struct RandomArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
