//! Tager CLI
//!
//! Organize files with a graph of tags:
//! - Tags hold files and child tags (an acyclic graph)
//! - Queries follow child tags recursively and intersect file sets
//! - `mount` materializes a tag as a directory of symlinks
//!
//! The whole graph is one JSON snapshot, read at start and written back by
//! every mutating command.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tager_graph::CURRENT_ALIAS;
use tager_storage::StorageConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod maintenance;
mod mount;
mod output;
mod paths;
mod session;

use maintenance::Scope;
use session::Session;

/// Log filter environment variable (`tracing_subscriber::EnvFilter` syntax).
const LOG_ENV: &str = "TAGER_LOG";

#[derive(Parser)]
#[command(name = "tager")]
#[command(author, version, about = "Tager: organize files with a graph of tags")]
struct Cli {
    /// Snapshot file (default: $TAGER_CONFIG, then ~/.tager/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tags
    Create {
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Delete tags. Edges pointing at them stay until `autoremove tag`.
    Delete {
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// List every tag (`*` marks the current one)
    Ls,

    /// Show tags, files and comments
    Show {
        /// Follow child tags recursively
        #[arg(short, long, global = true)]
        recursive: bool,

        #[command(subcommand)]
        command: ShowCommands,
    },

    /// Add child tags, files or a comment to a tag
    Add {
        #[command(subcommand)]
        command: AddCommands,
    },

    /// Remove child tags or files from a tag
    Remove {
        #[command(subcommand)]
        command: RemoveCommands,
    },

    /// Remove edges to deleted tags or missing files
    Autoremove {
        #[command(subcommand)]
        command: AutoremoveCommands,
    },

    /// Change the current tag (`.`)
    Ch { tag: String },

    /// Create a `tager-<TAG>` directory of symlinks to the tag's files
    Mount {
        /// One nested directory per reachable tag
        #[arg(short, long)]
        recursive: bool,

        tag: String,

        /// Directory the mount is created in
        #[arg(long, default_value = ".")]
        into: PathBuf,
    },

    /// Current tag and dangling-edge overview, or the dangling edges of TAG
    Info { tag: Option<String> },
}

#[derive(Subcommand)]
enum ShowCommands {
    /// Child tags
    #[command(alias = "tags")]
    Tag {
        #[arg(default_value = CURRENT_ALIAS)]
        tag: String,
    },

    /// Files; several tags list only the files they all share
    #[command(alias = "files")]
    File {
        #[arg(default_value = CURRENT_ALIAS)]
        tags: Vec<String>,
    },

    /// The tag's comment
    Comment {
        #[arg(default_value = CURRENT_ALIAS)]
        tag: String,
    },

    /// Comment, child tags and files
    All {
        #[arg(default_value = CURRENT_ALIAS)]
        tag: String,
    },
}

#[derive(Subcommand)]
enum AddCommands {
    /// Link child tags under TAG
    #[command(alias = "tags")]
    Tag {
        tag: String,
        #[arg(required = true)]
        children: Vec<String>,
    },

    /// Attach files (glob patterns) to TAG
    #[command(alias = "files")]
    File {
        /// Also match the patterns in every subdirectory
        #[arg(short, long)]
        recursive: bool,

        tag: String,
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Set TAG's comment (the words are joined with spaces)
    Comment {
        tag: String,
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RemoveCommands {
    /// Unlink child tags from TAG
    #[command(alias = "tags")]
    Tag {
        tag: String,
        #[arg(required = true)]
        children: Vec<String>,
    },

    /// Detach files from TAG (the files need not exist)
    #[command(alias = "files")]
    File {
        tag: String,
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum AutoremoveCommands {
    /// Child-tag edges naming deleted tags
    #[command(alias = "tags")]
    Tag { tags: Vec<String> },

    /// File edges whose path no longer exists
    #[command(alias = "files")]
    File { tags: Vec<String> },

    /// Both
    All { tags: Vec<String> },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = StorageConfig::resolve(cli.config)?;
    let mut session = Session::open(config)?;

    match cli.command {
        Commands::Create { tags } => commands::create(&mut session, &tags)?,
        Commands::Delete { tags } => commands::delete(&mut session, &tags)?,
        Commands::Ls => commands::list(&session.store),
        Commands::Show { recursive, command } => match command {
            ShowCommands::Tag { tag } => commands::show_tags(&session.store, &tag, recursive)?,
            ShowCommands::File { tags } => {
                commands::show_files(&session.store, &tags, recursive)?
            }
            ShowCommands::Comment { tag } => commands::show_comment(&session.store, &tag)?,
            ShowCommands::All { tag } => commands::show_all(&session.store, &tag, recursive)?,
        },
        Commands::Add { command } => match command {
            AddCommands::Tag { tag, children } => {
                commands::add_tags(&mut session, &tag, &children)?
            }
            AddCommands::File {
                recursive,
                tag,
                patterns,
            } => commands::add_files(&mut session, &tag, &patterns, recursive)?,
            AddCommands::Comment { tag, words } => {
                commands::set_comment(&mut session, &tag, &words)?
            }
        },
        Commands::Remove { command } => match command {
            RemoveCommands::Tag { tag, children } => {
                commands::remove_tags(&mut session, &tag, &children)?
            }
            RemoveCommands::File { tag, paths } => {
                commands::remove_files(&mut session, &tag, &paths)?
            }
        },
        Commands::Autoremove { command } => {
            let (scope, tags) = match command {
                AutoremoveCommands::Tag { tags } => (Scope::Tags, tags),
                AutoremoveCommands::File { tags } => (Scope::Files, tags),
                AutoremoveCommands::All { tags } => (Scope::All, tags),
            };
            maintenance::autoremove(&mut session, scope, &tags)?
        }
        Commands::Ch { tag } => commands::change_current(&mut session, &tag)?,
        Commands::Mount {
            recursive,
            tag,
            into,
        } => {
            let summary = mount::mount(&session.store, &tag, recursive, &into)?;
            output::done(
                "mounted",
                format_args!(
                    "{} ({} directories, {} links)",
                    summary.root.display(),
                    summary.directories,
                    summary.links
                ),
            );
        }
        Commands::Info { tag } => maintenance::info(&session.store, tag.as_deref())?,
    }

    Ok(())
}
