//! Command-line surface

use crate::config::AppConfig;
use crate::error::Result;
use crate::sync::SyncOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tunesync_core::{ExcludePatterns, FilterSet, RunContext, UploadOptions};
use tunesync_local::normalize_path;

#[derive(Debug, Parser)]
#[command(name = "tunesync", version)]
#[command(about = "Sync a local music collection with a cloud music library", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments of the default `up` command
    #[command(flatten)]
    pub up: UpArgs,
}

impl Cli {
    /// The command to run, `up` when none was named
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Up(self.up))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload local songs missing from the account (default)
    Up(UpArgs),
    /// Download account songs missing locally
    Down(DownArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Up(args) => &args.common,
            Command::Down(args) => &args.common,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct UpArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Files or directories to upload [default: current directory]
    pub input: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DownArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory or path template such as
    /// "~/Music/%artist%/%album%/%track2% - %title%"
    /// [default: suggested layout in the current directory]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Credential cache name to use or create
    #[arg(short, long, default_value = "oauth")]
    pub cred: String,

    /// Uploader id presented to the service, e.g. a MAC address
    #[arg(short = 'U', long)]
    pub uploader_id: Option<String>,

    /// Log HTTP client activity
    #[arg(short, long)]
    pub log: bool,

    /// Let the service match uploads against its catalog
    #[arg(short = 'm', long = "match")]
    pub enable_matching: bool,

    /// List what would be transferred without doing it
    #[arg(short, long)]
    pub dry_run: bool,

    /// Only print song lists and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Delete local files once they are uploaded
    #[arg(long)]
    pub delete_on_success: bool,

    /// Do not descend into directories (same as --max-depth 0)
    #[arg(short = 'R', long)]
    pub no_recursion: bool,

    /// Maximum directory depth when scanning local files
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Exclude local paths matching PATTERN (regex, repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Include songs matching a field:pattern FILTER (repeatable)
    #[arg(short = 'f', long, value_name = "FILTER")]
    pub include_filter: Vec<String>,

    /// Exclude songs matching a field:pattern FILTER (repeatable)
    #[arg(short = 'F', long, value_name = "FILTER")]
    pub exclude_filter: Vec<String>,

    /// Songs must match all include filters
    #[arg(short = 'a', long)]
    pub all_includes: bool,

    /// Songs must match all exclude filters to be excluded
    #[arg(short = 'A', long)]
    pub all_excludes: bool,

    /// Write playlists as M3U files into DIR (down)
    #[arg(short, long, value_name = "DIR")]
    pub playlists: Option<PathBuf>,

    /// Move local files removed from the account into DIR (down)
    #[arg(short, long, value_name = "DIR")]
    pub removed: Option<PathBuf>,

    /// Name of the favorites playlist
    #[arg(long, value_name = "NAME")]
    pub favorites: Option<String>,

    /// Service URL, overrides the configuration
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Configuration file [default: ./tunesync.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Effective scan depth, `None` for unlimited
    pub fn max_depth(&self) -> Option<usize> {
        if self.no_recursion {
            Some(0)
        } else {
            self.max_depth
        }
    }

    pub fn run_context(&self) -> RunContext {
        RunContext::new(self.dry_run, self.quiet)
    }

    /// Apply flags that override configuration values
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.server {
            config.server.url.clone_from(url);
        }
        if let Some(name) = &self.favorites {
            config.sync.favorites_name.clone_from(name);
        }
    }

    /// Build run options, failing on any malformed filter or pattern
    ///
    /// Relative directories are resolved against `cwd` and normalized.
    pub fn sync_options(&self, config: &AppConfig, cwd: &std::path::Path) -> Result<SyncOptions> {
        Ok(SyncOptions {
            exclude: ExcludePatterns::parse(&self.exclude)?,
            filters: FilterSet::parse(
                &self.include_filter,
                &self.exclude_filter,
                self.all_includes,
                self.all_excludes,
            )?,
            max_depth: self.max_depth(),
            upload: UploadOptions {
                uploader_id: self.uploader_id.clone(),
                enable_matching: self.enable_matching,
            },
            delete_on_success: self.delete_on_success,
            playlists_dir: self
                .playlists
                .as_ref()
                .map(|dir| normalize_path(&cwd.join(dir))),
            removed_dir: self
                .removed
                .as_ref()
                .map(|dir| normalize_path(&cwd.join(dir))),
            favorites_name: config.sync.favorites_name.clone(),
            audio_extension: config.sync.audio_extension.clone(),
        })
    }
}
