//! CLI for imglocal.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use imglocal_core::config::{self, ImglocalConfig};
use std::path::PathBuf;

use commands::{run_completions, run_file, run_man, run_localize};

/// Top-level CLI for imglocal.
#[derive(Debug, Parser)]
#[command(name = "imglocal")]
#[command(
    about = "imglocal: download remote images referenced by HTML files and point the HTML at local copies",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by the commands that rewrite documents. Unset options
/// fall back to `~/.config/imglocal/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct LocalizeArgs {
    /// Images subdirectory name, next to the documents.
    #[arg(long, value_name = "NAME")]
    pub images: Option<String>,

    /// Backup subdirectory name, next to the documents.
    #[arg(long, value_name = "NAME")]
    pub backup: Option<String>,

    /// Per-image download timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not add layout styles to numbered slide documents (1.html, 2.html, ...).
    #[arg(long)]
    pub no_slide_styles: bool,

    /// Only rewrite <img src>, leave CSS url(...) references alone.
    #[arg(long)]
    pub no_css_urls: bool,
}

impl LocalizeArgs {
    /// Overlays the flags that were given on top of `cfg`.
    pub fn apply(&self, mut cfg: ImglocalConfig) -> ImglocalConfig {
        if let Some(images) = &self.images {
            cfg.images_dir = images.clone();
        }
        if let Some(backup) = &self.backup {
            cfg.backup_dir = backup.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        if self.no_slide_styles {
            cfg.slide_styles = false;
        }
        if self.no_css_urls {
            cfg.css_urls = false;
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Localize every .html/.htm file in a directory (not recursive).
    Run {
        /// Directory holding the HTML files.
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        args: LocalizeArgs,
    },

    /// Localize a single HTML file.
    File {
        /// Path to the HTML file.
        path: PathBuf,

        #[command(flatten)]
        args: LocalizeArgs,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run { dir, args } => {
                let cfg = load_config(&args)?;
                run_localize(&dir, &cfg)?;
            }
            CliCommand::File { path, args } => {
                let cfg = load_config(&args)?;
                run_file(&path, &cfg)?;
            }
            CliCommand::Completions { shell } => run_completions(shell, &mut Cli::command()),
            CliCommand::Man => run_man(Cli::command())?,
        }

        Ok(())
    }
}

fn load_config(args: &LocalizeArgs) -> Result<ImglocalConfig> {
    let cfg = args.apply(config::load_or_init()?);
    tracing::debug!("effective config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
