// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use dotstrap::{AppendOutcome, Installer, LinkOutcome};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{io, path::PathBuf, process::exit};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "dotstrap [options] <dotstrap-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<()> {
        match self.command {
            Command::Symlink(opts) => run_symlink(opts),
            Command::Append(opts) => run_append(opts),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Link existing file to new location, asking before any overwrite.
    #[command(override_usage = "dotstrap symlink <existing> <new>")]
    Symlink(SymlinkOptions),

    /// Append content to file unless it already contains it.
    #[command(override_usage = "dotstrap append <file> <content>")]
    Append(AppendOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct SymlinkOptions {
    /// Path to link to, usually inside the dotfiles repository.
    #[arg(required = true, value_name = "existing")]
    pub existing: PathBuf,

    /// Path to place link at, usually inside the home directory.
    #[arg(required = true, value_name = "new")]
    pub new: PathBuf,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct AppendOptions {
    /// Path to file to append to.
    #[arg(required = true, value_name = "file")]
    pub file: PathBuf,

    /// Content to append.
    #[arg(required = true, value_name = "content")]
    pub content: String,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn run_symlink(opts: SymlinkOptions) -> Result<()> {
    let mut installer = Installer::from_stdio(io::stdin(), io::stdout());
    if installer.symlink(&opts.existing, &opts.new)? == LinkOutcome::Unchanged {
        info!("{:?} already linked", opts.new.display());
    }

    Ok(())
}

fn run_append(opts: AppendOptions) -> Result<()> {
    if dotstrap::install::append(&opts.file, &opts.content)? == AppendOutcome::AlreadyPresent {
        info!("{:?} already up to date", opts.file.display());
    }

    Ok(())
}
