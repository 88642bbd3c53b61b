//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn try_parse(args: &[&str]) -> Result<CliCommand, clap::Error> {
    Cli::try_parse_from(args).map(|cli| cli.command)
}

pub(super) fn parse(args: &[&str]) -> CliCommand {
    try_parse(args).unwrap()
}

mod localize;
mod rest;
