//! Tests for completions and man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::CommandFactory;
use clap_complete::Shell;

#[test]
fn cli_parse_completions() {
    match parse(&["imglocal", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    match parse(&["imglocal", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn man_page_renders() {
    let mut out = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut out).unwrap();
    let page = String::from_utf8(out).unwrap();
    assert!(page.contains("imglocal"));
}
