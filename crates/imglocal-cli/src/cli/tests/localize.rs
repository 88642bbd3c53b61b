//! Tests for run and file subcommands and their shared options.

use super::{parse, try_parse};
use crate::cli::{CliCommand, LocalizeArgs};
use imglocal_core::config::ImglocalConfig;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["imglocal", "run"]) {
        CliCommand::Run { dir, args } => {
            assert_eq!(dir, Path::new("."));
            assert_eq!(args, LocalizeArgs::default());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_options() {
    match parse(&[
        "imglocal",
        "run",
        "--dir",
        "/srv/slides",
        "--images",
        "img",
        "--backup",
        "bak",
        "--timeout",
        "5",
        "--no-slide-styles",
        "--no-css-urls",
    ]) {
        CliCommand::Run { dir, args } => {
            assert_eq!(dir, Path::new("/srv/slides"));
            assert_eq!(args.images.as_deref(), Some("img"));
            assert_eq!(args.backup.as_deref(), Some("bak"));
            assert_eq!(args.timeout, Some(5));
            assert!(args.no_slide_styles);
            assert!(args.no_css_urls);
        }
        _ => panic!("expected Run with options"),
    }
}

#[test]
fn cli_parse_file() {
    match parse(&["imglocal", "file", "deck/1.html", "--images", "assets"]) {
        CliCommand::File { path, args } => {
            assert_eq!(path, Path::new("deck/1.html"));
            assert_eq!(args.images.as_deref(), Some("assets"));
        }
        _ => panic!("expected File"),
    }
}

#[test]
fn cli_parse_file_requires_path() {
    assert!(try_parse(&["imglocal", "file"]).is_err());
}

#[test]
fn cli_parse_rejects_bad_timeout() {
    assert!(try_parse(&["imglocal", "run", "--timeout", "soon"]).is_err());
}

#[test]
fn args_override_config() {
    let args = LocalizeArgs {
        images: Some("img".to_string()),
        timeout: Some(3),
        no_css_urls: true,
        ..LocalizeArgs::default()
    };
    let cfg = args.apply(ImglocalConfig::default());
    assert_eq!(cfg.images_dir, "img");
    assert_eq!(cfg.backup_dir, "_old");
    assert_eq!(cfg.timeout_secs, 3);
    assert!(cfg.slide_styles);
    assert!(!cfg.css_urls);
}

#[test]
fn empty_args_keep_config() {
    let cfg = ImglocalConfig {
        images_dir: "pics".to_string(),
        slide_styles: false,
        ..ImglocalConfig::default()
    };
    assert_eq!(LocalizeArgs::default().apply(cfg.clone()), cfg);
}
