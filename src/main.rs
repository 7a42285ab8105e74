//! filterfs - Entry Point
//!
//! Prints every visible path below a directory, with hidden paths taken from
//! configuration.
//!
//! Usage: `filterfs [--config <file>] [root]`. Without a root argument the
//! configured `root` is used.

use std::io::{self, Write};
use std::process;

use log::info;

use filterfs::config::FilterConfig;
use filterfs::error::FilterError;
use filterfs::error::handlers::{error_to_exit_code, handle_error};
use filterfs::exclude_by_paths;
use filterfs::storage::{DirFs, walk};
use filterfs::utils::logging::setup_logging;

const USAGE: &str = "filterfs [--config <file>] [root]";

fn main() {
    setup_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        handle_error(&e);
        process::exit(error_to_exit_code(&e));
    }
}

/// Command line arguments
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<String>,
    root: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args, FilterError> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => match iter.next() {
                Some(file) if parsed.config.is_none() => parsed.config = Some(file.clone()),
                _ => return Err(FilterError::Usage(USAGE.into())),
            },
            _ if parsed.root.is_none() && !arg.starts_with('-') => {
                parsed.root = Some(arg.clone())
            }
            _ => return Err(FilterError::Usage(USAGE.into())),
        }
    }
    Ok(parsed)
}

fn run(args: &[String]) -> Result<(), FilterError> {
    let args = parse_args(args)?;
    let config = FilterConfig::load(args.config.as_deref())?;
    let root = args
        .root
        .or_else(|| config.root.clone())
        .ok_or_else(|| FilterError::Usage(USAGE.into()))?;

    info!(
        "Listing {} with {} hidden paths",
        root,
        config.hidden_paths.len()
    );

    let fsys = exclude_by_paths(DirFs::new(&root), &config.hidden_paths)?;
    let mut out = io::stdout().lock();
    for path in walk(&fsys, ".")? {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_root_only() {
        assert_eq!(
            parse_args(&args(&["/srv"])).unwrap(),
            Args {
                config: None,
                root: Some("/srv".into())
            }
        );
    }

    #[test]
    fn test_parse_config_without_root() {
        assert_eq!(
            parse_args(&args(&["--config", "hide.toml"])).unwrap(),
            Args {
                config: Some("hide.toml".into()),
                root: None
            }
        );
    }

    #[test]
    fn test_parse_config_and_root_in_any_order() {
        let expected = Args {
            config: Some("hide.toml".into()),
            root: Some("/srv".into()),
        };
        assert_eq!(
            parse_args(&args(&["/srv", "-c", "hide.toml"])).unwrap(),
            expected
        );
        assert_eq!(
            parse_args(&args(&["--config", "hide.toml", "/srv"])).unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }
}
