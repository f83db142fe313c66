//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{
    ArgAction, Parser,
    builder::{PossibleValuesParser, TypedValueParser},
};
use ctfdock_core::domain::UbuntuVersion;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "ctfdock",
    bin_name = "ctfdock",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Docker + xinetd deployment for a pwn challenge",
    long_about = "ctfdock copies a challenge binary and its flag into a fresh \
                  directory and writes the Dockerfile, docker-compose.yaml, \
                  ctf.xinetd, start.sh and build_image.sh needed to serve it.",
    after_help = "EXAMPLES:\n\
        \x20 ctfdock 20 -t ./pwn1 -d ./deploy\n\
        \x20 ctfdock 18 -t ./pwn2 -d ./deploy -p -l 2.27\n\
        \x20 ctfdock 16 -t ./pwn3 -d ./deploy --yes --dry-run",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Ubuntu release of the base image.
    #[arg(
        value_name = "PLATFORM_VERSION",
        value_parser = PossibleValuesParser::new(["16", "18", "20", "21"])
            .try_map(|raw| raw.parse::<UbuntuVersion>()),
        help = "Ubuntu release of the base image"
    )]
    pub platform: UbuntuVersion,

    /// Directory holding exactly the challenge binary and its flag file.
    #[arg(
        short = 't',
        long = "task-dir",
        value_name = "DIR",
        help = "Directory containing the task binary and flag file"
    )]
    pub task_dir: PathBuf,

    /// Parent directory; output goes to `<DIR>/<task-name>`.
    #[arg(
        short = 'd',
        long = "dest-dir",
        value_name = "DIR",
        help = "Directory the deployment folder is created in"
    )]
    pub dest_dir: PathBuf,

    /// Rewrite the binary's interpreter and libc at container start.
    ///
    /// Bare `-p` means true.
    #[arg(
        short = 'p',
        long = "patchelf",
        value_name = "BOOL",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = clap::value_parser!(bool),
        help = "Patch the binary against a bundled libc"
    )]
    pub patchelf: bool,

    /// Version suffix of `libc-<V>.so` / `ld-<V>.so` under `<toolkit>/libs`.
    #[arg(
        short = 'l',
        long = "libc-version",
        value_name = "VERSION",
        help = "libc version to patch against (with -p)"
    )]
    pub libc_version: Option<String>,

    /// Where `patchelf` and `libs/` live.
    #[arg(
        long = "toolkit-dir",
        value_name = "DIR",
        env = "CTFDOCK_TOOLKIT_DIR",
        help = "Directory holding patchelf and libs/"
    )]
    pub toolkit_dir: Option<PathBuf>,

    /// Replace an existing output directory without asking.
    #[arg(short = 'y', long = "yes", help = "Overwrite without prompting")]
    pub yes: bool,

    /// Validate and print the plan; touch nothing.
    #[arg(long = "dry-run", help = "Show what would be generated")]
    pub dry_run: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["ctfdock", "20", "-t", "task", "-d", "out"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn minimal_invocation() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.platform, UbuntuVersion::V20);
        assert_eq!(cli.task_dir, PathBuf::from("task"));
        assert_eq!(cli.dest_dir, PathBuf::from("out"));
        assert!(!cli.patchelf);
        assert!(cli.libc_version.is_none());
        assert!(!cli.yes);
        assert!(!cli.dry_run);
    }

    #[test]
    fn bare_patchelf_means_true() {
        assert!(parse(&["-p"]).unwrap().patchelf);
        assert!(parse(&["-p", "-l", "2.27"]).unwrap().patchelf);
    }

    #[test]
    fn patchelf_takes_literal_value() {
        assert!(parse(&["-p", "true"]).unwrap().patchelf);
        assert!(!parse(&["-p", "false"]).unwrap().patchelf);
        assert!(parse(&["-p", "maybe"]).is_err());
    }

    #[test]
    fn libc_version_is_kept_verbatim() {
        let cli = parse(&["-p", "-l", "2.31"]).unwrap();
        assert_eq!(cli.libc_version.as_deref(), Some("2.31"));
    }

    #[test]
    fn every_platform_maps_to_a_release() {
        for (raw, expected) in [
            ("16", UbuntuVersion::V16),
            ("18", UbuntuVersion::V18),
            ("20", UbuntuVersion::V20),
            ("21", UbuntuVersion::V21),
        ] {
            let cli = Cli::try_parse_from(["ctfdock", raw, "-t", "a", "-d", "b"]).unwrap();
            assert_eq!(cli.platform, expected);
        }
    }

    #[test]
    fn unsupported_platform_is_rejected() {
        let err = Cli::try_parse_from(["ctfdock", "22", "-t", "a", "-d", "b"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn missing_dest_dir_is_rejected() {
        let err = Cli::try_parse_from(["ctfdock", "20", "-t", "a"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn no_color_flag_sets_field() {
        assert!(parse(&["--no-color"]).unwrap().global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(parse(&["--quiet", "--verbose"]).is_err());
    }
}
