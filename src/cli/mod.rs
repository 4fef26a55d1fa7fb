//! Command-line surface: `dpr [config.properties] <bridge|tea|gateway> <args...>`.

pub mod dispatch;
pub mod types;

use clap::Parser;
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::Config;
use crate::process::ProcessorRunner;

pub use dispatch::dispatch;
pub use types::{Cli, Commands};

/// Exit status for validation failures and caught errors.
pub const EXIT_FAILURE: i32 = 1;

/// Parse `args` (program name first), stage and run. Returns the exit code.
///
/// Argument errors print clap's usage text and return [`EXIT_FAILURE`]
/// before anything touches the file system.
pub fn run<I, T>(args: I, runner: &dyn ProcessorRunner) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let (config_path, args) = split_config_arg(args);

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { EXIT_FAILURE } else { 0 };
        }
    };

    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e.into());
            return EXIT_FAILURE;
        }
    };

    match dispatch(cli, &config, runner) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            EXIT_FAILURE
        }
    }
}

/// Pull a leading `*.properties` token out of the argument list.
fn split_config_arg<I, T>(args: I) -> (Option<PathBuf>, Vec<OsString>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let is_config = args
        .get(1)
        .is_some_and(|arg| arg.to_string_lossy().ends_with(".properties"));
    let config_path = is_config.then(|| PathBuf::from(args.remove(1)));
    (config_path, args)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "Error:".red().bold());
}
