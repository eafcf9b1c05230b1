//! Core library entry for the `cronwrap` CLI.

pub mod adapters;
pub mod cli;
pub mod duration;
pub mod job;
pub mod ports;
pub mod report;

use clap::error::ErrorKind;
use clap::Parser;

use adapters::live::notifier::LiveNotifier;

/// Run the wrapper with the provided arguments, returning the exit byte.
///
/// The returned value mirrors the wrapped command's exit status the way a
/// shell reports it, so an outer scheduler observes the child's result
/// through the wrapper. Help and version requests print and return `0`.
///
/// # Errors
///
/// Returns an error string when argument parsing or configuration
/// validation fails. Nothing has been launched at that point.
pub fn run<I, T>(args: I) -> Result<u8, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(0);
        }
        Err(err) => return Err(err.to_string()),
    };

    let config = cli.into_config()?;
    let outcome = job::run(&config);
    report::deliver(&config, &outcome, &LiveNotifier::from_env());
    Ok(exit_byte(outcome.exit_code))
}

/// Truncates an exit code to the byte a shell would report.
fn exit_byte(code: i32) -> u8 {
    u8::try_from(code & 0xff).unwrap_or(u8::MAX)
}
