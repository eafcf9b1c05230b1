//! Binary entrypoint for the `cronwrap` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match cronwrap::run(std::env::args()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
