//! Replay entry point (native).

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match zoompan_replay::run(std::env::args()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Replay failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
