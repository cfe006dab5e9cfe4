//! `catrs` - concatenate files and print on the standard output.

mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use catrs::CatError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::Args::parse();
    log::debug!("arguments: {args:?}");

    match cli::run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let broken_pipe = err
                .downcast_ref::<CatError>()
                .and_then(CatError::io_error)
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe);

            if broken_pipe {
                log::debug!("output closed: {err}");
            } else {
                eprintln!("catrs: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
