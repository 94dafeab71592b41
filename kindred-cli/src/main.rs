//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use kindred_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "errors are reported to the terminal before exiting"
)]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match kindred_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("kindred: {err}");
            std::process::exit(1);
        }
    }
}
