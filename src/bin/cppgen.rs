//! cppgen CLI
//!
//! `cppgen [-d] [-output <filename>] [-templatedir <path>] <filename>`

use cppgen::{parse_args, GenError, GeneratorConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        if e.is_usage() {
            eprint!("{}", e);
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), GenError> {
    let cli = parse_args(std::env::args_os())?;
    let config = GeneratorConfig::load_from(cli.config.as_deref())?;
    let options = cli.into_options(config)?;

    cppgen::run(&options)
}
