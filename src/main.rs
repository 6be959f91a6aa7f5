use std::process;

use clap::Parser;
use pythoc::{
    cli::Cli,
    driver::{self, errors::DriverError, runner::CancellationToken},
};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(error.exit_code());
        }
    };

    match driver::run(&config, &CancellationToken::new()) {
        Ok(Some(output)) => print!("{}", output.stdout),
        Ok(None) => {
            log::info!("wrote {}", driver::project::main_path(&config.runner).display());
        }
        Err(DriverError::Compile { rendered, .. }) => {
            eprint!("{}", rendered);
            process::exit(1);
        }
        Err(DriverError::RunFailed { code, stdout, stderr }) => {
            print!("{}", stdout);
            eprint!("{}", stderr);
            process::exit(code.unwrap_or(1));
        }
        Err(error) => {
            log::error!("{:?}", error);
            eprintln!("Error: {}", error);
            process::exit(error.exit_code());
        }
    }
}
