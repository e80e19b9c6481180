use clap::Parser;
use std::process::ExitCode;
use subfetch_cli::{Cli, describe_error, init_logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("{}", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}
