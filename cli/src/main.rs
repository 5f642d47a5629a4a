use std::process::ExitCode;

use bizdesk_cli::cli::Cli;
use bizdesk_cli::output::Output;
use bizdesk_cli::timing::init_tracing;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.timing);

    match bizdesk_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::stderr().error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
