use clap::Parser;

use crisis_app::args::Cli;
use crisis_app::error::ExitCode;
use crisis_app::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format.into(), cli.verbose);

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted.");
            std::process::exit(ExitCode::INTERRUPTED);
        }
    });

    match crisis_app::run(cli).await {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
