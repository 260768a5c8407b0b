use std::process::ExitCode;
use tracing::error;

use cotacao_relay::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    cotacao_relay::logging::init_tracing(&cfg.loglevel);

    match cotacao_relay::client::run(&cfg).await {
        Ok(outcome) => {
            println!("{}", outcome.confirmation());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(server_url = %cfg.server_url, error = %e, "relay client failed");
            ExitCode::FAILURE
        }
    }
}
