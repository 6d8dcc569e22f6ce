use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match car_damage::frameworks::server::run_with_config().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            ExitCode::FAILURE
        }
    }
}
