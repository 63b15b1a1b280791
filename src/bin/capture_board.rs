use std::process::ExitCode;

use pagecapture::{capture_board, init_logging, CaptureSettings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    match capture_board(&CaptureSettings::default()).await {
        Ok(path) => {
            println!("Screenshot saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "board capture failed");
            ExitCode::FAILURE
        }
    }
}
