//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    domain::{failed_attempts_after, should_attempt_reconnect},
    error::ClientError,
    session::run_client_session,
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
///
/// Returns once the user ends input, or with the last error once
/// reconnection attempts are exhausted.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let mut input_rx = spawn_input_reader(&username);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &username, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Session ended: {}", e);
                reconnect_count = failed_attempts_after(&e, reconnect_count);

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
