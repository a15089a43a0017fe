use tokio::time::{interval, Duration};

use crate::repositories::user::UserRepository;

/// Periodically wipes reset token hashes whose validity window has passed.
pub async fn start_reset_token_sweeper<R: UserRepository>(repo: R) {
    let mut interval = interval(Duration::from_secs(60 * 60));

    loop {
        interval.tick().await;

        match repo.clear_expired_reset_tokens().await {
            Ok(0) => tracing::debug!("No expired reset tokens to clear"),
            Ok(count) => tracing::info!("Cleared {} expired reset tokens", count),
            Err(e) => tracing::error!("Reset token sweep failed: {}", e)
        }
    }
}
