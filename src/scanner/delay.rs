use std::time::Duration;

use async_trait::async_trait;

/// Suspension point used for retry backoff and inter-address rate limiting
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

#[async_trait]
impl<T: Delay + ?Sized> Delay for &T {
    async fn wait(&self, duration: Duration) {
        (**self).wait(duration).await
    }
}

/// Wall-clock delay backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
