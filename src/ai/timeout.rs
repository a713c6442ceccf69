//! Per-call timeout helper
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let text = with_timeout(
//!     Duration::from_secs(60),
//!     provider.generate(&prompt, 0.3),
//!     "file analysis",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{GeniusError, Result};

/// Execute an async operation with a timeout.
///
/// On expiry the inner future is dropped and [`GeniusError::Timeout`] is returned.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(GeniusError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, GeniusError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, GeniusError>(42)
            },
            "slow operation",
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, GeniusError::Timeout { .. }));
        assert!(err.to_string().contains("slow operation"));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_inner_error() {
        let result: Result<()> = with_timeout(
            Duration::from_secs(1),
            async { Err(GeniusError::Config("bad".into())) },
            "failing operation",
        )
        .await;
        assert!(matches!(result, Err(GeniusError::Config(_))));
    }
}
