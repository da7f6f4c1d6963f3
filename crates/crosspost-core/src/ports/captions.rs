use async_trait::async_trait;

/// Caption generation trait - abstraction over text-generation backends.
///
/// The engine never calls this itself; composers do, and surface failures
/// as error notifications. Generated captions reach the store only as
/// `content` text the user accepted.
#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Generate caption suggestions for a topic.
    async fn generate(&self, topic: &str) -> Result<Vec<String>, CaptionError>;
}

/// Caption generation errors.
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("Caption request failed: {0}")]
    Unavailable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}
