//! Simulated caption generation - used when no caption endpoint is
//! configured. Returns canned suggestions after a short artificial delay.

use std::time::Duration;

use async_trait::async_trait;

use crosspost_core::ports::{CaptionError, CaptionService};

/// Caption service that fabricates suggestions locally.
pub struct SimulatedCaptionService {
    delay: Duration,
}

impl SimulatedCaptionService {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }

    /// Override the artificial latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedCaptionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionService for SimulatedCaptionService {
    async fn generate(&self, topic: &str) -> Result<Vec<String>, CaptionError> {
        tokio::time::sleep(self.delay).await;

        Ok(vec![
            format!("This is a great simulated caption about {topic}! #awesome"),
            format!("Exploring {topic} today. What are your thoughts? #discussion"),
            format!("Here's a cool post about {topic}. Enjoy! #simulated"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generates_three_topic_captions() {
        let service = SimulatedCaptionService::with_delay(Duration::ZERO);

        let captions = service.generate("coffee").await.unwrap();

        assert_eq!(captions.len(), 3);
        assert!(captions.iter().all(|c| c.contains("coffee")));
    }
}
