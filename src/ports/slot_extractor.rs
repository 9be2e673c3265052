//! Slot Extractor Port - Recovers filter criteria from free text.
//!
//! Extraction is best effort. Callers treat every error as "nothing
//! recognized" and fall back to the structured prompt.

use async_trait::async_trait;

use crate::domain::browse::ExtractedSlots;

/// Errors that can occur during slot extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotExtractionError {
    #[error("Extractor unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unparseable extractor response: {0}")]
    InvalidResponse(String),
}

/// Port for natural-language slot extraction
#[async_trait]
pub trait SlotExtractor: Send + Sync {
    /// Extracts brand, body type and budget range from one utterance.
    ///
    /// An utterance naming none of them yields empty slots, not an error.
    async fn extract(&self, text: &str) -> Result<ExtractedSlots, SlotExtractionError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
