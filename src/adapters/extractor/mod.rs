//! Slot Extractor Adapters
//!
//! Implementations of the SlotExtractor port.
//!
//! - `KeywordSlotExtractor` - Regex and vocabulary rules (default)
//! - `OpenAISlotExtractor` - OpenAI chat completions in JSON mode
//! - `MockSlotExtractor` - Scripted results for tests

mod keyword_extractor;
mod mock_extractor;
mod openai_extractor;

pub use keyword_extractor::{KeywordSlotExtractor, DEFAULT_BRANDS};
pub use mock_extractor::MockSlotExtractor;
pub use openai_extractor::{OpenAIExtractorConfig, OpenAISlotExtractor};
