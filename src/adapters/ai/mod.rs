//! AI adapters - implementations of the IntentExtractor port.
//!
//! `GeminiExtractor` calls a Gemini-style chat completion endpoint over HTTP;
//! `MockIntentExtractor` replays scripted results for tests and offline runs.

mod gemini_extractor;
mod mock_extractor;
mod prompts;

pub use gemini_extractor::{GeminiConfig, GeminiExtractor};
pub use mock_extractor::{MockIntentExtractor, RecordedCall};
pub use prompts::build_system_prompt;
