//! Ports - interfaces between the domain and the outside world.
//!
//! The conversation core consumes two external capabilities: natural-language
//! intent extraction (an LLM call) and the issue tracker's REST API. Both are
//! expressed as traits here so adapters can be swapped and tests can run
//! without the network.

mod intent_extractor;
mod tracker;

pub use intent_extractor::{Extraction, ExtractionContext, ExtractorError, IntentExtractor};
pub use tracker::{
    CreatedIssue, IssueDetails, IssueSummary, SearchResults, TrackerClient, TrackerError,
};
