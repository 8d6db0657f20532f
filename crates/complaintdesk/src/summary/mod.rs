//! Staff-facing complaint summaries.
//!
//! Summary generation is an external, possibly slow collaborator. It never
//! fails with an error: every failure is reported as explanatory text that
//! the dashboard shows as-is.

use async_trait::async_trait;

use crate::complaint::Complaint;

pub mod gemini;
pub mod markdown;
pub mod prompt;

pub use gemini::{GeminiSummarizer, SummaryError};
pub use markdown::format_summary;

/// Shown when no API key could be resolved.
pub const KEY_NOT_CONFIGURED: &str = "API key is not configured.";

/// Shown when the model answered without any text.
pub const EMPTY_RESPONSE: &str =
    "Could not generate a summary. The model returned an empty response.";

/// Wraps an underlying failure into the text shown to staff.
pub fn failure_text(reason: &str) -> String {
    format!(
        "An error occurred while generating the summary: {}. Make sure your API key is valid and has the Gemini API enabled.",
        reason
    )
}

/// Produces a Markdown summary for a complaint: the issue in brief, a
/// priority level and recommended actions.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate_summary(&self, complaint: &Complaint) -> String;
}
