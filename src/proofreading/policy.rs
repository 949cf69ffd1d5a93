/*!
 * Qualification and context policy.
 *
 * A content block qualifies for correction when it holds more than two
 * sentences. The policy also carries the correction context: the text of the
 * most recent qualifying block after correction. Blocks that do not qualify
 * never become context, even though they stay in the document.
 */

use log::warn;

use super::corrector::CorrectionOutcome;
use super::sentences::count_sentences;

/// A block needs strictly more sentences than this to qualify
pub const MIN_SENTENCES_EXCLUSIVE: usize = 2;

/// What to do with one content block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDecision {
    /// Empty or whitespace-only
    Blank,
    /// Too few sentences to be a paragraph
    TooShort { sentences: usize },
    /// Send for correction
    Qualifies { sentences: usize },
}

/// Per-document qualification state
#[derive(Debug, Default)]
pub struct ContextPolicy {
    context: String,
}

impl ContextPolicy {
    /// Start a document with empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `block` qualifies for correction
    pub fn classify(&self, block: &str) -> BlockDecision {
        if block.trim().is_empty() {
            return BlockDecision::Blank;
        }

        let sentences = count_sentences(&block.replace('\n', " "));
        if sentences > MIN_SENTENCES_EXCLUSIVE {
            BlockDecision::Qualifies { sentences }
        } else {
            BlockDecision::TooShort { sentences }
        }
    }

    /// The previous paragraph to send with the next correction
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Turn a correction outcome into the text that goes into the document.
    ///
    /// A failed correction keeps `original` unchanged.
    pub fn resolve(&self, original: &str, outcome: CorrectionOutcome) -> String {
        match outcome {
            CorrectionOutcome::Corrected(text) => text,
            CorrectionOutcome::Failed { reason } => {
                warn!("Correction failed, keeping original paragraph: {}", reason);
                original.to_string()
            }
        }
    }

    /// Make `text` the context for the next qualifying block
    pub fn record_correction(&mut self, text: &str) {
        self.context.clear();
        self.context.push_str(text);
    }
}
