/*!
 * Document reassembly.
 *
 * `Proofreader` walks the document once: protected environments are copied,
 * prose is split into paragraphs, qualifying paragraphs are corrected in order
 * with the previous corrected paragraph as context, and everything is joined
 * back together. Paragraphs are corrected strictly one after another because
 * each call needs the output of the previous one.
 */

use log::{debug, info};
use std::sync::Arc;

use super::changes::count_word_changes;
use super::corrector::Corrector;
use super::paragraphs::{split_paragraphs, ProseToken};
use super::policy::{BlockDecision, ContextPolicy};
use super::segmenter::{segment_environments, Segment};

/// Counters collected while processing one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Protected environments copied verbatim
    pub protected_segments: usize,
    /// Prose segments split into paragraphs
    pub prose_segments: usize,
    /// Non-blank content blocks seen
    pub content_blocks: usize,
    /// Blocks sent to the corrector
    pub qualifying_blocks: usize,
    /// Blocks the corrector answered for
    pub corrected_blocks: usize,
    /// Blocks kept as-is after a failed correction
    pub failed_blocks: usize,
}

/// The rebuilt document and its change metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofreadOutcome {
    /// The document with qualifying paragraphs corrected
    pub final_text: String,
    /// Word-level changes between input and `final_text`
    pub total_changes: usize,
    /// Processing counters
    pub stats: PipelineStats,
}

/// Runs the segmentation, correction and reassembly pipeline
#[derive(Clone)]
pub struct Proofreader {
    corrector: Arc<dyn Corrector>,
}

impl Proofreader {
    /// Create a proofreader that sends paragraphs to `corrector`
    pub fn new(corrector: Arc<dyn Corrector>) -> Self {
        Self { corrector }
    }

    /// Correct `text` and count the word-level changes
    pub async fn proofread(&self, text: &str) -> ProofreadOutcome {
        let (final_text, stats) = self.rebuild(text).await;
        let total_changes = count_word_changes(text, &final_text);

        info!(
            "Proofread {} paragraph(s): {} corrected, {} kept after failure, {} word change(s)",
            stats.qualifying_blocks, stats.corrected_blocks, stats.failed_blocks, total_changes
        );

        ProofreadOutcome { final_text, total_changes, stats }
    }

    /// Rebuild `text` with every qualifying paragraph corrected
    pub async fn rebuild(&self, text: &str) -> (String, PipelineStats) {
        let mut policy = ContextPolicy::new();
        let mut stats = PipelineStats::default();
        let mut output = String::with_capacity(text.len());

        for segment in segment_environments(text) {
            match segment {
                Segment::Protected(content) => {
                    stats.protected_segments += 1;
                    output.push_str(content);
                }
                Segment::Prose(content) => {
                    stats.prose_segments += 1;
                    self.rebuild_prose(content, &mut policy, &mut stats, &mut output).await;
                }
            }
        }

        if stats.qualifying_blocks == 0 {
            debug_assert_eq!(output, text);
        }

        (output, stats)
    }

    async fn rebuild_prose(
        &self,
        prose: &str,
        policy: &mut ContextPolicy,
        stats: &mut PipelineStats,
        output: &mut String,
    ) {
        for token in split_paragraphs(prose) {
            let block = match token {
                ProseToken::Separator(separator) => {
                    output.push_str(separator);
                    continue;
                }
                ProseToken::Content(block) => block,
            };

            match policy.classify(block) {
                BlockDecision::Blank => output.push_str(block),
                BlockDecision::TooShort { sentences } => {
                    stats.content_blocks += 1;
                    debug!("Skipping block with {} sentence(s)", sentences);
                    output.push_str(block);
                }
                BlockDecision::Qualifies { sentences } => {
                    stats.content_blocks += 1;
                    stats.qualifying_blocks += 1;
                    debug!("Correcting paragraph with {} sentences", sentences);

                    let outcome = self.corrector.correct(policy.context(), block).await;
                    if outcome.is_corrected() {
                        stats.corrected_blocks += 1;
                    } else {
                        stats.failed_blocks += 1;
                    }

                    let corrected = policy.resolve(block, outcome);
                    output.push_str(&corrected);
                    policy.record_correction(&corrected);
                }
            }
        }
    }
}

impl std::fmt::Debug for Proofreader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proofreader").finish_non_exhaustive()
    }
}
