/*!
 * Proofreading pipeline for LaTeX-flavored documents.
 *
 * This module contains the segmentation, correction and reassembly logic.
 * It is split into several submodules:
 *
 * - `segmenter`: figure/table environments vs. prose
 * - `paragraphs`: paragraph splitting with exact separators
 * - `sentences`: naive sentence counting
 * - `policy`: qualification and correction context
 * - `prompts`: the correction prompt template
 * - `corrector`: the correction client and its outcome type
 * - `registry`: correctors selectable by provider name
 * - `pipeline`: orchestration and reassembly
 * - `changes`: word-level change counting
 */

// Re-export main types for easier usage
pub use self::changes::count_word_changes;
pub use self::corrector::{CorrectionOutcome, CorrectionSettings, Corrector, EchoCorrector, LlmCorrector, ProviderClient};
pub use self::paragraphs::{split_paragraphs, ProseToken};
pub use self::pipeline::{PipelineStats, ProofreadOutcome, Proofreader};
pub use self::policy::{BlockDecision, ContextPolicy};
pub use self::prompts::CorrectionPrompt;
pub use self::registry::CorrectorRegistry;
pub use self::segmenter::{segment_environments, Segment};
pub use self::sentences::count_sentences;

// Submodules
pub mod changes;
pub mod corrector;
pub mod paragraphs;
pub mod pipeline;
pub mod policy;
pub mod prompts;
pub mod registry;
pub mod segmenter;
pub mod sentences;
