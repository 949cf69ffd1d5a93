/*!
 * # texproof - LaTeX-aware paragraph proofreading with LLMs
 *
 * A Rust library and web service that proofreads scientific documents written
 * in LaTeX, one paragraph at a time.
 *
 * ## Features
 *
 * - Leave `figure`, `figure*`, `table` and `table*` environments untouched
 * - Correct only real paragraphs (more than two sentences)
 * - Give the model the previous corrected paragraph as context
 * - Rebuild the document byte for byte outside the corrected paragraphs
 * - Report a word-level change count
 * - Correct through various AI providers:
 *   - OpenRouter and OpenAI (OpenAI-compatible API)
 *   - Anthropic API
 *   - Ollama (local LLM)
 *   - an offline mock
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `proofreading`: Segmentation, correction and reassembly pipeline:
 *   - `proofreading::segmenter`: Protected environments vs. prose
 *   - `proofreading::paragraphs`: Paragraph splitting
 *   - `proofreading::policy`: Qualification and correction context
 *   - `proofreading::corrector`: Correction client
 *   - `proofreading::pipeline`: Document reassembly
 *   - `proofreading::changes`: Change counting
 * - `providers`: Client implementations for various LLM providers
 * - `server`: HTTP boundary
 * - `errors`: Custom error types for the application
 * - `file_utils`: Proofreading files on disk for the `check` command
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod proofreading;
pub mod providers;
pub mod server;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ProofreadError, ProviderError};
pub use proofreading::{count_word_changes, Corrector, CorrectorRegistry, ProofreadOutcome, Proofreader};
pub use server::{ProofreadRequest, ProofreadResponse};
