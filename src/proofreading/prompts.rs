/*!
 * Prompt template for paragraph correction.
 *
 * The model sees the previous paragraph (P1) for context and is asked to
 * correct the current paragraph (P2) only.
 */

/// Renders the fixed correction instruction
#[derive(Debug, Clone)]
pub struct CorrectionPrompt {
    /// The instruction block placed before the two paragraphs
    instructions: String,
}

impl CorrectionPrompt {
    /// The default instructions for LaTeX scientific proofreading.
    pub const LATEX_PROOFREADER: &'static str = r#"You are a professional proofreader and editor for LaTeX scientific writing.

You will be given two paragraphs:
- P1 (previous paragraph): may be empty
- P2 (current paragraph): this is the ONLY paragraph you must correct

Instructions:
1. Correct grammar and improve flow in P2 ONLY. Do not change P1.
2. Preserve meaning and tone. Maintain sentence count when possible.
3. Do not modify any LaTeX commands or math (e.g., \cite, \ref, \begin, \end, $...$, \textbf{...}).
4. Return ONLY the corrected P2 content, with no extra commentary.
5. If no corrections are needed, return P2 exactly as provided."#;

    /// Placeholder shown when there is no previous paragraph
    pub const EMPTY_CONTEXT: &'static str = "(empty)";

    /// Create a prompt with custom instructions.
    pub fn new(instructions: &str) -> Self {
        Self {
            instructions: instructions.to_string(),
        }
    }

    /// Create the default LaTeX proofreading prompt.
    pub fn latex_proofreader() -> Self {
        Self::new(Self::LATEX_PROOFREADER)
    }

    /// Render the full prompt for one correction call.
    ///
    /// Both paragraphs are trimmed before being embedded.
    pub fn render(&self, previous_paragraph: &str, current_paragraph: &str) -> String {
        let previous = previous_paragraph.trim();
        let previous = if previous.is_empty() { Self::EMPTY_CONTEXT } else { previous };

        format!(
            "{}\n\nP1 (previous paragraph):\n{}\n\nP2 (current paragraph to correct):\n{}\n\nCorrected P2:",
            self.instructions,
            previous,
            current_paragraph.trim(),
        )
    }
}

impl Default for CorrectionPrompt {
    fn default() -> Self {
        Self::latex_proofreader()
    }
}
