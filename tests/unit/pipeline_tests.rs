/*!
 * Tests for the proofreading pipeline: reconstruction, protection,
 * qualification and context chaining
 */

use std::sync::Arc;

use texproof::proofreading::{segment_environments, split_paragraphs, ProseToken, Proofreader, Segment};

use crate::common::mock_correctors::RecordingCorrector;
use crate::common::{init_logging, SAMPLE_DOCUMENT};

const P1: &str = "First paragraph. It has three. Sentences here.";
const P2: &str = "Second paragraph. Also three. Sentences again.";
const P3: &str = "Third paragraph. Three more. Final sentences.";

fn proofreader(corrector: &Arc<RecordingCorrector>) -> Proofreader {
    Proofreader::new(corrector.clone())
}

#[tokio::test]
async fn test_proofread_withEmptyInput_shouldReturnEmpty() {
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread("").await;

    assert_eq!(outcome.final_text, "");
    assert_eq!(outcome.total_changes, 0);
    assert_eq!(corrector.call_count(), 0);
}

#[tokio::test]
async fn test_proofread_withoutQualifyingParagraphs_shouldReturnInputExactly() {
    let text = "\\section{Intro}\n\nOne sentence.\n  \n\nTwo. Sentences.\n\n\n";
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread(text).await;

    assert_eq!(outcome.final_text, text);
    assert_eq!(outcome.total_changes, 0);
    assert_eq!(corrector.call_count(), 0);
}

#[tokio::test]
async fn test_proofread_withFigureAfterParagraph_shouldKeepFigureByteIdentical() {
    init_logging();
    let figure = "\\begin{figure}\nshould not change.\n\\end{figure}";
    let text = format!("Intro para with four. Sentences here. Four. Five.\n\n{}", figure);
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread(&text).await;

    assert_eq!(
        outcome.final_text,
        format!("INTRO PARA WITH FOUR. SENTENCES HERE. FOUR. FIVE.\n\n{}", figure)
    );
    assert_eq!(outcome.total_changes, 8);
    assert_eq!(corrector.call_count(), 1);
}

#[tokio::test]
async fn test_proofread_withFailingCorrector_shouldStillKeepFigure() {
    let figure = "\\begin{figure}\nshould not change.\n\\end{figure}";
    let text = format!("Intro para with four. Sentences here. Four. Five.\n\n{}", figure);
    let corrector = Arc::new(RecordingCorrector::uppercase().failing_on(&[0]));
    let outcome = proofreader(&corrector).proofread(&text).await;

    assert_eq!(outcome.final_text, text);
    assert_eq!(outcome.total_changes, 0);
    assert_eq!(outcome.stats.failed_blocks, 1);
}

#[tokio::test]
async fn test_proofread_withProtectedEnvironments_shouldNeverSendTheirContent() {
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread(SAMPLE_DOCUMENT).await;

    let protected: Vec<&str> = segment_environments(SAMPLE_DOCUMENT)
        .into_iter()
        .filter(Segment::is_protected)
        .map(|segment| segment.content())
        .collect();
    assert_eq!(protected.len(), 2);

    let mut search_from = 0;
    for span in &protected {
        let found = outcome.final_text[search_from..].find(span)
            .unwrap_or_else(|| panic!("protected span missing from output: {}", span));
        search_from += found + span.len();
    }

    for (_, current) in corrector.calls() {
        assert!(!current.contains("\\begin{"));
        assert!(!current.contains("Results is shown"));
        assert!(!current.contains("Numbers."));
    }
}

#[tokio::test]
async fn test_proofread_withSampleDocument_shouldCorrectOnlyParagraphs() {
    let corrector = Arc::new(RecordingCorrector::echo());
    let outcome = proofreader(&corrector).proofread(SAMPLE_DOCUMENT).await;

    assert_eq!(outcome.final_text, SAMPLE_DOCUMENT);
    assert_eq!(outcome.stats.protected_segments, 2);
    assert_eq!(outcome.stats.qualifying_blocks, 2);
    assert_eq!(outcome.stats.corrected_blocks, 2);

    let calls = corrector.calls();
    assert!(calls[0].1.starts_with("Deep networks"));
    assert!(calls[1].1.starts_with("Our method"));
}

#[tokio::test]
async fn test_proofread_withOddSeparators_shouldPreserveEverySeparator() {
    let text = format!("{}\n \n\t\n{}\r\n\r\n{}\n\n\n\n", P1, P2, P3);
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread(&text).await;

    let separators: Vec<&str> = split_paragraphs(&text)
        .into_iter()
        .filter_map(|token| match token {
            ProseToken::Separator(separator) => Some(separator),
            ProseToken::Content(_) => None,
        })
        .collect();
    assert_eq!(separators, vec!["\n \n\t\n", "\n\r\n", "\n\n\n\n"]);

    // The "\r" before the second separator stays with the second paragraph
    let expected = format!(
        "{}\n \n\t\n{}\r\n\r\n{}\n\n\n\n",
        P1.to_uppercase(),
        P2.to_uppercase(),
        P3.to_uppercase()
    );
    assert_eq!(outcome.final_text, expected);
}

#[tokio::test]
async fn test_proofread_withTwoSentenceBlocks_shouldOnlySendLongerBlocks() {
    let text = "Only two. Sentences here.\n\nOne.\n\nWe compare e.g. two.\n\nNo period at all";
    let corrector = Arc::new(RecordingCorrector::uppercase());
    let outcome = proofreader(&corrector).proofread(text).await;

    // "e.g." splits into extra pieces, so the third block qualifies
    let calls = corrector.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "We compare e.g. two.");
    assert_eq!(outcome.stats.content_blocks, 4);
}

#[tokio::test]
async fn test_proofread_withThreeParagraphs_shouldChainCorrectedContext() {
    let text = format!("{}\n\n{}\n\n{}", P1, P2, P3);
    let corrector = Arc::new(RecordingCorrector::prefixing());
    let outcome = proofreader(&corrector).proofread(&text).await;

    let calls = corrector.calls();
    assert_eq!(calls, vec![
        (String::new(), P1.to_string()),
        (format!("[fixed] {}", P1), P2.to_string()),
        (format!("[fixed] {}", P2), P3.to_string()),
    ]);
    assert_eq!(outcome.total_changes, 3);
}

#[tokio::test]
async fn test_proofread_withShortBlockBetween_shouldNotUpdateContext() {
    let text = format!("{}\n\nA short remark.\n\n{}", P1, P3);
    let corrector = Arc::new(RecordingCorrector::prefixing());
    proofreader(&corrector).proofread(&text).await;

    let calls = corrector.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, format!("[fixed] {}", P1));
}

#[tokio::test]
async fn test_proofread_withFigureBetween_shouldCarryContextAcrossSegments() {
    let text = format!("{}\n\\begin{{table}}\nA. B. C.\n\\end{{table}}\n{}", P1, P2);
    let corrector = Arc::new(RecordingCorrector::prefixing());
    proofreader(&corrector).proofread(&text).await;

    let calls = corrector.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, format!("{}\n", P1));
    assert_eq!(calls[1], (format!("[fixed] {}\n", P1), format!("\n{}", P2)));
}

#[tokio::test]
async fn test_proofread_withFailureInMiddle_shouldKeepOriginalAndContinue() {
    let text = format!("{}\n\n{}\n\n{}", P1, P2, P3);
    let corrector = Arc::new(RecordingCorrector::prefixing().failing_on(&[1]));
    let outcome = proofreader(&corrector).proofread(&text).await;

    assert_eq!(
        outcome.final_text,
        format!("[fixed] {}\n\n{}\n\n[fixed] {}", P1, P2, P3)
    );

    let calls = corrector.calls();
    assert_eq!(calls.len(), 3);
    // The failed paragraph went into the document as-is, so it is the next context
    assert_eq!(calls[2].0, P2);
    assert_eq!(outcome.stats.corrected_blocks, 2);
    assert_eq!(outcome.stats.failed_blocks, 1);
}

#[tokio::test]
async fn test_proofread_withSingleWordFix_shouldCountOneChange() {
    let text = "The cat sat. It was warm. It slept.";
    let corrector = Arc::new(RecordingCorrector::new(|text| text.replace("sat", "sits")));
    let outcome = proofreader(&corrector).proofread(text).await;

    assert_eq!(outcome.final_text, "The cat sits. It was warm. It slept.");
    assert_eq!(outcome.total_changes, 1);
}
