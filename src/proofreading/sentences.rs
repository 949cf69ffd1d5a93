/*!
 * Naive sentence counting.
 *
 * A sentence is whatever lies between two `.` characters once trimmed. This is a
 * heuristic: abbreviations ("e.g."), decimal numbers ("3.14") and ellipses all
 * count as boundaries, and `?`/`!` do not. Callers replace line breaks with
 * spaces before counting.
 */

/// Count the non-empty, trimmed pieces of `text` split on `.`
pub fn count_sentences(text: &str) -> usize {
    text.split('.')
        .filter(|piece| !piece.trim().is_empty())
        .count()
}
