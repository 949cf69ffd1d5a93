/*!
 * Word-level change counting.
 *
 * Both texts are split on whitespace and aligned with a longest-common-subsequence
 * diff. Each maximal run of differences between two matching runs is charged:
 * - deleting `a` words and inserting `b` words (a replace) costs `max(a, b)`
 * - a pure deletion costs `a`, a pure insertion costs `b`
 *
 * This is a "number of changed words" heuristic, not Levenshtein distance:
 * replacing two words with three costs 3.
 */

use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Count changed words between `original` and `corrected`
pub fn count_word_changes(original: &str, corrected: &str) -> usize {
    let original_words: Vec<&str> = original.split_whitespace().collect();
    let corrected_words: Vec<&str> = corrected.split_whitespace().collect();

    let mut changes = 0;
    let mut deleted = 0;
    let mut inserted = 0;

    for op in capture_diff_slices(Algorithm::Myers, &original_words, &corrected_words) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                changes += run_cost(deleted, inserted);
                deleted = 0;
                inserted = 0;
            }
            DiffTag::Delete => deleted += old_range.len(),
            DiffTag::Insert => inserted += new_range.len(),
            DiffTag::Replace => {
                deleted += old_range.len();
                inserted += new_range.len();
            }
        }
    }

    changes + run_cost(deleted, inserted)
}

fn run_cost(deleted: usize, inserted: usize) -> usize {
    if deleted > 0 && inserted > 0 {
        deleted.max(inserted)
    } else {
        deleted + inserted
    }
}
