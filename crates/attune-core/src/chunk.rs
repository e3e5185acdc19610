//! Topic-aligned transcript chunking.
//!
//! An oversized transcript is split into bounded segments whose boundaries
//! fall on "topic markers" — therapist lines that end in a question mark —
//! so each chunk covers one conversational topic rather than an arbitrary
//! character range.
//!
//! Chunking is lossless: joining the returned chunks with `"\n"` rebuilds
//! the input exactly. Only the grouping changes; no content is dropped,
//! duplicated, or trimmed.
//!
//! A chunk closed at a topic marker may itself still exceed the token
//! threshold when a single topic runs long. That is an accepted limitation:
//! the chunker does not re-check or sub-split.

/// Speaker tag that attributes a line to the therapist (the questioner).
pub const TOPIC_SPEAKER_PREFIX: &str = "[Speaker:0]";

/// Returns true if `line` starts a new conversational topic.
///
/// A topic marker is a therapist-attributed line whose trailing-whitespace-
/// trimmed text ends with a question mark.
#[must_use]
pub fn is_topic_marker(line: &str) -> bool {
    line.starts_with(TOPIC_SPEAKER_PREFIX) && line.trim_end().ends_with('?')
}

/// Split `text` into topic-aligned chunks if it exceeds `max_tokens`.
///
/// - Under the threshold: returns the whole text as a single chunk,
///   unchanged — small transcripts pay no chunking overhead.
/// - Over the threshold: scans lines in order, closing the current chunk
///   after every topic-marker line. Trailing lines form a final chunk.
/// - No topic markers in an oversized text degrades to a single chunk;
///   the absence of markers is never an error.
#[must_use]
pub fn chunk_transcript(text: &str, token_count: u32, max_tokens: u32) -> Vec<String> {
    if token_count < max_tokens {
        return vec![text.to_owned()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        current.push(line);
        if is_topic_marker(line) {
            chunks.push(current.join("\n"));
            current.clear();
        }
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }
    chunks
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::estimate_tokens;
    use proptest::prelude::*;

    fn oversized(text: &str) -> Vec<String> {
        // Force the over-threshold path regardless of actual size.
        chunk_transcript(text, 100, 10)
    }

    // ── Threshold behavior ───────────────────────────────────────────────

    #[test]
    fn under_threshold_returns_single_chunk() {
        let text = "[Speaker:0] How are you?\n[Speaker:1] Fine.";
        let chunks = chunk_transcript(text, 10, 100);
        assert_eq!(chunks, vec![text.to_owned()]);
    }

    #[test]
    fn at_threshold_splits() {
        let text = "[Speaker:0] How are you?\n[Speaker:1] Fine.";
        let chunks = chunk_transcript(text, 100, 100);
        assert_eq!(chunks.len(), 2);
    }

    // ── Topic markers ────────────────────────────────────────────────────

    #[test]
    fn marker_requires_therapist_prefix() {
        assert!(is_topic_marker("[Speaker:0] How did that feel?"));
        assert!(!is_topic_marker("[Speaker:1] Why would I do that?"));
    }

    #[test]
    fn marker_requires_question_mark() {
        assert!(!is_topic_marker("[Speaker:0] Tell me more."));
        assert!(is_topic_marker("[Speaker:0] And then?  "));
    }

    #[test]
    fn splits_after_each_therapist_question() {
        let text = "[Speaker:0] How was your week?\n\
                    [Speaker:1] Rough.\n\
                    [Speaker:0] What made it rough?\n\
                    [Speaker:1] Work mostly.";
        let chunks = oversized(text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "[Speaker:0] How was your week?");
        assert_eq!(
            chunks[1],
            "[Speaker:1] Rough.\n[Speaker:0] What made it rough?"
        );
        assert_eq!(chunks[2], "[Speaker:1] Work mostly.");
    }

    #[test]
    fn three_markers_produce_four_chunks_with_trailing_lines() {
        let text = "intro\n\
                    [Speaker:0] One?\n\
                    a\n\
                    [Speaker:0] Two?\n\
                    b\n\
                    [Speaker:0] Three?\n\
                    closing remarks\nmore closing";
        let chunks = oversized(text);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3], "closing remarks\nmore closing");
    }

    #[test]
    fn no_markers_degrades_to_single_chunk() {
        let text = "[Speaker:1] monologue line one\n[Speaker:1] line two";
        let chunks = oversized(text);
        assert_eq!(chunks, vec![text.to_owned()]);
    }

    #[test]
    fn marker_as_last_line_leaves_no_trailing_chunk() {
        let text = "[Speaker:1] context\n[Speaker:0] Final question?";
        let chunks = oversized(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn empty_text_over_threshold() {
        // A single empty line still forms one chunk.
        let chunks = oversized("");
        assert_eq!(chunks, vec![String::new()]);
    }

    // ── Lossless property ────────────────────────────────────────────────

    #[test]
    fn join_reconstructs_input_exactly() {
        let text = "a\n[Speaker:0] Q1?\nb\nc\n[Speaker:0] Q2?\ntail";
        assert_eq!(oversized(text).join("\n"), text);
    }

    #[test]
    fn join_preserves_trailing_whitespace_on_lines() {
        let text = "[Speaker:0] Q?   \n[Speaker:1] answer  ";
        assert_eq!(oversized(text).join("\n"), text);
    }

    proptest! {
        #[test]
        fn chunking_is_lossless_for_arbitrary_line_sets(
            lines in proptest::collection::vec("[ -~]{0,40}", 0..30)
        ) {
            let text = lines.join("\n");
            let chunks = chunk_transcript(&text, 100, 10);
            prop_assert_eq!(chunks.join("\n"), text);
        }

        #[test]
        fn under_threshold_is_identity(text in "[ -~\n]{0,200}") {
            let count = estimate_tokens(&text);
            let chunks = chunk_transcript(&text, count, count + 1);
            prop_assert_eq!(chunks, vec![text]);
        }
    }
}
