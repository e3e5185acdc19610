//! Token estimation.
//!
//! A deterministic chars/4 approximation of model token counts, used both
//! for the chunk-threshold decision and by anything that wants a rough size
//! for a piece of context. The same estimator must be used everywhere a
//! threshold comparison happens, so the decision and the split agree.

/// Approximate characters per model token.
pub const CHARS_PER_TOKEN: u32 = 4;

/// Estimate the model-token length of `text`.
///
/// Pure and total: any input (including the empty string, which yields 0)
/// returns a defined count. Rounds up so short non-empty strings never
/// estimate to zero.
#[must_use]
pub fn estimate_tokens(text: &str) -> u32 {
    text.len().div_ceil(CHARS_PER_TOKEN as usize) as u32
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
