//! Tokenization of one input line into an argument vector.

/// Maximum number of tokens produced from a single line.
///
/// Tokens beyond the cap are dropped silently; the bound exists to keep a
/// single line from growing an unbounded argument vector.
pub const MAX_TOKENS: usize = 100;

/// Split `line` on runs of whitespace into owned tokens.
///
/// Empty runs produce no token, so a whitespace-only line yields an empty
/// vector and there is never a trailing empty token. The first token, if
/// present, is the command name. At most [`MAX_TOKENS`] tokens are
/// returned. Pure function of its input.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .take(MAX_TOKENS)
        .map(str::to_owned)
        .collect()
}
