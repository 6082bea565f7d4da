/// Source-text analysis: tokenization, term location, height mapping
use log::debug;
use nom::{bytes::complete::take_while1, IResult};

/// Characters that belong to a token: ASCII word characters plus apostrophe,
/// so contractions like "don't" survive as a single token.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(is_token_char)(input)
}

/// Split a source text into an ordered sequence of lowercased tokens.
///
/// Periods are stripped before lexing; every maximal run of non-token
/// characters acts as a delimiter. Empty runs between delimiters are
/// discarded, so the output never contains an empty token. Empty or
/// punctuation-only input yields an empty sequence.
pub fn tokenize(source: &str) -> Vec<String> {
    let parsed = source.replace('.', "").to_lowercase();

    let mut tokens = Vec::new();
    let mut rest = parsed.as_str();
    loop {
        rest = rest.trim_start_matches(|c: char| !is_token_char(c));
        if rest.is_empty() {
            break;
        }
        match token(rest) {
            Ok((tail, word)) => {
                tokens.push(word.to_owned());
                rest = tail;
            }
            Err(_) => break,
        }
    }

    debug!("tokenized {} tokens from {} chars", tokens.len(), source.len());
    tokens
}

/// Find every occurrence of `term` in a token sequence.
///
/// Matching is exact equality against the already-lowercased tokens, so the
/// search is effectively case-insensitive with respect to the original
/// source. Indices are returned in ascending order, one per occurrence. An
/// empty term matches nothing since tokens are never empty.
pub fn find_matches(tokens: &[String], term: &str) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_str() == term)
        .map(|(index, _)| index)
        .collect()
}

/// Convert a match index into a vertical placement value.
///
/// Linear rescale over the token count: `(100 / count) * index * 0.2`, which
/// places the first token at 0 and walks toward 20 at the end of the text.
/// Callers must not invoke this with a zero token count; an empty sequence
/// produces no matches, so the path is unreachable through `find_matches`.
pub fn map_height(index: usize, token_count: usize) -> f64 {
    (100.0 / token_count as f64) * index as f64 * 0.2
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "The quick brown fox jumped over the lazy dog.";

    #[test]
    fn test_tokenize_demo_sentence() {
        let tokens = tokenize(DEMO);
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[0], "the");
        assert_eq!(tokens[3], "fox");
        assert_eq!(tokens[8], "dog");
    }

    #[test]
    fn test_tokenize_degenerate_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(".").is_empty());
        assert!(tokenize("  ,;--  ").is_empty());
    }

    #[test]
    fn test_tokenize_never_emits_empty_tokens() {
        let tokens = tokenize(",,fox...dog,, jumped!");
        assert_eq!(tokens, vec!["foxdog", "jumped"]);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_tokenize_keeps_apostrophes() {
        assert_eq!(tokenize("Don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_tokenize_is_pure() {
        assert_eq!(tokenize(DEMO), tokenize(DEMO));
    }

    #[test]
    fn test_find_matches_repeated_term() {
        let tokens: Vec<String> = ["the", "quick", "the"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_matches(&tokens, "the"), vec![0, 2]);
    }

    #[test]
    fn test_find_matches_absent_and_empty_term() {
        let tokens = tokenize(DEMO);
        assert!(find_matches(&tokens, "zebra").is_empty());
        assert!(find_matches(&tokens, "").is_empty());
        assert!(find_matches(&[], "fox").is_empty());
    }

    #[test]
    fn test_find_matches_demo_terms() {
        let tokens = tokenize(DEMO);
        assert_eq!(find_matches(&tokens, "fox"), vec![3]);
        assert_eq!(find_matches(&tokens, "dog"), vec![8]);
    }

    #[test]
    fn test_map_height_endpoints() {
        assert_eq!(map_height(0, 5), 0.0);
        assert_eq!(map_height(5, 5), 20.0);
    }

    #[test]
    fn test_map_height_is_linear_in_index() {
        let a = map_height(2, 9);
        let b = map_height(4, 9);
        assert!((b - 2.0 * a).abs() < 1e-12);
    }
}
