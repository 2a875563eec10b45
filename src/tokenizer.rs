//! Normalization of noisy social-media texts and alignment of the normalized tokens back onto
//! the raw text.
//!
//! Extraction works on a normalized version of the text (URLs removed, hashtags segmented,
//! punctuation padded...), but results must point into the text as provided. The normalized
//! tokens are therefore searched again, in order, in the lower-cased raw text: each token is
//! matched at its first occurrence at or after the end of the previously aligned token. Tokens
//! which cannot be found this way are dropped.

use crate::data::Token;
use crate::segmenter::HashtagSegmenter;
use crate::utils::{strip_punctuation, whitespace_tokenizer};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+:/{2}[\d\w-]+(\.[\d\w-]+)*(?:/[^\s/]*)*").unwrap());

/// User handles, not preceded by a character that could make them part of an email or a word
static MENTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^a-z0-9\-_.])(@[a-z]+[a-z0-9]+)").unwrap());

static HASHTAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());

static PADDED_PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([,!?():])").unwrap());

static WHITESPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

const MENTION_FILLER: char = '#';

/// Characters split from both ends of a token
const EDGE_PUNCTUATION: &[char] = &['\'', '"', '{', '}', '(', ')', '[', ']', '*', '&'];

/// Lower-cases ASCII letters only, so that byte offsets are preserved
pub fn lowercase(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Replaces user handles with filler characters of the same length, so that the words they
/// contain cannot be aligned with tokens coming from a neighbouring hashtag
pub fn mask_mentions(text: &str) -> String {
    let mut masked = text.to_string();
    for captures in MENTION_REGEX.captures_iter(text) {
        if let Some(mention) = captures.get(1) {
            let filler = MENTION_FILLER.to_string().repeat(mention.as_str().len());
            masked.replace_range(mention.range(), &filler);
        }
    }
    masked
}

fn strip_retweet_marker(text: &str) -> &str {
    if text.starts_with("rt") {
        if let Some(colon_idx) = text.find(": ") {
            return &text[colon_idx + 2..];
        }
    }
    text
}

fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || c.is_ascii_whitespace() || c == '\x0b'
}

/// Normalizes a lower-cased text: removes retweet markers, URLs, non printable characters,
/// replaces hashtags by their segmentation, pads punctuation and collapses whitespaces
pub fn preprocess(text: &str, segmenter: &dyn HashtagSegmenter) -> String {
    let text = strip_retweet_marker(text);
    let text = URL_REGEX.replace_all(text, "");
    let text = text
        .chars()
        .filter(|c| is_printable(*c))
        .collect::<String>()
        .replace('\n', " ")
        .replace(" https", "")
        .replace("http", "");

    // Each hashtag is replaced by its own segmentation in a single pass, so that a short hashtag
    // can never rewrite the prefix of a longer one
    let text = HASHTAG_REGEX.replace_all(&text, |captures: &Captures| {
        let body = strip_punctuation(&captures[0][1..]);
        segmenter.segment(&body).join(" ")
    });

    let text = PADDED_PUNCTUATION_REGEX.replace_all(&text, " $1 ");
    let text = text.replace(". ", " . ").replace('-', " ");
    let text = WHITESPACES_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// Splits a normalized text into tokens with their byte ranges in that text
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = vec![];
    for (range, chunk) in whitespace_tokenizer(text) {
        let core = chunk.trim_start_matches(EDGE_PUNCTUATION);
        let core_start = range.start + chunk.len() - core.len();
        for (idx, c) in chunk[..chunk.len() - core.len()].char_indices() {
            tokens.push(Token::new(c, range.start + idx..range.start + idx + c.len_utf8()));
        }
        let trimmed = core.trim_end_matches(EDGE_PUNCTUATION);
        if !trimmed.is_empty() {
            tokens.push(Token::new(trimmed, core_start..core_start + trimmed.len()));
        }
        let trailing_start = core_start + trimmed.len();
        for (idx, c) in core[trimmed.len()..].char_indices() {
            tokens.push(Token::new(c, trailing_start + idx..trailing_start + idx + c.len_utf8()));
        }
    }
    tokens
}

/// Aligns tokens onto `target`, returning them with their ranges in `target`. A token is matched
/// at its first occurrence starting at or after the end of the last aligned token.
pub fn align(target: &str, tokens: &[Token]) -> Vec<Token> {
    let mut aligned = Vec::with_capacity(tokens.len());
    let mut watermark = 0;
    for token in tokens {
        let found = target
            .get(watermark..)
            .and_then(|remaining| remaining.find(token.text.as_str()));
        match found {
            Some(offset) => {
                let start = watermark + offset;
                let end = start + token.text.len();
                aligned.push(Token::new(&token.text, start..end));
                watermark = end;
            }
            None => trace!(
                "Dropping token {:?}: no occurrence after offset {}",
                token.text,
                watermark
            ),
        }
    }
    aligned
}

/// Runs the whole normalization and alignment chain on a raw text. The returned tokens are
/// lower-cased and their ranges point into `raw_text`.
pub fn tokenize_and_align(raw_text: &str, segmenter: &dyn HashtagSegmenter) -> Vec<Token> {
    let target = mask_mentions(&lowercase(raw_text));
    let preprocessed = preprocess(&target, segmenter);
    align(&target, &tokenize(&preprocessed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{KnownSegmentations, Unsegmented};

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn test_mask_mentions_preserves_length() {
        // Given
        let text = "boats needed @chennairains #chennairainshelp, mail me@x.org";

        // When
        let masked = mask_mentions(text);

        // Then
        assert_eq!(text.len(), masked.len());
        assert_eq!(
            "boats needed ############# #chennairainshelp, mail me@x.org",
            masked
        );
    }

    #[test]
    fn test_preprocess_removes_retweet_marker_and_urls() {
        let preprocessed = preprocess(
            "rt #####: water level in sai nagar, above the shoulder http://t.co/abc12",
            &Unsegmented,
        );

        assert_eq!("water level in sai nagar , above the shoulder", preprocessed);
    }

    #[test]
    fn test_preprocess_pads_punctuation_and_collapses_spaces() {
        let preprocessed = preprocess("help!  stuck at anna-nagar (2nd st).  now\n", &Unsegmented);

        assert_eq!("help ! stuck at anna nagar ( 2nd st ) . now", preprocessed);
    }

    #[test]
    fn test_preprocess_drops_non_printable_characters() {
        let preprocessed = preprocess("flood\u{2014}in caf\u{e9} \u{1F30A}area", &Unsegmented);

        assert_eq!("floodin caf area", preprocessed);
    }

    #[test]
    fn test_preprocess_segments_hashtags_independently() {
        // Given
        let mut segmenter = KnownSegmentations::default();
        segmenter.add("la", vec!["la"]);
        segmenter.add("laflood", vec!["la", "flood"]);

        // When
        let preprocessed = preprocess("#la and #laflood and #la_help", &segmenter);

        // Then
        assert_eq!("la and la flood and lahelp", preprocessed);
    }

    #[test]
    fn test_tokenize_splits_edge_punctuation() {
        let tokens = tokenize("\"avadi\" rd. (x)");

        assert_eq!(
            vec![
                Token::new("\"", 0..1),
                Token::new("avadi", 1..6),
                Token::new("\"", 6..7),
                Token::new("rd.", 8..11),
                Token::new("(", 12..13),
                Token::new("x", 13..14),
                Token::new(")", 14..15),
            ],
            tokens
        );
    }

    #[test]
    fn test_align_is_monotonic() {
        // Given
        let target = "road to new road";
        let tokens = tokenize("road new road");

        // When
        let aligned = align(target, &tokens);

        // Then
        assert_eq!(
            vec![
                Token::new("road", 0..4),
                Token::new("new", 8..11),
                Token::new("road", 12..16),
            ],
            aligned
        );
    }

    #[test]
    fn test_align_drops_missing_tokens() {
        let aligned = align("near avadi", &tokenize("avadi near"));

        assert_eq!(vec![Token::new("avadi", 5..10)], aligned);
    }

    #[test]
    fn test_tokenize_and_align_recovers_hashtag_offsets() {
        // Given
        let mut segmenter = KnownSegmentations::default();
        segmenter.add("chennaifloods", vec!["chennai", "floods"]);

        // When
        let tokens = tokenize_and_align("#ChennaiFloods update", &segmenter);

        // Then
        assert_eq!(
            vec![
                Token::new("chennai", 1..8),
                Token::new("floods", 8..14),
                Token::new("update", 15..21),
            ],
            tokens
        );
    }

    #[test]
    fn test_tokenize_and_align_skips_mentions() {
        // Given
        let mut segmenter = KnownSegmentations::default();
        segmenter.add("chennairainshelp", vec!["chennai", "rains", "help"]);

        // When
        let tokens = tokenize_and_align("@ChennaiRains #ChennaiRainsHelp", &segmenter);

        // Then
        assert_eq!(
            vec!["#############", "chennai", "rains", "help"],
            texts(&tokens)
        );
        assert_eq!(15..22, tokens[1].range);
    }

    #[test]
    fn test_tokenize_and_align_on_empty_text() {
        assert!(tokenize_and_align("", &Unsegmented).is_empty());
        assert!(tokenize_and_align("  \n ", &Unsegmented).is_empty());
    }
}
