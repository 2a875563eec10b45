use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

#[derive(Debug)]
pub struct WhitespaceTokenizer<'a> {
    input: &'a str,
    char_iterator: Peekable<CharIndices<'a>>,
}

/// Creates a tokenizer that splits on whitespace and is robust to multiple and types of whitespaces
pub fn whitespace_tokenizer(string: &str) -> WhitespaceTokenizer<'_> {
    WhitespaceTokenizer {
        input: string,
        char_iterator: string.char_indices().peekable(),
    }
}

/// Iterator that outputs the next token along with its byte range in the input string
impl<'a> Iterator for WhitespaceTokenizer<'a> {
    type Item = (Range<usize>, &'a str);

    fn next(&mut self) -> Option<(Range<usize>, &'a str)> {
        // Absorb any number of whitespaces from where we are
        let start_token_idx = loop {
            match self.char_iterator.peek() {
                None => return None,
                Some((idx, c)) if !c.is_whitespace() => break *idx,
                Some(_) => {}
            }
            self.char_iterator.next();
        };
        // Absorb any number of non-whitespaces
        let mut end_token_idx = self.input.len();
        while let Some((idx, c)) = self.char_iterator.peek() {
            if c.is_whitespace() {
                end_token_idx = *idx;
                break;
            }
            self.char_iterator.next();
        }
        Some((
            start_token_idx..end_token_idx,
            &self.input[start_token_idx..end_token_idx],
        ))
    }
}

/// Lower-cases a name and normalizes its whitespaces to single spaces
pub fn normalize_name(name: &str) -> String {
    whitespace_tokenizer(&name.to_lowercase())
        .map(|(_, token)| token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes every ASCII punctuation character from a token
pub fn strip_punctuation(token: &str) -> String {
    token.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Two half-open ranges overlap iff each one starts before the other one ends
pub fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
