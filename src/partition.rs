use crate::data::Token;
use fnv::FnvHashSet as HashSet;

/// Tokens on which a query is always split, regardless of the stop words
pub const SPLIT_PUNCTUATION: &[&str] = &[
    "[", "]", ".", ",", "(", ")", "!", "?", ":", "<", ">", "newline",
];

/// Contiguous run of tokens containing neither stop words nor split punctuation. Location names
/// are searched in each sub-query independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubQuery {
    pub tokens: Vec<Token>,
}

impl SubQuery {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub fn is_split_marker(token: &str, stop_words: &HashSet<String>) -> bool {
    stop_words.contains(token) || SPLIT_PUNCTUATION.contains(&token)
}

/// Splits the aligned tokens of a query into sub-queries, dropping the empty ones
pub fn split_on_stop_words(tokens: &[Token], stop_words: &HashSet<String>) -> Vec<SubQuery> {
    let mut sub_queries = vec![];
    let mut current = SubQuery::default();
    for token in tokens {
        if is_split_marker(&token.text, stop_words) {
            sub_queries.push(current);
            current = SubQuery::default();
        } else {
            current.tokens.push(token.clone());
        }
    }
    sub_queries.push(current);
    sub_queries.retain(|sub_query| !sub_query.is_empty());
    sub_queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn stop_words(words: &[&str]) -> HashSet<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    fn texts(sub_query: &SubQuery) -> Vec<&str> {
        sub_query
            .tokens
            .iter()
            .map(|token| token.text.as_str())
            .collect()
    }

    #[test]
    fn test_split_on_stop_words_and_punctuation() {
        // Given
        let tokens = tokenize("stuck at anna nagar , need boats in t nagar");
        let stop_words = stop_words(&["at", "need", "in"]);

        // When
        let sub_queries = split_on_stop_words(&tokens, &stop_words);

        // Then
        assert_eq!(4, sub_queries.len());
        assert_eq!(vec!["stuck"], texts(&sub_queries[0]));
        assert_eq!(vec!["anna", "nagar"], texts(&sub_queries[1]));
        assert_eq!(vec!["boats"], texts(&sub_queries[2]));
        assert_eq!(vec!["t", "nagar"], texts(&sub_queries[3]));
        assert_eq!(9..13, sub_queries[1].tokens[0].range);
    }

    #[test]
    fn test_split_keeps_last_sub_query_and_drops_empty_ones() {
        let tokens = tokenize(". . avadi road");

        let sub_queries = split_on_stop_words(&tokens, &HashSet::default());

        assert_eq!(1, sub_queries.len());
        assert_eq!(vec!["avadi", "road"], texts(&sub_queries[0]));
    }

    #[test]
    fn test_split_only_markers() {
        let tokens = tokenize("the ( ) !");

        let sub_queries = split_on_stop_words(&tokens, &stop_words(&["the"]));

        assert!(sub_queries.is_empty());
    }
}
