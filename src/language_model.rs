//! Gazetteer-based statistical language model.
//!
//! The model is trained on the location names of the gazetteer only, and is used to estimate
//! how plausible it is for a sequence of words to be (a part of) a location name. Unigrams are
//! counted once per distinct name, while bigrams and trigrams are counted once per identifier
//! attached to the name, so that frequently mentioned names weigh more.

use crate::data::Gazetteer;
use crate::symbol_table::TokenSymbolTable;
use crate::utils::whitespace_tokenizer;
use fnv::FnvHashMap as HashMap;

/// Scores the plausibility of a space separated phrase as a location name. A score of 0 means
/// that the phrase is not plausible at all and must be pruned.
pub trait PhraseScorer: Send + Sync {
    fn phrase_probability(&self, phrase: &str) -> f64;
}

impl<F> PhraseScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn phrase_probability(&self, phrase: &str) -> f64 {
        self(phrase)
    }
}

/// Maximum likelihood n-gram model (up to trigrams) trained on gazetteer names
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GazetteerLanguageModel {
    symbol_table: TokenSymbolTable,
    // indexed by word index
    unigram_counts: Vec<u32>,
    n_words: u32,
    bigram_counts: HashMap<(u32, u32), u32>,
    // total count of bigrams starting with a given word
    bigram_contexts: HashMap<u32, u32>,
    trigram_counts: HashMap<(u32, u32, u32), u32>,
    // total count of trigrams starting with a given pair of words
    trigram_contexts: HashMap<(u32, u32), u32>,
}

impl GazetteerLanguageModel {
    pub fn from_gazetteer(gazetteer: &Gazetteer) -> Self {
        let mut model = Self::default();
        for (name, ids) in &gazetteer.data {
            let words = whitespace_tokenizer(name)
                .map(|(_, word)| model.add_unigram(word))
                .collect::<Vec<_>>();
            model.add_ngrams(&words, ids.len() as u32);
        }
        debug!(
            "Trained gazetteer language model with {} distinct words, {} bigrams and {} trigrams",
            model.symbol_table.len(),
            model.bigram_counts.len(),
            model.trigram_counts.len()
        );
        model
    }

    fn add_unigram(&mut self, word: &str) -> u32 {
        let index = self.symbol_table.add_symbol(word);
        if index as usize >= self.unigram_counts.len() {
            self.unigram_counts.push(0);
        }
        self.unigram_counts[index as usize] += 1;
        self.n_words += 1;
        index
    }

    fn add_ngrams(&mut self, words: &[u32], weight: u32) {
        if weight == 0 {
            return;
        }
        for pair in words.windows(2) {
            *self.bigram_counts.entry((pair[0], pair[1])).or_insert(0) += weight;
            *self.bigram_contexts.entry(pair[0]).or_insert(0) += weight;
        }
        for triple in words.windows(3) {
            *self
                .trigram_counts
                .entry((triple[0], triple[1], triple[2]))
                .or_insert(0) += weight;
            *self
                .trigram_contexts
                .entry((triple[0], triple[1]))
                .or_insert(0) += weight;
        }
    }

    /// `P(w)`
    pub fn unigram_probability(&self, word: &str) -> f64 {
        match self.symbol_table.find_symbol(word) {
            Some(index) if self.n_words > 0 => {
                self.unigram_counts[index as usize] as f64 / self.n_words as f64
            }
            _ => 0.0,
        }
    }

    /// `P(w1 | w0)`
    pub fn bigram_probability(&self, w0: &str, w1: &str) -> f64 {
        match (
            self.symbol_table.find_symbol(w0),
            self.symbol_table.find_symbol(w1),
        ) {
            (Some(i0), Some(i1)) => {
                let context = self.bigram_contexts.get(&i0).cloned().unwrap_or(0);
                let count = self.bigram_counts.get(&(i0, i1)).cloned().unwrap_or(0);
                ratio(count, context)
            }
            _ => 0.0,
        }
    }

    /// `P(w2 | w0 w1)`
    pub fn trigram_probability(&self, w0: &str, w1: &str, w2: &str) -> f64 {
        match (
            self.symbol_table.find_symbol(w0),
            self.symbol_table.find_symbol(w1),
            self.symbol_table.find_symbol(w2),
        ) {
            (Some(i0), Some(i1), Some(i2)) => {
                let context = self.trigram_contexts.get(&(i0, i1)).cloned().unwrap_or(0);
                let count = self.trigram_counts.get(&(i0, i1, i2)).cloned().unwrap_or(0);
                ratio(count, context)
            }
            _ => 0.0,
        }
    }
}

fn ratio(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl PhraseScorer for GazetteerLanguageModel {
    /// Chain rule with a trigram history: `P(w0) * P(w1|w0) * P(w2|w0 w1) * ...`
    fn phrase_probability(&self, phrase: &str) -> f64 {
        let words = whitespace_tokenizer(phrase)
            .map(|(_, word)| word)
            .collect::<Vec<_>>();
        let mut probability = match words.first() {
            Some(first) => self.unigram_probability(first),
            None => return 0.0,
        };
        if let Some(second) = words.get(1) {
            probability *= self.bigram_probability(words[0], second);
        }
        for triple in words.windows(3) {
            if probability == 0.0 {
                break;
            }
            probability *= self.trigram_probability(triple[0], triple[1], triple[2]);
        }
        probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    fn avadi_gazetteer() -> Gazetteer {
        gazetteer!(("new avadi road", [1]), ("avadi", [2]))
    }

    #[test]
    fn test_unigram_probabilities() {
        // Given
        let model = GazetteerLanguageModel::from_gazetteer(&avadi_gazetteer());

        // When / Then
        assert_close(0.5, model.phrase_probability("avadi"));
        assert_close(0.25, model.phrase_probability("new"));
        assert_close(0.0, model.phrase_probability("chennai"));
        assert_close(0.0, model.phrase_probability(""));
    }

    #[test]
    fn test_bigram_and_trigram_probabilities() {
        // Given
        let model = GazetteerLanguageModel::from_gazetteer(&avadi_gazetteer());

        // When / Then
        assert_close(0.25, model.phrase_probability("new avadi"));
        assert_close(0.5, model.phrase_probability("avadi road"));
        assert_close(0.25, model.phrase_probability("new avadi road"));
        assert_close(0.0, model.phrase_probability("road avadi"));
        assert_close(0.0, model.phrase_probability("new avadi road now"));
    }

    #[test]
    fn test_ngrams_are_weighted_by_mention_frequency() {
        // Given
        let gazetteer = gazetteer!(("main street", [1, 2]), ("main road", [3]));

        // When
        let model = GazetteerLanguageModel::from_gazetteer(&gazetteer);

        // Then
        // unigrams are counted once per distinct name
        assert_close(0.5, model.unigram_probability("main"));
        assert_close(2. / 3., model.bigram_probability("main", "street"));
        assert_close(1. / 3., model.bigram_probability("main", "road"));
        assert_close(0.0, model.bigram_probability("street", "main"));
    }

    #[test]
    fn test_unseen_trigram_history_yields_zero() {
        // Given
        let gazetteer = gazetteer!(("north main", [1]), ("main street", [2]));
        let model = GazetteerLanguageModel::from_gazetteer(&gazetteer);

        // When
        let probability = model.phrase_probability("north main street");

        // Then
        assert_close(0.0, probability);
        assert!(model.phrase_probability("main street") > 0.0);
    }

    #[test]
    fn test_closures_are_phrase_scorers() {
        let scorer = |phrase: &str| if phrase == "avadi" { 0.3 } else { 0.0 };

        assert_close(0.3, scorer.phrase_probability("avadi"));
        assert_close(0.0, PhraseScorer::phrase_probability(&scorer, "road"));
    }
}
