use crate::data::{Gazetteer, Vocabulary};
use crate::errors::BuildError;
use crate::expansion::{AbbreviationTable, SuffixTable};
use crate::extractor::Environment;
use crate::language_model::{GazetteerLanguageModel, PhraseScorer};
use crate::segmenter::{HashtagSegmenter, Unsegmented};
use fnv::FnvHashSet as HashSet;

/// Struct exposing a builder allowing to configure and build an extraction `Environment`
#[derive(Default)]
pub struct ExtractorBuilder {
    gazetteer: Option<Gazetteer>,
    vocabulary: Vocabulary,
    abbreviations: AbbreviationTable,
    suffixes: SuffixTable,
    additional_stop_words: Vec<String>,
    segmenter: Option<Box<dyn HashtagSegmenter>>,
    scorer: Option<Box<dyn PhraseScorer>>,
}

impl ExtractorBuilder {
    /// Set the gazetteer of known location names. This is the only mandatory attribute.
    pub fn gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = Some(gazetteer);
        self
    }

    /// Set the general vocabulary. Its words which do not appear in any gazetteer name are used
    /// as stop words, and all its words are considered as known when expanding tokens.
    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn suffix_expansions(mut self, suffixes: SuffixTable) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Set stop words on top of the ones derived from the vocabulary. Words appearing in a
    /// gazetteer name are ignored.
    pub fn additional_stop_words<I, S>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.additional_stop_words = stop_words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Set the segmenter used to split hashtags into words. Hashtags are kept as single words
    /// by default.
    pub fn hashtag_segmenter<S: HashtagSegmenter + 'static>(mut self, segmenter: S) -> Self {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    /// Replace the language model trained on the gazetteer names by another phrase scorer
    pub fn phrase_scorer<P: PhraseScorer + 'static>(mut self, scorer: P) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    /// Instantiate an `Environment` from the `ExtractorBuilder`
    pub fn build(self) -> Result<Environment, BuildError> {
        let gazetteer = self.gazetteer.ok_or(BuildError::MissingGazetteer)?;

        let (stop_words, extended_vocabulary) = {
            let gazetteer_words = gazetteer.words();
            let stop_words: HashSet<String> = self
                .vocabulary
                .iter()
                .chain(self.additional_stop_words.iter().map(|word| word.as_str()))
                .filter(|word| !gazetteer_words.contains(word))
                .map(|word| word.to_string())
                .collect();
            let extended_vocabulary: HashSet<String> = gazetteer_words
                .iter()
                .cloned()
                .chain(self.vocabulary.iter())
                .map(|word| word.to_string())
                .collect();
            (stop_words, extended_vocabulary)
        };

        let scorer: Box<dyn PhraseScorer> = match self.scorer {
            Some(scorer) => scorer,
            None => Box::new(GazetteerLanguageModel::from_gazetteer(&gazetteer)),
        };
        let segmenter = self
            .segmenter
            .unwrap_or_else(|| Box::new(Unsegmented) as Box<dyn HashtagSegmenter>);

        debug!(
            "Built extraction environment with {} gazetteer names, {} stop words, {} known words, \
             {} abbreviations and {} suffix expansions",
            gazetteer.len(),
            stop_words.len(),
            extended_vocabulary.len(),
            self.abbreviations.len(),
            self.suffixes.len()
        );

        Ok(Environment {
            gazetteer,
            extended_vocabulary,
            stop_words,
            abbreviations: self.abbreviations,
            suffixes: self.suffixes,
            scorer,
            segmenter,
        })
    }
}
