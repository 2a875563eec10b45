use crate::candidates::collect_candidates;
use crate::data::{Gazetteer, Toponym};
use crate::errors::ExtractError;
use crate::expansion::{AbbreviationTable, SuffixTable, TokenExpander};
use crate::language_model::PhraseScorer;
use crate::partition::split_on_stop_words;
use crate::resolver::{extract_full_mentions, resolve_overlaps, CandidateSpans, Span};
use crate::segmenter::HashtagSegmenter;
use crate::tokenizer::tokenize_and_align;
use fnv::FnvHashSet as HashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Immutable extraction context, built once with an `ExtractorBuilder`.
///
/// It holds the gazetteer together with every resource derived from it or provided alongside
/// it, and can be shared between threads.
pub struct Environment {
    pub(crate) gazetteer: Gazetteer,
    // gazetteer words and general vocabulary
    pub(crate) extended_vocabulary: HashSet<String>,
    pub(crate) stop_words: HashSet<String>,
    pub(crate) abbreviations: AbbreviationTable,
    pub(crate) suffixes: SuffixTable,
    pub(crate) scorer: Box<dyn PhraseScorer>,
    pub(crate) segmenter: Box<dyn HashtagSegmenter>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("n_names", &self.gazetteer.len())
            .field("n_known_words", &self.extended_vocabulary.len())
            .field("n_stop_words", &self.stop_words.len())
            .field("n_abbreviations", &self.abbreviations.len())
            .field("n_suffixes", &self.suffixes.len())
            .finish()
    }
}

impl Environment {
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(|word| word.as_str())
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_known_word(&self, word: &str) -> bool {
        self.expander().is_known(word)
    }

    pub fn phrase_probability(&self, phrase: &str) -> f64 {
        self.scorer.phrase_probability(phrase)
    }

    fn expander(&self) -> TokenExpander<'_> {
        TokenExpander {
            extended_vocabulary: &self.extended_vocabulary,
            suffixes: &self.suffixes,
            abbreviations: &self.abbreviations,
        }
    }

    /// Extracts the location mentions of a text. The ranges of the returned toponyms are byte
    /// ranges in `text`, and the toponyms are sorted by range and then by matched name.
    pub fn extract(&self, text: &str) -> Vec<Toponym> {
        let tokens = tokenize_and_align(text, self.segmenter.as_ref());
        let sub_queries = split_on_stop_words(&tokens, &self.stop_words);
        let expander = self.expander();

        let mut candidates = CandidateSpans::default();
        for sub_query in &sub_queries {
            let vectors =
                expander.expand_all(sub_query.tokens.iter().map(|token| token.text.as_str()));
            let scored = collect_candidates(&vectors, self.scorer.as_ref(), &self.gazetteer);
            for (key, _) in scored.iter() {
                let (first, last) = key.positions;
                let span = (
                    sub_query.tokens[first].range.start,
                    sub_query.tokens[last - 1].range.end,
                );
                candidates.add(span, key.phrase(), key.tokens.len());
            }
        }

        let resolved = resolve_overlaps(&candidates, &self.gazetteer);
        let mentions = extract_full_mentions(&resolved, &candidates, &tokens, &self.gazetteer);
        let toponyms = self.assemble(text, mentions);
        debug!(
            "Extracted {} toponyms from {} tokens, {} sub-queries and {} candidate spans",
            toponyms.len(),
            tokens.len(),
            sub_queries.len(),
            candidates.len()
        );
        toponyms
    }

    fn assemble(&self, text: &str, mentions: BTreeSet<(Span, String)>) -> Vec<Toponym> {
        mentions
            .into_iter()
            .filter_map(|((start, end), name)| {
                let mention = match text.get(start..end) {
                    Some(mention) => mention,
                    None => {
                        trace!("Span {}..{} is not a valid slice of the input", start, end);
                        return None;
                    }
                };
                Some(Toponym {
                    mention: mention.to_string(),
                    range: start..end,
                    ids: self.gazetteer.ids(&name).cloned().unwrap_or_default(),
                    matched_name: name,
                })
            })
            .collect()
    }
}

/// Handle on an extraction `Environment`. It must be initialized before extracting anything.
#[derive(Debug, Default, Clone)]
pub struct Extractor {
    environment: Option<Arc<Environment>>,
}

impl Extractor {
    pub fn new<E: Into<Arc<Environment>>>(environment: E) -> Self {
        Self {
            environment: Some(environment.into()),
        }
    }

    /// Attaches an environment to the extractor, replacing the previous one if any
    pub fn initialize<E: Into<Arc<Environment>>>(&mut self, environment: E) {
        self.environment = Some(environment.into());
    }

    pub fn is_initialized(&self) -> bool {
        self.environment.is_some()
    }

    pub fn environment(&self) -> Option<&Arc<Environment>> {
        self.environment.as_ref()
    }

    pub fn extract(&self, text: &str) -> Result<Vec<Toponym>, ExtractError> {
        self.environment
            .as_ref()
            .map(|environment| environment.extract(text))
            .ok_or(ExtractError::EngineNotInitialized)
    }
}
