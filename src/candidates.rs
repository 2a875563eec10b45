//! Generation of candidate location phrases for a sub-query.
//!
//! Candidates are built bottom-up in a table of contiguous position spans, by increasing span
//! length. The cell `[i, j]` is obtained by joining the surviving candidates of `[i, j-1]` with
//! the surviving candidates of `[i+1, j]` which agree with them on the shared positions, and only
//! the candidates the language model scores strictly positively survive. This prunes the
//! otherwise exponential product of the expansion vectors.

use crate::data::Gazetteer;
use crate::expansion::ExpansionVector;
use crate::language_model::PhraseScorer;
use fnv::FnvHashMap as HashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Score attributed to single-position gazetteer matches which were not scored by the model
pub const UNIGRAM_MATCH_SCORE: f64 = 1.0;

/// A candidate phrase: one surface form chosen for each position of a contiguous span of a
/// sub-query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhraseCandidate {
    pub choices: Vec<String>,
    pub start: usize,
}

impl PhraseCandidate {
    /// Words of the phrase, where immediately repeated choices are collapsed, e.g. choosing
    /// `road` for `rd` followed by `road` yields a single `road`
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = Vec::with_capacity(self.choices.len());
        for choice in &self.choices {
            if tokens.last() != Some(&choice.as_str()) {
                tokens.push(choice);
            }
        }
        tokens
    }

    pub fn phrase(&self) -> String {
        self.tokens().join(" ")
    }

    fn key(&self) -> CandidateKey {
        CandidateKey {
            positions: (self.start, self.start + self.choices.len()),
            tokens: self.tokens().into_iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Identifies a scored phrase by its position span (half-open) and its collapsed tokens
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateKey {
    pub positions: (usize, usize),
    pub tokens: Vec<String>,
}

impl CandidateKey {
    pub fn phrase(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn n_positions(&self) -> usize {
        self.positions.1 - self.positions.0
    }
}

/// Candidate phrases of a sub-query along with their strictly positive scores
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredCandidates {
    scores: BTreeMap<CandidateKey, f64>,
}

impl ScoredCandidates {
    /// Records a candidate if its score is strictly positive, and returns whether it was recorded
    pub fn insert(&mut self, key: CandidateKey, score: f64) -> bool {
        if score > 0.0 && score.is_finite() {
            self.scores.insert(key, score);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CandidateKey, f64)> {
        self.scores.iter().map(|(key, score)| (key, *score))
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Positions covered by at least one candidate spanning several positions
    pub fn multi_position_coverage(&self) -> BTreeSet<usize> {
        self.scores
            .keys()
            .filter(|key| key.n_positions() > 1)
            .flat_map(|key| key.positions.0..key.positions.1)
            .collect()
    }
}

/// Builds the span table over the expansion vectors of a sub-query and returns every surviving
/// candidate spanning at least two positions
pub fn build_span_table(vectors: &[ExpansionVector], scorer: &dyn PhraseScorer) -> ScoredCandidates {
    let mut scored = ScoredCandidates::default();
    let n_positions = vectors.len();

    // Surviving choices of the cells of the previous length, indexed by start position
    let mut previous: Vec<Vec<Vec<String>>> = vectors
        .iter()
        .map(|vector| vector.iter().map(|form| vec![form.to_string()]).collect())
        .collect();

    for length in 2..=n_positions {
        let mut current = Vec::with_capacity(n_positions + 1 - length);
        for start in 0..=(n_positions - length) {
            let mut right_by_prefix: HashMap<&[String], Vec<&String>> = HashMap::default();
            for right in &previous[start + 1] {
                let (last, prefix) = match right.split_last() {
                    Some(split) => split,
                    None => continue,
                };
                right_by_prefix.entry(prefix).or_default().push(last);
            }

            let mut cell = vec![];
            for left in &previous[start] {
                let extensions = match right_by_prefix.get(&left[1..]) {
                    Some(extensions) => extensions,
                    None => continue,
                };
                for last in extensions {
                    let mut choices = left.clone();
                    choices.push((*last).clone());
                    let candidate = PhraseCandidate { choices, start };
                    let score = scorer.phrase_probability(&candidate.phrase());
                    if scored.insert(candidate.key(), score) {
                        cell.push(candidate.choices);
                    }
                }
            }
            current.push(cell);
        }

        if current.iter().all(|cell| cell.is_empty()) {
            trace!("No candidate of length {} survived, stopping", length);
            break;
        }
        previous = current;
    }
    scored
}

/// Adds single-position candidates for the positions which no multi-position candidate covers,
/// using the forms which are exact gazetteer names
pub fn backfill_unigrams(
    scored: &mut ScoredCandidates,
    vectors: &[ExpansionVector],
    gazetteer: &Gazetteer,
) {
    let covered = scored.multi_position_coverage();
    for (position, vector) in vectors.iter().enumerate() {
        if covered.contains(&position) {
            continue;
        }
        for form in vector.iter().filter(|form| gazetteer.contains(form)) {
            scored.insert(single_position_key(position, form), UNIGRAM_MATCH_SCORE);
        }
    }
}

/// Scores every form of a single-position sub-query with the language model
pub fn score_single_position(vector: &ExpansionVector, scorer: &dyn PhraseScorer) -> ScoredCandidates {
    let mut scored = ScoredCandidates::default();
    for form in vector.iter() {
        scored.insert(single_position_key(0, form), scorer.phrase_probability(form));
    }
    scored
}

/// For each position, keeps the form which is the most frequently mentioned gazetteer name, if
/// any. Ties are broken by taking the lexicographically smallest name.
pub fn most_frequent_names(vectors: &[ExpansionVector], gazetteer: &Gazetteer) -> ScoredCandidates {
    let mut scored = ScoredCandidates::default();
    for (position, vector) in vectors.iter().enumerate() {
        let best = vector
            .iter()
            .map(|form| (gazetteer.mention_frequency(form), form))
            .filter(|(frequency, _)| *frequency > 0)
            .min_by(|(freq_a, form_a), (freq_b, form_b)| {
                freq_b.cmp(freq_a).then_with(|| form_a.cmp(form_b))
            });
        if let Some((frequency, form)) = best {
            scored.insert(single_position_key(position, form), frequency as f64);
        }
    }
    scored
}

/// Generates all the scored candidates of a sub-query
pub fn collect_candidates(
    vectors: &[ExpansionVector],
    scorer: &dyn PhraseScorer,
    gazetteer: &Gazetteer,
) -> ScoredCandidates {
    let mut scored = match vectors.len() {
        0 => return ScoredCandidates::default(),
        1 => score_single_position(&vectors[0], scorer),
        _ => {
            let mut scored = build_span_table(vectors, scorer);
            backfill_unigrams(&mut scored, vectors, gazetteer);
            scored
        }
    };
    if scored.is_empty() {
        scored = most_frequent_names(vectors, gazetteer);
    }
    scored
}

fn single_position_key(position: usize, form: &str) -> CandidateKey {
    CandidateKey {
        positions: (position, position + 1),
        tokens: vec![form.to_string()],
    }
}
