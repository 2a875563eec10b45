//! Selection of the final location mentions among the candidate spans of a query.
//!
//! Candidate spans whose phrases are exact gazetteer names ("full" spans) dominate: overlapping
//! full spans are resolved by keeping the one covering the most tokens (both are kept on ties),
//! and any other span overlapping a surviving full span is discarded. The remaining partial
//! spans are then reduced to the longest gazetteer name they contain, or dropped.

use crate::data::{Gazetteer, Token};
use crate::utils::ranges_overlap;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

/// Half-open byte span in the raw text, as a tuple so that it can be ordered
pub type Span = (usize, usize);

/// A phrase recorded for a span, along with its number of tokens
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanCandidate {
    pub phrase: String,
    pub n_tokens: usize,
}

/// Candidate phrases of a whole query, grouped by the raw text span they cover
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSpans {
    spans: BTreeMap<Span, Vec<SpanCandidate>>,
}

impl CandidateSpans {
    /// Records a phrase for a span, keeping the insertion order of the distinct phrases
    pub fn add(&mut self, span: Span, phrase: String, n_tokens: usize) {
        let candidates = self.spans.entry(span).or_default();
        let candidate = SpanCandidate { phrase, n_tokens };
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    pub fn get(&self, span: &Span) -> Option<&[SpanCandidate]> {
        self.spans.get(span).map(|candidates| candidates.as_slice())
    }

    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.keys()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// The first phrase of the span which is an exact gazetteer name
    fn full_match<'a>(&'a self, span: &Span, gazetteer: &Gazetteer) -> Option<&'a SpanCandidate> {
        self.spans
            .get(span)
            .and_then(|candidates| candidates.iter().find(|c| gazetteer.contains(&c.phrase)))
    }
}

fn overlap(a: &Span, b: &Span) -> bool {
    ranges_overlap(&(a.0..a.1), &(b.0..b.1))
}

/// Returns the spans surviving the overlap resolution
pub fn resolve_overlaps(candidates: &CandidateSpans, gazetteer: &Gazetteer) -> BTreeSet<Span> {
    let full_spans: Vec<(Span, usize)> = candidates
        .spans()
        .filter_map(|span| {
            candidates
                .full_match(span, gazetteer)
                .map(|candidate| (*span, candidate.n_tokens))
        })
        .collect();

    let mut dropped: BTreeSet<Span> = BTreeSet::new();
    for (idx, (span_a, length_a)) in full_spans.iter().enumerate() {
        for (span_b, length_b) in &full_spans[idx + 1..] {
            if !overlap(span_a, span_b) {
                continue;
            }
            if length_a > length_b {
                dropped.insert(*span_b);
            } else if length_a < length_b {
                dropped.insert(*span_a);
            }
        }
    }

    let surviving_full: BTreeSet<Span> = full_spans
        .into_iter()
        .map(|(span, _)| span)
        .filter(|span| !dropped.contains(span))
        .collect();

    candidates
        .spans()
        .filter(|span| !dropped.contains(*span))
        .filter(|span| {
            surviving_full.contains(*span)
                || !surviving_full.iter().any(|full| overlap(full, span))
        })
        .cloned()
        .collect()
}

/// Finds a run of consecutive tokens lying inside `bounds` whose texts, joined by spaces, equal
/// `name`, and returns its span
fn locate_run(tokens: &[Token], bounds: &Range<usize>, name: &str, n_tokens: usize) -> Option<Span> {
    let inside = tokens
        .iter()
        .filter(|token| bounds.start <= token.range.start && token.range.end <= bounds.end)
        .collect::<Vec<_>>();
    inside
        .windows(n_tokens)
        .find(|run| {
            run.iter()
                .map(|token| token.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                == name
        })
        .map(|run| (run[0].range.start, run[n_tokens - 1].range.end))
}

/// Searches the longest gazetteer name contained in the phrases of a partial span
fn inner_full_mention(
    span: &Span,
    candidates: &[SpanCandidate],
    tokens: &[Token],
    gazetteer: &Gazetteer,
) -> Option<(Span, String)> {
    let bounds = span.0..span.1;
    for candidate in candidates {
        let words = candidate.phrase.split(' ').collect::<Vec<_>>();
        for length in (1..=words.len()).rev() {
            for window in words.windows(length) {
                let name = window.join(" ");
                if !gazetteer.contains(&name) {
                    continue;
                }
                if let Some(run) = locate_run(tokens, &bounds, &name, length) {
                    return Some((run, name));
                }
            }
        }
    }
    None
}

/// Keeps the spans matching an exact gazetteer name, and narrows the other ones to the longest
/// gazetteer name they contain. Spans containing no gazetteer name are dropped.
pub fn extract_full_mentions(
    resolved: &BTreeSet<Span>,
    candidates: &CandidateSpans,
    tokens: &[Token],
    gazetteer: &Gazetteer,
) -> BTreeSet<(Span, String)> {
    let mut mentions = BTreeSet::new();
    for span in resolved {
        if let Some(full) = candidates.full_match(span, gazetteer) {
            mentions.insert((*span, full.phrase.clone()));
            continue;
        }
        let span_candidates = match candidates.get(span) {
            Some(span_candidates) => span_candidates,
            None => continue,
        };
        match inner_full_mention(span, span_candidates, tokens, gazetteer) {
            Some(mention) => {
                mentions.insert(mention);
            }
            None => trace!("Dropping span {:?}: no gazetteer name inside", span),
        }
    }
    mentions
}
