//! Expansion of query tokens into alternative surface forms.
//!
//! Noisy texts use abbreviations and truncated street suffixes (`rd`, `st.`, `apts`) where the
//! gazetteer holds full forms, and the other way around. Each token position of a sub-query is
//! expanded into an `ExpansionVector`, and the candidate phrases are built by picking one form
//! per position.

use crate::errors::DeserializationError;
use crate::utils::strip_punctuation;
use fnv::FnvHashSet as HashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, Read};
use std::path::Path;

/// Bidirectional table of abbreviations, e.g. `apartments <-> apts`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbbreviationTable {
    synonyms: BTreeMap<String, Vec<String>>,
}

impl AbbreviationTable {
    /// Registers a single directed synonym
    pub fn insert(&mut self, form: &str, synonym: &str) {
        let synonyms = self.synonyms.entry(form.to_lowercase()).or_default();
        let synonym = synonym.to_lowercase();
        if !synonyms.contains(&synonym) {
            synonyms.push(synonym);
        }
    }

    /// Registers a `(full, abbreviated)` pair in both directions, along with the dotted variant
    /// of the abbreviation: `full -> abbr`, `full -> abbr.`, `abbr -> full`, `abbr. -> full`
    pub fn add_pair(&mut self, full: &str, abbreviated: &str) {
        let dotted = format!("{}.", abbreviated);
        self.insert(full, abbreviated);
        self.insert(full, &dotted);
        self.insert(abbreviated, full);
        self.insert(&dotted, full);
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::default();
        for (full, abbreviated) in pairs {
            table.add_pair(full, abbreviated);
        }
        table
    }

    /// Reads `full,abbreviated` lines. Empty lines are skipped.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<Self, DeserializationError> {
        let mut table = Self::default();
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|cause| DeserializationError::ReadLinesError { cause })?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split(',').map(|field| field.trim());
            match (fields.next(), fields.next(), fields.next()) {
                (Some(full), Some(abbreviated), None)
                    if !full.is_empty() && !abbreviated.is_empty() =>
                {
                    table.add_pair(full, abbreviated)
                }
                _ => {
                    return Err(DeserializationError::InvalidAbbreviationLine {
                        line_number: line_idx + 1,
                        line,
                    })
                }
            }
        }
        Ok(table)
    }

    pub fn get(&self, form: &str) -> Option<&[String]> {
        self.synonyms.get(form).map(|synonyms| synonyms.as_slice())
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl<K, V> std::iter::FromIterator<(K, Vec<V>)> for AbbreviationTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (form, synonyms) in iter {
            for synonym in synonyms {
                table.insert(form.as_ref(), synonym.as_ref());
            }
        }
        table
    }
}

/// Expansions of street and location suffixes, e.g. `rd -> road`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixTable {
    expansions: BTreeMap<String, String>,
}

impl SuffixTable {
    pub fn insert(&mut self, suffix: &str, expansion: &str) {
        self.expansions
            .insert(suffix.to_lowercase(), expansion.to_lowercase());
    }

    pub fn get(&self, suffix: &str) -> Option<&str> {
        self.expansions.get(suffix).map(|expansion| expansion.as_str())
    }

    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }

    /// Reads a JSON object of the form `{"rd": "road", ...}`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let expansions: BTreeMap<String, String> = serde_json::from_reader(reader)?;
        Ok(expansions.into_iter().collect())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DeserializationError> {
        let file = fs::File::open(path.as_ref()).map_err(|cause| DeserializationError::Io {
            path: path.as_ref().to_path_buf(),
            cause,
        })?;
        Self::from_json_reader(file).map_err(|cause| DeserializationError::ReadResourceError {
            path: path.as_ref().to_path_buf(),
            cause,
        })
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for SuffixTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (suffix, expansion) in iter {
            table.insert(suffix.as_ref(), expansion.as_ref());
        }
        table
    }
}

/// Ordered set of the surface forms considered for a single token position. The first form is
/// always the original token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpansionVector {
    forms: Vec<String>,
}

impl ExpansionVector {
    pub fn new(token: &str) -> Self {
        Self {
            forms: vec![token.to_string()],
        }
    }

    /// Adds a form, unless it is already present
    pub fn push(&mut self, form: &str) {
        if !self.contains(form) {
            self.forms.push(form.to_string());
        }
    }

    pub fn contains(&self, form: &str) -> bool {
        self.forms.iter().any(|f| f == form)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|form| form.as_str())
    }
}

/// Expands tokens using the extended vocabulary (gazetteer words and general vocabulary), the
/// suffix table and the abbreviation table
pub struct TokenExpander<'a> {
    pub extended_vocabulary: &'a HashSet<String>,
    pub suffixes: &'a SuffixTable,
    pub abbreviations: &'a AbbreviationTable,
}

impl<'a> TokenExpander<'a> {
    /// A token is known when either itself or its punctuation-free form is in the extended
    /// vocabulary. Unknown tokens are most likely misspelled or abbreviated.
    pub fn is_known(&self, token: &str) -> bool {
        self.extended_vocabulary.contains(token)
            || self.extended_vocabulary.contains(&strip_punctuation(token))
    }

    pub fn expand(&self, token: &str) -> ExpansionVector {
        if !self.is_known(token) {
            trace!("Token {:?} is out of vocabulary", token);
        }
        let mut vector = ExpansionVector::new(token);
        if let Some(expansion) = self.suffixes.get(token) {
            vector.push(expansion);
        }
        let forms = vector.forms.clone();
        for form in forms {
            if let Some(synonyms) = self.abbreviations.get(&form) {
                for synonym in synonyms {
                    vector.push(synonym);
                }
            }
        }
        vector
    }

    pub fn expand_all<'b, I>(&self, tokens: I) -> Vec<ExpansionVector>
    where
        I: IntoIterator<Item = &'b str>,
    {
        tokens.into_iter().map(|token| self.expand(token)).collect()
    }
}
