use crate::errors::DeserializationError;
use crate::utils::{normalize_name, whitespace_tokenizer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::ops::Range;
use std::path::Path;
use std::result::Result;

/// Opaque identifier attached to a gazetteer entry, e.g. the index of a geographic record
pub type LocationId = u64;

/// Struct holding a gazetteer, i.e. a mapping from lower-cased location names to the set of
/// identifiers of the geographic records sharing that name. The size of the identifiers set is the
/// mention frequency of the name and is used to weight the language model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gazetteer {
    pub data: BTreeMap<String, BTreeSet<LocationId>>,
}

impl Serialize for Gazetteer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Gazetteer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = <BTreeMap<String, BTreeSet<LocationId>>>::deserialize(deserializer)?;
        let mut gazetteer = Gazetteer::default();
        for (name, ids) in entries {
            gazetteer.add_all(&name, ids);
        }
        Ok(gazetteer)
    }
}

impl Gazetteer {
    /// Add a single identifier to a location name. Names are lower-cased and their whitespaces
    /// normalized; empty names are ignored.
    pub fn add(&mut self, name: &str, id: LocationId) {
        self.add_all(name, Some(id))
    }

    /// Add several identifiers to a location name
    pub fn add_all<I>(&mut self, name: &str, ids: I)
    where
        I: IntoIterator<Item = LocationId>,
    {
        let name = normalize_name(name);
        if name.is_empty() {
            return;
        }
        self.data.entry(name).or_default().extend(ids);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    pub fn ids(&self, name: &str) -> Option<&BTreeSet<LocationId>> {
        self.data.get(name)
    }

    /// Number of geographic records sharing this exact name
    pub fn mention_frequency(&self, name: &str) -> usize {
        self.data.get(name).map(|ids| ids.len()).unwrap_or(0)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|name| name.as_str())
    }

    /// Set of the distinct words composing the gazetteer names
    pub fn words(&self) -> BTreeSet<&str> {
        self.data
            .keys()
            .flat_map(|name| whitespace_tokenizer(name).map(|(_, word)| word))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read a gazetteer from JSON of the form `{"new avadi road": [1, 2], ...}`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DeserializationError> {
        let file = fs::File::open(path.as_ref()).map_err(|cause| DeserializationError::Io {
            path: path.as_ref().to_path_buf(),
            cause,
        })?;
        Self::from_json_reader(file).map_err(|cause| DeserializationError::ReadGazetteerError {
            path: path.as_ref().to_path_buf(),
            cause,
        })
    }
}

/// General purpose vocabulary (typically a list of English words). A word of the vocabulary which
/// does not appear in any gazetteer name is considered a stop word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Serialize for Vocabulary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.words.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let words = <Vec<String>>::deserialize(deserializer)?;
        Ok(words.into_iter().collect())
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::default();
        for word in iter {
            vocabulary.add(word.as_ref());
        }
        vocabulary
    }
}

impl Vocabulary {
    pub fn add(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() {
            self.words.insert(word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Read a vocabulary from a JSON list of words
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
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

/// A token along with its byte range in the string it was extracted from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub text: String,
    pub range: Range<usize>,
}

impl Token {
    pub fn new<T: ToString>(text: T, range: Range<usize>) -> Self {
        Self {
            text: text.to_string(),
            range,
        }
    }
}

/// Struct holding an individual extraction result. The `range` attribute is the byte range of
/// the mention in the input text, `matched_name` is the gazetteer name it was resolved to, and
/// `ids` the identifiers attached to that name in the gazetteer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Toponym {
    pub mention: String,
    pub range: Range<usize>,
    pub matched_name: String,
    pub ids: BTreeSet<LocationId>,
}
