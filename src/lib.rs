//! Extraction of location mentions (toponyms) from short and noisy texts, such as social media
//! posts, using a gazetteer of known location names.
//!
//! Texts are normalized and tokenized while keeping track of the byte offsets of the tokens in
//! the raw text. Tokens are grouped into sub-queries delimited by stop words and punctuation,
//! expanded with known abbreviations and suffixes, and the plausible location phrases of each
//! sub-query are scored with a language model trained on the gazetteer names. Overlapping
//! candidates are then resolved in favor of the longest exact gazetteer names.
//!
//! ```
//! use gazetteer_toponym_extractor::{gazetteer, ExtractorBuilder, Extractor};
//!
//! let environment = ExtractorBuilder::default()
//!     .gazetteer(gazetteer!(("avadi road", [1]), ("velachery", [2])))
//!     .suffix_expansions(vec![("rd", "road")].into_iter().collect())
//!     .build()
//!     .unwrap();
//! let extractor = Extractor::new(environment);
//!
//! let toponyms = extractor.extract("Stuck near Avadi Rd, need help").unwrap();
//! assert_eq!(1, toponyms.len());
//! assert_eq!("Avadi Rd", toponyms[0].mention);
//! assert_eq!("avadi road", toponyms[0].matched_name);
//! ```

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

mod candidates;
mod data;
mod expansion;
mod extractor;
mod extractor_builder;
mod language_model;
mod partition;
mod resolver;
mod segmenter;
mod symbol_table;
mod tokenizer;
mod utils;

pub mod errors;

pub use crate::data::{Gazetteer, LocationId, Token, Toponym, Vocabulary};
pub use crate::expansion::{AbbreviationTable, SuffixTable};
pub use crate::extractor::{Environment, Extractor};
pub use crate::extractor_builder::ExtractorBuilder;
pub use crate::language_model::{GazetteerLanguageModel, PhraseScorer};
pub use crate::segmenter::{HashtagSegmenter, KnownSegmentations, Unsegmented};
