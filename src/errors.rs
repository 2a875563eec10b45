use failure::Fail;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[fail(display = "Extractor must be initialized with an environment before extracting locations")]
    EngineNotInitialized,
}

#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[fail(display = "A gazetteer must be provided to build the extraction environment")]
    MissingGazetteer,
}

#[derive(Debug, Fail)]
pub enum DeserializationError {
    #[fail(display = "Io error {:?}", path)]
    Io {
        path: PathBuf,
        #[cause]
        cause: io::Error,
    },
    #[fail(display = "Unable to read JSON gazetteer at {:?}", path)]
    ReadGazetteerError {
        path: PathBuf,
        #[cause]
        cause: serde_json::Error,
    },
    #[fail(display = "Unable to read JSON resource at {:?}", path)]
    ReadResourceError {
        path: PathBuf,
        #[cause]
        cause: serde_json::Error,
    },
    #[fail(display = "Unable to read abbreviation lines")]
    ReadLinesError {
        #[cause]
        cause: io::Error,
    },
    #[fail(
        display = "Invalid abbreviation line {}: {:?}, expected `full,abbreviation`",
        line_number, line
    )]
    InvalidAbbreviationLine { line_number: usize, line: String },
}
