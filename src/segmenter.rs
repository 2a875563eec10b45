use fnv::FnvHashMap;

/// Breaks the body of a hashtag (without the leading `#`, lower-cased, punctuation removed) into
/// words, e.g. `chennaifloods` into `["chennai", "floods"]`.
pub trait HashtagSegmenter: Send + Sync {
    fn segment(&self, hashtag: &str) -> Vec<String>;
}

impl<F> HashtagSegmenter for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn segment(&self, hashtag: &str) -> Vec<String> {
        self(hashtag)
    }
}

/// Keeps hashtags as a single word
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Unsegmented;

impl HashtagSegmenter for Unsegmented {
    fn segment(&self, hashtag: &str) -> Vec<String> {
        vec![hashtag.to_string()]
    }
}

/// Segmenter backed by a table of known segmentations, falling back to the unsegmented hashtag
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KnownSegmentations {
    segmentations: FnvHashMap<String, Vec<String>>,
}

impl KnownSegmentations {
    pub fn add<S: ToString>(&mut self, hashtag: &str, words: Vec<S>) {
        self.segmentations.insert(
            hashtag.to_lowercase(),
            words.into_iter().map(|word| word.to_string()).collect(),
        );
    }
}

impl HashtagSegmenter for KnownSegmentations {
    fn segment(&self, hashtag: &str) -> Vec<String> {
        self.segmentations
            .get(hashtag)
            .cloned()
            .unwrap_or_else(|| vec![hashtag.to_string()])
    }
}
