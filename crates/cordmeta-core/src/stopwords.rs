use std::collections::HashSet;

use once_cell::sync::Lazy;

/// The dashboard's stock stopword list for title-frequency counting.
static DEFAULT_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "of", "in", "to", "for", "on", "with", "a", "an", "by", "from",
    ]
    .into_iter()
    .collect()
});

/// The default stopword set as owned strings.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Default stopwords merged with caller-supplied extras. Matching is
/// case-sensitive against already lower-cased tokens, so extras are
/// lower-cased here.
pub fn stopword_set(extra: &[String]) -> HashSet<String> {
    let mut set = default_stopwords();
    set.extend(extra.iter().map(|w| w.to_lowercase()));
    set
}
