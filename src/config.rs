/// Substrings that mark a link target as generic reference noise
/// (citation indexes, publishers, identifier pages) rather than signal.
pub const NOISE: &[&str] = &[
    "JSTOR",
    "OCLC",
    "_Standard_",
    "dentifier",
    "hilosoph",
    "_Press",
    "Bibcode",
    "Springer-Verlag",
    "_Review",
    "_Dictionary",
    "ArXiv",
];

pub const DEFAULT_HOST: &str = "https://en.wikipedia.org/wiki/";
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_NORM_K: f64 = 0.5;
pub const DEFAULT_TOP_FRACTION: f64 = 0.03;

/// Settings for one crawl run. Owned per topic so multiple topics can run
/// without sharing state.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// URL prefix a document id is appended to when fetching.
    pub host: String,

    /// Page budget: the crawl halts once this many pages are visited.
    pub max_pages: usize,

    /// Term-frequency normalization constant K; tf is scaled into (K, 2K].
    pub norm_k: f64,

    /// Minimum tf-idf a weighted edge must strictly exceed to exist.
    pub min_tf_idf: f64,

    /// Fraction of top-weighted edges retained as strong ties.
    pub top_fraction: f64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            norm_k: DEFAULT_NORM_K,
            min_tf_idf: f64::EPSILON,
            top_fraction: DEFAULT_TOP_FRACTION,
        }
    }
}
