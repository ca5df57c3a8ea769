use regex::Regex;

use crate::config::NOISE;
use crate::error::{Error, Result};

/// Accepts only same-namespace article links, excluding category pages,
/// files, and anchors, then denoises generic reference targets.
pub struct LinkFilter {
    shape: Regex,
    noise: &'static [&'static str],
}

impl LinkFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            shape: Regex::new(r"^/wiki/([^/.:#]+)$")
                .map_err(|e| Error::Generic(format!("Failed to compile link regex: {e}")))?,
            noise: NOISE,
        })
    }

    /// Returns the document id named by a raw href, or `None` when the href
    /// is not a valid in-namespace link or the id is a noise term.
    #[must_use]
    pub fn accept(&self, href: &str) -> Option<String> {
        let dest = self.shape.captures(href)?.get(1)?.as_str();
        if self.is_noisy(dest) {
            return None;
        }
        Some(dest.to_string())
    }

    fn is_noisy(&self, dest: &str) -> bool {
        self.noise.iter().any(|term| dest.contains(term))
    }
}
