use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::fetch::{extract_links, Fetch};
use crate::filter::LinkFilter;

/// One row of the per-visit progress stream, emitted during the selection
/// loop (not during seeding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressRecord {
    pub pages_crawled: usize,
    pub last_page: String,
    pub indegree: u32,
    pub graph_order: usize,
}

/// All accumulation tables for one crawl run. Created fresh per topic and
/// consumed by the tf-idf pass once the crawl halts.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Pages already fetched and processed.
    pub visited: HashSet<String>,

    /// Pages with positive indegree from any visited page.
    pub seen: HashSet<String>,

    /// Indegree of each unvisited page from the visited set. A page's entry
    /// is removed the moment it is visited.
    pub nominations: HashMap<String, u32>,

    /// The seed pages; excluded from edge output.
    pub roots: HashSet<String>,

    /// Per visited source page, raw outgoing link count per target.
    pub tf: HashMap<String, HashMap<String, u32>>,

    /// Number of distinct visited pages linking to each target.
    pub df: HashMap<String, u32>,
}

pub struct Crawler<F> {
    fetcher: F,
    filter: LinkFilter,
    max_pages: usize,
    state: CrawlState,
}

impl<F: Fetch> Crawler<F> {
    pub fn new(fetcher: F, filter: LinkFilter, max_pages: usize) -> Self {
        Self {
            fetcher,
            filter,
            max_pages,
            state: CrawlState::default(),
        }
    }

    /// Fetches one page, records every valid outgoing link, and retires the
    /// page from the frontier.
    fn visit(&mut self, page: &str) -> Result<()> {
        self.state.visited.insert(page.to_string());

        let html = self.fetcher.fetch(page)?;

        // distinct targets at this page, for the document-frequency pass
        let mut terms = HashSet::new();

        for href in extract_links(&html) {
            let Some(dest) = self.filter.accept(&href) else {
                continue;
            };
            self.state.seen.insert(dest.clone());
            *self
                .state
                .tf
                .entry(page.to_string())
                .or_default()
                .entry(dest.clone())
                .or_insert(0) += 1;
            // a nomination counts distinct visited sources, so only the
            // first sighting of a target on this page raises it
            let first_sighting = terms.insert(dest.clone());
            if first_sighting && !self.state.visited.contains(&dest) {
                *self.state.nominations.entry(dest).or_insert(0) += 1;
            }
        }

        for term in terms {
            *self.state.df.entry(term).or_insert(0) += 1;
        }

        self.state.nominations.remove(page);

        Ok(())
    }

    /// The unvisited page with the highest nomination count. Ties break to
    /// the lexicographically smallest page id so runs are reproducible.
    fn select_next(&self) -> Option<(String, u32)> {
        self.state
            .nominations
            .iter()
            .max_by(|(a_page, a_count), (b_page, b_count)| {
                a_count.cmp(b_count).then_with(|| b_page.cmp(a_page))
            })
            .map(|(page, count)| (page.clone(), *count))
    }

    /// Visits the seeds in order, then repeatedly visits the most nominated
    /// page until the budget is reached or the frontier empties. Returns the
    /// progress stream for the selection loop.
    pub fn crawl(&mut self, seeds: &[String]) -> Result<Vec<ProgressRecord>> {
        for root in seeds {
            self.state.roots.insert(root.clone());
            self.state.nominations.insert(root.clone(), 1);
            self.state.seen.insert(root.clone());
            self.visit(root)?;
        }

        let mut progress = Vec::new();

        while self.state.visited.len() < self.max_pages {
            let Some((page, indegree)) = self.select_next() else {
                break;
            };
            let record = ProgressRecord {
                pages_crawled: self.state.visited.len(),
                last_page: page.clone(),
                indegree,
                graph_order: self.state.seen.len(),
            };
            tracing::info!(
                page = %record.last_page,
                indegree = record.indegree,
                graph_order = record.graph_order,
                "visiting"
            );
            progress.push(record);
            self.visit(&page)?;
        }

        Ok(progress)
    }

    #[must_use]
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> CrawlState {
        self.state
    }
}
