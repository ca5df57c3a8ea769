use serde::Serialize;

use crate::error::{Error, Result};
use crate::frontier::CrawlState;

/// A directed, weighted link between two visited pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub tf_idf: f64,
}

/// Turns the accumulated crawl tables into weighted edges. Pure function of
/// its inputs; the same tables always yield identical weights.
///
/// Root pages are excluded as both sources and targets, and edges to pages
/// that were never visited carry no corroborated signal and are dropped.
/// Edges whose weight does not strictly exceed `min_tf_idf` do not exist;
/// in particular a target linked from every visited page has `idf = 0` and
/// is filtered out, not an error.
pub fn weighted_edges(state: &CrawlState, norm_k: f64, min_tf_idf: f64) -> Result<Vec<Edge>> {
    #[allow(clippy::cast_precision_loss)]
    let n = state.visited.len() as f64;

    let mut edges = Vec::new();

    for (page, adjacency) in &state.tf {
        if state.roots.contains(page) {
            continue;
        }
        // max term frequency over the unfiltered adjacency row
        let Some(max_tf) = adjacency.values().copied().max() else {
            continue;
        };
        for (term, &raw_freq) in adjacency {
            if state.roots.contains(term) || !state.visited.contains(term) {
                continue;
            }
            let df = state
                .df
                .get(term)
                .copied()
                .ok_or_else(|| Error::MissingDocumentFrequency(term.clone()))?;

            let tf_weight = norm_k + norm_k * (f64::from(raw_freq) / f64::from(max_tf));
            let idf = (n / f64::from(df)).ln();
            let val = tf_weight * idf;
            if val > min_tf_idf {
                edges.push(Edge {
                    source: page.clone(),
                    target: term.clone(),
                    tf_idf: val,
                });
            }
        }
    }

    edges.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.target.cmp(&b.target)));

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::fetch::Fetch;
    use crate::filter::LinkFilter;
    use crate::frontier::Crawler;

    const K: f64 = 0.5;

    fn set(pages: &[&str]) -> HashSet<String> {
        pages.iter().map(|p| (*p).to_string()).collect()
    }

    fn row(targets: &[(&str, u32)]) -> HashMap<String, u32> {
        targets.iter().map(|(t, f)| ((*t).to_string(), *f)).collect()
    }

    fn state(
        visited: &[&str],
        roots: &[&str],
        tf: &[(&str, &[(&str, u32)])],
        df: &[(&str, u32)],
    ) -> CrawlState {
        CrawlState {
            visited: set(visited),
            seen: set(visited),
            nominations: HashMap::new(),
            roots: set(roots),
            tf: tf
                .iter()
                .map(|(page, adjacency)| ((*page).to_string(), row(adjacency)))
                .collect(),
            df: df.iter().map(|(t, c)| ((*t).to_string(), *c)).collect(),
        }
    }

    #[test]
    fn weights_follow_the_formula() {
        // S links T once and U three times; N = 4, df[T] = 1, df[U] = 2
        let state = state(
            &["R", "S", "T", "U"],
            &["R"],
            &[("S", &[("T", 1), ("U", 3)])],
            &[("T", 1), ("U", 2)],
        );
        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();

        assert_eq!(edges.len(), 2);
        let tf_t = 0.5 + 0.5 * (1.0 / 3.0);
        let tf_u = 0.5 + 0.5 * (3.0 / 3.0);
        assert!((edges[0].tf_idf - tf_t * 4.0_f64.ln()).abs() < 1e-12);
        assert!((edges[1].tf_idf - tf_u * 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn roots_never_appear_in_output() {
        let state = state(
            &["R", "S", "T"],
            &["R"],
            &[("R", &[("S", 2), ("T", 1)]), ("S", &[("R", 5), ("T", 1)])],
            &[("S", 1), ("T", 2), ("R", 1)],
        );
        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();

        assert!(edges.iter().all(|e| e.source != "R" && e.target != "R"));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "S");
        assert_eq!(edges[0].target, "T");
    }

    #[test]
    fn unvisited_targets_are_dropped() {
        let state = state(
            &["R", "S"],
            &["R"],
            &[("S", &[("Nowhere", 7)])],
            &[("Nowhere", 1)],
        );
        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn saturated_document_frequency_filters_the_edge() {
        // every visited page links to T, so idf = ln(N/N) = 0
        let state = state(
            &["R", "S", "T"],
            &["R"],
            &[("S", &[("T", 2)])],
            &[("T", 3)],
        );
        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn missing_document_frequency_is_a_contract_violation() {
        let state = state(&["R", "S", "T"], &["R"], &[("S", &[("T", 1)])], &[]);
        let result = weighted_edges(&state, K, f64::EPSILON);

        assert!(matches!(
            result,
            Err(Error::MissingDocumentFrequency(ref t)) if t == "T"
        ));
    }

    #[test]
    fn max_tf_counts_the_unfiltered_row() {
        // the heaviest link from S goes to the root, but it still sets the
        // normalization denominator for S's surviving edges
        let state = state(
            &["R", "S", "T"],
            &["R"],
            &[("S", &[("R", 10), ("T", 1)])],
            &[("R", 1), ("T", 1)],
        );
        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();

        assert_eq!(edges.len(), 1);
        let tf = 0.5 + 0.5 * (1.0 / 10.0);
        assert!((edges[0].tf_idf - tf * 3.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn output_is_sorted_and_idempotent() {
        let state = state(
            &["R", "B", "A", "T", "U"],
            &["R"],
            &[("B", &[("T", 1), ("U", 2)]), ("A", &[("U", 1), ("T", 2)])],
            &[("T", 2), ("U", 2)],
        );
        let first = weighted_edges(&state, K, f64::EPSILON).unwrap();
        let second = weighted_edges(&state, K, f64::EPSILON).unwrap();

        let order: Vec<_> = first
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(order, vec![("A", "T"), ("A", "U"), ("B", "T"), ("B", "U")]);
        assert_eq!(first, second);
    }

    /// The two-page fixture from the crawl side: A seeds the run, links B
    /// once and C twice; B links C. With only A and B visited, every
    /// candidate edge is either root-connected or points at an unvisited
    /// page, so the output is empty.
    #[test]
    fn two_page_crawl_yields_no_edges() {
        struct Tiny;

        impl Fetch for Tiny {
            fn fetch(&self, page: &str) -> crate::error::Result<String> {
                let links = match page {
                    "A" => r#"<a href="/wiki/B">b</a><a href="/wiki/C">c</a><a href="/wiki/C">c</a>"#,
                    "B" => r#"<a href="/wiki/C">c</a>"#,
                    _ => "",
                };
                Ok(format!("<div id=\"bodyContent\">{links}</div>"))
            }
        }

        let mut crawler = Crawler::new(Tiny, LinkFilter::new().unwrap(), 2);
        crawler.crawl(&["A".to_string()]).unwrap();
        let state = crawler.into_state();

        assert_eq!(state.visited, set(&["A", "B"]));
        assert_eq!(state.tf["A"]["C"], 2);
        assert_eq!(state.df["C"], 2);

        let edges = weighted_edges(&state, K, f64::EPSILON).unwrap();
        assert!(edges.is_empty());
    }
}
