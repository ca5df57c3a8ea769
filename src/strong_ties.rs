use serde::Serialize;

use crate::tfidf::Edge;

/// An edge retained by the percentile cut, carrying the normalized strength
/// handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrongTie {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub tf_idf: f64,
    pub relative: f64,
}

/// Keeps only the edges whose weight strictly exceeds the nearest-rank
/// `1 - top_fraction` quantile. Each retained edge gets
/// `relative = exp(weight - max_score)`, in (0, 1] and equal to 1 only for
/// the maximum-weight edge. An empty edge list is a no-op, not an error.
#[must_use]
pub fn select(edges: &[Edge], top_fraction: f64) -> Vec<StrongTie> {
    if edges.is_empty() {
        tracing::warn!("no edges to select strong ties from");
        return Vec::new();
    }

    let mut weights: Vec<f64> = edges.iter().map(|edge| edge.tf_idf).collect();
    weights.sort_by(f64::total_cmp);

    let n = weights.len();
    let max_score = weights[n - 1];
    // nearest-rank with a truncated index
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rank = ((n as f64) * (1.0 - top_fraction)) as usize;
    let quantile = weights[rank.min(n - 1)];

    tracing::info!(
        quantile,
        edges = n,
        top_fraction,
        "strong tie threshold computed"
    );

    edges
        .iter()
        .filter(|edge| edge.tf_idf > quantile)
        .map(|edge| StrongTie {
            source: edge.source.clone(),
            target: edge.target.clone(),
            tf_idf: edge.tf_idf,
            relative: (edge.tf_idf - max_score).exp(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(weights: &[f64]) -> Vec<Edge> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &tf_idf)| Edge {
                source: format!("S{i}"),
                target: format!("T{i}"),
                tf_idf,
            })
            .collect()
    }

    #[test]
    fn retains_roughly_the_top_fraction() {
        let weights: Vec<f64> = (1..=100).map(f64::from).collect();
        let ties = select(&edges(&weights), 0.03);

        // rank 97 of the sorted weights is 98; strictly above it sit 99, 100
        assert_eq!(ties.len(), 2);
        assert!(ties.iter().all(|tie| tie.tf_idf > 98.0));
    }

    #[test]
    fn maximum_edge_has_relative_strength_one() {
        let ties = select(&edges(&[0.4, 2.5, 1.0, 3.1]), 0.5);

        let max_tie = ties
            .iter()
            .max_by(|a, b| a.tf_idf.total_cmp(&b.tf_idf))
            .unwrap();
        assert!((max_tie.relative - 1.0).abs() < f64::EPSILON);
        for tie in &ties {
            assert!(tie.relative > 0.0 && tie.relative <= 1.0);
            assert!((tie.relative - (tie.tf_idf - 3.1).exp()).abs() < 1e-12);
        }
    }

    #[test]
    fn quantile_ties_are_dropped() {
        // quantile lands on 2.0; the equal-weight edges fall below the cut
        let ties = select(&edges(&[1.0, 2.0, 2.0, 2.0, 3.0]), 0.25);

        assert_eq!(ties.len(), 1);
        assert!((ties[0].tf_idf - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_corpus_is_a_no_op() {
        assert!(select(&[], 0.03).is_empty());
    }

    #[test]
    fn single_edge_survives_as_its_own_maximum() {
        let ties = select(&edges(&[1.5]), 0.03);

        // rank clamps to the only weight; nothing strictly exceeds it
        assert!(ties.is_empty());
    }
}
