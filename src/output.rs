use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::frontier::ProgressRecord;
use crate::strong_ties::StrongTie;
use crate::tfidf::Edge;

pub const FILE_INDORDER: &str = "indorder.csv";
pub const FILE_EDGELIST: &str = "edgelist.csv";
pub const FILE_STRONG_TIES: &str = "strong_ties.csv";

/// `output/mathematics_edgelist.csv` and friends.
#[must_use]
pub fn topic_path(dir: &Path, topic: &str, file: &str) -> PathBuf {
    dir.join(format!("{topic}_{file}"))
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// The per-visit progress stream: `pages_crawled,last_page,indegree,graph_order`.
pub fn write_progress(path: &Path, records: &[ProgressRecord]) -> Result<()> {
    write_records(path, records)
}

/// The tf-idf output: `from,to,tf_idf`.
pub fn write_edges(path: &Path, edges: &[Edge]) -> Result<()> {
    write_records(path, edges)
}

/// The selector output for the rendering collaborator: `from,to,tf_idf,relative`.
pub fn write_strong_ties(path: &Path, ties: &[StrongTie]) -> Result<()> {
    write_records(path, ties)
}
