use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use strong_ties::config::{
    CrawlConfig, DEFAULT_HOST, DEFAULT_MAX_PAGES, DEFAULT_NORM_K, DEFAULT_TOP_FRACTION,
};
use strong_ties::error::Result;
use strong_ties::fetch::HttpFetcher;
use strong_ties::filter::LinkFilter;
use strong_ties::frontier::Crawler;
use strong_ties::output::{self, FILE_EDGELIST, FILE_INDORDER, FILE_STRONG_TIES};
use strong_ties::{strong_ties as selector, tfidf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed file with one page id per line, or a directory of seed files
    /// (one topic per file)
    seeds: PathBuf,

    /// Page budget per topic
    #[arg(short, long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Directory the CSV artifacts are written to
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// URL prefix a page id is appended to when fetching
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Term-frequency normalization constant K
    #[arg(long, default_value_t = DEFAULT_NORM_K)]
    norm_k: f64,

    /// Minimum tf-idf a weighted edge must strictly exceed to exist
    #[arg(long, default_value_t = f64::EPSILON)]
    min_tf_idf: f64,

    /// Fraction of top-weighted edges retained as strong ties
    #[arg(long, default_value_t = DEFAULT_TOP_FRACTION)]
    top_fraction: f64,
}

impl Args {
    fn config(&self) -> CrawlConfig {
        CrawlConfig {
            host: self.host.clone(),
            max_pages: self.max_pages,
            norm_k: self.norm_k,
            min_tf_idf: self.min_tf_idf,
            top_fraction: self.top_fraction,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(error) = run(&args) {
        tracing::error!(%error, "crawl run failed");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    fs::create_dir_all(&args.output)?;

    let config = args.config();

    for seed_file in seed_files(&args.seeds) {
        run_topic(&seed_file, &config, &args.output)?;
    }

    Ok(())
}

/// A single seed file, or every file inside a topic directory in sorted
/// order (one crawl run each).
fn seed_files(seeds: &Path) -> Vec<PathBuf> {
    if !seeds.is_dir() {
        return vec![seeds.to_path_buf()];
    }
    WalkDir::new(seeds)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn run_topic(seed_file: &Path, config: &CrawlConfig, output_dir: &Path) -> Result<()> {
    let topic = seed_file
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("topic")
        .to_string();

    let seeds: Vec<String> = fs::read_to_string(seed_file)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    tracing::info!(
        topic = %topic,
        seeds = seeds.len(),
        max_pages = config.max_pages,
        "starting crawl"
    );

    let fetcher = HttpFetcher::new(config.host.clone());
    let mut crawler = Crawler::new(fetcher, LinkFilter::new()?, config.max_pages);
    let progress = crawler.crawl(&seeds)?;
    let state = crawler.into_state();

    output::write_progress(
        &output::topic_path(output_dir, &topic, FILE_INDORDER),
        &progress,
    )?;

    let edges = tfidf::weighted_edges(&state, config.norm_k, config.min_tf_idf)?;
    output::write_edges(&output::topic_path(output_dir, &topic, FILE_EDGELIST), &edges)?;

    let ties = selector::select(&edges, config.top_fraction);
    output::write_strong_ties(
        &output::topic_path(output_dir, &topic, FILE_STRONG_TIES),
        &ties,
    )?;

    tracing::info!(
        topic = %topic,
        visited = state.visited.len(),
        seen = state.seen.len(),
        edges = edges.len(),
        strong_ties = ties.len(),
        "crawl finished"
    );

    Ok(())
}
