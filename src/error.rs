#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Failed to fetch page '{page}'")]
    Fetch {
        page: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No document frequency recorded for link target '{0}'")]
    MissingDocumentFrequency(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
