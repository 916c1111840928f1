use thiserror::Error;

/// Everything that can stop a dataset from loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid dataset url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to fetch CSV data: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("CSV parse error at record {record}: {source}")]
    Parse {
        record: usize,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Fetch(_) | LoadError::InvalidUrl { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }
}
