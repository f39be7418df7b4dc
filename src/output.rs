pub mod console;
pub mod csv;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed writing events: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed writing CSV to '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: ::csv::Error,
    },
}
