use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("keyword must not be empty")]
    EmptyKeyword,

    #[error("record {index} matched but has no '|' separator: {record:?}")]
    MalformedRecord { index: usize, record: String },
}

pub type Result<T> = std::result::Result<T, Error>;
