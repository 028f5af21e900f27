use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown sweep: id={0}")]
    UnknownSweep(usize),

    #[error("sweep {0} is not bound to an axis")]
    SweepAxisUnbound(usize),

    #[error("sweep {0} follows an axis without size or distinct bounds")]
    SweepAxisNotReady(usize),

    #[error("sweep {0} does not accept drag input")]
    SweepLocked(usize),
}
