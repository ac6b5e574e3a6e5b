use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid grid file: {0}")]
    InvalidFormat(String),

    #[error("Degenerate grid: {0}")]
    DegenerateGrid(String),

    #[error("Grid record out of range: {0}")]
    OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Latitude iteration did not converge within {0} iterations")]
    NotConverged(usize),

    #[error("Non-finite input coordinate: {0}")]
    NonFinite(String),
}
