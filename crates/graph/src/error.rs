use thiserror::Error;
use turf_zones::ZoneError;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Zone not found in graph: {0}")]
    ZoneNotFound(String),

    #[error(transparent)]
    Zones(#[from] ZoneError),
}
