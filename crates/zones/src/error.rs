use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZoneError>;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Duplicate zone name: {name}")]
    DuplicateName { name: String },

    #[error("Zone set is empty")]
    EmptySet,

    #[error("Zones not recognized by the API: {}", names.join(", "))]
    PhantomZones { names: Vec<String> },

    #[error("Zone {name} already has points")]
    AlreadyEnriched { name: String },

    #[error("Zone not found: {name}")]
    NotFound { name: String },

    #[error("Connection {connection} does not start at zone {zone}")]
    ForeignConnection { zone: String, connection: String },

    #[error("Transport error: {0:#}")]
    Transport(anyhow::Error),
}
