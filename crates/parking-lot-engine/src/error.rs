use thiserror::Error;

/// Errors reported by the allocation engine
///
/// None of them is fatal: an operation that fails leaves the engine exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Also reported for an empty identifier, which can never be admitted
    #[error("vehicle `{vehicle}` is already parked or waiting")]
    DuplicateVehicle { vehicle: String },

    #[error("vehicle {vehicle} not found")]
    VehicleNotFound { vehicle: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
