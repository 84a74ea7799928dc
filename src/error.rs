use crate::math::Rect;
use crate::VehicleId;

/// Errors raised by the intersection simulation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The two roads passed to the geometry builder do not overlap.
    #[error("roads do not overlap: {0:?} and {1:?}")]
    DisjointRoads(Rect, Rect),
    /// The approach boundary factor must be positive and finite.
    #[error("invalid approach boundary factor {0}")]
    InvalidFactor(f64),
    /// An operation referenced a vehicle which does not exist.
    #[error("unknown vehicle {0:?}")]
    UnknownVehicle(VehicleId),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
