use cs_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KinematicsError {
    #[error("vehicle {0} has zero velocity and no direction of travel")]
    InvalidDirection(VehicleId),
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;
