use cs_core::{CoreError, SimTime, StationId, VehicleId};
use cs_event::EventError;
use cs_variate::VariateError;
use cs_vehicle::KinematicsError;
use thiserror::Error;

/// Everything that can stop the simulator.
///
/// None of these is a normal call outcome: blocked, dropped and completed
/// calls are counted, not raised.  Apart from `EmptyQueue` and the
/// construction-time variants, every error poisons the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("no events scheduled")]
    EmptyQueue,

    #[error("event at {event_time} precedes the clock at {clock}")]
    ClockRegression {
        clock:      SimTime,
        event_time: SimTime,
    },

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error("{vehicle} starts at station index {station}, which is not on the highway")]
    InvalidStation {
        vehicle: VehicleId,
        station: u32,
    },

    #[error("vehicle {0} holds no channel")]
    NotAttached(VehicleId),

    #[error("{0} has no occupied channel to release")]
    ChannelUnderflow(StationId),

    #[error("{0} has no free channel")]
    ChannelOverflow(StationId),

    #[error("simulator halted after an earlier fatal error")]
    Poisoned,

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Variate(#[from] VariateError),
}

impl From<EventError> for SimError {
    fn from(e: EventError) -> Self {
        match e {
            EventError::EmptyQueue => SimError::EmptyQueue,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
