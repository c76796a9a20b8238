use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event queue is empty")]
    EmptyQueue,
}

pub type EventResult<T> = Result<T, EventError>;
