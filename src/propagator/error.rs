use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("elements error: {0}")]
    Elements(String),
    #[error("propagation failed at t={seconds_since_epoch}s: {message}")]
    Propagation {
        seconds_since_epoch: f64,
        message: String,
    },
}
