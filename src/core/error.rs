use thiserror::Error;

use super::scroll_trigger::TriggerId;

/// Failures of the scroll subsystem. All of them are transient from the
/// scene's point of view: callers log them and wait for the next scroll or
/// refresh tick.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScrollError {
    #[error("invalid trigger position {0:?}; expected \"<element-edge> <viewport-edge>\"")]
    InvalidPosition(String),
    #[error("trigger element {0:?} is not laid out")]
    NotLaidOut(String),
    #[error("unknown scroll trigger {0:?}")]
    UnknownTrigger(TriggerId),
    #[error("smooth scroller has been destroyed")]
    Destroyed,
}
