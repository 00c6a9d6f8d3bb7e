//! Unified error types surfaced by the runtime API.
//!
//! Wraps controller rejections and worker coordination failures so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{BattleError, ControllerError, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle event channel closed")]
    EventChannelClosed,

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires battle content to be configured before building")]
    MissingOracles,

    #[error("battle poll interval must be at least 1ms")]
    InvalidPollInterval,

    #[error("battle was stopped before it resolved")]
    BattleStopped,
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Controller(error) => error.severity(),
            Self::BattleStopped => ErrorSeverity::Recoverable,
            Self::MissingOracles | Self::InvalidPollInterval => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::EventChannelClosed
            | Self::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }
}
