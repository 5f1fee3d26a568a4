use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Coordinates;

/// Permission states reported by the platform's permission query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationPermission {
    Granted,
    Prompt,
    Denied,
}

impl LocationPermission {
    /// Granted and prompt-eligible both proceed to a position request; the
    /// platform shows its own prompt in the latter case.
    #[must_use]
    pub const fn may_request_position(self) -> bool {
        matches!(self, Self::Granted | Self::Prompt)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Prompt => "prompt",
            Self::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op")]
pub enum GeolocationOperation {
    QueryPermission,
    CurrentPosition,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {message}")]
    PositionUnavailable { message: String },

    #[error("position request timed out")]
    Timeout,

    #[error("invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    #[error("unexpected shell response to {operation}")]
    UnexpectedOutput { operation: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum GeolocationOutput {
    Permission(LocationPermission),
    Position(Coordinates),
    Error(GeolocationError),
}

impl Operation for GeolocationOperation {
    type Output = GeolocationOutput;
}

pub type PermissionResult = Result<LocationPermission, GeolocationError>;

pub type PositionResult = Result<Coordinates, GeolocationError>;

impl GeolocationOutput {
    fn into_permission(self) -> PermissionResult {
        match self {
            Self::Permission(permission) => Ok(permission),
            Self::Error(error) => Err(error),
            Self::Position(_) => Err(GeolocationError::UnexpectedOutput {
                operation: "QueryPermission".into(),
            }),
        }
    }

    fn into_position(self) -> PositionResult {
        match self {
            Self::Position(coordinates) => Ok(coordinates),
            Self::Error(error) => Err(error),
            Self::Permission(_) => Err(GeolocationError::UnexpectedOutput {
                operation: "CurrentPosition".into(),
            }),
        }
    }
}

/// Single-shot access to the device location. There is no continuous watch.
#[derive(Capability)]
pub struct Geolocation<Ev> {
    context: CapabilityContext<GeolocationOperation, Ev>,
}

impl<Ev> Geolocation<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<GeolocationOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn query_permission<F>(&self, callback: F)
    where
        F: FnOnce(PermissionResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let output = context
                .request_from_shell(GeolocationOperation::QueryPermission)
                .await;
            context.update_app(callback(output.into_permission()));
        });
    }

    pub fn current_position<F>(&self, callback: F)
    where
        F: FnOnce(PositionResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let output = context
                .request_from_shell(GeolocationOperation::CurrentPosition)
                .await;
            context.update_app(callback(output.into_position()));
        });
    }
}
