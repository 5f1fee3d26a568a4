use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Granted,
    Denied,
    #[default]
    Default,
}

impl NotificationPermission {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    #[must_use]
    pub const fn is_denied(self) -> bool {
        matches!(self, Self::Denied)
    }

    #[must_use]
    pub const fn needs_request(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// An active background (service-worker style) registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub supports_show_notification: bool,
}

/// Where the shell should display the notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Registration,
    Direct,
}

impl Delivery {
    #[must_use]
    pub fn for_registration(registration: Option<Registration>) -> Self {
        match registration {
            Some(registration) if registration.supports_show_notification => Self::Registration,
            _ => Self::Direct,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "data")]
pub enum NotificationOperation {
    GetRegistration,
    GetPermission,
    RequestPermission,
    Show {
        delivery: Delivery,
        notification: Notification,
    },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notifications are not available on this platform")]
    Unsupported,

    #[error("registration lookup failed: {message}")]
    RegistrationLookup { message: String },

    #[error("unexpected shell response to {operation}")]
    UnexpectedOutput { operation: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum NotificationOutput {
    Registration(Option<Registration>),
    Permission(NotificationPermission),
    Shown,
    Error(NotificationError),
}

impl Operation for NotificationOperation {
    type Output = NotificationOutput;
}

impl NotificationOutput {
    fn into_registration(self) -> Result<Option<Registration>, NotificationError> {
        match self {
            Self::Registration(registration) => Ok(registration),
            Self::Error(error) => Err(error),
            _ => Err(NotificationError::UnexpectedOutput {
                operation: "GetRegistration".into(),
            }),
        }
    }

    fn into_permission(self, operation: &str) -> Result<NotificationPermission, NotificationError> {
        match self {
            Self::Permission(permission) => Ok(permission),
            Self::Error(error) => Err(error),
            _ => Err(NotificationError::UnexpectedOutput {
                operation: operation.into(),
            }),
        }
    }
}

/// Fire-and-forget local notifications, gated by the platform permission.
#[derive(Capability)]
pub struct Notifications<Ev> {
    context: CapabilityContext<NotificationOperation, Ev>,
}

impl<Ev> Notifications<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NotificationOperation, Ev>) -> Self {
        Self { context }
    }

    /// Looks up the registration, checks (and if undecided, requests) the
    /// permission, then shows the notification. Failures are logged and end
    /// the dispatch; nothing is reported back to the app.
    pub fn notify(&self, notification: Notification) {
        let context = self.context.clone();
        self.context.spawn(async move {
            let registration = match context
                .request_from_shell(NotificationOperation::GetRegistration)
                .await
                .into_registration()
            {
                Ok(registration) => registration,
                Err(error) => {
                    warn!(%error, "notification dispatch aborted");
                    return;
                }
            };

            let permission = match context
                .request_from_shell(NotificationOperation::GetPermission)
                .await
                .into_permission("GetPermission")
            {
                Ok(permission) => permission,
                Err(error) => {
                    warn!(%error, "notification dispatch aborted");
                    return;
                }
            };

            let permission = if permission.needs_request() {
                match context
                    .request_from_shell(NotificationOperation::RequestPermission)
                    .await
                    .into_permission("RequestPermission")
                {
                    Ok(permission) => permission,
                    Err(error) => {
                        warn!(%error, "notification permission request failed");
                        return;
                    }
                }
            } else {
                permission
            };

            if !permission.is_granted() {
                debug!(?permission, "notification skipped");
                return;
            }

            let delivery = Delivery::for_registration(registration);
            context
                .notify_shell(NotificationOperation::Show {
                    delivery,
                    notification,
                })
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_state_checks() {
        assert!(NotificationPermission::Granted.is_granted());
        assert!(!NotificationPermission::Default.is_granted());

        assert!(NotificationPermission::Denied.is_denied());
        assert!(!NotificationPermission::Granted.is_denied());

        assert!(NotificationPermission::Default.needs_request());
        assert!(!NotificationPermission::Denied.needs_request());
        assert!(!NotificationPermission::Granted.needs_request());
    }

    #[test]
    fn delivery_prefers_capable_registration() {
        assert_eq!(
            Delivery::for_registration(Some(Registration {
                supports_show_notification: true
            })),
            Delivery::Registration
        );
        assert_eq!(
            Delivery::for_registration(Some(Registration {
                supports_show_notification: false
            })),
            Delivery::Direct
        );
        assert_eq!(Delivery::for_registration(None), Delivery::Direct);
    }

    #[test]
    fn output_helpers_reject_mismatched_variants() {
        assert!(matches!(
            NotificationOutput::Shown.into_registration(),
            Err(NotificationError::UnexpectedOutput { .. })
        ));
        assert_eq!(
            NotificationOutput::Error(NotificationError::Unsupported)
                .into_permission("GetPermission"),
            Err(NotificationError::Unsupported)
        );
        assert_eq!(
            NotificationOutput::Registration(None).into_registration(),
            Ok(None)
        );
    }

    #[test]
    fn show_operation_serialization() {
        let op = NotificationOperation::Show {
            delivery: Delivery::Direct,
            notification: Notification {
                title: "The List".into(),
                body: "New task added".into(),
                icon: "/icon-192x192.png".into(),
            },
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains(r#""op":"Show""#));
        assert!(json.contains(r#""delivery":"direct""#));
        let back: NotificationOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
