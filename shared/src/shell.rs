//! Headless shell.
//!
//! Drives the core the way a platform shell does: dispatch an event, service
//! every effect through a provider, resolve, and keep going until the core
//! stops asking. Effects are serviced one at a time in the order they were
//! produced, matching the single-threaded event loop of a UI runtime.

use std::collections::VecDeque;

use async_trait::async_trait;
use crux_core::Core;
use crux_http::protocol::{HttpRequest, HttpResult};
use tracing::{debug, trace};

use crate::app::App;
use crate::capabilities::{
    Capabilities, Delivery, Effect, GeolocationError, GeolocationOperation, GeolocationOutput,
    LocationPermission, Notification, NotificationError, NotificationOperation,
    NotificationOutput, NotificationPermission, Registration,
};
use crate::event::Event;
use crate::model::Coordinates;
use crate::view::ViewModel;

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn permission(&self) -> Result<LocationPermission, GeolocationError>;

    /// Raw `(latitude, longitude)` as reported by the platform.
    async fn current_position(&self) -> Result<(f64, f64), GeolocationError>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn registration(&self) -> Result<Option<Registration>, NotificationError>;
    async fn permission(&self) -> Result<NotificationPermission, NotificationError>;
    async fn request_permission(&self) -> Result<NotificationPermission, NotificationError>;
    async fn show(&self, delivery: Delivery, notification: &Notification);
}

/// Performs the reverse-geocoding HTTP call. Transport failures come back as
/// `HttpResult::Err`; any status the server sent is an `HttpResult::Ok`.
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> HttpResult;
}

pub struct Shell<L, N, G> {
    core: Core<Effect, App>,
    location: L,
    notifications: N,
    geocoder: G,
    renders: usize,
}

impl<L, N, G> Shell<L, N, G>
where
    L: LocationProvider,
    N: NotificationSink,
    G: GeocodingClient,
{
    pub fn new(location: L, notifications: N, geocoder: G) -> Self {
        Self {
            core: Core::new::<Capabilities>(),
            location,
            notifications,
            geocoder,
            renders: 0,
        }
    }

    pub async fn dispatch(&mut self, event: Event) {
        debug!(event = event.name(), "shell dispatch");
        let mut queue: VecDeque<Effect> = self.core.process_event(event).into();
        while let Some(effect) = queue.pop_front() {
            queue.extend(self.service(effect).await);
        }
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    async fn service(&mut self, effect: Effect) -> Vec<Effect> {
        match effect {
            Effect::Render(_) => {
                self.renders += 1;
                Vec::new()
            }

            Effect::Http(mut request) => {
                trace!(url = %request.operation.url, "http");
                let result = self.geocoder.get(&request.operation).await;
                self.core.resolve(&mut request, result)
            }

            Effect::Geolocation(mut request) => {
                let output = match &request.operation {
                    GeolocationOperation::QueryPermission => {
                        match self.location.permission().await {
                            Ok(permission) => GeolocationOutput::Permission(permission),
                            Err(error) => GeolocationOutput::Error(error),
                        }
                    }
                    GeolocationOperation::CurrentPosition => {
                        match self.location.current_position().await.and_then(
                            |(latitude, longitude)| {
                                Coordinates::new(latitude, longitude).map_err(|e| {
                                    GeolocationError::InvalidCoordinates {
                                        message: e.to_string(),
                                    }
                                })
                            },
                        ) {
                            Ok(coordinates) => GeolocationOutput::Position(coordinates),
                            Err(error) => GeolocationOutput::Error(error),
                        }
                    }
                };
                self.core.resolve(&mut request, output)
            }

            Effect::Notifications(mut request) => {
                let output = match &request.operation {
                    NotificationOperation::GetRegistration => {
                        match self.notifications.registration().await {
                            Ok(registration) => NotificationOutput::Registration(registration),
                            Err(error) => NotificationOutput::Error(error),
                        }
                    }
                    NotificationOperation::GetPermission => {
                        permission_output(self.notifications.permission().await)
                    }
                    NotificationOperation::RequestPermission => {
                        permission_output(self.notifications.request_permission().await)
                    }
                    // Fire-and-forget: nothing to resolve.
                    NotificationOperation::Show {
                        delivery,
                        notification,
                    } => {
                        self.notifications.show(*delivery, notification).await;
                        return Vec::new();
                    }
                };
                self.core.resolve(&mut request, output)
            }
        }
    }
}

fn permission_output(
    result: Result<NotificationPermission, NotificationError>,
) -> NotificationOutput {
    match result {
        Ok(permission) => NotificationOutput::Permission(permission),
        Err(error) => NotificationOutput::Error(error),
    }
}
