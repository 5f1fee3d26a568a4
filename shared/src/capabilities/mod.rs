mod geolocation;
mod notifications;

pub use self::geolocation::{
    Geolocation, GeolocationError, GeolocationOperation, GeolocationOutput, LocationPermission,
    PermissionResult, PositionResult,
};
pub use self::notifications::{
    Delivery, Notification, NotificationError, NotificationOperation, NotificationOutput,
    NotificationPermission, Notifications, Registration,
};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub geolocation: Geolocation<Event>,
    pub notifications: Notifications<Event>,
}
