//! Geolocation resolver transitions.
//!
//! `Unqueried -> Checking -> {Locating, Denied, Unsupported, Failed}`, then
//! `Locating -> {Located, Failed}`.

use tracing::{info, warn};

use crate::capabilities::{GeolocationError, PermissionResult};
use crate::model::{Coordinates, LocationStatus};

/// Status after the permission query answered.
#[must_use]
pub fn after_permission(result: &PermissionResult) -> LocationStatus {
    match result {
        Ok(permission) if permission.may_request_position() => {
            LocationStatus::Locating(*permission)
        }
        Ok(_) | Err(GeolocationError::PermissionDenied) => {
            info!("location permission denied");
            LocationStatus::Denied
        }
        Err(GeolocationError::Unsupported) => {
            info!("geolocation is not supported");
            LocationStatus::Unsupported
        }
        Err(error) => {
            warn!(%error, "location permission query failed");
            LocationStatus::Failed
        }
    }
}

/// A lookup is due whenever the coordinate pair differs from the last one.
#[must_use]
pub fn lookup_needed(previous: Option<Coordinates>, next: Coordinates) -> bool {
    previous != Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::LocationPermission;

    #[test]
    fn granted_and_prompt_move_to_locating() {
        assert_eq!(
            after_permission(&Ok(LocationPermission::Granted)),
            LocationStatus::Locating(LocationPermission::Granted)
        );
        assert_eq!(
            after_permission(&Ok(LocationPermission::Prompt)),
            LocationStatus::Locating(LocationPermission::Prompt)
        );
    }

    #[test]
    fn denied_and_unsupported_disable_location() {
        assert_eq!(
            after_permission(&Ok(LocationPermission::Denied)),
            LocationStatus::Denied
        );
        assert_eq!(
            after_permission(&Err(GeolocationError::PermissionDenied)),
            LocationStatus::Denied
        );
        assert_eq!(
            after_permission(&Err(GeolocationError::Unsupported)),
            LocationStatus::Unsupported
        );
        assert_eq!(
            after_permission(&Err(GeolocationError::Timeout)),
            LocationStatus::Failed
        );
    }

    #[test]
    fn either_coordinate_changing_triggers_lookup() {
        let a = Coordinates::new(10.0, 20.0).unwrap();
        let same_lat = Coordinates::new(10.0, 21.0).unwrap();

        assert!(lookup_needed(None, a));
        assert!(!lookup_needed(Some(a), a));
        assert!(lookup_needed(Some(a), same_lat));
    }
}
