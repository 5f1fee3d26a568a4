use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::capabilities::{PermissionResult, PositionResult};
use crate::config::AppConfig;
use crate::geocode::GeocodeError;
use crate::model::{CityName, Coordinates, TaskId};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    // Lifecycle
    Mount {
        today: NaiveDate,
    },
    Configure(Box<AppConfig>),

    // Form input
    DescriptionChanged(String),
    DueDateChanged(String),

    // Task list
    AddTask,
    RemoveTask,
    BeginEdit,
    ConfirmEdit,
    CancelEdit,
    ToggleSelection(TaskId),

    // Capability responses
    LocationPermission(PermissionResult),
    PositionResolved(PositionResult),
    CityResolved {
        coordinates: Coordinates,
        result: Result<CityName, GeocodeError>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount { .. } => "mount",
            Self::Configure(_) => "configure",
            Self::DescriptionChanged(_) => "description_changed",
            Self::DueDateChanged(_) => "due_date_changed",
            Self::AddTask => "add_task",
            Self::RemoveTask => "remove_task",
            Self::BeginEdit => "begin_edit",
            Self::ConfirmEdit => "confirm_edit",
            Self::CancelEdit => "cancel_edit",
            Self::ToggleSelection(_) => "toggle_selection",
            Self::LocationPermission(_) => "location_permission",
            Self::PositionResolved(_) => "position_resolved",
            Self::CityResolved { .. } => "city_resolved",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::DescriptionChanged(_)
                | Self::DueDateChanged(_)
                | Self::AddTask
                | Self::RemoveTask
                | Self::BeginEdit
                | Self::ConfirmEdit
                | Self::CancelEdit
                | Self::ToggleSelection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(
            size <= 96,
            "Event enum is {} bytes, box the large variants",
            size
        );
    }

    #[test]
    fn user_initiated_events_are_form_actions() {
        assert!(Event::AddTask.is_user_initiated());
        assert!(Event::ToggleSelection(TaskId(3)).is_user_initiated());
        assert!(!Event::PositionResolved(Err(
            crate::capabilities::GeolocationError::Timeout
        ))
        .is_user_initiated());
    }

    #[test]
    fn shell_events_deserialize() {
        let event: Event = serde_json::from_str(r#"{"Mount":{"today":"2024-01-01"}}"#).unwrap();
        assert!(matches!(event, Event::Mount { today } if today == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));

        let event: Event = serde_json::from_str(r#"{"ToggleSelection":2}"#).unwrap();
        assert!(matches!(event, Event::ToggleSelection(TaskId(2))));
    }
}
