use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::capabilities::LocationPermission;
use crate::config::AppConfig;

// --- Typed IDs ---

/// Task identifier. Assigned sequentially starting at 1 and never reused
/// within a session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u32);

impl TaskId {
    pub const FIRST: Self = Self(1);

    /// `None` once the id space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Description: non-blank text ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("description cannot be empty or whitespace")]
pub struct BlankDescription;

impl Description {
    pub fn new(text: impl Into<String>) -> Result<Self, BlankDescription> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(BlankDescription);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = BlankDescription;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub due_date: NaiveDate,
    pub description: Description,
    /// Carried for the shell; nothing in the core toggles it.
    pub completed: bool,
}

/// In-progress form contents, shared by create and edit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Draft {
    pub description: String,
    pub due_date: NaiveDate,
}

impl Draft {
    #[must_use]
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            due_date: today,
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::empty(today);
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Edit)
    }
}

// --- Coordinates: validated, NaN-safe ---

#[derive(Debug, Clone, Copy, Error, PartialEq, Serialize, Deserialize)]
pub enum CoordinateError {
    #[error("coordinates must be finite")]
    NonFinite,
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CityName(pub String);

impl CityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LocationStatus {
    #[default]
    Unqueried,
    Checking,
    Locating(LocationPermission),
    Located,
    Denied,
    Unsupported,
    Failed,
}

impl LocationStatus {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Located)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unqueried => "unqueried",
            Self::Checking => "checking",
            Self::Locating(_) => "locating",
            Self::Located => "located",
            Self::Denied => "denied",
            Self::Unsupported => "unsupported",
            Self::Failed => "failed",
        }
    }
}

/// Session-scoped application state. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct Model {
    pub config: AppConfig,
    pub today: NaiveDate,

    pub tasks: Vec<Task>,
    /// Id the next added task receives. Only ever moves forward.
    pub next_id: TaskId,
    pub selected: Option<TaskId>,
    pub draft: Draft,
    pub mode: FormMode,

    pub location: LocationStatus,
    pub coordinates: Option<Coordinates>,
    pub city: Option<CityName>,
}

impl Model {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            draft: Draft::empty(today),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn location_enabled(&self) -> bool {
        self.location.is_enabled()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}
