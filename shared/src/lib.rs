//! Shared core for the task board: a to-do list with deadlines, local
//! notifications on change, and an approximate city from device location.
//!
//! The core is a Crux app. It holds all state in [`Model`], reacts to
//! [`Event`]s, and asks the shell for side effects through [`Capabilities`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod geocode;
pub mod location;
pub mod model;
pub mod shell;
pub mod tasks;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::AppConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{CityName, Coordinates, Description, FormMode, LocationStatus, Model, Task, TaskId};
pub use view::{FormAction, TaskView, ViewModel};
