use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, GeolocationError, Notification};
use crate::event::Event;
use crate::geocode;
use crate::location;
use crate::model::{Coordinates, LocationStatus, Model};
use crate::tasks::{self, TaskError};
use crate::view::ViewModel;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Default)]
pub struct App;

impl App {
    fn notify(model: &Model, caps: &Capabilities, message: &str) {
        let config = &model.config.notifications;
        caps.notifications.notify(Notification {
            title: config.title.clone(),
            body: message.to_string(),
            icon: config.icon.clone(),
        });
    }

    /// Renders and notifies on success; rejected operations are silent.
    fn apply(
        event_name: &str,
        outcome: Result<&'static str, TaskError>,
        model: &Model,
        caps: &Capabilities,
    ) {
        match outcome {
            Ok(message) => {
                Self::notify(model, caps, message);
                caps.render.render();
            }
            Err(error) => debug!(event = event_name, %error, "ignored"),
        }
    }

    fn start_location(model: &mut Model, caps: &Capabilities) {
        model.location = LocationStatus::Checking;
        caps.geolocation.query_permission(Event::LocationPermission);
    }

    fn lookup_city(model: &Model, caps: &Capabilities, coordinates: Coordinates) {
        let request = match geocode::lookup_request(&model.config.geocoding, coordinates) {
            Ok(request) => request,
            Err(error) => {
                warn!(%error, "reverse geocoding skipped");
                return;
            }
        };

        debug!(url = %request.url, "reverse geocoding");
        let mut builder = caps.http.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        builder.send(move |result| Event::CityResolved {
            coordinates,
            result: geocode::city_from_response(result),
        });
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        debug!(
            event = event_name,
            user = event.is_user_initiated(),
            "handling event"
        );

        match event {
            Event::Mount { today } => {
                model.today = today;
                model.draft.reset(today);
                Self::start_location(model, caps);
                caps.render.render();
            }

            Event::Configure(config) => {
                model.config = *config;
                info!(
                    endpoint = %model.config.geocoding.endpoint,
                    credential = model.config.geocoding.has_credential(),
                    "configuration updated"
                );

                // A position that arrived before the credential still needs its city.
                if let (Some(coordinates), None) = (model.coordinates, &model.city) {
                    Self::lookup_city(model, caps, coordinates);
                }
            }

            Event::DescriptionChanged(text) => {
                model.draft.description = text;
                caps.render.render();
            }

            Event::DueDateChanged(value) => {
                match NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT) {
                    Ok(date) => {
                        model.draft.due_date = date;
                        caps.render.render();
                    }
                    Err(error) => debug!(%value, %error, "ignored unparseable due date"),
                }
            }

            Event::AddTask => Self::apply(event_name, tasks::add(model), model, caps),

            Event::RemoveTask => Self::apply(event_name, tasks::remove(model), model, caps),

            Event::ConfirmEdit => {
                Self::apply(event_name, tasks::confirm_edit(model), model, caps);
            }

            Event::BeginEdit => match tasks::begin_edit(model) {
                Ok(()) => caps.render.render(),
                Err(error) => debug!(event = event_name, %error, "ignored"),
            },

            Event::CancelEdit => match tasks::cancel_edit(model) {
                Ok(()) => caps.render.render(),
                Err(error) => debug!(event = event_name, %error, "ignored"),
            },

            Event::ToggleSelection(id) => match tasks::toggle_selection(model, id) {
                Ok(selected) => {
                    debug!(?selected, "selection changed");
                    caps.render.render();
                }
                Err(error) => debug!(event = event_name, %error, "ignored"),
            },

            Event::LocationPermission(result) => {
                model.location = location::after_permission(&result);
                info!(status = model.location.name(), "location permission resolved");

                if matches!(model.location, LocationStatus::Locating(_)) {
                    caps.geolocation.current_position(Event::PositionResolved);
                }
                caps.render.render();
            }

            Event::PositionResolved(Ok(coordinates)) => {
                let previous = model.coordinates.replace(coordinates);
                model.location = LocationStatus::Located;
                info!("location resolved");

                if location::lookup_needed(previous, coordinates) {
                    Self::lookup_city(model, caps, coordinates);
                }
                caps.render.render();
            }

            Event::PositionResolved(Err(error)) => {
                warn!(%error, "position request failed");
                model.location = match error {
                    GeolocationError::PermissionDenied => LocationStatus::Denied,
                    GeolocationError::Unsupported => LocationStatus::Unsupported,
                    _ => LocationStatus::Failed,
                };
                caps.render.render();
            }

            Event::CityResolved {
                coordinates,
                result,
            } => {
                if model.coordinates != Some(coordinates) {
                    debug!("discarding city for superseded coordinates");
                    return;
                }
                match result {
                    Ok(city) => {
                        info!(%city, "city resolved");
                        model.city = Some(city);
                        caps.render.render();
                    }
                    Err(error) => warn!(%error, "reverse geocoding failed"),
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}
