use serde::{Deserialize, Serialize};

use crate::model::{Model, Task};

pub const LOCATION_PROMPT: &str = "(Please enable your location services)";

/// Buttons the shell should offer for the current form mode.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Remove,
    Edit,
    ConfirmEdit,
    CancelEdit,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskView {
    pub id: u32,
    pub description: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    pub selected: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub draft_description: String,
    pub draft_due_date: String,
    pub editing: bool,
    pub actions: Vec<FormAction>,
    pub tasks: Vec<TaskView>,
    pub location_enabled: bool,
    pub city: Option<String>,
    pub location_line: String,
}

fn task_view(task: &Task, model: &Model) -> TaskView {
    TaskView {
        id: task.id.get(),
        description: task.description.to_string(),
        due_date: task.due_date.format("%Y-%m-%d").to_string(),
        selected: model.selected == Some(task.id),
        completed: task.completed,
    }
}

fn location_line(model: &Model) -> String {
    if !model.location_enabled() {
        return LOCATION_PROMPT.to_string();
    }
    match &model.city {
        Some(city) => format!("Your Location: {city}"),
        None => "Your Location:".to_string(),
    }
}

impl ViewModel {
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        let editing = model.mode.is_editing();
        let actions = if editing {
            vec![FormAction::ConfirmEdit, FormAction::CancelEdit]
        } else {
            vec![FormAction::Add, FormAction::Remove, FormAction::Edit]
        };

        Self {
            draft_description: model.draft.description.clone(),
            draft_due_date: model.draft.due_date.format("%Y-%m-%d").to_string(),
            editing,
            actions,
            tasks: model.tasks.iter().map(|task| task_view(task, model)).collect(),
            location_enabled: model.location_enabled(),
            city: model.city.as_ref().map(ToString::to_string),
            location_line: location_line(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CityName, Description, FormMode, LocationStatus, TaskId};
    use chrono::NaiveDate;

    fn model() -> Model {
        let mut model = Model::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        model.tasks.push(Task {
            id: TaskId(1),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            description: Description::new("Buy milk").unwrap(),
            completed: false,
        });
        model
    }

    #[test]
    fn create_mode_offers_add_remove_edit() {
        let view = ViewModel::from_model(&model());
        assert!(!view.editing);
        assert_eq!(
            view.actions,
            vec![FormAction::Add, FormAction::Remove, FormAction::Edit]
        );
        assert_eq!(view.draft_due_date, "2024-01-01");
    }

    #[test]
    fn edit_mode_offers_confirm_cancel() {
        let mut model = model();
        model.mode = FormMode::Edit;
        let view = ViewModel::from_model(&model);
        assert_eq!(
            view.actions,
            vec![FormAction::ConfirmEdit, FormAction::CancelEdit]
        );
    }

    #[test]
    fn tasks_render_with_day_granularity_and_selection() {
        let mut model = model();
        model.selected = Some(TaskId(1));
        let view = ViewModel::from_model(&model);
        assert_eq!(
            view.tasks,
            vec![TaskView {
                id: 1,
                description: "Buy milk".into(),
                due_date: "2024-02-29".into(),
                selected: true,
                completed: false,
            }]
        );
    }

    #[test]
    fn location_line_prompts_until_located() {
        let mut model = model();
        assert_eq!(ViewModel::from_model(&model).location_line, LOCATION_PROMPT);

        model.location = LocationStatus::Denied;
        model.city = Some(CityName::new("Stale"));
        assert_eq!(ViewModel::from_model(&model).location_line, LOCATION_PROMPT);

        model.location = LocationStatus::Located;
        model.city = None;
        assert_eq!(ViewModel::from_model(&model).location_line, "Your Location:");

        model.city = Some(CityName::new("Lisbon"));
        let view = ViewModel::from_model(&model);
        assert_eq!(view.location_line, "Your Location: Lisbon");
        assert_eq!(view.city.as_deref(), Some("Lisbon"));
        assert!(view.location_enabled);
    }
}
