//! Task list operations over the [`Model`].
//!
//! Each operation either mutates the model and returns the message to notify
//! with, or returns a [`TaskError`] and leaves the model untouched.

use thiserror::Error;
use tracing::info;

use crate::model::{Description, FormMode, Model, Task, TaskId};

pub const TASK_ADDED: &str = "New task added";
pub const TASK_REMOVED: &str = "Task removed";
pub const TASK_EDITED: &str = "Task edited";

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("no task selected")]
    NoSelection,

    #[error("task {0} does not exist")]
    UnknownTask(TaskId),

    #[error("operation not available while {0}")]
    WrongMode(&'static str),

    #[error("no task ids left after {0}")]
    IdsExhausted(TaskId),
}

fn mode_name(mode: FormMode) -> &'static str {
    match mode {
        FormMode::Create => "creating",
        FormMode::Edit => "editing",
    }
}

fn require_mode(model: &Model, mode: FormMode) -> Result<(), TaskError> {
    if model.mode == mode {
        Ok(())
    } else {
        Err(TaskError::WrongMode(mode_name(model.mode)))
    }
}

fn selected_task(model: &Model) -> Result<&Task, TaskError> {
    let id = model.selected.ok_or(TaskError::NoSelection)?;
    model.task(id).ok_or(TaskError::UnknownTask(id))
}

pub fn add(model: &mut Model) -> Result<&'static str, TaskError> {
    require_mode(model, FormMode::Create)?;
    let description = Description::new(model.draft.description.as_str())
        .map_err(|_| TaskError::EmptyDescription)?;

    let id = model.next_id;
    let following = id.next().ok_or(TaskError::IdsExhausted(id))?;

    model.next_id = following;
    model.tasks.push(Task {
        id,
        due_date: model.draft.due_date,
        description,
        completed: false,
    });
    model.draft.reset(model.today);

    info!(task_id = %id, count = model.tasks.len(), "task added");
    Ok(TASK_ADDED)
}

pub fn remove(model: &mut Model) -> Result<&'static str, TaskError> {
    require_mode(model, FormMode::Create)?;
    let id = model.selected.ok_or(TaskError::NoSelection)?;

    let before = model.tasks.len();
    model.tasks.retain(|task| task.id != id);
    if model.tasks.len() == before {
        return Err(TaskError::UnknownTask(id));
    }
    model.selected = None;

    info!(task_id = %id, count = model.tasks.len(), "task removed");
    Ok(TASK_REMOVED)
}

pub fn begin_edit(model: &mut Model) -> Result<(), TaskError> {
    require_mode(model, FormMode::Create)?;
    let task = selected_task(model)?;

    let description = task.description.to_string();
    let due_date = task.due_date;
    let id = task.id;

    model.draft.description = description;
    model.draft.due_date = due_date;
    model.mode = FormMode::Edit;

    info!(task_id = %id, "editing task");
    Ok(())
}

pub fn confirm_edit(model: &mut Model) -> Result<&'static str, TaskError> {
    require_mode(model, FormMode::Edit)?;
    let description = Description::new(model.draft.description.as_str())
        .map_err(|_| TaskError::EmptyDescription)?;
    let id = selected_task(model)?.id;
    let due_date = model.draft.due_date;

    if let Some(task) = model.tasks.iter_mut().find(|task| task.id == id) {
        task.description = description;
        task.due_date = due_date;
    }
    model.draft.reset(model.today);
    model.selected = None;
    model.mode = FormMode::Create;

    info!(task_id = %id, "task edited");
    Ok(TASK_EDITED)
}

/// Leaves edit mode. The draft keeps whatever was typed.
pub fn cancel_edit(model: &mut Model) -> Result<(), TaskError> {
    require_mode(model, FormMode::Edit)?;
    model.mode = FormMode::Create;
    Ok(())
}

pub fn toggle_selection(model: &mut Model, id: TaskId) -> Result<Option<TaskId>, TaskError> {
    if model.task(id).is_none() {
        return Err(TaskError::UnknownTask(id));
    }
    model.selected = if model.selected == Some(id) {
        None
    } else {
        Some(id)
    };
    Ok(model.selected)
}
