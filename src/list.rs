//! Employee list view state.

use crate::client::EmployeeDirectory;
use crate::types::{Employee, Route};

pub const LOAD_FAILED: &str = "Failed to load employees. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete employee. Please try again later.";
pub const EMPTY_LIST: &str = "No employees found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Employee>),
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Deleted,
    Failed,
}

pub struct ListController {
    state: ListState,
    deleting: Option<i64>,
    error: Option<String>,
}

impl Default for ListController {
    fn default() -> Self {
        Self {
            state: ListState::Loading,
            deleting: None,
            error: None,
        }
    }
}

impl ListController {
    /// Build the view and fetch the collection.
    pub async fn mount<D>(directory: &D) -> Self
    where
        D: EmployeeDirectory + ?Sized,
    {
        let mut controller = Self::default();
        controller.refresh(directory).await;
        controller
    }

    pub async fn refresh<D>(&mut self, directory: &D)
    where
        D: EmployeeDirectory + ?Sized,
    {
        self.state = ListState::Loading;
        self.state = match directory.list().await {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "employees loaded");
                ListState::Loaded(employees)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load employees");
                ListState::LoadFailed(LOAD_FAILED.to_string())
            }
        };
    }

    /// Delete `id` once `confirm` agrees, then refetch the collection.
    ///
    /// `pending` sees the view with the row's delete disabled, right before the
    /// request goes out.
    pub async fn delete<D, F, P>(
        &mut self,
        directory: &D,
        id: i64,
        confirm: F,
        pending: P,
    ) -> DeleteOutcome
    where
        D: EmployeeDirectory + ?Sized,
        F: FnOnce(i64) -> bool,
        P: FnOnce(&Self),
    {
        if !confirm(id) {
            return DeleteOutcome::Cancelled;
        }

        self.error = None;
        self.deleting = Some(id);
        pending(&*self);
        let result = directory.delete(id).await;
        self.deleting = None;

        match result {
            Ok(()) => {
                tracing::info!(id, "employee deleted");
                self.refresh(directory).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete employee");
                self.error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Banner for a failed load or delete.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::LoadFailed(message) => Some(message.as_str()),
            _ => self.error.as_deref(),
        }
    }

    /// Loaded rows; empty while loading or after a failed load.
    pub fn rows(&self) -> &[Employee] {
        match &self.state {
            ListState::Loaded(employees) => employees.as_slice(),
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.state, ListState::Loaded(employees) if employees.is_empty())
    }

    pub fn is_delete_disabled(&self, id: i64) -> bool {
        self.deleting == Some(id)
    }

    pub fn add_route(&self) -> Route {
        Route::AddEmployee
    }

    pub fn edit_route(&self, id: i64) -> Route {
        Route::UpdateEmployee(id)
    }
}
