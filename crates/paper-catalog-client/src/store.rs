//! The client-side store: one [`ResourceState`] per resource plus transient alerts.
//!
//! Views read a `&CatalogState` snapshot; only [`Store::dispatch`] changes it.

use crate::error::ClientError;
use crate::model::{College, Course, Paper, Semester, Subject};
use crate::state::{ResourceAction, ResourceState};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub msg: String,
    pub kind: AlertKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub colleges: ResourceState<College>,
    pub courses: ResourceState<Course>,
    pub semesters: ResourceState<Semester>,
    pub subjects: ResourceState<Subject>,
    pub papers: ResourceState<Paper>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    College(ResourceAction<College>),
    Course(ResourceAction<Course>),
    Semester(ResourceAction<Semester>),
    Subject(ResourceAction<Subject>),
    Paper(ResourceAction<Paper>),
    SetAlert { msg: String, kind: AlertKind },
    RemoveAlert(u64),
}

#[derive(Debug, Default)]
pub struct Store {
    state: CatalogState,
    next_alert: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::College(a) => self.state.colleges.reduce(a),
            Action::Course(a) => self.state.courses.reduce(a),
            Action::Semester(a) => self.state.semesters.reduce(a),
            Action::Subject(a) => self.state.subjects.reduce(a),
            Action::Paper(a) => self.state.papers.reduce(a),
            Action::SetAlert { msg, kind } => {
                self.next_alert += 1;
                debug!(id = self.next_alert, %msg, "Alert");
                self.state.alerts.push(Alert {
                    id: self.next_alert,
                    msg,
                    kind,
                });
            }
            Action::RemoveAlert(id) => self.state.alerts.retain(|a| a.id != id),
        }
    }

    /// Pushes an alert and returns its id.
    pub fn alert(&mut self, msg: impl Into<String>, kind: AlertKind) -> u64 {
        self.dispatch(Action::SetAlert {
            msg: msg.into(),
            kind,
        });
        self.next_alert
    }

    pub fn dismiss(&mut self, id: u64) {
        self.dispatch(Action::RemoveAlert(id));
    }

    /// One danger alert per field error of `e`.
    pub fn alert_field_errors(&mut self, e: &ClientError) {
        for field in e.field_errors() {
            self.alert(field.msg.clone(), AlertKind::Danger);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    #[test]
    fn alerts_are_numbered_and_dismissed() {
        let mut store = Store::new();
        let first = store.alert("College Added", AlertKind::Success);
        let second = store.alert("Code is required", AlertKind::Danger);
        assert_ne!(first, second);
        assert_eq!(store.state().alerts.len(), 2);

        store.dismiss(first);
        assert_eq!(store.state().alerts.len(), 1);
        assert_eq!(store.state().alerts[0].msg, "Code is required");
    }

    #[test]
    fn each_field_error_becomes_an_alert() {
        let mut store = Store::new();
        let err = ClientError::Api {
            status: 400,
            msg: "Name is required".into(),
            errors: vec![
                FieldError {
                    msg: "Name is required".into(),
                    param: "name".into(),
                },
                FieldError {
                    msg: "Code is required".into(),
                    param: "code".into(),
                },
            ],
        };
        store.alert_field_errors(&err);
        let kinds: Vec<_> = store.state().alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, [AlertKind::Danger, AlertKind::Danger]);
    }
}
