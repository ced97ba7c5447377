//! Per-resource state and its reducer.
//!
//! Every resource namespace holds the same shape, [`ResourceState`], and changes only
//! through [`ResourceState::reduce`]. Actions follow one pattern: `Loading` before a
//! request, then exactly one success action or `Failed`.

use crate::error::ClientError;
use crate::model::Identified;

/// Status code and message of a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub status: Option<u16>,
    pub msg: String,
}

impl From<&ClientError> for RequestError {
    fn from(e: &ClientError) -> Self {
        let msg = match e {
            ClientError::Api { msg, .. } => msg.clone(),
            other => other.to_string(),
        };
        Self {
            status: e.status(),
            msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub loading: bool,
    pub error: Option<RequestError>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction<T> {
    Loading,
    /// A list was fetched.
    ReplaceList(Vec<T>),
    /// A single document was fetched.
    ReplaceCurrent(T),
    Created(T),
    Updated(T),
    Deleted(String),
    Failed(RequestError),
    ClearCurrent,
}

impl<T: Identified + Clone> ResourceState<T> {
    pub fn reduce(&mut self, action: ResourceAction<T>) {
        match action {
            ResourceAction::Loading => self.loading = true,
            ResourceAction::ReplaceList(items) => {
                self.items = items;
                self.settle();
            }
            ResourceAction::ReplaceCurrent(item) => {
                self.current = Some(item);
                self.settle();
            }
            ResourceAction::Created(item) => {
                self.items.insert(0, item);
                self.settle();
            }
            ResourceAction::Updated(item) => {
                for existing in self.items.iter_mut().filter(|i| i.id() == item.id()) {
                    *existing = item.clone();
                }
                if self.current.as_ref().is_some_and(|c| c.id() == item.id()) {
                    self.current = Some(item);
                }
                self.settle();
            }
            ResourceAction::Deleted(id) => {
                self.items.retain(|i| i.id() != id);
                if self.current.as_ref().is_some_and(|c| c.id() == id) {
                    self.current = None;
                }
                self.settle();
            }
            ResourceAction::Failed(error) => {
                self.loading = false;
                self.error = Some(error);
            }
            ResourceAction::ClearCurrent => self.current = None,
        }
    }

    fn settle(&mut self) {
        self.loading = false;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: String,
        title: &'static str,
    }

    impl Identified for Doc {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn doc(id: &str, title: &'static str) -> Doc {
        Doc {
            id: id.to_string(),
            title,
        }
    }

    fn loaded(items: Vec<Doc>) -> ResourceState<Doc> {
        let mut state = ResourceState::default();
        state.reduce(ResourceAction::ReplaceList(items));
        state
    }

    #[test]
    fn created_documents_are_prepended() {
        let mut state = loaded(vec![doc("a", "A")]);
        state.reduce(ResourceAction::Loading);
        assert!(state.loading);
        state.reduce(ResourceAction::Created(doc("b", "B")));
        assert_eq!(state.items, vec![doc("b", "B"), doc("a", "A")]);
        assert!(!state.loading);
    }

    #[test]
    fn updates_replace_in_place() {
        let mut state = loaded(vec![doc("a", "A"), doc("b", "B")]);
        state.reduce(ResourceAction::ReplaceCurrent(doc("b", "B")));
        state.reduce(ResourceAction::Updated(doc("b", "B2")));
        assert_eq!(state.items, vec![doc("a", "A"), doc("b", "B2")]);
        assert_eq!(state.current, Some(doc("b", "B2")));
    }

    #[test]
    fn deletes_filter_out_and_clear_current() {
        let mut state = loaded(vec![doc("a", "A"), doc("b", "B")]);
        state.reduce(ResourceAction::ReplaceCurrent(doc("a", "A")));
        state.reduce(ResourceAction::Deleted("a".into()));
        assert_eq!(state.items, vec![doc("b", "B")]);
        assert_eq!(state.current, None);
    }

    #[test]
    fn failures_stop_loading_and_keep_items() {
        let mut state = loaded(vec![doc("a", "A")]);
        state.reduce(ResourceAction::Loading);
        state.reduce(ResourceAction::Failed(RequestError {
            status: Some(404),
            msg: "Paper not found".into(),
        }));
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_ref().map(|e| e.status), Some(Some(404)));

        state.reduce(ResourceAction::ReplaceList(vec![]));
        assert!(state.error.is_none());
    }

    #[test]
    fn clear_current_keeps_the_list() {
        let mut state = loaded(vec![doc("a", "A")]);
        state.reduce(ResourceAction::ReplaceCurrent(doc("a", "A")));
        state.reduce(ResourceAction::ClearCurrent);
        assert!(state.current.is_none());
        assert_eq!(state.items.len(), 1);
    }
}
