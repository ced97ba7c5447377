//! Parent projections embedded in read responses.
//!
//! A child document stores only the identifier of its parent; reads replace it with a
//! small projection of the parent (name and code, or name and number for semesters).
//! When the parent has since been deleted the projection is `null`.

use super::{College, Course, CollegeId, CourseId, Semester, SemesterId, Subject, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// `{ id, name, code }` projection of a college, course or subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef<I> {
    pub id: I,
    pub name: String,
    pub code: String,
}

/// `{ id, name, number }` projection of a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRef {
    pub id: SemesterId,
    pub name: String,
    pub number: u32,
}

impl From<&College> for CodeRef<CollegeId> {
    fn from(c: &College) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            code: c.code.clone(),
        }
    }
}

impl From<&Course> for CodeRef<CourseId> {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            code: c.code.clone(),
        }
    }
}

impl From<&Subject> for CodeRef<SubjectId> {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            code: s.code.clone(),
        }
    }
}

impl From<&Semester> for SemesterRef {
    fn from(s: &Semester) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            number: s.number,
        }
    }
}

/// Projections of fetched parents, keyed by id.
pub struct Projections<I, P> {
    by_id: HashMap<I, P>,
}

impl<I: Eq + Hash, P: Clone> Projections<I, P> {
    pub fn new<T>(parents: &[T], id: impl Fn(&T) -> I) -> Self
    where
        for<'a> P: From<&'a T>,
    {
        let by_id = parents.iter().map(|p| (id(p), P::from(p))).collect();
        Self { by_id }
    }

    /// The projection of `id`, or `None` for an orphaned reference.
    pub fn get(&self, id: &I) -> Option<P> {
        self.by_id.get(id).cloned()
    }
}

/// Distinct ids referenced by `items`, in first-seen order.
pub fn distinct<T, I: Eq + Hash + Copy>(items: &[T], id: impl Fn(&T) -> I) -> Vec<I> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .map(id)
        .filter(|i| seen.insert(*i))
        .collect()
}
