//! Async actions: each issues one API call and records the outcome in the [`Store`].
//!
//! Every action dispatches `Loading` first and then either the success payload or
//! `Failed`. Failed mutations also turn their field errors into danger alerts, and
//! successful mutations push a success alert such as `"Paper Added"`.

use crate::api::CatalogApi;
use crate::error::ClientError;
use crate::model::*;
use crate::state::{RequestError, ResourceAction};
use crate::store::{Action, AlertKind, Store};
use std::future::Future;
use tracing::warn;

async fn perform<R, T, Fut>(
    store: &mut Store,
    wrap: fn(ResourceAction<R>) -> Action,
    request: Fut,
    done: impl FnOnce(T) -> ResourceAction<R>,
    success: Option<&str>,
) -> Result<(), ClientError>
where
    Fut: Future<Output = Result<T, ClientError>>,
{
    store.dispatch(wrap(ResourceAction::Loading));
    match request.await {
        Ok(value) => {
            store.dispatch(wrap(done(value)));
            if let Some(msg) = success {
                store.alert(msg, AlertKind::Success);
            }
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Request failed");
            store.alert_field_errors(&e);
            store.dispatch(wrap(ResourceAction::Failed(RequestError::from(&e))));
            Err(e)
        }
    }
}

// --- Colleges ---

pub async fn get_colleges(store: &mut Store, api: &CatalogApi) -> Result<(), ClientError> {
    perform(store, Action::College, api.colleges(), ResourceAction::ReplaceList, None).await
}

pub async fn get_college(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    perform(store, Action::College, api.college(id), ResourceAction::ReplaceCurrent, None).await
}

pub async fn add_college(
    store: &mut Store,
    api: &CatalogApi,
    input: &CollegeInput,
) -> Result<(), ClientError> {
    let request = api.create_college(input);
    perform(store, Action::College, request, ResourceAction::Created, Some("College Added")).await
}

pub async fn update_college(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
    input: &CollegeInput,
) -> Result<(), ClientError> {
    let request = api.update_college(id, input);
    perform(store, Action::College, request, ResourceAction::Updated, Some("College Updated")).await
}

pub async fn delete_college(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    let done = |_: String| ResourceAction::Deleted(id.to_string());
    perform(store, Action::College, api.delete_college(id), done, Some("College Removed")).await
}

// --- Courses ---

pub async fn get_courses(store: &mut Store, api: &CatalogApi) -> Result<(), ClientError> {
    perform(store, Action::Course, api.courses(), ResourceAction::ReplaceList, None).await
}

pub async fn get_courses_by_college(
    store: &mut Store,
    api: &CatalogApi,
    college: &str,
) -> Result<(), ClientError> {
    let request = api.courses_by_college(college);
    perform(store, Action::Course, request, ResourceAction::ReplaceList, None).await
}

pub async fn get_course(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    perform(store, Action::Course, api.course(id), ResourceAction::ReplaceCurrent, None).await
}

pub async fn add_course(
    store: &mut Store,
    api: &CatalogApi,
    input: &CourseInput,
) -> Result<(), ClientError> {
    let request = api.create_course(input);
    perform(store, Action::Course, request, ResourceAction::Created, Some("Course Added")).await
}

pub async fn update_course(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
    input: &CourseInput,
) -> Result<(), ClientError> {
    let request = api.update_course(id, input);
    perform(store, Action::Course, request, ResourceAction::Updated, Some("Course Updated")).await
}

pub async fn delete_course(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    let done = |_: String| ResourceAction::Deleted(id.to_string());
    perform(store, Action::Course, api.delete_course(id), done, Some("Course Removed")).await
}

// --- Semesters ---

pub async fn get_semesters(store: &mut Store, api: &CatalogApi) -> Result<(), ClientError> {
    perform(store, Action::Semester, api.semesters(), ResourceAction::ReplaceList, None).await
}

pub async fn get_semesters_by_course(
    store: &mut Store,
    api: &CatalogApi,
    course: &str,
) -> Result<(), ClientError> {
    let request = api.semesters_by_course(course);
    perform(store, Action::Semester, request, ResourceAction::ReplaceList, None).await
}

pub async fn get_semester(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    perform(store, Action::Semester, api.semester(id), ResourceAction::ReplaceCurrent, None).await
}

pub async fn add_semester(
    store: &mut Store,
    api: &CatalogApi,
    input: &SemesterInput,
) -> Result<(), ClientError> {
    let request = api.create_semester(input);
    perform(store, Action::Semester, request, ResourceAction::Created, Some("Semester Added")).await
}

pub async fn update_semester(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
    input: &SemesterInput,
) -> Result<(), ClientError> {
    let request = api.update_semester(id, input);
    let success = Some("Semester Updated");
    perform(store, Action::Semester, request, ResourceAction::Updated, success).await
}

pub async fn delete_semester(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    let done = |_: String| ResourceAction::Deleted(id.to_string());
    perform(store, Action::Semester, api.delete_semester(id), done, Some("Semester Removed")).await
}

// --- Subjects ---

pub async fn get_subjects(store: &mut Store, api: &CatalogApi) -> Result<(), ClientError> {
    perform(store, Action::Subject, api.subjects(), ResourceAction::ReplaceList, None).await
}

pub async fn get_subjects_by_semester(
    store: &mut Store,
    api: &CatalogApi,
    semester: &str,
) -> Result<(), ClientError> {
    let request = api.subjects_by_semester(semester);
    perform(store, Action::Subject, request, ResourceAction::ReplaceList, None).await
}

pub async fn get_subjects_by_course(
    store: &mut Store,
    api: &CatalogApi,
    course: &str,
) -> Result<(), ClientError> {
    let request = api.subjects_by_course(course);
    perform(store, Action::Subject, request, ResourceAction::ReplaceList, None).await
}

pub async fn get_subject(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    perform(store, Action::Subject, api.subject(id), ResourceAction::ReplaceCurrent, None).await
}

pub async fn add_subject(
    store: &mut Store,
    api: &CatalogApi,
    input: &SubjectInput,
) -> Result<(), ClientError> {
    let request = api.create_subject(input);
    perform(store, Action::Subject, request, ResourceAction::Created, Some("Subject Added")).await
}

pub async fn update_subject(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
    input: &SubjectInput,
) -> Result<(), ClientError> {
    let request = api.update_subject(id, input);
    perform(store, Action::Subject, request, ResourceAction::Updated, Some("Subject Updated")).await
}

pub async fn delete_subject(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    let done = |_: String| ResourceAction::Deleted(id.to_string());
    perform(store, Action::Subject, api.delete_subject(id), done, Some("Subject Removed")).await
}

// --- Papers ---

pub async fn get_papers(store: &mut Store, api: &CatalogApi) -> Result<(), ClientError> {
    perform(store, Action::Paper, api.papers(), ResourceAction::ReplaceList, None).await
}

pub async fn filter_papers(
    store: &mut Store,
    api: &CatalogApi,
    query: &PaperQuery,
) -> Result<(), ClientError> {
    let request = api.filter_papers(query);
    perform(store, Action::Paper, request, ResourceAction::ReplaceList, None).await
}

pub async fn get_paper(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    perform(store, Action::Paper, api.paper(id), ResourceAction::ReplaceCurrent, None).await
}

pub async fn add_paper(
    store: &mut Store,
    api: &CatalogApi,
    upload: &PaperUpload,
) -> Result<(), ClientError> {
    let request = api.upload_paper(upload);
    perform(store, Action::Paper, request, ResourceAction::Created, Some("Paper Added")).await
}

pub async fn update_paper(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
    changes: &PaperChanges,
) -> Result<(), ClientError> {
    let request = api.update_paper(id, changes);
    perform(store, Action::Paper, request, ResourceAction::Updated, Some("Paper Updated")).await
}

pub async fn delete_paper(store: &mut Store, api: &CatalogApi, id: &str) -> Result<(), ClientError> {
    let done = |_: String| ResourceAction::Deleted(id.to_string());
    perform(store, Action::Paper, api.delete_paper(id), done, Some("Paper Removed")).await
}

/// Downloads a paper's PDF, then refreshes the paper so the stored download count
/// includes this download. A failed download is recorded like any other request; a
/// failed refresh only leaves the count stale.
pub async fn download_paper(
    store: &mut Store,
    api: &CatalogApi,
    id: &str,
) -> Result<PaperFile, ClientError> {
    let file = match api.download_paper(id).await {
        Ok(file) => file,
        Err(e) => {
            store.dispatch(Action::Paper(ResourceAction::Failed(RequestError::from(&e))));
            return Err(e);
        }
    };
    match api.paper(id).await {
        Ok(paper) => store.dispatch(Action::Paper(ResourceAction::Updated(paper))),
        Err(e) => warn!(error = %e, id, "Could not refresh paper after download"),
    }
    Ok(file)
}
