//! # Catalog Lifecycle
//!
//! Creates the five actors, wires their contexts together and shuts them down again.
//!
//! ## Wiring
//!
//! Actors are constructed without dependencies and receive them when started
//! (`run(context)`). The dependency graph points strictly upwards:
//!
//! ```text
//! College  <- Course <- Semester <- Subject
//!    ^          ^          ^          ^
//!    +----------+----- Paper ---------+
//! ```
//!
//! ## Graceful Shutdown
//!
//! Dropping every [`Catalog`] handle closes the paper actor's channel first. As each
//! actor exits it drops its context, which holds the last clients of the actors above
//! it, so the whole system drains from the bottom up. The graph is acyclic, so no
//! explicit shutdown message is needed.

use crate::clients::{CollegeClient, CourseClient, PaperClient, SemesterClient, SubjectClient};
use crate::paper_actor::PaperContext;
use crate::storage::UploadStore;
use crate::subject_actor::SubjectContext;
use crate::{college_actor, course_actor, paper_actor, semester_actor, subject_actor};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Typed clients of every catalog collection. Cheap to clone; the HTTP layer keeps one
/// in its state.
#[derive(Clone)]
pub struct Catalog {
    pub colleges: CollegeClient,
    pub courses: CourseClient,
    pub semesters: SemesterClient,
    pub subjects: SubjectClient,
    pub papers: PaperClient,
}

/// The running actors together with their clients.
pub struct CatalogSystem {
    pub catalog: Catalog,
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns all actors. `buffer` is the channel capacity of each actor.
    pub fn new(uploads: UploadStore, buffer: usize) -> Self {
        let (college_actor, colleges) = college_actor::new(buffer);
        let (course_actor, courses) = course_actor::new(buffer);
        let (semester_actor, semesters) = semester_actor::new(buffer);
        let (subject_actor, subjects) = subject_actor::new(buffer);
        let (paper_actor, papers) = paper_actor::new(buffer);

        let paper_ctx = PaperContext {
            colleges: colleges.clone(),
            courses: courses.clone(),
            semesters: semesters.clone(),
            subjects: subjects.clone(),
            uploads,
        };
        let subject_ctx = SubjectContext {
            semesters: semesters.clone(),
            courses: courses.clone(),
        };

        let handles = vec![
            tokio::spawn(college_actor.run(())),
            tokio::spawn(course_actor.run(colleges.clone())),
            tokio::spawn(semester_actor.run(courses.clone())),
            tokio::spawn(subject_actor.run(subject_ctx)),
            tokio::spawn(paper_actor.run(paper_ctx.clone())),
        ];

        let catalog = Catalog {
            colleges: CollegeClient::new(colleges.clone()),
            courses: CourseClient::new(courses.clone(), colleges.clone()),
            semesters: SemesterClient::new(semesters.clone(), courses.clone()),
            subjects: SubjectClient::new(subjects, semesters, courses),
            papers: PaperClient::new(papers, paper_ctx),
        };
        info!("Catalog actors started");

        Self { catalog, handles }
    }

    /// Drops this handle's clients and waits for every actor to stop.
    ///
    /// Clones of [`Catalog`] held elsewhere (e.g. by a router) must be dropped first,
    /// otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down catalog...");
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
