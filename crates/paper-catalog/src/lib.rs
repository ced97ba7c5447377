//! # Paper Catalog
//!
//! A catalog of examination question papers, organized as
//! College → Course → Semester → Subject → Paper, served over a REST API.
//!
//! - **[model]**: documents, write payloads, request bodies and read views
//! - **`*_actor`**: one [`ResourceActor`](catalog_framework::ResourceActor) per collection,
//!   with the [`ActorEntity`](catalog_framework::ActorEntity) rules of that collection
//! - **[clients]**: typed clients that expand parent references for reads
//! - **[lifecycle]**: starts, wires and stops the actors
//! - **[http]**: the axum router
//! - **[storage]**: the upload directory holding paper PDFs

pub mod auth;
pub mod clients;
pub mod college_actor;
pub mod config;
pub mod course_actor;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod paper_actor;
pub mod references;
pub mod semester_actor;
pub mod storage;
pub mod subject_actor;
