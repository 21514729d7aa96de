//! Request handler module
//!
//! Routing dispatch for the two application routes: the landing page at `/`
//! and static assets under `/static/`.

pub mod pages;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
