//! CourseScout Query API — library crate for the class search REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `cs-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and `ToolRegistry`.

pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod state;
