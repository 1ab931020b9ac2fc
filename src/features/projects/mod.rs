//! Projects, read side.
//!
//! Each project keeps a `reports` list of the report ids filed under it.
//! The list is written only by the report service.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/projects` | List projects |
//! | GET | `/api/projects/{id}` | Get a project |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProjectService;
