//! Reports filed against projects.
//!
//! Every report belongs to exactly one project, and that project's `reports`
//! list holds the report's id for as long as the report exists.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reports` | List reports |
//! | POST | `/api/reports` | Create a report |
//! | GET | `/api/reports/{id}` | Get a report |
//! | PUT | `/api/reports/{id}` | Replace a report's editable fields |
//! | PATCH | `/api/reports/{id}` | Update supplied fields only |
//! | DELETE | `/api/reports/{id}` | Delete a report |
//! | GET | `/api/reports/tags/{tag}` | List reports carrying a tag |
//! | PATCH | `/api/reports/tags` | Rename a tag on every report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ReportService;
