//! Users, read side.
//!
//! Reports reference users through `uploadedBy`; [`UserService::get_by_object_id`]
//! is the existence check the report service relies on.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users` | List users |
//! | GET | `/api/users/{id}` | Get a user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::UserService;
