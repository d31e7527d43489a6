//! Civic complaints: citizens file them, staff triage them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/complaints` | No | List complaints, optionally sorted and filtered |
//! | GET | `/api/complaints/summary` | No | Per-status counts |
//! | POST | `/api/complaints` | No | File a complaint |
//! | PATCH | `/api/complaints/{id}` | Staff token, if configured | Update status or remark |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::ComplaintService;
pub use stores::{ComplaintStore, MemoryComplaintStore, PgComplaintStore};
