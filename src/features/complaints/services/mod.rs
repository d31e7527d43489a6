mod complaint_filter;
mod complaint_service;

pub use complaint_filter::{summarize, ComplaintFilter};
pub use complaint_service::ComplaintService;
