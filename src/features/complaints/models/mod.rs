mod complaint;

pub use complaint::{
    next_timestamp, Complaint, ComplaintCategory, ComplaintPatch, ComplaintStatus, NewComplaint,
    SortOrder,
};
