mod complaint_dto;

pub use complaint_dto::{
    ComplaintListQuery, ComplaintResponseDto, ComplaintSummaryDto, CreateComplaintDto,
    UpdateComplaintDto,
};
