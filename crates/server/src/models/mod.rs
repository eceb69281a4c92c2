//! Domain models for enquiries and admins.

pub mod admin;
pub mod enquiry;

pub use admin::{Admin, CurrentAdmin, LoginRequest, LoginResponse, RegisterRequest};
pub use enquiry::{
    Enquiry, EnquiryFilter, EnquiryPatch, EnquiryStats, EnquirySubmission, EnquiryUpdate,
    InterestCount, ListQuery, NewEnquiry, SortField, SortOrder, ValidationError,
};
