//! Domain types for Project Germany.

pub mod email;
pub mod id;
pub mod interest;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use interest::{Interest, UnknownInterest};
pub use status::{EnquiryStatus, UnknownStatus};
