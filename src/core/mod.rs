pub mod booking_form;
pub mod session;

pub use crate::domain::model::{BookingId, BookingRequest};
pub use crate::domain::ports::{Navigator, SubmissionSink};
pub use crate::utils::error::Result;
