use crate::domain::model::{BookingId, BookingRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Receives finished booking requests.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingId>;
}

/// Moves the user to another page.
pub trait Navigator {
    fn navigate(&mut self, destination: &str);
}
