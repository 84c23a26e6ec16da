use crate::domain::model::{BookingId, BookingRequest};
use crate::domain::ports::SubmissionSink;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

fn next_booking_id(counter: &AtomicU64) -> BookingId {
    let seq = counter.fetch_add(1, Ordering::Relaxed);
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
    BookingId::new(format!("BK{}-{:04}", stamp, seq))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBooking<'a> {
    id: &'a BookingId,
    submitted_at: chrono::DateTime<chrono::Local>,
    request: &'a BookingRequest,
}

/// Writes each request to `<base_path>/<id>.json`. Existing files are never
/// overwritten: an id whose file already exists is skipped.
#[derive(Debug)]
pub struct JsonFileSink {
    base_path: PathBuf,
    counter: AtomicU64,
}

impl JsonFileSink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            counter: AtomicU64::new(1),
        }
    }

    pub fn path_for(&self, id: &BookingId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingId> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        let submitted_at = chrono::Local::now();

        loop {
            let id = next_booking_id(&self.counter);
            let path = self.path_for(&id);
            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("{} already exists, trying the next id", path.display());
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let record = StoredBooking {
                id: &id,
                submitted_at,
                request,
            };
            let data = serde_json::to_vec_pretty(&record)?;
            file.write_all(&data).await?;
            file.flush().await?;

            tracing::info!("📁 Booking {} saved to {}", id, path.display());
            return Ok(id);
        }
    }
}

/// Logs the request and keeps nothing.
#[derive(Debug)]
pub struct LoggingSink {
    counter: AtomicU64,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionSink for LoggingSink {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingId> {
        let id = next_booking_id(&self.counter);
        tracing::info!("Booking submitted: {} {}", id, serde_json::to_string(request)?);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::booking_form::BookingFormModel;
    use crate::domain::model::BookingType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_request() -> BookingRequest {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut form = BookingFormModel::new();
        form.set_booking_type(BookingType::Exam);
        form.set_course("CS101 Programming").unwrap();
        form.set_date_range(
            Some(day.and_hms_opt(0, 0, 0).unwrap()),
            Some(day.and_hms_opt(0, 0, 0).unwrap()),
        );
        form.set_phone_number("0812345678");
        form.submit().unwrap()
    }

    #[tokio::test]
    async fn test_json_sink_writes_one_file_per_request() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonFileSink::new(temp_dir.path().join("bookings"));
        let request = sample_request();

        let first = sink.submit_booking(&request).await.unwrap();
        let second = sink.submit_booking(&request).await.unwrap();
        assert_ne!(first, second);

        let content = std::fs::read_to_string(sink.path_for(&first)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["id"], first.as_str());
        assert_eq!(json["request"]["bookingType"], "exam");
        assert_eq!(json["request"]["purpose"], "CS101 Programming");
        assert_eq!(json["request"]["periods"]["startPeriod"], 1);
    }

    #[tokio::test]
    async fn test_json_sinks_sharing_a_directory_keep_every_booking() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path().join("bookings");
        // Two processes writing to one folder each start their sequence at 1.
        let first_sink = JsonFileSink::new(&base_path);
        let second_sink = JsonFileSink::new(&base_path);
        let request = sample_request();

        let first = first_sink.submit_booking(&request).await.unwrap();
        let second = second_sink.submit_booking(&request).await.unwrap();
        assert_ne!(first, second);

        let files = std::fs::read_dir(&base_path).unwrap().count();
        assert_eq!(files, 2);
        let content = std::fs::read_to_string(first_sink.path_for(&first)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["id"], first.as_str());
    }

    #[tokio::test]
    async fn test_json_sink_skips_ids_already_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let sink = JsonFileSink::new(temp_dir.path());
        let taken = next_booking_id(&AtomicU64::new(1));
        std::fs::write(sink.path_for(&taken), "existing").unwrap();

        let id = sink.submit_booking(&sample_request()).await.unwrap();
        assert_ne!(id, taken);
        assert_eq!(std::fs::read_to_string(sink.path_for(&taken)).unwrap(), "existing");
    }

    #[test]
    fn test_logging_sink_returns_ids() {
        let sink = LoggingSink::new();
        let id = tokio_test::block_on(sink.submit_booking(&sample_request())).unwrap();
        assert!(id.as_str().starts_with("BK"));
        assert!(id.as_str().ends_with("-0001"));
    }
}
