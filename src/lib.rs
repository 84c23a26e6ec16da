pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{draft_file::DraftFile, toml_config::AppConfig};
pub use core::{booking_form::BookingFormModel, session::BookingSession};
pub use domain::model::{
    BookingDetails, BookingId, BookingRequest, BookingType, DateRange, Period, RoomType,
};
pub use utils::error::{BookingError, Result, ValidationError, Violation};
