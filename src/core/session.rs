use crate::core::booking_form::BookingFormModel;
use crate::domain::layout::Route;
use crate::domain::model::BookingId;
use crate::domain::ports::{Navigator, SubmissionSink};
use crate::domain::schedule::Schedule;
use crate::domain::slot::SlotSelection;
use crate::utils::error::{BookingError, Result};

/// One pass through the new-booking page: open a draft, edit it, then
/// either submit or cancel. Both ends go back to the booking list and drop
/// the draft.
pub struct BookingSession<S: SubmissionSink, N: Navigator> {
    sink: S,
    navigator: N,
    schedule: Schedule,
    form: Option<BookingFormModel>,
}

impl<S: SubmissionSink, N: Navigator> BookingSession<S, N> {
    pub fn new(sink: S, navigator: N) -> Self {
        Self::with_schedule(sink, navigator, Schedule::default())
    }

    pub fn with_schedule(sink: S, navigator: N, schedule: Schedule) -> Self {
        Self {
            sink,
            navigator,
            schedule,
            form: None,
        }
    }

    /// Opens a blank draft, replacing any draft already open.
    pub fn begin(&mut self) -> &mut BookingFormModel {
        tracing::debug!("Opening a new booking draft");
        self.form.insert(BookingFormModel::new())
    }

    pub fn begin_from_slot(&mut self, slot: &SlotSelection) -> &mut BookingFormModel {
        tracing::debug!("Opening a booking draft for slot {} - {}", slot.start, slot.end);
        self.form.insert(BookingFormModel::from_slot(slot, &self.schedule))
    }

    /// Opens a draft from a calendar link such as
    /// `/book-room/new?start=2024-06-10T09:30&end=2024-06-10T11:30`.
    pub fn begin_from_query(&mut self, query: &str) -> Result<&mut BookingFormModel> {
        let slot = SlotSelection::from_query(query)?;
        Ok(self.begin_from_slot(&slot))
    }

    pub fn is_active(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Result<&BookingFormModel> {
        self.form.as_ref().ok_or(BookingError::NoActiveDraft)
    }

    pub fn form_mut(&mut self) -> Result<&mut BookingFormModel> {
        self.form.as_mut().ok_or(BookingError::NoActiveDraft)
    }

    /// An invalid draft stays open so the user can correct it.
    pub async fn submit(&mut self) -> Result<BookingId> {
        let request = self.form()?.submit()?;
        let id = self.sink.submit_booking(&request).await?;
        tracing::info!("Booking {} submitted", id);

        self.form = None;
        self.navigator.navigate(Route::BookRoom.path());
        Ok(id)
    }

    pub fn cancel(&mut self) {
        if self.form.take().is_some() {
            tracing::info!("Booking draft discarded");
        }
        self.navigator.navigate(Route::BookRoom.path());
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
