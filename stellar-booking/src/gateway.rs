use crate::draft::BookingDraft;
use crate::models::BookingConfirmation;
use chrono::Utc;
use std::sync::Arc;
use stellar_catalog::PriceQuote;
use stellar_core::{BookingIdGenerator, BookingRequest, BookingService, ServiceError};
use tracing::{info, warn};

/// Turns a finished draft into a booking with the booking service
pub struct SubmissionGateway {
    service: Arc<dyn BookingService>,
    ids: Arc<dyn BookingIdGenerator>,
}

impl SubmissionGateway {
    pub fn new(service: Arc<dyn BookingService>, ids: Arc<dyn BookingIdGenerator>) -> Self {
        Self { service, ids }
    }

    /// Validate the draft and build the wire request
    pub fn prepare(draft: &BookingDraft) -> Result<BookingRequest, SubmissionError> {
        let destination = draft.destination().ok_or(SubmissionError::IncompleteDraft("destination"))?;
        let seat_class = draft.seat_class().ok_or(SubmissionError::IncompleteDraft("seat_class"))?;
        let accommodation = draft
            .accommodation()
            .ok_or(SubmissionError::IncompleteDraft("accommodation"))?;

        let max = draft.rules().max_passengers;
        if draft.passengers() < 1 || draft.passengers() > max {
            return Err(SubmissionError::InvalidDraft(format!(
                "passenger count {} outside 1..={}",
                draft.passengers(),
                max
            )));
        }
        if draft.nights() < 1 {
            return Err(SubmissionError::InvalidDraft("trip must last at least one night".to_string()));
        }

        Ok(BookingRequest {
            destination_id: destination.id,
            seat_class_id: seat_class.id,
            accommodation_id: accommodation.id,
            departure_date: draft.departure_date(),
            return_date: draft.return_date(),
            passengers: draft.passengers(),
        })
    }

    pub async fn submit_booking(
        &self,
        draft: &BookingDraft,
        quote: &PriceQuote,
    ) -> Result<BookingConfirmation, SubmissionError> {
        let request = Self::prepare(draft)?;
        let booking = draft
            .snapshot()
            .ok_or(SubmissionError::IncompleteDraft("selection"))?;

        let receipt = self.service.create_booking(&request).await.map_err(|e| {
            warn!("Booking submission failed: {}", e);
            SubmissionError::ServiceFailed(e)
        })?;

        let booking_id = self.ids.next_id();
        info!(
            "Booking {} confirmed (service reference {}, total {})",
            booking_id, receipt.booking_id, quote.total
        );

        Ok(BookingConfirmation {
            booking_id,
            service_reference: receipt.booking_id,
            booking,
            quote: *quote,
            confirmed_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Booking is missing {0}")]
    IncompleteDraft(&'static str),

    #[error("Booking is invalid: {0}")]
    InvalidDraft(String),

    #[error("Submission failed: {0}")]
    ServiceFailed(ServiceError),
}
