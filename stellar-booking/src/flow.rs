use crate::catalog_state::CatalogState;
use crate::draft::{BookingDraft, DraftError, DraftField};
use crate::gateway::{SubmissionError, SubmissionGateway};
use crate::models::{BookingConfirmation, FlowRules};
use crate::sequencer::{Direction, Step, StepSequencer};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use stellar_catalog::{Accommodation, Destination, PriceQuote, PricingConfig, PricingEngine, SeatClass};
use stellar_core::{BookingIdGenerator, BookingService, PromoValidator, ServiceError};
use tracing::{debug, info};

/// Which controls the view should enable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub can_advance: bool,
    pub can_retreat: bool,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Failed(SubmissionError),
}

#[derive(Debug, Clone, Default)]
pub struct FlowSettings {
    pub rules: FlowRules,
    pub pricing: PricingConfig,
}

/// One active booking wizard: draft, step pointer, dependent catalogs and submission.
pub struct BookingFlow {
    service: Arc<dyn BookingService>,
    gateway: SubmissionGateway,
    promo: Arc<dyn PromoValidator>,
    pricing: PricingEngine,
    rules: FlowRules,
    draft: BookingDraft,
    sequencer: StepSequencer,
    quote: PriceQuote,
    destinations: CatalogState<(), Destination>,
    seat_classes: CatalogState<u32, SeatClass>,
    accommodations: CatalogState<u32, Accommodation>,
    submission: SubmissionStatus,
    confirmation: Option<BookingConfirmation>,
}

impl BookingFlow {
    pub fn new(
        service: Arc<dyn BookingService>,
        ids: Arc<dyn BookingIdGenerator>,
        promo: Arc<dyn PromoValidator>,
        settings: FlowSettings,
    ) -> Self {
        Self::starting_at(service, ids, promo, settings, Utc::now())
    }

    /// Like [`BookingFlow::new`] with an explicit creation time for the first draft
    pub fn starting_at(
        service: Arc<dyn BookingService>,
        ids: Arc<dyn BookingIdGenerator>,
        promo: Arc<dyn PromoValidator>,
        settings: FlowSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let gateway = SubmissionGateway::new(service.clone(), ids);
        let mut flow = Self {
            service,
            gateway,
            promo,
            pricing: PricingEngine::new(settings.pricing),
            rules: settings.rules,
            draft: BookingDraft::new(now, settings.rules),
            sequencer: StepSequencer::new(),
            quote: PriceQuote::default(),
            destinations: CatalogState::default(),
            seat_classes: CatalogState::default(),
            accommodations: CatalogState::default(),
            submission: SubmissionStatus::Idle,
            confirmation: None,
        };
        flow.recompute();
        flow
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.sequencer.step()
    }

    pub fn direction(&self) -> Direction {
        self.sequencer.direction()
    }

    pub fn total_price(&self) -> i64 {
        self.draft.total_price()
    }

    /// Itemised checkout breakdown for the current draft
    pub fn quote(&self) -> &PriceQuote {
        &self.quote
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            can_advance: self.sequencer.can_advance(&self.draft),
            can_retreat: self.sequencer.can_retreat(),
            can_submit: self.sequencer.can_submit(&self.draft)
                && self.submission != SubmissionStatus::Submitting,
        }
    }

    pub fn destinations(&self) -> &CatalogState<(), Destination> {
        &self.destinations
    }

    pub fn seat_classes(&self) -> &CatalogState<u32, SeatClass> {
        &self.seat_classes
    }

    pub fn accommodations(&self) -> &CatalogState<u32, Accommodation> {
        &self.accommodations
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// The single write path into the draft. Pricing is recomputed after every accepted write.
    pub fn set_field(&mut self, field: DraftField) -> Result<(), DraftError> {
        let name = field.name();
        let previous = self.draft.destination().map(|d| d.id);

        if let Err(e) = self.draft.set_field(field) {
            debug!("Rejected {} update: {}", name, e);
            return Err(e);
        }

        if self.draft.destination().map(|d| d.id) != previous {
            self.begin_options_load();
        }
        self.recompute();
        Ok(())
    }

    /// Recalculate the quote and the draft's derived total
    pub fn recompute(&mut self) -> &PriceQuote {
        self.quote = self.pricing.quote(&self.draft.pricing_input());
        self.draft.set_total_price(self.quote.total);
        &self.quote
    }

    pub async fn load_destinations(&mut self) {
        self.destinations.begin(());
        let result = self.service.list_destinations().await;
        self.destinations.resolve((), result);
    }

    /// Mark seat classes and accommodations as loading for the selected destination.
    /// Returns the destination id responses must be keyed by.
    pub fn begin_options_load(&mut self) -> Option<u32> {
        match self.draft.destination().map(|d| d.id) {
            Some(id) => {
                self.seat_classes.begin(id);
                self.accommodations.begin(id);
                Some(id)
            }
            None => {
                self.seat_classes.reset();
                self.accommodations.reset();
                None
            }
        }
    }

    /// Apply a seat class response. Stale responses are dropped and `false` returned.
    pub fn receive_seat_classes(
        &mut self,
        destination_id: u32,
        result: Result<Vec<SeatClass>, ServiceError>,
    ) -> bool {
        self.seat_classes.resolve(destination_id, result)
    }

    pub fn receive_accommodations(
        &mut self,
        destination_id: u32,
        result: Result<Vec<Accommodation>, ServiceError>,
    ) -> bool {
        self.accommodations.resolve(destination_id, result)
    }

    /// Fetch both option lists for the selected destination
    pub async fn load_options(&mut self) {
        let Some(id) = self.draft.destination().map(|d| d.id) else {
            return;
        };
        if self.seat_classes.awaited_key() != Some(id) || self.accommodations.awaited_key() != Some(id) {
            self.begin_options_load();
        }

        let service = self.service.clone();
        let (seats, rooms) = tokio::join!(
            service.list_seat_classes(id),
            service.list_accommodations(id)
        );
        self.receive_seat_classes(id, seats);
        self.receive_accommodations(id, rooms);
    }

    pub fn advance(&mut self) -> bool {
        self.sequencer.advance(&self.draft)
    }

    pub fn retreat(&mut self) -> bool {
        self.sequencer.retreat()
    }

    /// Apply a checkout promo code. Re-applying a valid code changes nothing.
    pub fn apply_promo(&mut self, code: &str) -> bool {
        if !self.promo.validate(code) {
            debug!("Promo code rejected");
            return false;
        }
        if !self.draft.promo_applied() {
            self.draft.set_promo_applied(true);
            self.recompute();
        }
        true
    }

    pub fn clear_promo(&mut self) {
        if self.draft.promo_applied() {
            self.draft.set_promo_applied(false);
            self.recompute();
        }
    }

    /// Send the draft to the booking service. On failure the flow stays at checkout
    /// with the draft untouched.
    pub async fn submit(&mut self) -> bool {
        if self.submission == SubmissionStatus::Submitting || !self.sequencer.can_submit(&self.draft) {
            debug!("Submit from {:?} rejected", self.sequencer.step());
            return false;
        }

        self.submission = SubmissionStatus::Submitting;
        match self.gateway.submit_booking(&self.draft, &self.quote).await {
            Ok(confirmation) => {
                info!("Booking flow confirmed {}", confirmation.booking_id);
                self.confirmation = Some(confirmation);
                self.sequencer.confirm();
                self.replace_draft();
                self.submission = SubmissionStatus::Idle;
                true
            }
            Err(e) => {
                self.submission = SubmissionStatus::Failed(e);
                false
            }
        }
    }

    /// Leave the confirmation screen and begin a new booking
    pub fn start_over(&mut self) -> bool {
        if self.sequencer.step() != Step::Confirmed {
            return false;
        }
        self.confirmation = None;
        self.sequencer.reset();
        self.replace_draft();
        true
    }

    fn replace_draft(&mut self) {
        self.draft = BookingDraft::new(Utc::now(), self.rules);
        self.seat_classes.reset();
        self.accommodations.reset();
        self.recompute();
    }
}
