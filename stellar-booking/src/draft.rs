use crate::models::{BookingSnapshot, FlowRules};
use chrono::{DateTime, Duration, Utc};
use stellar_catalog::{Accommodation, Destination, DestinationScoped, PricingEngine, PricingInput, SeatClass};
use tracing::debug;

/// A single field write against the draft
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    DepartureDate(DateTime<Utc>),
    ReturnDate(DateTime<Utc>),
    Destination(Destination),
    SeatClass(SeatClass),
    Accommodation(Accommodation),
    Passengers(u32),
}

impl DraftField {
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::DepartureDate(_) => "departure_date",
            DraftField::ReturnDate(_) => "return_date",
            DraftField::Destination(_) => "destination",
            DraftField::SeatClass(_) => "seat_class",
            DraftField::Accommodation(_) => "accommodation",
            DraftField::Passengers(_) => "passengers",
        }
    }
}

/// The in-progress booking. Fields change only through [`BookingDraft::set_field`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    departure_date: DateTime<Utc>,
    return_date: DateTime<Utc>,
    destination: Option<Destination>,
    seat_class: Option<SeatClass>,
    accommodation: Option<Accommodation>,
    passengers: u32,
    promo_applied: bool,
    total_price: i64,
    earliest_departure: DateTime<Utc>,
    rules: FlowRules,
}

impl BookingDraft {
    pub fn new(now: DateTime<Utc>, rules: FlowRules) -> Self {
        let departure_date = now + Duration::days(rules.default_departure_offset_days);
        Self {
            departure_date,
            return_date: departure_date + Duration::days(rules.default_trip_days),
            destination: None,
            seat_class: None,
            accommodation: None,
            passengers: 1,
            promo_applied: false,
            total_price: 0,
            earliest_departure: now + Duration::days(rules.min_lead_days),
            rules,
        }
    }

    pub fn departure_date(&self) -> DateTime<Utc> {
        self.departure_date
    }

    pub fn return_date(&self) -> DateTime<Utc> {
        self.return_date
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn seat_class(&self) -> Option<&SeatClass> {
        self.seat_class.as_ref()
    }

    pub fn accommodation(&self) -> Option<&Accommodation> {
        self.accommodation.as_ref()
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn promo_applied(&self) -> bool {
        self.promo_applied
    }

    /// Derived total, refreshed by the owning flow after each mutation
    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    pub fn earliest_departure(&self) -> DateTime<Utc> {
        self.earliest_departure
    }

    pub fn rules(&self) -> &FlowRules {
        &self.rules
    }

    pub fn nights(&self) -> i64 {
        PricingEngine::nights(self.departure_date, self.return_date)
    }

    /// Apply one field write. A rejected write leaves the draft untouched.
    pub fn set_field(&mut self, field: DraftField) -> Result<(), DraftError> {
        match field {
            DraftField::DepartureDate(date) => {
                if date < self.earliest_departure {
                    return Err(DraftError::DepartureTooSoon {
                        requested: date,
                        earliest: self.earliest_departure,
                    });
                }
                self.departure_date = date;
                if self.return_date < date + Duration::days(1) {
                    self.return_date = date + Duration::days(self.rules.default_trip_days);
                    debug!("Return date moved to {} to follow departure", self.return_date);
                }
            }
            DraftField::ReturnDate(date) => {
                // Shortest stay is one night
                if date < self.departure_date + Duration::days(1) {
                    return Err(DraftError::ReturnNotAfterDeparture {
                        departure: self.departure_date,
                        requested: date,
                    });
                }
                self.return_date = date;
            }
            DraftField::Destination(destination) => {
                let changed = self.destination.as_ref().map(|d| d.id) != Some(destination.id);
                if changed {
                    // Options picked for another destination are never carried over
                    let seat = self.seat_class.take();
                    let room = self.accommodation.take();
                    if seat.is_some() || room.is_some() {
                        debug!("Cleared selections for previous destination");
                    }
                }
                self.destination = Some(destination);
            }
            DraftField::SeatClass(seat_class) => {
                self.check_scope(&seat_class)?;
                self.seat_class = Some(seat_class);
            }
            DraftField::Accommodation(accommodation) => {
                self.check_scope(&accommodation)?;
                self.accommodation = Some(accommodation);
            }
            DraftField::Passengers(count) => {
                if count < 1 || count > self.rules.max_passengers {
                    return Err(DraftError::PassengersOutOfRange {
                        requested: count,
                        max: self.rules.max_passengers,
                    });
                }
                self.passengers = count;
            }
        }
        Ok(())
    }

    /// Destination, seat class and accommodation are all chosen
    pub fn is_complete(&self) -> bool {
        self.destination.is_some() && self.seat_class.is_some() && self.accommodation.is_some()
    }

    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            seat_price: self.seat_class.as_ref().map(|s| s.price),
            passengers: self.passengers,
            price_per_night: self.accommodation.as_ref().map(|a| a.price_per_night),
            nights: self.nights(),
            promo_applied: self.promo_applied,
        }
    }

    pub fn snapshot(&self) -> Option<BookingSnapshot> {
        Some(BookingSnapshot {
            destination: self.destination.clone()?,
            seat_class: self.seat_class.clone()?,
            accommodation: self.accommodation.clone()?,
            departure_date: self.departure_date,
            return_date: self.return_date,
            passengers: self.passengers,
            promo_applied: self.promo_applied,
        })
    }

    pub(crate) fn set_promo_applied(&mut self, applied: bool) {
        self.promo_applied = applied;
    }

    pub(crate) fn set_total_price(&mut self, total: i64) {
        self.total_price = total;
    }

    fn check_scope<T: DestinationScoped>(&self, option: &T) -> Result<(), DraftError> {
        let destination = self.destination.as_ref().ok_or(DraftError::NoDestination)?;
        if !option.belongs_to(destination) {
            return Err(DraftError::ForeignSelection {
                expected: destination.id,
                found: option.destination_id(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Departure {requested} is before the earliest allowed date {earliest}")]
    DepartureTooSoon {
        requested: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },

    #[error("Return {requested} must be at least one day after departure {departure}")]
    ReturnNotAfterDeparture {
        departure: DateTime<Utc>,
        requested: DateTime<Utc>,
    },

    #[error("Select a destination first")]
    NoDestination,

    #[error("Option belongs to destination {found}, expected {expected}")]
    ForeignSelection {
        expected: u32,
        found: u32,
    },

    #[error("Passenger count {requested} outside 1..={max}")]
    PassengersOutOfRange {
        requested: u32,
        max: u32,
    },
}
