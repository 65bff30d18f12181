use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use stellar_catalog::{Accommodation, Destination, PriceQuote, SeatClass};

/// Business rules governing a booking draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowRules {
    /// Earliest departure, in days from draft creation
    pub min_lead_days: i64,

    /// Default departure, in days from draft creation
    pub default_departure_offset_days: i64,

    /// Default trip length, also used when a departure change overruns the return date
    pub default_trip_days: i64,

    pub max_passengers: u32,
}

impl Default for FlowRules {
    fn default() -> Self {
        Self {
            min_lead_days: 14,
            default_departure_offset_days: 30,
            default_trip_days: 30,
            max_passengers: 10,
        }
    }
}

impl FlowRules {
    /// Checks that a fresh draft built from these rules is itself valid
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.min_lead_days < 0 {
            return Err(RulesError::NegativeLeadTime(self.min_lead_days));
        }
        if self.default_departure_offset_days < self.min_lead_days {
            return Err(RulesError::DefaultDepartureTooSoon {
                offset: self.default_departure_offset_days,
                min_lead: self.min_lead_days,
            });
        }
        if self.default_trip_days < 1 {
            return Err(RulesError::TripTooShort(self.default_trip_days));
        }
        if self.max_passengers < 1 {
            return Err(RulesError::NoPassengersAllowed);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("min_lead_days must not be negative, got {0}")]
    NegativeLeadTime(i64),

    #[error("default departure offset {offset} is inside the {min_lead} day lead time")]
    DefaultDepartureTooSoon { offset: i64, min_lead: i64 },

    #[error("default_trip_days must be at least 1, got {0}")]
    TripTooShort(i64),

    #[error("max_passengers must be at least 1")]
    NoPassengersAllowed,
}

/// Owned copy of a complete draft, detached from the live flow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSnapshot {
    pub destination: Destination,
    pub seat_class: SeatClass,
    pub accommodation: Accommodation,
    pub departure_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub passengers: u32,
    pub promo_applied: bool,
}

/// Terminal payload shown once a booking is accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    /// Human-readable id, e.g. `DST-482913`
    pub booking_id: String,

    /// Id assigned by the booking service
    pub service_reference: String,

    pub booking: BookingSnapshot,
    pub quote: PriceQuote,
    pub confirmed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert_eq!(FlowRules::default().validate(), Ok(()));
    }

    #[test]
    fn test_invalid_rules() {
        let base = FlowRules::default();

        let zero_trip = FlowRules { default_trip_days: 0, ..base };
        assert_eq!(zero_trip.validate(), Err(RulesError::TripTooShort(0)));

        let nobody = FlowRules { max_passengers: 0, ..base };
        assert_eq!(nobody.validate(), Err(RulesError::NoPassengersAllowed));

        let early = FlowRules { min_lead_days: 45, ..base };
        assert!(matches!(early.validate(), Err(RulesError::DefaultDepartureTooSoon { .. })));

        let negative = FlowRules { min_lead_days: -1, default_departure_offset_days: 0, ..base };
        assert_eq!(negative.validate(), Err(RulesError::NegativeLeadTime(-1)));
    }
}
