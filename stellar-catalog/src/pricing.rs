use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Inputs for a single trip quote
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingInput {
    /// Per-passenger seat price, if a seat class is chosen
    pub seat_price: Option<i64>,

    pub passengers: u32,

    /// Nightly accommodation price, if an accommodation is chosen
    pub price_per_night: Option<i64>,

    pub nights: i64,

    /// Promo discount applies to the subtotal
    pub promo_applied: bool,
}

/// Itemised quote for a trip. All amounts are whole currency units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceQuote {
    pub nights: i64,
    pub seat_total: i64,
    pub accommodation_total: i64,
    pub subtotal: i64,
    pub service_fee: i64,
    pub insurance: i64,
    pub discount: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Service fee, percent of subtotal
    pub service_fee_percent: u32,

    /// Travel insurance, percent of subtotal
    pub insurance_percent: u32,

    /// Promo discount, percent of subtotal
    pub promo_discount_percent: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_percent: 5,
            insurance_percent: 3,
            promo_discount_percent: 10,
        }
    }
}

/// Trip price calculator
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Whole nights between two instants, rounded up. Zero for empty or inverted ranges.
    pub fn nights(departure: DateTime<Utc>, return_date: DateTime<Utc>) -> i64 {
        let millis = (return_date - departure).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }

    pub fn quote(&self, input: &PricingInput) -> PriceQuote {
        let nights = input.nights.max(0);
        let seat_total = input.seat_price.unwrap_or(0) * i64::from(input.passengers);
        let accommodation_total = input.price_per_night.unwrap_or(0) * nights;
        let subtotal = seat_total + accommodation_total;

        let service_fee = percent_of(subtotal, self.config.service_fee_percent);
        let insurance = percent_of(subtotal, self.config.insurance_percent);
        let discount = if input.promo_applied {
            percent_of(subtotal, self.config.promo_discount_percent)
        } else {
            0
        };

        PriceQuote {
            nights,
            seat_total,
            accommodation_total,
            subtotal,
            service_fee,
            insurance,
            discount,
            total: subtotal + service_fee + insurance - discount,
        }
    }
}

// Half-up rounding on non-negative amounts
fn percent_of(amount: i64, percent: u32) -> i64 {
    (amount.max(0) * i64::from(percent) + 50) / 100
}
