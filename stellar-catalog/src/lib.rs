pub mod product;
pub mod pricing;

pub use product::{Accommodation, Destination, DestinationScoped, DestinationType, SeatClass};
pub use pricing::{PriceQuote, PricingConfig, PricingEngine, PricingInput};
