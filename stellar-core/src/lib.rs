pub mod service;
pub mod ids;
pub mod promo;

pub use service::{BookingReceipt, BookingRequest, BookingService, BookingStatus, ServiceError};
pub use ids::{BookingIdGenerator, RandomBookingIds, SequentialBookingIds};
pub use promo::{NoPromo, PromoValidator, SingleCodePromo};
