pub mod app_config;
pub mod memory;
pub mod http_client;

pub use memory::InMemoryBookingService;
pub use http_client::HttpBookingService;
