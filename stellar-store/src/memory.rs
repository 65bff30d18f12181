use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use stellar_catalog::{Accommodation, Destination, DestinationScoped, DestinationType, PricingEngine, SeatClass};
use stellar_core::{BookingReceipt, BookingRequest, BookingService, BookingStatus, ServiceError};
use tokio::sync::RwLock;
use tracing::info;

const MAX_PASSENGERS: u32 = 10;

/// A booking accepted by the in-memory service
#[derive(Debug, Clone, Serialize)]
pub struct StoredBooking {
    pub id: u64,
    pub request: BookingRequest,
    pub total_price: i64,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

/// Process-local booking service holding the launch catalog
pub struct InMemoryBookingService {
    destinations: Vec<Destination>,
    seat_classes: Vec<SeatClass>,
    accommodations: Vec<Accommodation>,
    bookings: RwLock<Vec<StoredBooking>>,
}

impl InMemoryBookingService {
    pub fn new(
        destinations: Vec<Destination>,
        seat_classes: Vec<SeatClass>,
        accommodations: Vec<Accommodation>,
    ) -> Self {
        Self {
            destinations,
            seat_classes,
            accommodations,
            bookings: RwLock::new(Vec::new()),
        }
    }

    /// Five destinations, each with three seat classes and three accommodations
    pub fn seeded() -> Self {
        let destinations = seed_destinations();
        let mut seat_classes = Vec::new();
        let mut accommodations = Vec::new();

        for destination in &destinations {
            let base = destination.base_price;
            let next_seat = seat_classes.len() as u32 + 1;
            seat_classes.extend([
                seat(next_seat, destination, "Economy",
                    "Standard accommodations with essential life support and minimal personal space.",
                    base,
                    &["Basic life support", "Shared quarters", "Standard meals", "Limited storage"]),
                seat(next_seat + 1, destination, "Luxury Cabin",
                    "Premium accommodations with enhanced comfort and private quarters.",
                    base * 175 / 100,
                    &["Enhanced life support", "Private cabin", "Gourmet meals", "Increased storage", "Entertainment system"]),
                seat(next_seat + 2, destination, "VIP Zero-G Suite",
                    "The ultimate space travel experience with dedicated staff and exclusive access to all facilities.",
                    base * 350 / 100,
                    &["Premium life support", "Luxury suite", "Personal chef", "Exclusive excursions", "Full medical support", "Priority scheduling"]),
            ]);

            let next_room = accommodations.len() as u32 + 1;
            accommodations.extend([
                room(next_room, destination, "Standard Pod",
                    "Basic accommodation with essential amenities and shared facilities.",
                    base / 100, 3.5,
                    &["Shared bathroom", "Basic amenities", "Daily cleaning", "Communal dining"]),
                room(next_room + 1, destination, "Comfort Suite",
                    "Mid-tier accommodations with private facilities and enhanced comfort.",
                    base * 25 / 1000, 4.2,
                    &["Private bathroom", "Enhanced amenities", "Room service", "Entertainment system", "Small viewport"]),
                room(next_room + 2, destination, "Luxury Habitat",
                    "Premium living space with all amenities and spectacular views.",
                    base * 5 / 100, 4.8,
                    &["Luxury bathroom", "Premium amenities", "24/7 butler service", "Gourmet dining", "Large viewport", "Private excursions"]),
            ]);
        }

        Self::new(destinations, seat_classes, accommodations)
    }

    pub async fn bookings(&self) -> Vec<StoredBooking> {
        self.bookings.read().await.clone()
    }

    fn find_destination(&self, destination_id: u32) -> Result<&Destination, ServiceError> {
        self.destinations
            .iter()
            .find(|d| d.id == destination_id)
            .ok_or_else(|| ServiceError::NotFound(format!("destination {}", destination_id)))
    }

    /// Seat price per passenger plus nightly rate, with a started night counted in full
    fn price(&self, request: &BookingRequest) -> Result<i64, ServiceError> {
        let destination = self.find_destination(request.destination_id)?;

        let seat_class = self
            .seat_classes
            .iter()
            .find(|s| s.id == request.seat_class_id)
            .ok_or_else(|| ServiceError::NotFound(format!("seat class {}", request.seat_class_id)))?;
        let accommodation = self
            .accommodations
            .iter()
            .find(|a| a.id == request.accommodation_id)
            .ok_or_else(|| ServiceError::NotFound(format!("accommodation {}", request.accommodation_id)))?;

        if !seat_class.belongs_to(destination) || !accommodation.belongs_to(destination) {
            return Err(ServiceError::Rejected(format!(
                "selection does not belong to destination {}",
                destination.id
            )));
        }
        if request.passengers < 1 || request.passengers > MAX_PASSENGERS {
            return Err(ServiceError::Rejected(format!(
                "passenger count {} outside 1..={}",
                request.passengers, MAX_PASSENGERS
            )));
        }

        if request.return_date - request.departure_date < Duration::days(1) {
            return Err(ServiceError::Rejected("stay must last at least one night".to_string()));
        }

        let nights = PricingEngine::nights(request.departure_date, request.return_date);
        Ok(seat_class.price * i64::from(request.passengers) + accommodation.price_per_night * nights)
    }
}

#[async_trait]
impl BookingService for InMemoryBookingService {
    async fn list_destinations(&self) -> Result<Vec<Destination>, ServiceError> {
        Ok(self.destinations.clone())
    }

    async fn get_destination(&self, destination_id: u32) -> Result<Destination, ServiceError> {
        self.find_destination(destination_id).cloned()
    }

    async fn list_seat_classes(&self, destination_id: u32) -> Result<Vec<SeatClass>, ServiceError> {
        Ok(self
            .seat_classes
            .iter()
            .filter(|s| s.destination_id == destination_id)
            .cloned()
            .collect())
    }

    async fn list_accommodations(&self, destination_id: u32) -> Result<Vec<Accommodation>, ServiceError> {
        Ok(self
            .accommodations
            .iter()
            .filter(|a| a.destination_id == destination_id)
            .cloned()
            .collect())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingReceipt, ServiceError> {
        let total_price = self.price(request)?;

        let mut bookings = self.bookings.write().await;
        let id = bookings.len() as u64 + 1;
        bookings.push(StoredBooking {
            id,
            request: request.clone(),
            total_price,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        });
        info!("Stored booking {} for destination {}", id, request.destination_id);

        Ok(BookingReceipt {
            booking_id: id.to_string(),
            total_price,
            status: BookingStatus::Confirmed,
        })
    }
}

fn seed_destinations() -> Vec<Destination> {
    let entries = [
        ("Lunar Gateway Station",
         "Experience the moon's orbit in this state-of-the-art space station with breathtaking views of Earth and lunar landscapes.",
         DestinationType::OrbitalStation, "3 days", 1_200_000, "March 15, 2025"),
        ("Mars Base Alpha",
         "Be among the first civilians to visit the red planet. Tour the first human settlement on Mars and experience 0.38g gravity.",
         DestinationType::PlanetaryBase, "8 months", 4_500_000, "July 22, 2025"),
        ("Europa Orbit Research Station",
         "Journey to Jupiter's moon and participate in research on extraterrestrial life in Europa's subsurface ocean.",
         DestinationType::OrbitalStation, "2.5 years", 12_000_000, "December 10, 2025"),
        ("Orbital Hotel Artemis",
         "Luxury accommodations in Earth's orbit. Experience zero gravity living with five-star amenities.",
         DestinationType::OrbitalStation, "1 day", 850_000, "April 5, 2025"),
        ("Venus Cloud Observatory",
         "Float above Venus's atmosphere and study the greenhouse effect from our specialized research platform.",
         DestinationType::Other, "5 months", 3_200_000, "September 18, 2025"),
    ];

    entries
        .into_iter()
        .zip(1u32..)
        .map(|((name, description, destination_type, travel_time, base_price, next_launch), id)| Destination {
            id,
            name: name.to_string(),
            destination_type,
            base_price,
            travel_time: travel_time.to_string(),
            description: description.to_string(),
            next_launch: next_launch.to_string(),
        })
        .collect()
}

fn seat(id: u32, destination: &Destination, name: &str, description: &str, price: i64, features: &[&str]) -> SeatClass {
    SeatClass {
        id,
        destination_id: destination.id,
        name: name.to_string(),
        price,
        features: features.iter().map(|f| f.to_string()).collect(),
        description: description.to_string(),
    }
}

fn room(
    id: u32,
    destination: &Destination,
    name: &str,
    description: &str,
    price_per_night: i64,
    rating: f32,
    features: &[&str],
) -> Accommodation {
    Accommodation {
        id,
        destination_id: destination.id,
        name: format!("{} at {}", name, destination.name),
        price_per_night,
        features: features.iter().map(|f| f.to_string()).collect(),
        description: description.to_string(),
        rating,
    }
}
