use serde::{Deserialize, Serialize};

/// Kind of destination offered in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum DestinationType {
    OrbitalStation,
    PlanetaryBase,
    Other,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::OrbitalStation => "orbital-station",
            DestinationType::PlanetaryBase => "planetary-base",
            DestinationType::Other => "other",
        }
    }
}

impl From<String> for DestinationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "orbital-station" => DestinationType::OrbitalStation,
            "planetary-base" => DestinationType::PlanetaryBase,
            _ => DestinationType::Other,
        }
    }
}

impl From<DestinationType> for String {
    fn from(value: DestinationType) -> Self {
        value.as_str().to_string()
    }
}

/// A bookable destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub id: u32,
    pub name: String,
    pub destination_type: DestinationType,
    pub base_price: i64,
    pub travel_time: String,
    pub description: String,
    pub next_launch: String,
}

/// Seat class offered for a single destination, priced per passenger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatClass {
    pub id: u32,
    pub destination_id: u32,
    pub name: String,
    pub price: i64,
    pub features: Vec<String>,
    pub description: String,
}

/// Accommodation offered at a single destination, priced per night
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Accommodation {
    pub id: u32,
    pub destination_id: u32,
    pub name: String,
    pub price_per_night: i64,
    pub features: Vec<String>,
    pub description: String,
    pub rating: f32,
}

/// Anything that is only sold against one destination's catalog
pub trait DestinationScoped {
    fn destination_id(&self) -> u32;

    fn belongs_to(&self, destination: &Destination) -> bool {
        self.destination_id() == destination.id
    }
}

impl DestinationScoped for SeatClass {
    fn destination_id(&self) -> u32 {
        self.destination_id
    }
}

impl DestinationScoped for Accommodation {
    fn destination_id(&self) -> u32 {
        self.destination_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_type_wire_format() {
        let json = r#"
            {
                "id": 2,
                "name": "Mars Base Alpha",
                "destination_type": "planetary-base",
                "base_price": 4500000,
                "travel_time": "8 months",
                "description": "First human settlement on Mars",
                "next_launch": "July 22, 2025"
            }
        "#;
        let destination: Destination = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(destination.destination_type, DestinationType::PlanetaryBase);

        let value = serde_json::to_value(&destination).unwrap();
        assert_eq!(value["destination_type"], "planetary-base");
    }

    #[test]
    fn test_unknown_destination_type_is_other() {
        let kind: DestinationType = serde_json::from_str("\"atmospheric-observatory\"").unwrap();
        assert_eq!(kind, DestinationType::Other);
    }

    #[test]
    fn test_scoped_options() {
        let destination = Destination {
            id: 1,
            name: "Lunar Gateway Station".to_string(),
            destination_type: DestinationType::OrbitalStation,
            base_price: 1200000,
            travel_time: "3 days".to_string(),
            description: String::new(),
            next_launch: "March 15, 2025".to_string(),
        };
        let seat = SeatClass {
            id: 7,
            destination_id: 3,
            name: "Economy".to_string(),
            price: 1000,
            features: vec![],
            description: String::new(),
        };
        assert!(!seat.belongs_to(&destination));
    }
}
