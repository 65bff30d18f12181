use serde::Deserialize;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use stellar_booking::{FlowRules, FlowSettings};
use stellar_catalog::PricingConfig;
use stellar_core::{NoPromo, PromoValidator, SingleCodePromo};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub booking_service: BookingServiceConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 { 10 }

impl BookingServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    pub min_lead_days: i64,
    pub default_departure_offset_days: i64,
    pub default_trip_days: i64,
    pub max_passengers: u32,
    pub service_fee_percent: u32,
    pub insurance_percent: u32,
    pub promo_discount_percent: u32,
    pub promo_code: String,
    #[serde(default = "default_prefix")]
    pub booking_id_prefix: String,
}

fn default_prefix() -> String { "DST".to_string() }

impl BusinessRules {
    pub fn flow_settings(&self) -> Result<FlowSettings, config::ConfigError> {
        let rules = FlowRules {
            min_lead_days: self.min_lead_days,
            default_departure_offset_days: self.default_departure_offset_days,
            default_trip_days: self.default_trip_days,
            max_passengers: self.max_passengers,
        };
        rules
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("business_rules: {}", e)))?;

        if self.promo_discount_percent > 100 {
            return Err(config::ConfigError::Message(format!(
                "business_rules: promo_discount_percent {} exceeds 100",
                self.promo_discount_percent
            )));
        }

        Ok(FlowSettings {
            rules,
            pricing: PricingConfig {
                service_fee_percent: self.service_fee_percent,
                insurance_percent: self.insurance_percent,
                promo_discount_percent: self.promo_discount_percent,
            },
        })
    }

    /// An empty `promo_code` disables promotions
    pub fn promo_validator(&self) -> Arc<dyn PromoValidator> {
        if self.promo_code.trim().is_empty() {
            Arc::new(NoPromo)
        } else {
            Arc::new(SingleCodePromo::new(self.promo_code.clone()))
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `STELLAR_SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("STELLAR").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document, for tests and embedded defaults
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        port = 8000

        [booking_service]
        base_url = "http://localhost:8000"

        [business_rules]
        min_lead_days = 14
        default_departure_offset_days = 30
        default_trip_days = 30
        max_passengers = 10
        service_fee_percent = 5
        insurance_percent = 3
        promo_discount_percent = 10
        promo_code = "STARGAZER"
    "#;

    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.booking_service.timeout_seconds, 10);
        assert_eq!(config.business_rules.booking_id_prefix, "DST");

        assert_eq!(config.booking_service.timeout(), Duration::from_secs(10));

        let settings = config.business_rules.flow_settings().unwrap();
        assert_eq!(settings.rules, FlowRules::default());
        assert_eq!(settings.pricing.service_fee_percent, 5);
    }

    #[test]
    fn test_invalid_business_rules_rejected() {
        let zero_trip = SAMPLE.replace("default_trip_days = 30", "default_trip_days = 0");
        let config = Config::from_toml(&zero_trip).unwrap();
        assert!(config.business_rules.flow_settings().is_err());

        let nobody = SAMPLE.replace("max_passengers = 10", "max_passengers = 0");
        let config = Config::from_toml(&nobody).unwrap();
        assert!(config.business_rules.flow_settings().is_err());

        let early = SAMPLE.replace("min_lead_days = 14", "min_lead_days = 60");
        let config = Config::from_toml(&early).unwrap();
        assert!(config.business_rules.flow_settings().is_err());
    }

    #[test]
    fn test_promo_validator() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert!(config.business_rules.promo_validator().validate("stargazer"));

        let disabled = SAMPLE.replace("promo_code = \"STARGAZER\"", "promo_code = \"\"");
        let config = Config::from_toml(&disabled).unwrap();
        let promo = config.business_rules.promo_validator();
        assert!(!promo.validate("STARGAZER"));
        assert!(!promo.validate(""));
    }

    #[test]
    fn test_missing_section_fails() {
        assert!(Config::from_toml("[server]\nport = 1").is_err());
    }
}
