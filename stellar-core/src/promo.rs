/// Decides whether a promo code entered at checkout is valid
pub trait PromoValidator: Send + Sync {
    fn validate(&self, code: &str) -> bool;
}

/// Accepts exactly one code, ignoring case and surrounding whitespace
pub struct SingleCodePromo {
    code: String,
}

impl SingleCodePromo {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl PromoValidator for SingleCodePromo {
    fn validate(&self, code: &str) -> bool {
        let code = code.trim();
        !code.is_empty() && code.eq_ignore_ascii_case(self.code.trim())
    }
}

/// Accepts nothing
pub struct NoPromo;

impl PromoValidator for NoPromo {
    fn validate(&self, _code: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code_is_case_insensitive() {
        let promo = SingleCodePromo::new("STARGAZER");
        assert!(promo.validate("stargazer"));
        assert!(promo.validate(" StarGazer "));
        assert!(!promo.validate("STARGAZER1"));
        assert!(!promo.validate(""));
    }

    #[test]
    fn test_no_promo() {
        assert!(!NoPromo.validate("STARGAZER"));
    }
}
