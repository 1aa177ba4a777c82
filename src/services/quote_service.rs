use crate::models::tour::{find_tour, Tour};

/// Service tier keys are part of the wire contract; an unrecognized value
/// falls back to `Estandar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTier {
    Economico,
    Estandar,
    Premium,
    Lujo,
}

impl ServiceTier {
    pub fn parse(value: &str) -> Self {
        match value {
            "economico" => ServiceTier::Economico,
            "estandar" => ServiceTier::Estandar,
            "premium" => ServiceTier::Premium,
            "lujo" => ServiceTier::Lujo,
            _ => ServiceTier::Estandar,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ServiceTier::Economico => 0.8,
            ServiceTier::Estandar => 1.0,
            ServiceTier::Premium => 1.5,
            ServiceTier::Lujo => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::Economico => "economico",
            ServiceTier::Estandar => "estandar",
            ServiceTier::Premium => "premium",
            ServiceTier::Lujo => "lujo",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum QuoteError {
    TourNotFound,
    InvalidTravelers,
    InvalidNights,
}

pub struct QuoteService;

impl QuoteService {
    /// Final price for a tour: base price scaled by tier, traveler count and
    /// nights normalized against the 7-night baseline, rounded to 2 decimals.
    pub fn final_price(base_price: f64, tier: ServiceTier, travelers: u32, nights: u32) -> f64 {
        let raw = base_price * tier.multiplier() * travelers as f64 * (nights as f64 / 7.0);
        (raw * 100.0).round() / 100.0
    }

    /// Look up the tour and price it. Travelers and nights must be positive.
    pub fn quote(
        tour_key: &str,
        tier: ServiceTier,
        travelers: u32,
        nights: u32,
    ) -> Result<(&'static Tour, f64), QuoteError> {
        let tour = find_tour(tour_key).ok_or(QuoteError::TourNotFound)?;
        if travelers == 0 {
            return Err(QuoteError::InvalidTravelers);
        }
        if nights == 0 {
            return Err(QuoteError::InvalidNights);
        }

        let price = Self::final_price(tour.base_price, tier, travelers, nights);
        Ok((tour, price))
    }
}
