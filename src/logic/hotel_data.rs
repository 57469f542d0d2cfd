use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hotel {
    Sackson,
    Zeta,
    America,
    Fusion,
    Hydra,
    Quantum,
    Phoenix,
}

impl Hotel {
    pub const ALL: [Hotel; 7] = [
        Hotel::Sackson,
        Hotel::Zeta,
        Hotel::America,
        Hotel::Fusion,
        Hotel::Hydra,
        Hotel::Quantum,
        Hotel::Phoenix,
    ];

    pub const fn count() -> usize {
        Self::ALL.len()
    }

    /// Price tier: 0 for the two cheap chains, 1 for the three mid-priced
    /// ones, 2 for the two expensive ones.
    pub fn tier(&self) -> usize {
        match self {
            Hotel::Sackson | Hotel::Zeta => 0,
            Hotel::America | Hotel::Fusion | Hotel::Hydra => 1,
            Hotel::Quantum | Hotel::Phoenix => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Hotel::Sackson => "sackson",
            Hotel::Zeta => "zeta",
            Hotel::America => "america",
            Hotel::Fusion => "fusion",
            Hotel::Hydra => "hydra",
            Hotel::Quantum => "quantum",
            Hotel::Phoenix => "phoenix",
        }
    }

    fn get_row_from_chain_length(&self, chain_length: usize) -> usize {
        let base_row = match chain_length {
            2 => 0,
            3 => 1,
            4 => 2,
            5 => 3,
            6..=10 => 4,
            11..=20 => 5,
            21..=30 => 6,
            31..=40 => 7,
            _ => 8,
        };
        base_row + self.tier()
    }

    /// Price of one share for a chain of the given length. A chain that
    /// isn't on the board is worth nothing.
    pub fn get_stock_value(&self, chain_length: usize) -> u32 {
        if chain_length < 2 {
            return 0;
        }
        ((self.get_row_from_chain_length(chain_length) + 2) * 100) as u32
    }

    pub fn get_majority_holder_bonus(&self, chain_length: usize) -> u32 {
        self.get_stock_value(chain_length) * 10
    }

    pub fn get_minority_holder_bonus(&self, chain_length: usize) -> u32 {
        self.get_stock_value(chain_length) * 5
    }

    pub fn iter() -> impl Iterator<Item = Hotel> {
        Self::ALL.into_iter()
    }
}

impl From<Hotel> for usize {
    fn from(hotel: Hotel) -> Self {
        hotel as usize
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("there is no hotel named '{0}'")]
pub struct ParseHotelError(pub String);

impl FromStr for Hotel {
    type Err = ParseHotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Hotel::iter()
            .find(|hotel| hotel.name() == wanted)
            .ok_or_else(|| ParseHotelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_value_by_tier() {
        assert_eq!(Hotel::Zeta.get_stock_value(0), 0);
        assert_eq!(Hotel::Zeta.get_stock_value(1), 0);
        assert_eq!(Hotel::Zeta.get_stock_value(2), 200);
        assert_eq!(Hotel::Fusion.get_stock_value(2), 300);
        assert_eq!(Hotel::Quantum.get_stock_value(2), 400);
        assert_eq!(Hotel::Sackson.get_stock_value(5), 500);
        assert_eq!(Hotel::Sackson.get_stock_value(6), 600);
        assert_eq!(Hotel::Sackson.get_stock_value(10), 600);
        assert_eq!(Hotel::Hydra.get_stock_value(11), 800);
        assert_eq!(Hotel::Phoenix.get_stock_value(41), 1200);
    }

    #[test]
    fn test_bonuses() {
        assert_eq!(Hotel::Zeta.get_majority_holder_bonus(2), 2000);
        assert_eq!(Hotel::Zeta.get_minority_holder_bonus(2), 1000);
        assert_eq!(Hotel::Quantum.get_majority_holder_bonus(2), 4000);
    }

    #[test]
    fn test_names_round_trip() {
        for hotel in Hotel::iter() {
            assert_eq!(hotel.to_string().parse::<Hotel>(), Ok(hotel));
        }
        assert_eq!("Quantum".parse::<Hotel>(), Ok(Hotel::Quantum));
        assert!("tower".parse::<Hotel>().is_err());
        assert_eq!(serde_json::to_string(&Hotel::Sackson).unwrap(), "\"sackson\"");
    }

    #[test]
    fn test_tiers() {
        let tiers: Vec<usize> = Hotel::iter().map(|hotel| hotel.tier()).collect();
        assert_eq!(tiers, vec![0, 0, 1, 1, 1, 2, 2]);
    }
}
