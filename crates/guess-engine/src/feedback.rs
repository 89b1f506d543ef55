//! Distance feedback tiers and their colors.
//!
//! The scale is inverse: the closer the guess, the "hotter" and more intense
//! the color, except the exact match which overrides with green. Boundary
//! ratios use strict `>`, so a ratio sitting exactly on a threshold falls
//! into the next-lower bucket. The buckets partition `[0, inf)`.

use serde::{Deserialize, Serialize};

/// RGBA color with a float alpha, serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f64);

/// Color forced onto the target when the answer is revealed. Slightly
/// dimmer than the exact-guess green so the two remain distinguishable.
pub const REVEALED: Rgba = Rgba(0, 180, 0, 0.85);

/// Discrete feedback tier: the exact match plus six distance buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The guess is the target.
    Exact,
    /// ratio > 0.8 — nearly as far as the scale goes.
    Freezing,
    /// 0.6 < ratio <= 0.8
    Cold,
    /// 0.4 < ratio <= 0.6
    Cool,
    /// 0.2 < ratio <= 0.4
    Warm,
    /// 0.05 < ratio <= 0.2
    Hot,
    /// ratio <= 0.05 — right next door.
    Scorching,
}

impl Tier {
    /// Fixed color for this tier.
    pub fn color(self) -> Rgba {
        match self {
            Tier::Exact => Rgba(0, 180, 0, 0.9),
            Tier::Freezing => Rgba(255, 255, 255, 0.8),
            Tier::Cold => Rgba(255, 200, 120, 0.8),
            Tier::Cool => Rgba(255, 160, 60, 0.8),
            Tier::Warm => Rgba(200, 100, 30, 0.8),
            Tier::Hot => Rgba(150, 75, 0, 0.8),
            Tier::Scorching => Rgba(255, 0, 0, 0.9),
        }
    }

    /// Heat rank, higher = closer guess. `Exact` tops the scale.
    pub fn heat(self) -> u8 {
        match self {
            Tier::Freezing => 0,
            Tier::Cold => 1,
            Tier::Cool => 2,
            Tier::Warm => 3,
            Tier::Hot => 4,
            Tier::Scorching => 5,
            Tier::Exact => 6,
        }
    }
}

/// Map a guess distance to its tier. `None` means exact match.
pub fn classify(distance_km: Option<f64>, max_distance_km: f64) -> Tier {
    let Some(distance) = distance_km else {
        return Tier::Exact;
    };

    let ratio = distance / max_distance_km;
    if ratio > 0.8 {
        Tier::Freezing
    } else if ratio > 0.6 {
        Tier::Cold
    } else if ratio > 0.4 {
        Tier::Cool
    } else if ratio > 0.2 {
        Tier::Warm
    } else if ratio > 0.05 {
        Tier::Hot
    } else {
        Tier::Scorching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_DISTANCE_KM;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_exact_overrides() {
        assert_eq!(classify(None, MAX_DISTANCE_KM), Tier::Exact);
    }

    #[test]
    fn test_bucket_edges_use_strict_greater() {
        // A ratio exactly on a threshold belongs to the next-lower bucket.
        let max = 1000.0;
        assert_eq!(classify(Some(800.0), max), Tier::Cold);
        assert_eq!(classify(Some(800.1), max), Tier::Freezing);
        assert_eq!(classify(Some(600.0), max), Tier::Cool);
        assert_eq!(classify(Some(400.0), max), Tier::Warm);
        assert_eq!(classify(Some(200.0), max), Tier::Hot);
        assert_eq!(classify(Some(50.0), max), Tier::Scorching);
        assert_eq!(classify(Some(0.0), max), Tier::Scorching);
    }

    #[test]
    fn test_totality_and_monotonic_severity() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut samples: Vec<f64> = (0..10_000).map(|_| rng.gen_range(0.0..5.0)).collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut previous_heat = None;
        for ratio in samples {
            let tier = classify(Some(ratio), 1.0);
            assert_ne!(tier, Tier::Exact, "distance buckets never yield Exact");
            // Closer guesses are never colder.
            if let Some(prev) = previous_heat {
                assert!(tier.heat() <= prev);
            }
            previous_heat = Some(tier.heat());
        }
    }

    #[test]
    fn test_colors_are_fixed() {
        assert_eq!(Tier::Exact.color(), Rgba(0, 180, 0, 0.9));
        assert_eq!(Tier::Freezing.color(), Rgba(255, 255, 255, 0.8));
        assert_eq!(Tier::Scorching.color(), Rgba(255, 0, 0, 0.9));
        assert_ne!(REVEALED, Tier::Exact.color());
    }
}
