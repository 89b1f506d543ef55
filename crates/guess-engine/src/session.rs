//! Game session state machine and its view-model projection.
//!
//! A session is an explicit value owned by whatever serves one player; there
//! is no ambient state. `NoTarget` is modeled as `target == None`; starting a
//! game moves to `Active` and a reset moves back. Reference data (resolver,
//! index) is passed in by shared reference and never mutated.

use crate::feedback::{self, Rgba, Tier};
use crate::{
    CountryId, GeoIndex, Language, NameResolver, Rejection, MAX_DISTANCE_KM, PRIORITY_COUNTRIES,
    PRIORITY_WEIGHT,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// One resolved guess, in attempt order. Immutable once appended;
/// `distance_km` is absent on an exact match.
#[derive(Debug, Clone, Serialize)]
pub struct Guess {
    pub id: CountryId,
    pub tier: Tier,
    pub distance_km: Option<f64>,
}

/// A wrong guess in the closest-miss list. One entry per distinct country;
/// the first computed distance is the one kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncorrectEntry {
    pub name: String,
    pub distance_km: f64,
}

/// Per-guess feedback for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessReport {
    /// Spanish display name of the resolved country.
    pub display_name: String,
    /// Which language table the input matched.
    pub language: Language,
    pub distance_km: Option<f64>,
    pub tier: Tier,
    pub correct: bool,
}

/// Serializable snapshot of everything the renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// Country ids to paint, in first-guess order (target last if revealed).
    pub rendered: Vec<CountryId>,
    pub colors: BTreeMap<CountryId, Rgba>,
    /// Wrong guesses sorted ascending by distance; ties keep insertion order.
    pub incorrect: Vec<IncorrectEntry>,
    pub attempts: usize,
}

/// Single-player game state. Not thread-safe by design: one session per
/// player, processed one submission at a time.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    target: Option<CountryId>,
    guesses: Vec<Guess>,
    incorrect: Vec<IncorrectEntry>,
    revealed: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted random target pick over the whole index. Countries on the
    /// curated priority list are [`PRIORITY_WEIGHT`] times more likely than
    /// the rest. `None` only when the index is empty.
    pub fn choose_target<R: Rng>(index: &GeoIndex, rng: &mut R) -> Option<CountryId> {
        let ids = index.all_ids();
        let priority: HashSet<&str> = PRIORITY_COUNTRIES.iter().copied().collect();
        let weights = ids.iter().map(|id| {
            if priority.contains(id.as_str()) {
                PRIORITY_WEIGHT
            } else {
                1.0
            }
        });
        let distribution = WeightedIndex::new(weights).ok()?;
        Some(ids[distribution.sample(rng)].clone())
    }

    /// Start a round with the given target, clearing all per-round state.
    pub fn new_game(&mut self, target: CountryId) {
        debug!("New game, target {}", target);
        self.target = Some(target);
        self.guesses.clear();
        self.incorrect.clear();
        self.revealed = false;
    }

    pub fn target(&self) -> Option<&CountryId> {
        self.target.as_ref()
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn incorrect(&self) -> &[IncorrectEntry] {
        &self.incorrect
    }

    /// Process one guess. Rejections leave the session untouched; a repeated
    /// correct guess appends another success entry on purpose.
    pub fn submit_guess(
        &mut self,
        text: &str,
        resolver: &NameResolver,
        index: &GeoIndex,
    ) -> std::result::Result<GuessReport, Rejection> {
        let target = self.target.clone().ok_or(Rejection::NoActiveTarget)?;
        let (id, language) = resolver.resolve(text).ok_or(Rejection::UnknownCountry)?;
        let Some(centroid) = index.centroid(&id) else {
            return Err(Rejection::NoGeometry(id));
        };
        let display_name = resolver.display_name(&id, Language::Spanish);

        if id == target {
            let tier = feedback::classify(None, MAX_DISTANCE_KM);
            self.guesses.push(Guess {
                id,
                tier,
                distance_km: None,
            });
            return Ok(GuessReport {
                display_name,
                language,
                distance_km: None,
                tier,
                correct: true,
            });
        }

        let target_centroid = index
            .centroid(&target)
            .ok_or_else(|| Rejection::NoGeometry(target.clone()))?;
        let distance = index.distance_km(&centroid, &target_centroid);
        let tier = feedback::classify(Some(distance), MAX_DISTANCE_KM);
        debug!("Guess {} at {:.0} km, {:?}", id, distance, tier);

        self.guesses.push(Guess {
            id,
            tier,
            distance_km: Some(distance),
        });
        if !self.incorrect.iter().any(|e| e.name == display_name) {
            self.incorrect.push(IncorrectEntry {
                name: display_name.clone(),
                distance_km: distance,
            });
        }

        Ok(GuessReport {
            display_name,
            language,
            distance_km: Some(distance),
            tier,
            correct: false,
        })
    }

    /// Flip the reveal flag. Hiding again scrubs any guess entry naming the
    /// target, so a leaked reveal cannot linger in the guess list; the
    /// incorrect list is untouched.
    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
        if !self.revealed {
            if let Some(target) = &self.target {
                self.guesses.retain(|g| &g.id != target);
            }
        }
    }

    /// Back to the initial no-target state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pure projection of the visible state; mutates nothing. Later guesses
    /// of the same country overwrite its color; a revealed target is always
    /// forced to the reveal green.
    pub fn view_model(&self) -> ViewModel {
        let mut rendered: Vec<CountryId> = Vec::new();
        let mut colors: BTreeMap<CountryId, Rgba> = BTreeMap::new();

        for guess in &self.guesses {
            if !rendered.contains(&guess.id) {
                rendered.push(guess.id.clone());
            }
            colors.insert(guess.id.clone(), guess.tier.color());
        }

        if self.revealed {
            if let Some(target) = &self.target {
                if !rendered.contains(target) {
                    rendered.push(target.clone());
                }
                colors.insert(target.clone(), feedback::REVEALED);
            }
        }

        let mut incorrect = self.incorrect.clone();
        // Stable sort keeps insertion order on distance ties.
        incorrect.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ViewModel {
            rendered,
            colors,
            incorrect,
            attempts: self.guesses.len(),
        }
    }
}
