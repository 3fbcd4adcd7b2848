//! Worker pool generation.
//!
//! Two modes build the initial workers:
//!
//! - `sequential` -- worker `j` (0-based) is named `worker{j+1}`, is
//!   `20 + j` years old, lives `1.0 + j` away, and asks the initial wage.
//! - `sampled` -- ages, distances, and reservation wages are drawn from a
//!   [`StdRng`] seeded from the configuration, so a seed always yields the
//!   same pool.

use labor_agents::{AgentError, NegotiationConfig, Worker, WorkerProfile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::config::{ConfigError, PopulationConfig};

/// How worker attributes are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WorkerGeneration {
    /// Deterministic ladder of ages and distances.
    #[default]
    Sequential,
    /// Seeded random attributes.
    Sampled {
        /// Youngest age, inclusive.
        #[serde(default = "default_min_age")]
        min_age: u32,
        /// Oldest age, inclusive.
        #[serde(default = "default_max_age")]
        max_age: u32,
        /// Shortest distance, inclusive.
        #[serde(default = "default_min_distance")]
        min_distance: f64,
        /// Longest distance, inclusive.
        #[serde(default = "default_max_distance")]
        max_distance: f64,
        /// Reservation wages fall within `initial_wage * (1 ± wage_spread)`.
        #[serde(default = "default_wage_spread")]
        wage_spread: f64,
    },
}

impl WorkerGeneration {
    /// Check the sampling bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for inverted or non-finite ranges, or
    /// a wage spread outside `[0, 1)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self::Sampled {
            min_age,
            max_age,
            min_distance,
            max_distance,
            wage_spread,
        } = *self
        else {
            return Ok(());
        };
        let reason = if min_age > max_age {
            format!("population.generation.min_age {min_age} exceeds max_age {max_age}")
        } else if !min_distance.is_finite() || !max_distance.is_finite() || min_distance < 0.0 {
            String::from("population.generation distances must be finite and >= 0")
        } else if min_distance > max_distance {
            format!(
                "population.generation.min_distance {min_distance} exceeds max_distance {max_distance}"
            )
        } else if !(0.0..1.0).contains(&wage_spread) {
            format!("population.generation.wage_spread must be within [0, 1), got {wage_spread}")
        } else {
            return Ok(());
        };
        Err(ConfigError::Invalid { reason })
    }
}

/// Build the worker pool.
///
/// # Errors
///
/// Returns [`AgentError::InvalidAttribute`] if a generated worker has an
/// invalid attribute.
pub fn generate_workers(
    population: &PopulationConfig,
    terms: &NegotiationConfig,
    seed: u64,
) -> Result<Vec<Worker>, AgentError> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..population.worker_count)
        .map(|j| {
            let profile = match population.generation {
                WorkerGeneration::Sequential => WorkerProfile {
                    age: 20_u32.saturating_add(j),
                    distance: 1.0 + f64::from(j),
                    previous_wage: population.initial_wage,
                },
                WorkerGeneration::Sampled {
                    min_age,
                    max_age,
                    min_distance,
                    max_distance,
                    wage_spread,
                } => {
                    let distance = rng.random_range(min_distance..=max_distance);
                    let wage = population.initial_wage;
                    let low = wage * (1.0 - wage_spread);
                    let high = wage * (1.0 + wage_spread);
                    WorkerProfile {
                        age: rng.random_range(min_age..=max_age),
                        distance: (distance * 100.0).round() / 100.0,
                        // A spread too small to separate the bounds collapses to the wage.
                        previous_wage: if low < high && high.is_finite() {
                            rng.random_range(low..high).round()
                        } else {
                            wage
                        },
                    }
                }
            };
            Worker::new(format!("worker{}", j.saturating_add(1)), profile, terms)
        })
        .collect()
}

const fn default_min_age() -> u32 {
    20
}

const fn default_max_age() -> u32 {
    59
}

const fn default_min_distance() -> f64 {
    1.0
}

const fn default_max_distance() -> f64 {
    5.0
}

const fn default_wage_spread() -> f64 {
    0.2
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use labor_agents::Entity;

    fn sampled() -> WorkerGeneration {
        WorkerGeneration::Sampled {
            min_age: default_min_age(),
            max_age: default_max_age(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            wage_spread: default_wage_spread(),
        }
    }

    fn population(worker_count: u32, generation: WorkerGeneration) -> PopulationConfig {
        PopulationConfig {
            worker_count,
            generation,
            ..PopulationConfig::default()
        }
    }

    #[test]
    fn sequential_ladder() {
        let workers =
            generate_workers(&population(3, WorkerGeneration::Sequential), &NegotiationConfig::default(), 0)
                .unwrap();
        let names: Vec<&str> = workers.iter().map(Entity::name).collect();
        assert_eq!(names, ["worker1", "worker2", "worker3"]);
        assert_eq!(workers[2].profile().age, 22);
        assert!((workers[2].profile().distance - 3.0).abs() < f64::EPSILON);
        assert!(workers
            .iter()
            .all(|w| (w.profile().previous_wage - 3_000_000.0).abs() < f64::EPSILON));
    }

    #[test]
    fn sampled_pool_stays_in_bounds() {
        let workers =
            generate_workers(&population(50, sampled()), &NegotiationConfig::default(), 7).unwrap();
        assert_eq!(workers.len(), 50);
        for w in &workers {
            let p = w.profile();
            assert!((20..=59).contains(&p.age));
            assert!((1.0..=5.0).contains(&p.distance));
            assert!((2_400_000.0..=3_600_000.0).contains(&p.previous_wage));
        }
    }

    #[test]
    fn same_seed_same_pool() {
        let terms = NegotiationConfig::default();
        let config = population(10, sampled());
        let a = generate_workers(&config, &terms, 99).unwrap();
        let b = generate_workers(&config, &terms, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negligible_wage_spread_keeps_the_initial_wage() {
        let generation = WorkerGeneration::Sampled {
            min_age: 20,
            max_age: 59,
            min_distance: 1.0,
            max_distance: 5.0,
            wage_spread: 1e-17,
        };
        assert!(generation.validate().is_ok());

        let workers =
            generate_workers(&population(4, generation), &NegotiationConfig::default(), 3).unwrap();

        assert_eq!(workers.len(), 4);
        assert!(workers
            .iter()
            .all(|w| (w.profile().previous_wage - 3_000_000.0).abs() < f64::EPSILON));
    }

    #[test]
    fn inverted_ranges_are_invalid() {
        let generation = WorkerGeneration::Sampled {
            min_age: 60,
            max_age: 20,
            min_distance: 1.0,
            max_distance: 5.0,
            wage_spread: 0.2,
        };
        assert!(generation.validate().is_err());
        assert!(WorkerGeneration::Sequential.validate().is_ok());
        assert!(sampled().validate().is_ok());
    }

    #[test]
    fn sampled_mode_parses_with_defaults() {
        let generation: WorkerGeneration = serde_yml::from_str("mode: sampled\nmin_age: 25\n").unwrap();
        assert!(matches!(
            generation,
            WorkerGeneration::Sampled { min_age: 25, max_age: 59, .. }
        ));
    }
}
