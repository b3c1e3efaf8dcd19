//! Test data for the demonstration driver.

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::errors::BstResult;

/// Draws `sample_size` values uniformly from `[min_value, max_value]`.
///
/// Duplicates are possible; the tree drops them on construction.
#[instrument(level = "debug")]
pub fn random_values(settings: &Settings) -> BstResult<Vec<i64>> {
    settings.validate()?;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let range = Uniform::new_inclusive(settings.min_value, settings.max_value);
    let values: Vec<i64> = (0..settings.sample_size)
        .map(|_| rng.sample(range))
        .collect();
    debug!(?values, "drawn sample");
    Ok(values)
}

/// Values strictly above the sample range, ascending.
///
/// Inserting them in order grows a right-leaning chain that unbalances any
/// tree of sampled values once there are two or more of them.
pub fn unbalancing_values(settings: &Settings) -> Vec<i64> {
    (1..=settings.unbalance_count as i64)
        .map(|k| {
            settings
                .max_value
                .saturating_add(k.saturating_mul(settings.unbalance_step))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_seed_when_drawing_twice_then_same_values() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        let first = random_values(&settings).unwrap();
        let second = random_values(&settings).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 15);
    }

    #[test]
    fn given_range_when_drawing_then_values_stay_inside() {
        let settings = Settings {
            sample_size: 200,
            min_value: -5,
            max_value: 5,
            seed: Some(1),
            ..Default::default()
        };
        let values = random_values(&settings).unwrap();
        assert!(values.iter().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn given_default_settings_when_unbalancing_then_steps_above_max() {
        assert_eq!(
            unbalancing_values(&Settings::default()),
            vec![105, 110, 115]
        );
    }

    #[test]
    fn given_invalid_range_when_drawing_then_error() {
        let settings = Settings {
            min_value: 3,
            max_value: 2,
            ..Default::default()
        };
        assert!(random_values(&settings).is_err());
    }
}
