use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ProcessingError;
use crate::models::observation::Observation;
use crate::models::row::date_prefix;
use crate::utils::constants::QC_GOOD;

/// How min/max values and the latest date are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AggregationPolicy {
    /// A min/max of exactly 0.0 counts as unset, and `max_date` is the
    /// date of the last good observation folded.
    #[default]
    Legacy,
    /// Min/max are seeded by the first good value whatever it is, and
    /// `max_date` is the greatest date seen.
    Corrected,
}

impl FromStr for AggregationPolicy {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(AggregationPolicy::Legacy),
            "corrected" => Ok(AggregationPolicy::Corrected),
            other => Err(ProcessingError::Config(format!(
                "Unknown aggregation policy '{}' (expected 'legacy' or 'corrected')",
                other
            ))),
        }
    }
}

// Settings files and `MOORING_STATS_POLICY` go through here, so they accept
// the same case-insensitive names as `--policy`.
impl TryFrom<String> for AggregationPolicy {
    type Error = ProcessingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Running summary of one quantity.
///
/// Holds O(1) state: no raw observation is kept once folded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    pub min_date: String,
    pub max_date: String,
    pub count: i32,
    pub min_value: f64,
    pub max_value: f64,
    pub avg_value: f64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fold one observation in with the legacy policy.
    ///
    /// A non-zero `qc` discards the observation. Dates assume the good
    /// observations arrive in time order: the last one folded sets `max_date`.
    pub fn update(&mut self, timestamp: &str, value: f64, qc: i8) {
        self.update_with_policy(timestamp, value, qc, AggregationPolicy::Legacy);
    }

    pub fn update_with_policy(
        &mut self,
        timestamp: &str,
        value: f64,
        qc: i8,
        policy: AggregationPolicy,
    ) {
        if qc != QC_GOOD {
            return;
        }

        let date = date_prefix(timestamp);
        if self.min_date.is_empty() {
            self.min_date = date.to_string();
        }

        match policy {
            AggregationPolicy::Legacy => {
                self.max_date = date.to_string();

                if self.min_value == 0.0 || value < self.min_value {
                    self.min_value = value;
                }
                if self.max_value == 0.0 || value > self.max_value {
                    self.max_value = value;
                }
            }
            AggregationPolicy::Corrected => {
                if date > self.max_date.as_str() {
                    self.max_date = date.to_string();
                }
                if date < self.min_date.as_str() {
                    self.min_date = date.to_string();
                }

                if self.count == 0 {
                    self.min_value = value;
                    self.max_value = value;
                } else {
                    self.min_value = self.min_value.min(value);
                    self.max_value = self.max_value.max(value);
                }
            }
        }

        let count = f64::from(self.count);
        self.avg_value = (self.avg_value * count + value) / (count + 1.0);
        self.count += 1;
    }

    pub fn observe(&mut self, observation: &Observation<'_>, policy: AggregationPolicy) {
        self.update_with_policy(
            observation.timestamp,
            observation.value,
            observation.qc,
            policy,
        );
    }
}


#[cfg(test)]
mod fold_properties {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn timestamp(day: u32) -> String {
        let base = NaiveDate::from_ymd_opt(2015, 8, 25).unwrap();
        (base + Duration::days(i64::from(day)))
            .format("%Y-%m-%dT15:00:00Z")
            .to_string()
    }

    fn arb_value() -> impl Strategy<Value = f64> {
        -1_000.0f64..1_000.0f64
    }

    fn arb_excluded_qc() -> impl Strategy<Value = i8> {
        prop_oneof![i8::MIN..0i8, 1i8..=i8::MAX]
    }

    fn arb_qc() -> impl Strategy<Value = i8> {
        prop_oneof![3 => Just(0i8), 1 => arb_excluded_qc()]
    }

    fn fold(observations: &[(u32, f64, i8)]) -> AggregateState {
        let mut state = AggregateState::new();
        for (day, value, qc) in observations {
            state.update(&timestamp(*day), *value, *qc);
        }
        state
    }

    proptest! {
        #[test]
        fn prop_excluded_only_stays_empty(
            observations in prop::collection::vec((0u32..2_000, arb_value(), arb_excluded_qc()), 0..64)
        ) {
            prop_assert_eq!(fold(&observations), AggregateState::default());
        }

        #[test]
        fn prop_single_observation(
            day in 0u32..2_000,
            value in arb_value().prop_filter("non-zero", |v| *v != 0.0)
        ) {
            let state = fold(&[(day, value, 0)]);
            let date = timestamp(day)[..10].to_string();

            prop_assert_eq!(state.count, 1);
            prop_assert_eq!(state.min_value, value);
            prop_assert_eq!(state.max_value, value);
            prop_assert_eq!(state.avg_value, value);
            prop_assert_eq!(&state.min_date, &date);
            prop_assert_eq!(&state.max_date, &date);
        }

        #[test]
        fn prop_average_is_mean(values in prop::collection::vec(arb_value(), 1..128)) {
            let observations: Vec<(u32, f64, i8)> = values.iter().map(|v| (0, *v, 0)).collect();
            let state = fold(&observations);
            let mean = values.iter().sum::<f64>() / values.len() as f64;

            prop_assert_eq!(state.count as usize, values.len());
            prop_assert!((state.avg_value - mean).abs() < 1e-9);
        }

        #[test]
        fn prop_excluded_observations_are_ignored(
            observations in prop::collection::vec((0u32..2_000, arb_value(), arb_qc()), 0..64)
        ) {
            let valid: Vec<(u32, f64, i8)> = observations
                .iter()
                .copied()
                .filter(|(_, _, qc)| *qc == 0)
                .collect();

            prop_assert_eq!(fold(&observations), fold(&valid));
        }

        #[test]
        fn prop_ordered_input_keeps_bounds(
            mut observations in prop::collection::vec((0u32..2_000, arb_value(), arb_qc()), 0..64)
        ) {
            observations.sort_by_key(|(day, _, _)| *day);
            let state = fold(&observations);

            if state.count > 0 {
                prop_assert!(state.min_value <= state.max_value);
                prop_assert!(state.min_date <= state.max_date);
            } else {
                prop_assert_eq!(state, AggregateState::default());
            }
        }
    }
}
