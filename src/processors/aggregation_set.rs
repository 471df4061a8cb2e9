use tracing::debug;

use crate::models::{AggregateState, AggregationPolicy, AggregationSummary, MooringRow, Quantity};

/// Drives one aggregate per quantity from a single ordered row stream.
#[derive(Debug, Clone, Default)]
pub struct AggregationSet {
    policy: AggregationPolicy,
    current_speed: AggregateState,
    salinity: AggregateState,
    temperature: AggregateState,
    rows_seen: usize,
}

impl AggregationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Fold every row in input order
    pub fn process<'a, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'a MooringRow>,
    {
        for row in rows {
            self.push(row);
        }
        debug!(
            rows = self.rows_seen,
            current_speed = self.current_speed.count,
            salinity = self.salinity.count,
            temperature = self.temperature.count,
            "aggregation pass complete"
        );
    }

    /// Fold a single row into all three aggregates
    pub fn push(&mut self, row: &MooringRow) {
        let policy = self.policy;
        for quantity in Quantity::ALL {
            let observation = quantity.observe(row);
            self.state_mut(quantity).observe(&observation, policy);
        }
        self.rows_seen += 1;
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn get(&self, quantity: Quantity) -> &AggregateState {
        match quantity {
            Quantity::CurrentSpeed => &self.current_speed,
            Quantity::Salinity => &self.salinity,
            Quantity::Temperature => &self.temperature,
        }
    }

    fn state_mut(&mut self, quantity: Quantity) -> &mut AggregateState {
        match quantity {
            Quantity::CurrentSpeed => &mut self.current_speed,
            Quantity::Salinity => &mut self.salinity,
            Quantity::Temperature => &mut self.temperature,
        }
    }

    pub fn into_summary(self) -> AggregationSummary {
        AggregationSummary {
            current_speed: self.current_speed,
            salinity: self.salinity,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, current: (f64, i8), salinity: (f64, i8), temperature: (f64, i8)) -> MooringRow {
        MooringRow {
            station: "E05".to_string(),
            mooring_site_desc: "Central Maine Shelf".to_string(),
            water_depth: 100.0,
            time: time.to_string(),
            current_speed: current.0,
            current_speed_qc: current.1,
            current_direction: 90.0,
            current_direction_qc: 0,
            current_u: 0.0,
            current_u_qc: 0,
            current_v: 0.0,
            current_v_qc: 0,
            temperature: temperature.0,
            temperature_qc: temperature.1,
            conductivity: 40.0,
            conductivity_qc: 0,
            salinity: salinity.0,
            salinity_qc: salinity.1,
            sigma_t: 24.0,
            sigma_t_qc: 0,
            time_created: "2016-12-06T00:00:00Z".to_string(),
            time_modified: "2016-12-06T00:00:00Z".to_string(),
            longitude: -69.35,
            latitude: 43.72,
            depth: 2.0,
        }
    }

    #[test]
    fn test_end_to_end_current_speed() {
        let rows = vec![
            row("2015-08-25T15:00:00Z", (1.0, 0), (31.0, 0), (10.0, 0)),
            row("2015-08-25T16:00:00Z", (2.0, 0), (31.5, 0), (11.0, 0)),
            row("2015-08-26T17:00:00Z", (3.0, 1), (32.0, 0), (12.0, 0)),
        ];

        let mut set = AggregationSet::new();
        set.process(&rows);

        let current = set.get(Quantity::CurrentSpeed);
        assert_eq!(current.min_value, 1.0);
        assert_eq!(current.max_value, 2.0);
        assert_eq!(current.avg_value, 1.5);
        assert_eq!(current.count, 2);
        assert_eq!(current.min_date, "2015-08-25");
        assert_eq!(current.max_date, "2015-08-25");
        assert_eq!(set.rows_seen(), 3);
    }

    #[test]
    fn test_quantities_are_independent() {
        let rows = vec![
            row("2015-08-25T15:00:00Z", (1.0, 0), (31.0, 3), (10.0, 0)),
            row("2015-08-26T15:00:00Z", (2.0, 2), (32.0, 0), (12.0, 9)),
        ];

        let mut set = AggregationSet::new();
        set.process(&rows);
        let summary = set.into_summary();

        assert_eq!(summary.current_speed.count, 1);
        assert_eq!(summary.current_speed.max_date, "2015-08-25");
        assert_eq!(summary.salinity.count, 1);
        assert_eq!(summary.salinity.min_date, "2015-08-26");
        assert_eq!(summary.salinity.min_value, 32.0);
        assert_eq!(summary.temperature.count, 1);
        assert_eq!(summary.temperature.avg_value, 10.0);
    }

    #[test]
    fn test_push_matches_process() {
        let rows = vec![
            row("2015-08-25T15:00:00Z", (4.0, 0), (31.0, 0), (10.0, 0)),
            row("2015-08-26T15:00:00Z", (6.0, 0), (30.0, 0), (9.0, 1)),
        ];

        let mut batch = AggregationSet::new();
        batch.process(&rows);

        let mut pushed = AggregationSet::new();
        for r in &rows {
            pushed.push(r);
        }

        assert_eq!(batch.into_summary(), pushed.into_summary());
    }

    #[test]
    fn test_empty_stream() {
        let mut set = AggregationSet::new().with_policy(AggregationPolicy::Corrected);
        set.process(std::iter::empty());
        assert_eq!(set.policy(), AggregationPolicy::Corrected);
        assert_eq!(set.into_summary(), AggregationSummary::default());
    }
}
