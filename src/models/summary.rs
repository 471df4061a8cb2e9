use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::aggregate::AggregateState;
use crate::models::observation::Quantity;

/// Final per-quantity aggregates, rendered as the fixed output document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationSummary {
    pub current_speed: AggregateState,
    pub salinity: AggregateState,
    pub temperature: AggregateState,
}

/// One quantity's aggregate with its quantity-specific value keys
struct NamedAggregate<'a> {
    quantity: Quantity,
    state: &'a AggregateState,
}

impl Serialize for NamedAggregate<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (min_key, max_key, avg_key) = match self.quantity {
            Quantity::CurrentSpeed => (
                "min_current_speed",
                "max_current_speed",
                "avg_current_speed",
            ),
            Quantity::Salinity => ("min_salinity", "max_salinity", "avg_salinity"),
            Quantity::Temperature => ("min_temperature", "max_temperature", "avg_temperature"),
        };

        let mut s = serializer.serialize_struct("NamedAggregate", 6)?;
        s.serialize_field("min_date", &self.state.min_date)?;
        s.serialize_field("max_date", &self.state.max_date)?;
        s.serialize_field("num_records", &self.state.count)?;
        s.serialize_field(min_key, &self.state.min_value)?;
        s.serialize_field(max_key, &self.state.max_value)?;
        s.serialize_field(avg_key, &self.state.avg_value)?;
        s.end()
    }
}

impl Serialize for AggregationSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AggregationSummary", 3)?;
        for quantity in Quantity::ALL {
            let named = NamedAggregate {
                quantity,
                state: self.get(quantity),
            };
            s.serialize_field(quantity.key(), &named)?;
        }
        s.end()
    }
}

impl AggregationSummary {
    pub fn get(&self, quantity: Quantity) -> &AggregateState {
        match quantity {
            Quantity::CurrentSpeed => &self.current_speed,
            Quantity::Salinity => &self.salinity,
            Quantity::Temperature => &self.temperature,
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Mooring Statistics ===\n");
        for quantity in Quantity::ALL {
            let state = self.get(quantity);
            if state.is_empty() {
                summary.push_str(&format!("{}: no valid measurements\n", quantity));
                continue;
            }
            summary.push_str(&format!(
                "{}: {} records, {} to {}, min={:.3} {unit}, avg={:.3} {unit}, max={:.3} {unit}\n",
                quantity,
                state.count,
                state.min_date,
                state.max_date,
                state.min_value,
                state.avg_value,
                state.max_value,
                unit = quantity.unit(),
            ));
        }

        summary
    }
}
