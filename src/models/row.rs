use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{COLUMN_COUNT, COLUMN_NAMES, DATE_PREFIX_LEN};

/// One decoded row of the mooring table, in server column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MooringRow {
    pub station: String,
    pub mooring_site_desc: String,
    pub water_depth: f64,
    pub time: String,
    pub current_speed: f64,
    pub current_speed_qc: i8,
    pub current_direction: f64,
    pub current_direction_qc: i8,
    pub current_u: f64,
    pub current_u_qc: i8,
    pub current_v: f64,
    pub current_v_qc: i8,
    pub temperature: f64,
    pub temperature_qc: i8,
    pub conductivity: f64,
    pub conductivity_qc: i8,
    pub salinity: f64,
    pub salinity_qc: i8,
    pub sigma_t: f64,
    pub sigma_t_qc: i8,
    pub time_created: String,
    pub time_modified: String,
    pub longitude: f64,
    pub latitude: f64,
    pub depth: f64,
}

impl MooringRow {
    /// Decode a positional row. `row_index` is only used in error messages.
    pub fn from_values(values: &[Value], row_index: usize) -> Result<Self> {
        if values.len() < COLUMN_COUNT {
            return Err(ProcessingError::InvalidFormat(format!(
                "Row {}: expected {} columns, found {}",
                row_index,
                COLUMN_COUNT,
                values.len()
            )));
        }

        let cols = Columns { values, row_index };

        Ok(Self {
            station: cols.string(0)?,
            mooring_site_desc: cols.string(1)?,
            water_depth: cols.float(2)?,
            time: cols.timestamp(3)?,
            current_speed: cols.float(4)?,
            current_speed_qc: cols.qc(5)?,
            current_direction: cols.float(6)?,
            current_direction_qc: cols.qc(7)?,
            current_u: cols.float(8)?,
            current_u_qc: cols.qc(9)?,
            current_v: cols.float(10)?,
            current_v_qc: cols.qc(11)?,
            temperature: cols.float(12)?,
            temperature_qc: cols.qc(13)?,
            conductivity: cols.float(14)?,
            conductivity_qc: cols.qc(15)?,
            salinity: cols.float(16)?,
            salinity_qc: cols.qc(17)?,
            sigma_t: cols.float(18)?,
            sigma_t_qc: cols.qc(19)?,
            time_created: cols.string(20)?,
            time_modified: cols.string(21)?,
            longitude: cols.float(22)?,
            latitude: cols.float(23)?,
            depth: cols.float(24)?,
        })
    }

    /// The `YYYY-MM-DD` part of the observation time
    pub fn date_str(&self) -> &str {
        date_prefix(&self.time)
    }
}

/// First ten characters of an ISO-8601 timestamp, or the whole string if shorter
pub fn date_prefix(timestamp: &str) -> &str {
    timestamp.get(..DATE_PREFIX_LEN).unwrap_or(timestamp)
}

struct Columns<'a> {
    values: &'a [Value],
    row_index: usize,
}

impl Columns<'_> {
    fn mismatch(&self, index: usize, expected: &str) -> ProcessingError {
        ProcessingError::InvalidFormat(format!(
            "Row {}, column {} ({}): expected {}, found {}",
            self.row_index, index, COLUMN_NAMES[index], expected, self.values[index]
        ))
    }

    fn string(&self, index: usize) -> Result<String> {
        self.values[index]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(index, "a string"))
    }

    fn float(&self, index: usize) -> Result<f64> {
        self.values[index]
            .as_f64()
            .ok_or_else(|| self.mismatch(index, "a number"))
    }

    fn qc(&self, index: usize) -> Result<i8> {
        let raw = self.float(index)?;
        if raw.fract() != 0.0 || raw < i8::MIN as f64 || raw > i8::MAX as f64 {
            return Err(self.mismatch(index, "an integer QC code"));
        }
        Ok(raw as i8)
    }

    fn timestamp(&self, index: usize) -> Result<String> {
        let time = self.string(index)?;
        let prefix = time
            .get(..DATE_PREFIX_LEN)
            .ok_or_else(|| self.mismatch(index, "an ISO-8601 timestamp"))?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
            .map_err(|_| self.mismatch(index, "an ISO-8601 timestamp"))?;
        Ok(time)
    }
}
