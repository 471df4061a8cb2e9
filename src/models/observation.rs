use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MooringRow;
use crate::utils::constants::{
    KEY_CURRENT_SPEED, KEY_SALINITY, KEY_TEMPERATURE, QC_BAD, QC_GOOD, QC_MISSING,
    QC_OUT_OF_RANGE, QC_QUESTIONABLE,
};

/// A single reading of one quantity, borrowed from a decoded row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub timestamp: &'a str,
    pub value: f64,
    pub qc: i8,
}

impl<'a> Observation<'a> {
    pub fn new(timestamp: &'a str, value: f64, qc: i8) -> Self {
        Self {
            timestamp,
            value,
            qc,
        }
    }

    pub fn is_good(&self) -> bool {
        self.qc == QC_GOOD
    }

    pub fn flag(&self) -> QcFlag {
        QcFlag::from_i8(self.qc)
    }
}

/// QC codes used by the mooring datasets.
///
/// Only `Good` takes part in aggregation; the other categories are kept
/// apart for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QcFlag {
    Good,
    OutOfRange,
    Questionable,
    Bad,
    Missing,
    Other(i8),
}

impl QcFlag {
    pub fn from_i8(value: i8) -> Self {
        match value {
            QC_GOOD => QcFlag::Good,
            QC_OUT_OF_RANGE => QcFlag::OutOfRange,
            QC_QUESTIONABLE => QcFlag::Questionable,
            QC_BAD => QcFlag::Bad,
            QC_MISSING => QcFlag::Missing,
            other => QcFlag::Other(other),
        }
    }

    pub fn as_i8(&self) -> i8 {
        match self {
            QcFlag::Good => QC_GOOD,
            QcFlag::OutOfRange => QC_OUT_OF_RANGE,
            QcFlag::Questionable => QC_QUESTIONABLE,
            QcFlag::Bad => QC_BAD,
            QcFlag::Missing => QC_MISSING,
            QcFlag::Other(code) => *code,
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, QcFlag::Good)
    }
}

impl fmt::Display for QcFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QcFlag::Good => write!(f, "good"),
            QcFlag::OutOfRange => write!(f, "out of range"),
            QcFlag::Questionable => write!(f, "questionable"),
            QcFlag::Bad => write!(f, "bad"),
            QcFlag::Missing => write!(f, "missing"),
            QcFlag::Other(code) => write!(f, "code {}", code),
        }
    }
}

/// The three tracked quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    CurrentSpeed,
    Salinity,
    Temperature,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [
        Quantity::CurrentSpeed,
        Quantity::Salinity,
        Quantity::Temperature,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Quantity::CurrentSpeed => KEY_CURRENT_SPEED,
            Quantity::Salinity => KEY_SALINITY,
            Quantity::Temperature => KEY_TEMPERATURE,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::CurrentSpeed => "cm/s",
            Quantity::Salinity => "PSU",
            Quantity::Temperature => "°C",
        }
    }

    /// Pick this quantity's value/QC pair out of a row, with the row's shared timestamp
    pub fn observe<'a>(&self, row: &'a MooringRow) -> Observation<'a> {
        match self {
            Quantity::CurrentSpeed => {
                Observation::new(&row.time, row.current_speed, row.current_speed_qc)
            }
            Quantity::Salinity => Observation::new(&row.time, row.salinity, row.salinity_qc),
            Quantity::Temperature => {
                Observation::new(&row.time, row.temperature, row.temperature_qc)
            }
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
