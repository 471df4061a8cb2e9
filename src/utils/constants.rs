/// ERDDAP server and dataset queried by default
pub const DEFAULT_BASE_URL: &str = "http://www.neracoos.org/erddap/tabledap";
pub const DEFAULT_DATASET: &str = "E05_aanderaa_all";
pub const DEFAULT_START: &str = "2015-08-25T15:00:00Z";
pub const DEFAULT_END: &str = "2016-12-05T14:00:00Z";

/// HTTP request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "MOORING_STATS";

/// Number of columns in one tabledap row
pub const COLUMN_COUNT: usize = 25;

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp
pub const DATE_PREFIX_LEN: usize = 10;

/// Column order requested from the server and expected in every row
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "station",
    "mooring_site_desc",
    "water_depth",
    "time",
    "current_speed",
    "current_speed_qc",
    "current_direction",
    "current_direction_qc",
    "current_u",
    "current_u_qc",
    "current_v",
    "current_v_qc",
    "temperature",
    "temperature_qc",
    "conductivity",
    "conductivity_qc",
    "salinity",
    "salinity_qc",
    "sigma_t",
    "sigma_t_qc",
    "time_created",
    "time_modified",
    "longitude",
    "latitude",
    "depth",
];

/// Quality flag values
pub const QC_GOOD: i8 = 0;
pub const QC_OUT_OF_RANGE: i8 = 1;
pub const QC_QUESTIONABLE: i8 = 2;
pub const QC_BAD: i8 = 3;
pub const QC_MISSING: i8 = 9;

/// Output JSON keys
pub const KEY_CURRENT_SPEED: &str = "current_speed";
pub const KEY_SALINITY: &str = "salinity";
pub const KEY_TEMPERATURE: &str = "temperature";
