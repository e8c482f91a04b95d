//! Wire keys and positional slot indices for every message kind.
//!
//! Each positional message defines `MIN_COUNT` slots. Arrays may be longer
//! (newer hub firmware appends fields); anything past `MIN_COUNT` is ignored.

pub const TYPE_KEY: &str = "type";
pub const SERIAL_NUMBER_KEY: &str = "serial_number";
pub const HUB_SN_KEY: &str = "hub_sn";
pub const FIRMWARE_REVISION_KEY: &str = "firmware_revision";

pub const EVENT_KEY: &str = "evt";
pub const RAPID_KEY: &str = "ob";
pub const OBSERVATION_KEY: &str = "obs";

pub mod rain_start {
    pub const EPOCH: usize = 0;
    pub const MIN_COUNT: usize = 1;
}

pub mod lightning_strike {
    pub const EPOCH: usize = 0;
    pub const DISTANCE: usize = 1;
    pub const ENERGY: usize = 2;
    pub const MIN_COUNT: usize = 3;
}

pub mod rapid_wind {
    pub const EPOCH: usize = 0;
    pub const WIND_SPEED: usize = 1;
    pub const WIND_DIRECTION: usize = 2;
    pub const MIN_COUNT: usize = 3;
}

pub mod obs_air {
    pub const EPOCH: usize = 0;
    pub const STATION_PRESSURE: usize = 1;
    pub const AIR_TEMPERATURE: usize = 2;
    pub const RELATIVE_HUMIDITY: usize = 3;
    pub const STRIKE_COUNT: usize = 4;
    pub const STRIKE_AVG_DISTANCE: usize = 5;
    pub const BATTERY: usize = 6;
    pub const REPORT_INTERVAL: usize = 7;
    pub const MIN_COUNT: usize = 8;
}

pub mod obs_sky {
    pub const EPOCH: usize = 0;
    pub const ILLUMINANCE: usize = 1;
    pub const UV: usize = 2;
    pub const RAIN_PREVIOUS_MINUTE: usize = 3;
    pub const WIND_LULL: usize = 4;
    pub const WIND_AVERAGE: usize = 5;
    pub const WIND_GUST: usize = 6;
    pub const WIND_DIRECTION: usize = 7;
    pub const BATTERY: usize = 8;
    pub const REPORT_INTERVAL: usize = 9;
    pub const SOLAR_RADIATION: usize = 10;
    pub const LOCAL_DAY_RAIN: usize = 11;
    pub const PRECIPITATION_TYPE: usize = 12;
    pub const WIND_SAMPLE_INTERVAL: usize = 13;
    pub const MIN_COUNT: usize = 14;
}

pub mod obs_st {
    pub const EPOCH: usize = 0;
    pub const WIND_LULL: usize = 1;
    pub const WIND_AVERAGE: usize = 2;
    pub const WIND_GUST: usize = 3;
    pub const WIND_DIRECTION: usize = 4;
    pub const WIND_SAMPLE_INTERVAL: usize = 5;
    pub const STATION_PRESSURE: usize = 6;
    pub const AIR_TEMPERATURE: usize = 7;
    pub const RELATIVE_HUMIDITY: usize = 8;
    pub const ILLUMINANCE: usize = 9;
    pub const UV: usize = 10;
    pub const SOLAR_RADIATION: usize = 11;
    pub const RAIN_PREVIOUS_MINUTE: usize = 12;
    pub const PRECIPITATION_TYPE: usize = 13;
    pub const STRIKE_AVG_DISTANCE: usize = 14;
    pub const STRIKE_COUNT: usize = 15;
    pub const BATTERY: usize = 16;
    pub const REPORT_INTERVAL: usize = 17;
    pub const MIN_COUNT: usize = 18;
}

pub mod device_status {
    pub const TIMESTAMP: &str = "timestamp";
    pub const UPTIME: &str = "uptime";
    pub const VOLTAGE: &str = "voltage";
    pub const RSSI: &str = "rssi";
    pub const HUB_RSSI: &str = "hub_rssi";
    pub const SENSOR_STATUS: &str = "sensor_status";
    pub const DEBUG: &str = "debug";
}

pub mod hub_status {
    pub const TIMESTAMP: &str = "timestamp";
    pub const UPTIME: &str = "uptime";
    pub const RSSI: &str = "rssi";
    pub const RESET_FLAGS: &str = "reset_flags";
    pub const SEQ: &str = "seq";
}
