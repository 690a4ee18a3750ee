// Wire schema of the OpenSky state-vector response. The provider encodes
// each aircraft as a fixed-order array of 17+ heterogeneous values, any of
// which may be null. All positional knowledge lives in this module; the
// rest of the crate only sees named, typed, nullable fields.

use serde::Deserialize;
use serde_json::Value;

/// Positions of the fields read from one response row.
mod idx {
    pub const CALLSIGN: usize = 1;
    pub const ORIGIN_COUNTRY: usize = 2;
    pub const TIME_POSITION: usize = 3;
    pub const BARO_ALTITUDE: usize = 7;
    pub const ON_GROUND: usize = 8;
    pub const VELOCITY: usize = 9;
    pub const TRUE_TRACK: usize = 10;
    pub const VERTICAL_RATE: usize = 11;
    pub const GEO_ALTITUDE: usize = 13;
}

/// Envelope of the states endpoint. `states` is null or absent when no
/// aircraft are inside the queried box; that is a normal empty result.
#[derive(Debug, Deserialize)]
pub struct StatesResponse {
    #[serde(default)]
    pub states: Option<Vec<Vec<Value>>>,
}

impl StatesResponse {
    /// Decode every row, treating a null or missing list as zero aircraft.
    pub fn into_vectors(self) -> Vec<StateVector> {
        self.states
            .unwrap_or_default()
            .iter()
            .map(|row| StateVector::from_row(row))
            .collect()
    }
}

/// Named subset of one state-vector row. Units follow the provider:
/// altitudes in meters, velocity and vertical rate in m/s, track in
/// degrees clockwise from north, time as unix seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateVector {
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub time_position: Option<i64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub geo_altitude: Option<f64>,
}

impl StateVector {
    /// Decode one positional row. A null, missing or wrongly-typed value
    /// at any index becomes an absent field; a blank or whitespace-only
    /// callsign is also treated as absent.
    pub fn from_row(row: &[Value]) -> Self {
        StateVector {
            callsign: str_at(row, idx::CALLSIGN).and_then(normalize_callsign),
            origin_country: str_at(row, idx::ORIGIN_COUNTRY).map(str::to_string),
            time_position: i64_at(row, idx::TIME_POSITION),
            baro_altitude: f64_at(row, idx::BARO_ALTITUDE),
            on_ground: bool_at(row, idx::ON_GROUND),
            velocity: f64_at(row, idx::VELOCITY),
            true_track: f64_at(row, idx::TRUE_TRACK),
            vertical_rate: f64_at(row, idx::VERTICAL_RATE),
            geo_altitude: f64_at(row, idx::GEO_ALTITUDE),
        }
    }
}

fn str_at(row: &[Value], index: usize) -> Option<&str> {
    row.get(index).and_then(Value::as_str)
}

fn f64_at(row: &[Value], index: usize) -> Option<f64> {
    row.get(index).and_then(Value::as_f64)
}

fn i64_at(row: &[Value], index: usize) -> Option<i64> {
    row.get(index).and_then(Value::as_i64)
}

fn bool_at(row: &[Value], index: usize) -> bool {
    row.get(index).and_then(Value::as_bool).unwrap_or(false)
}

fn normalize_callsign(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Vec<Value> {
        value.as_array().expect("test row must be an array").clone()
    }

    #[test]
    fn decodes_a_fully_populated_row() {
        let row = row(json!([
            "4ca1fa", "SAS117 ", "Sweden", 1_700_000_000, 1_700_000_005,
            11.9, 57.7, 10000.0, false, 220.0, 90.0, 1.2, null, 10200.0,
            "1000", false, 0
        ]));

        let state = StateVector::from_row(&row);
        assert_eq!(state.callsign.as_deref(), Some("SAS117"));
        assert_eq!(state.origin_country.as_deref(), Some("Sweden"));
        assert_eq!(state.time_position, Some(1_700_000_000));
        assert_eq!(state.baro_altitude, Some(10000.0));
        assert!(!state.on_ground);
        assert_eq!(state.velocity, Some(220.0));
        assert_eq!(state.true_track, Some(90.0));
        assert_eq!(state.vertical_rate, Some(1.2));
        assert_eq!(state.geo_altitude, Some(10200.0));
    }

    #[test]
    fn null_values_become_absent_fields() {
        let row = row(json!([
            "4ca1fa", null, null, null, null, null, null, null, true,
            null, null, null, null, null, null, false, 0
        ]));

        let state = StateVector::from_row(&row);
        assert_eq!(state.callsign, None);
        assert_eq!(state.origin_country, None);
        assert_eq!(state.time_position, None);
        assert_eq!(state.baro_altitude, None);
        assert!(state.on_ground);
        assert_eq!(state.velocity, None);
        assert_eq!(state.true_track, None);
        assert_eq!(state.vertical_rate, None);
        assert_eq!(state.geo_altitude, None);
    }

    #[test]
    fn whitespace_callsign_is_absent() {
        let row = row(json!(["4ca1fa", "   ", "Sweden"]));
        assert_eq!(StateVector::from_row(&row).callsign, None);
    }

    #[test]
    fn callsign_is_trimmed() {
        let row = row(json!(["4ca1fa", "ABC123 ", "Sweden"]));
        assert_eq!(StateVector::from_row(&row).callsign.as_deref(), Some("ABC123"));
    }

    #[test]
    fn short_row_decodes_to_absent_fields() {
        let state = StateVector::from_row(&[]);
        assert_eq!(state, StateVector::default());
    }

    #[test]
    fn null_states_list_means_zero_aircraft() {
        let response: StatesResponse =
            serde_json::from_str(r#"{"time": 1700000000, "states": null}"#).unwrap();
        assert!(response.into_vectors().is_empty());
    }

    #[test]
    fn missing_states_list_means_zero_aircraft() {
        let response: StatesResponse = serde_json::from_str(r#"{"time": 1700000000}"#).unwrap();
        assert!(response.into_vectors().is_empty());
    }
}
