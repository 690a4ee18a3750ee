// Report derivation: turns one decoded state vector into the text block
// shown to the user. Pure, no I/O, and total: every missing input has a
// defined fallback, so formatting can never fail.

use std::fmt;

use chrono::{Local, LocalResult, TimeZone};

use crate::states::StateVector;

/// Fallback token for any field the provider did not supply.
pub const UNKNOWN: &str = "Unknown";

/// Sixteen-point compass rose, clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEGREES: f64 = 360.0 / COMPASS_POINTS.len() as f64;

/// Vertical rates within this band (m/s) count as level flight.
const LEVEL_BAND: f64 = 0.3;

/// Map a track in degrees to the nearest compass point. Each point spans
/// 22.5 degrees; the index wraps, so anything past 348.75 is "N" again.
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let sector = (degrees / SECTOR_DEGREES).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

/// Fully-textual view of one aircraft, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftReport {
    pub callsign: String,
    pub origin_country: String,
    pub status: String,
    pub baro_altitude: String,
    pub geo_altitude: String,
    pub velocity: String,
    pub track: String,
    pub last_update: String,
}

impl AircraftReport {
    pub fn from_state(state: &StateVector) -> Self {
        AircraftReport {
            callsign: state.callsign.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            origin_country: state
                .origin_country
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            status: describe_status(state.on_ground, state.vertical_rate),
            baro_altitude: format_meters(state.baro_altitude),
            geo_altitude: format_meters(state.geo_altitude),
            velocity: format_velocity(state.velocity),
            track: format_track(state.true_track),
            last_update: format_last_update(state.time_position),
        }
    }
}

impl fmt::Display for AircraftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Callsign: {}", self.callsign)?;
        writeln!(f, "   - Origin Country: {}", self.origin_country)?;
        writeln!(f, "   - Status:         {}", self.status)?;
        writeln!(f, "   - Baro Altitude:  {}", self.baro_altitude)?;
        writeln!(f, "   - Geo Altitude:   {}", self.geo_altitude)?;
        writeln!(f, "   - Velocity:       {}", self.velocity)?;
        writeln!(f, "   - Track:          {}", self.track)?;
        write!(f, "   - Last Update:    {}", self.last_update)
    }
}

fn describe_status(on_ground: bool, vertical_rate: Option<f64>) -> String {
    if on_ground {
        return "On the ground".to_string();
    }
    match vertical_rate {
        Some(rate) if rate > LEVEL_BAND => format!("Climbing ({:.1} m/s)", rate),
        Some(rate) if rate < -LEVEL_BAND => format!("Descending ({:.1} m/s)", rate.abs()),
        _ => "In the air (level)".to_string(),
    }
}

fn format_meters(meters: Option<f64>) -> String {
    meters.map_or_else(|| UNKNOWN.to_string(), |m| format!("{} m", m as i64))
}

fn format_velocity(meters_per_second: Option<f64>) -> String {
    meters_per_second.map_or_else(
        || UNKNOWN.to_string(),
        |ms| format!("{} km/h", (ms * 3.6) as i64),
    )
}

fn format_track(degrees: Option<f64>) -> String {
    degrees.map_or_else(
        || UNKNOWN.to_string(),
        |deg| format!("{}° ({})", deg as i64, degrees_to_cardinal(deg)),
    )
}

// A zero timestamp is treated like an absent one; the provider uses it
// for aircraft without a recent position.
fn format_last_update(unix_seconds: Option<i64>) -> String {
    match unix_seconds {
        Some(seconds) if seconds != 0 => match Local.timestamp_opt(seconds, 0) {
            LocalResult::Single(stamp) => stamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            _ => UNKNOWN.to_string(),
        },
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_covers_the_whole_circle() {
        for degrees in 0..360 {
            let label = degrees_to_cardinal(f64::from(degrees));
            assert!(COMPASS_POINTS.contains(&label), "{degrees} -> {label}");
        }
    }

    #[test]
    fn cardinal_wraps_at_north() {
        assert_eq!(degrees_to_cardinal(0.0), "N");
        assert_eq!(degrees_to_cardinal(360.0), "N");
        assert_eq!(degrees_to_cardinal(350.0), "N");
    }

    #[test]
    fn cardinal_is_periodic() {
        for degrees in [0.0, 11.3, 45.0, 123.4, 180.0, 359.9] {
            assert_eq!(
                degrees_to_cardinal(degrees),
                degrees_to_cardinal(degrees + 360.0),
                "{degrees}"
            );
        }
    }

    #[test]
    fn cardinal_sector_boundaries() {
        assert_eq!(degrees_to_cardinal(11.0), "N");
        assert_eq!(degrees_to_cardinal(11.3), "NNE");
        assert_eq!(degrees_to_cardinal(180.0), "S");
    }

    #[test]
    fn empty_state_formats_to_unknowns() {
        let report = AircraftReport::from_state(&StateVector::default());
        assert_eq!(report.callsign, UNKNOWN);
        assert_eq!(report.origin_country, UNKNOWN);
        assert_eq!(report.status, "In the air (level)");
        assert_eq!(report.baro_altitude, UNKNOWN);
        assert_eq!(report.geo_altitude, UNKNOWN);
        assert_eq!(report.velocity, UNKNOWN);
        assert_eq!(report.track, UNKNOWN);
        assert_eq!(report.last_update, UNKNOWN);
    }

    #[test]
    fn status_level_band_boundaries() {
        assert_eq!(describe_status(false, Some(0.3)), "In the air (level)");
        assert_eq!(describe_status(false, Some(-0.3)), "In the air (level)");
        assert_eq!(describe_status(false, Some(0.31)), "Climbing (0.3 m/s)");
        assert_eq!(describe_status(false, Some(-0.31)), "Descending (0.3 m/s)");
        assert_eq!(describe_status(false, Some(1.2)), "Climbing (1.2 m/s)");
        assert_eq!(describe_status(false, Some(-4.75)), "Descending (4.8 m/s)");
    }

    #[test]
    fn on_ground_wins_over_vertical_rate() {
        assert_eq!(describe_status(true, Some(5.0)), "On the ground");
        assert_eq!(describe_status(true, None), "On the ground");
    }

    #[test]
    fn velocity_converts_and_truncates() {
        assert_eq!(format_velocity(Some(100.0)), "360 km/h");
        assert_eq!(format_velocity(Some(220.0)), "792 km/h");
        assert_eq!(format_velocity(Some(0.9)), "3 km/h");
        assert_eq!(format_velocity(None), UNKNOWN);
    }

    #[test]
    fn altitude_truncates_to_whole_meters() {
        assert_eq!(format_meters(Some(10000.0)), "10000 m");
        assert_eq!(format_meters(Some(914.4)), "914 m");
        assert_eq!(format_meters(None), UNKNOWN);
    }

    #[test]
    fn track_shows_degrees_and_cardinal() {
        assert_eq!(format_track(Some(90.0)), "90° (E)");
        assert_eq!(format_track(Some(271.5)), "271° (W)");
        assert_eq!(format_track(None), UNKNOWN);
    }

    #[test]
    fn last_update_formats_local_time() {
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_last_update(Some(1_700_000_000)), expected);
    }

    #[test]
    fn last_update_zero_or_absent_is_unknown() {
        assert_eq!(format_last_update(Some(0)), UNKNOWN);
        assert_eq!(format_last_update(None), UNKNOWN);
    }

    #[test]
    fn report_renders_as_a_labeled_block() {
        let state = StateVector {
            callsign: Some("SAS117".to_string()),
            origin_country: Some("Sweden".to_string()),
            ..StateVector::default()
        };
        let rendered = AircraftReport::from_state(&state).to_string();
        assert!(rendered.starts_with("Callsign: SAS117\n"));
        assert!(rendered.contains("   - Origin Country: Sweden"));
        assert!(rendered.contains("   - Status:         In the air (level)"));
        assert!(rendered.ends_with("   - Last Update:    Unknown"));
    }
}
