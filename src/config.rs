use crate::Error;
use serde::{Deserialize, Serialize};

/// Parameters of the simulated world and its intersection scheduler.
///
/// Every field has a default, so a configuration file only needs to
/// list the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The width of the world in m.
    pub world_width: f64,
    /// The height of the world in m.
    pub world_height: f64,
    /// The width of each road in m.
    pub road_width: f64,
    /// How far the approach boundary extends beyond the crossing zone,
    /// as a multiple of the crossing zone's size. May be fractional.
    pub factor: f64,
    /// The global speed limit in m/s.
    pub speed_limit: f64,
    /// The vehicle lengths to choose from when spawning, in m.
    pub vehicle_lengths: Vec<f64>,
    /// The vehicle width in m.
    pub vehicle_width: f64,
    /// The multiple of a vehicle's length added to the crossing distance.
    pub crossing_margin: f64,
    /// The buffer placed around renegotiated windows, as a fraction of
    /// the window's duration.
    pub buffer_ratio: f64,
    /// Speeds below this are clamped when building a request, in m/s.
    pub min_speed: f64,
    /// Deferrals longer than this are reported as warnings, in s.
    pub max_deferral: f64,
    /// Which boundary releases a vehicle's reservation.
    pub release_on: ReleaseTrigger,
}

/// The event which releases a vehicle's reservation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseTrigger {
    /// The vehicle leaves the approach boundary.
    #[default]
    ApproachBoundary,
    /// The vehicle leaves the crossing zone.
    CrossingZone,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: 1000.0,
            world_height: 1000.0,
            road_width: 50.0,
            factor: 5.0,
            speed_limit: 20.0,
            vehicle_lengths: vec![20.0, 40.0, 50.0, 80.0],
            vehicle_width: 15.0,
            crossing_margin: 1.1,
            buffer_ratio: 0.1,
            min_speed: 1.0,
            max_deferral: 30.0,
            release_on: ReleaseTrigger::ApproachBoundary,
        }
    }
}

impl Config {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("road_width", self.road_width),
            ("factor", self.factor),
            ("speed_limit", self.speed_limit),
            ("vehicle_width", self.vehicle_width),
            ("min_speed", self.min_speed),
            ("max_deferral", self.max_deferral),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("crossing_margin", self.crossing_margin),
            ("buffer_ratio", self.buffer_ratio),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.vehicle_lengths.is_empty() {
            return Err(Error::InvalidConfig("vehicle_lengths is empty".into()));
        }
        if let Some(len) = self
            .vehicle_lengths
            .iter()
            .find(|len| !(len.is_finite() && **len > 0.0))
        {
            return Err(Error::InvalidConfig(format!(
                "vehicle lengths must be positive, got {len}"
            )));
        }
        if self.road_width >= f64::min(self.world_width, self.world_height) {
            return Err(Error::InvalidConfig(
                "roads must be narrower than the world".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "factor": 2.5, "release_on": "crossing_zone" }"#)
            .unwrap();
        assert_eq!(config.factor, 2.5);
        assert_eq!(config.release_on, ReleaseTrigger::CrossingZone);
        assert_eq!(config.speed_limit, Config::default().speed_limit);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            Config::from_json(r#"{ "factor": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "vehicle_lengths": [] }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(Config::from_json("{"), Err(Error::Parse(_))));
    }
}
