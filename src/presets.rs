use crate::errors::{OptimizerError, OptimizerResult};
use crate::inputs::RawInputs;
use serde::Serialize;

/// A named sample site
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetLocation {
    pub key: &'static str,
    pub name: &'static str,
    pub inputs: RawInputs,
}

pub static PRESET_LOCATIONS: [PresetLocation; 3] = [
    PresetLocation {
        key: "desert",
        name: "Desert Location",
        inputs: RawInputs {
            latitude: 33.55,
            longitude: -116.26,
            sunlight_hours: 10.5,
            wind_speed: 15.0,
            temperature_range: 30.0,
            elevation: 100.0,
            water_proximity: 0.1,
        },
    },
    PresetLocation {
        key: "mountain",
        name: "Mountain Location",
        inputs: RawInputs {
            latitude: 45.37,
            longitude: -121.69,
            sunlight_hours: 6.5,
            wind_speed: 25.0,
            temperature_range: 20.0,
            elevation: 1500.0,
            water_proximity: 0.3,
        },
    },
    PresetLocation {
        key: "coastal",
        name: "Coastal Location",
        inputs: RawInputs {
            latitude: 37.77,
            longitude: -122.42,
            sunlight_hours: 8.0,
            wind_speed: 20.0,
            temperature_range: 15.0,
            elevation: 50.0,
            water_proximity: 1.0,
        },
    },
];

/// Look up a preset by key, case-insensitively
pub fn find_preset(key: &str) -> OptimizerResult<&'static PresetLocation> {
    PRESET_LOCATIONS
        .iter()
        .find(|preset| preset.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| OptimizerError::not_found("preset", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let preset = find_preset("Desert").unwrap();
        assert_eq!(preset.name, "Desert Location");
        assert_eq!(preset.inputs.sunlight_hours, 10.5);
    }

    #[test]
    fn unknown_preset_is_not_found() {
        assert!(matches!(
            find_preset("arctic"),
            Err(OptimizerError::NotFound { .. })
        ));
    }

    #[test]
    fn presets_are_valid_inputs() {
        for preset in &PRESET_LOCATIONS {
            assert!(preset.inputs.validate().is_ok(), "{}", preset.key);
        }
    }
}
