use crate::errors::{OptimizerError, OptimizerResult};
use serde::{Deserialize, Serialize};

/// Number of environmental measurements the network consumes
pub const INPUT_COUNT: usize = 7;

/// The seven input features, in the canonical order used by every vector in
/// the network (normalized inputs, weight rows, importance scores).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Latitude,
    Longitude,
    SunlightHours,
    WindSpeed,
    TemperatureRange,
    Elevation,
    WaterProximity,
}

impl InputField {
    pub const ALL: [InputField; INPUT_COUNT] = [
        InputField::Latitude,
        InputField::Longitude,
        InputField::SunlightHours,
        InputField::WindSpeed,
        InputField::TemperatureRange,
        InputField::Elevation,
        InputField::WaterProximity,
    ];

    /// Position of this field in every ordered vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name (camelCase)
    pub fn name(self) -> &'static str {
        match self {
            InputField::Latitude => "latitude",
            InputField::Longitude => "longitude",
            InputField::SunlightHours => "sunlightHours",
            InputField::WindSpeed => "windSpeed",
            InputField::TemperatureRange => "temperatureRange",
            InputField::Elevation => "elevation",
            InputField::WaterProximity => "waterProximity",
        }
    }

    /// Human-readable label with units
    pub fn label(self) -> &'static str {
        match self {
            InputField::Latitude => "Latitude",
            InputField::Longitude => "Longitude",
            InputField::SunlightHours => "Average Sunlight Hours",
            InputField::WindSpeed => "Average Wind Speed (km/h)",
            InputField::TemperatureRange => "Temperature Range (°C)",
            InputField::Elevation => "Elevation (m)",
            InputField::WaterProximity => "Nearby Water Bodies",
        }
    }

    pub fn range(self) -> &'static InputRange {
        &INPUT_RANGES[self.index()]
    }
}

/// Declared domain of one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub field: InputField,
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    const fn new(field: InputField, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Fixed range table, one entry per field in canonical order.
/// Every range has max > min.
pub static INPUT_RANGES: [InputRange; INPUT_COUNT] = [
    InputRange::new(InputField::Latitude, -90.0, 90.0),
    InputRange::new(InputField::Longitude, -180.0, 180.0),
    InputRange::new(InputField::SunlightHours, 0.0, 12.0),
    InputRange::new(InputField::WindSpeed, 0.0, 50.0), // km/h
    InputRange::new(InputField::TemperatureRange, 0.0, 50.0), // Celsius
    InputRange::new(InputField::Elevation, 0.0, 5000.0), // meters
    InputRange::new(InputField::WaterProximity, 0.0, 1.0),
];

/// Raw measurements for one site. No bounds are enforced here; values
/// outside the declared ranges are accepted and normalize outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    pub latitude: f64,
    pub longitude: f64,
    pub sunlight_hours: f64,
    pub wind_speed: f64,
    pub temperature_range: f64,
    pub elevation: f64,
    pub water_proximity: f64,
}

impl RawInputs {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Latitude => self.latitude,
            InputField::Longitude => self.longitude,
            InputField::SunlightHours => self.sunlight_hours,
            InputField::WindSpeed => self.wind_speed,
            InputField::TemperatureRange => self.temperature_range,
            InputField::Elevation => self.elevation,
            InputField::WaterProximity => self.water_proximity,
        }
    }

    /// Values in canonical field order
    pub fn values(&self) -> [f64; INPUT_COUNT] {
        InputField::ALL.map(|field| self.get(field))
    }

    pub fn from_values(values: [f64; INPUT_COUNT]) -> Self {
        Self {
            latitude: values[0],
            longitude: values[1],
            sunlight_hours: values[2],
            wind_speed: values[3],
            temperature_range: values[4],
            elevation: values[5],
            water_proximity: values[6],
        }
    }

    /// Reject values that would turn every downstream score into NaN.
    pub fn validate(&self) -> OptimizerResult<()> {
        for field in InputField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(OptimizerError::invalid_input(
                    field.name(),
                    format!("value must be a finite number, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Build inputs from a loosely-typed JSON object, naming the first field
    /// that is missing or not numeric.
    pub fn from_json(value: &serde_json::Value) -> OptimizerResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| OptimizerError::invalid_input("inputs", "expected a JSON object"))?;

        let mut values = [0.0; INPUT_COUNT];
        for field in InputField::ALL {
            let raw = object
                .get(field.name())
                .ok_or_else(|| OptimizerError::invalid_input(field.name(), "missing field"))?;
            values[field.index()] = raw.as_f64().ok_or_else(|| {
                OptimizerError::invalid_input(field.name(), format!("expected a number, got {raw}"))
            })?;
        }

        let inputs = Self::from_values(values);
        inputs.validate()?;
        Ok(inputs)
    }
}
