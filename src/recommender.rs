use crate::evaluator::{CalculationStep, ForwardPass};
use crate::importance::FeatureImportance;
use crate::inputs::{InputField, RawInputs};
use crate::network::NetworkVariant;
use serde::{Serialize, Serializer};

/// Output at or above this is "highly suitable"
pub const HIGH_SUITABILITY: f64 = 0.8;
/// Output at or above this (and below HIGH_SUITABILITY) is "moderately suitable"
pub const MODERATE_SUITABILITY: f64 = 0.5;
/// Compact variant: output strictly above this selects solar
pub const COMPACT_SOLAR_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitabilityLabel {
    Highly,
    Moderately,
    NotIdeal,
}

impl SuitabilityLabel {
    pub fn from_output(output: f64) -> Self {
        if output >= HIGH_SUITABILITY {
            SuitabilityLabel::Highly
        } else if output >= MODERATE_SUITABILITY {
            SuitabilityLabel::Moderately
        } else {
            SuitabilityLabel::NotIdeal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLabel::Highly => "Highly Suitable for Renewable Energy Installation",
            SuitabilityLabel::Moderately => "Moderately Suitable for Renewable Energy Installation",
            SuitabilityLabel::NotIdeal => "Not Ideal for Renewable Energy Installation",
        }
    }
}

impl std::fmt::Display for SuitabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SuitabilityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergyType {
    Solar,
    Wind,
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyType::Solar => f.write_str("Solar"),
            EnergyType::Wind => f.write_str("Wind"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyTypeDecision {
    #[serde(rename = "type")]
    pub energy_type: EnergyType,
    pub solar_score: f64,
    pub wind_score: f64,
    pub reason: String,
}

/// Final result handed to presentation code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "recommendation")]
    pub label: SuitabilityLabel,
    pub energy_type: EnergyTypeDecision,
    pub confidence: f64,
    pub feature_importance: FeatureImportance,
    pub calculations: Vec<CalculationStep>,
}

/// Solar vs. wind by importance-weighted raw measurements. Ties go to solar.
pub fn scored_energy_type(inputs: &RawInputs, importance: &FeatureImportance) -> EnergyTypeDecision {
    let solar_score = inputs.sunlight_hours * importance.get(InputField::SunlightHours)
        + inputs.temperature_range * importance.get(InputField::TemperatureRange)
        + inputs.water_proximity * importance.get(InputField::WaterProximity);

    let wind_score = inputs.wind_speed * importance.get(InputField::WindSpeed)
        + inputs.elevation * importance.get(InputField::Elevation);

    if solar_score >= wind_score {
        EnergyTypeDecision {
            energy_type: EnergyType::Solar,
            solar_score,
            wind_score,
            reason: "High sunlight hours and favorable temperature conditions".to_string(),
        }
    } else {
        EnergyTypeDecision {
            energy_type: EnergyType::Wind,
            solar_score,
            wind_score,
            reason: "Strong wind speeds and elevated terrain".to_string(),
        }
    }
}

const SCORED_FIELDS: [InputField; 5] = [
    InputField::SunlightHours,
    InputField::TemperatureRange,
    InputField::WaterProximity,
    InputField::WindSpeed,
    InputField::Elevation,
];

/// Field contributing the largest-magnitude term to either energy score
pub fn dominant_score_field(inputs: &RawInputs, importance: &FeatureImportance) -> InputField {
    let term = |field: InputField| (inputs.get(field) * importance.get(field)).abs();
    SCORED_FIELDS
        .into_iter()
        .max_by(|a, b| term(*a).total_cmp(&term(*b)))
        .unwrap_or(InputField::SunlightHours)
}

/// Solar vs. wind straight from the network output
pub fn threshold_energy_type(output: f64) -> EnergyTypeDecision {
    let solar_score = output * 100.0;
    let wind_score = (1.0 - output) * 100.0;

    if output > COMPACT_SOLAR_THRESHOLD {
        EnergyTypeDecision {
            energy_type: EnergyType::Solar,
            solar_score,
            wind_score,
            reason: "High solar radiation potential".to_string(),
        }
    } else {
        EnergyTypeDecision {
            energy_type: EnergyType::Wind,
            solar_score,
            wind_score,
            reason: "High wind energy potential".to_string(),
        }
    }
}

/// Assemble the recommendation from a finished forward pass.
pub fn recommend(
    variant: NetworkVariant,
    inputs: &RawInputs,
    pass: ForwardPass,
    importance: FeatureImportance,
) -> Recommendation {
    let output = pass.output;

    let (energy_type, confidence) = match variant {
        NetworkVariant::Detailed => (scored_energy_type(inputs, &importance), output * 100.0),
        NetworkVariant::Compact => (threshold_energy_type(output), (output * 100.0).round()),
    };

    Recommendation {
        label: SuitabilityLabel::from_output(output),
        energy_type,
        confidence,
        feature_importance: importance,
        calculations: pass.steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desert() -> RawInputs {
        RawInputs {
            latitude: 33.55,
            longitude: -116.26,
            sunlight_hours: 10.5,
            wind_speed: 15.0,
            temperature_range: 30.0,
            elevation: 100.0,
            water_proximity: 0.1,
        }
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(SuitabilityLabel::from_output(0.95), SuitabilityLabel::Highly);
        assert_eq!(SuitabilityLabel::from_output(0.8), SuitabilityLabel::Highly);
        assert_eq!(SuitabilityLabel::from_output(0.79999), SuitabilityLabel::Moderately);
        assert_eq!(SuitabilityLabel::from_output(0.5), SuitabilityLabel::Moderately);
        assert_eq!(SuitabilityLabel::from_output(0.49999), SuitabilityLabel::NotIdeal);
        assert_eq!(
            SuitabilityLabel::Moderately.to_string(),
            "Moderately Suitable for Renewable Energy Installation"
        );
    }

    #[test]
    fn zero_importance_ties_to_solar() {
        let decision = scored_energy_type(&desert(), &FeatureImportance::from_scores([0.0; 7]));
        assert_eq!(decision.energy_type, EnergyType::Solar);
        assert_eq!(decision.solar_score, 0.0);
        assert_eq!(decision.wind_score, 0.0);
        assert_eq!(decision.reason, "High sunlight hours and favorable temperature conditions");
    }

    #[test]
    fn elevation_importance_tips_towards_wind() {
        let importance = FeatureImportance::from_scores([0.0, 0.0, 50.0, 20.0, 10.0, 100.0, 5.0]);
        let decision = scored_energy_type(&desert(), &importance);

        assert!((decision.solar_score - (10.5 * 50.0 + 30.0 * 10.0 + 0.1 * 5.0)).abs() < 1e-9);
        assert!((decision.wind_score - (15.0 * 20.0 + 100.0 * 100.0)).abs() < 1e-9);
        assert_eq!(decision.energy_type, EnergyType::Wind);
        assert_eq!(decision.reason, "Strong wind speeds and elevated terrain");
    }

    #[test]
    fn dominant_field_picks_largest_term() {
        let importance = FeatureImportance::from_scores([0.0, 0.0, 50.0, 20.0, 10.0, 100.0, 5.0]);
        assert_eq!(dominant_score_field(&desert(), &importance), InputField::Elevation);

        let inputs = RawInputs {
            wind_speed: -1.0e308,
            ..desert()
        };
        assert_eq!(dominant_score_field(&inputs, &importance), InputField::WindSpeed);
    }

    #[test]
    fn compact_threshold_is_strict() {
        assert_eq!(threshold_energy_type(0.7).energy_type, EnergyType::Wind);
        let decision = threshold_energy_type(0.75);
        assert_eq!(decision.energy_type, EnergyType::Solar);
        assert!((decision.solar_score - 75.0).abs() < 1e-9);
        assert!((decision.wind_score - 25.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_with_wire_names() {
        let decision = threshold_energy_type(0.9);
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["type"], "Solar");
        assert!(json.get("solarScore").is_some());
        assert!(json.get("windScore").is_some());

        let label = serde_json::to_value(SuitabilityLabel::NotIdeal).unwrap();
        assert_eq!(label, "Not Ideal for Renewable Energy Installation");
    }
}
