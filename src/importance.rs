use crate::inputs::{InputField, INPUT_COUNT};
use crate::network::NetworkVariant;
use crate::weights::{NetworkWeights, HIDDEN_COUNT};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Per-feature influence scores, kept in canonical field order.
/// Serializes as a JSON object keyed by field name in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureImportance {
    scores: [f64; INPUT_COUNT],
}

impl FeatureImportance {
    pub fn from_scores(scores: [f64; INPUT_COUNT]) -> Self {
        Self { scores }
    }

    pub fn get(&self, field: InputField) -> f64 {
        self.scores[field.index()]
    }

    pub fn scores(&self) -> &[f64; INPUT_COUNT] {
        &self.scores
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputField, f64)> + '_ {
        InputField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Fields sorted by descending score; ties keep canonical order.
    pub fn ranked(&self) -> Vec<(InputField, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl Serialize for FeatureImportance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(INPUT_COUNT))?;
        for (field, score) in self.iter() {
            map.serialize_entry(field.name(), &score)?;
        }
        map.end()
    }
}

/// Unscaled influence of each input: `sum_i |w[i][j] * x[j]|`
pub fn raw_importance(normalized: &[f64; INPUT_COUNT], weights: &NetworkWeights) -> [f64; INPUT_COUNT] {
    let mut raw = [0.0; INPUT_COUNT];
    for hidden in 0..HIDDEN_COUNT {
        for (j, score) in raw.iter_mut().enumerate() {
            *score += (weights.input_weight(hidden, j) * normalized[j]).abs();
        }
    }
    raw
}

/// Rescale so the largest score is exactly 100. All-zero scores stay zero
/// rather than dividing by zero.
pub fn rescale(raw: &[f64; INPUT_COUNT]) -> [f64; INPUT_COUNT] {
    let max = raw.iter().copied().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return [0.0; INPUT_COUNT];
    }
    (*raw).map(|score| score / max * 100.0)
}

/// Importance as weighted by the detailed variant.
///
/// Rescaling is scale-invariant, so inputs far outside their range are
/// shrunk by the largest magnitude first and the raw sums stay finite.
pub fn feature_importance(normalized: &[f64; INPUT_COUNT], weights: &NetworkWeights) -> FeatureImportance {
    let largest = normalized.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let raw = if largest > 1.0 {
        raw_importance(&(*normalized).map(|x| x / largest), weights)
    } else {
        raw_importance(normalized, weights)
    };
    FeatureImportance::from_scores(rescale(&raw))
}

/// Importance as read by the compact variant: magnitude of the first hidden
/// unit's incoming weights, times 100. Independent of the inputs.
pub fn first_row_importance(weights: &NetworkWeights) -> FeatureImportance {
    let mut scores = [0.0; INPUT_COUNT];
    for (score, w) in scores.iter_mut().zip(weights.hidden_row(0)) {
        *score = w.abs() * 100.0;
    }
    FeatureImportance::from_scores(scores)
}

pub fn importance_for(
    variant: NetworkVariant,
    normalized: &[f64; INPUT_COUNT],
    weights: &NetworkWeights,
) -> FeatureImportance {
    match variant {
        NetworkVariant::Detailed => feature_importance(normalized, weights),
        NetworkVariant::Compact => first_row_importance(weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_weights_fall_back_to_zero_scores() {
        let importance = feature_importance(&[0.4; INPUT_COUNT], &NetworkWeights::zeroed());
        assert_eq!(importance.scores(), &[0.0; INPUT_COUNT]);
    }

    #[test]
    fn zero_inputs_fall_back_to_zero_scores() {
        let weights = NetworkWeights::random(&mut StdRng::seed_from_u64(9));
        let importance = feature_importance(&[0.0; INPUT_COUNT], &weights);
        assert!(importance.scores().iter().all(|s| *s == 0.0));
    }

    #[test]
    fn maximum_is_exactly_one_hundred() {
        for seed in 0..20 {
            let weights = NetworkWeights::random(&mut StdRng::seed_from_u64(seed));
            let normalized = [0.62, 0.18, 0.875, 0.3, 0.6, 0.02, 0.1];
            let importance = feature_importance(&normalized, &weights);

            let max = importance.scores().iter().copied().fold(f64::MIN, f64::max);
            assert_eq!(max, 100.0);
            assert!(importance.scores().iter().all(|s| (0.0..=100.0).contains(s)));
        }
    }

    #[test]
    fn raw_scores_sum_over_hidden_units() {
        let mut matrix = vec![0.0; 35];
        matrix[2] = 0.5; // hidden 0, sunlight
        matrix[7 + 2] = -0.25; // hidden 1, sunlight
        matrix[14 + 3] = 1.0; // hidden 2, wind
        let weights = NetworkWeights::from_parts(matrix, vec![0.0; 5]).unwrap();

        let mut normalized = [0.0; INPUT_COUNT];
        normalized[2] = 0.8;
        normalized[3] = 0.2;

        let raw = raw_importance(&normalized, &weights);
        assert!((raw[2] - 0.6).abs() < 1e-12);
        assert!((raw[3] - 0.2).abs() < 1e-12);

        let importance = feature_importance(&normalized, &weights);
        assert_eq!(importance.get(InputField::SunlightHours), 100.0);
        assert!((importance.get(InputField::WindSpeed) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn huge_inputs_keep_scores_bounded() {
        for seed in 0..5 {
            let weights = NetworkWeights::random(&mut StdRng::seed_from_u64(seed));
            let normalized = [0.62, 0.18, 0.875, 0.3, 0.6, 0.02, 1.0e308];

            let importance = feature_importance(&normalized, &weights);
            assert!(importance.scores().iter().all(|s| (0.0..=100.0).contains(s)));
            assert_eq!(importance.get(InputField::WaterProximity), 100.0);
        }
    }

    #[test]
    fn shrinking_preserves_relative_scores() {
        let weights = NetworkWeights::random(&mut StdRng::seed_from_u64(3));
        let normalized = [0.62, 0.18, 0.875, 0.3, 0.6, 0.02, 0.1];
        let inflated = normalized.map(|x| x * 1.0e6);

        let base = feature_importance(&normalized, &weights);
        let scaled = feature_importance(&inflated, &weights);
        for (a, b) in base.scores().iter().zip(scaled.scores()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn serializes_in_canonical_order() {
        let importance = FeatureImportance::from_scores([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let json = serde_json::to_string(&importance).unwrap();
        assert_eq!(
            json,
            r#"{"latitude":1.0,"longitude":2.0,"sunlightHours":3.0,"windSpeed":4.0,"temperatureRange":5.0,"elevation":6.0,"waterProximity":7.0}"#
        );
    }

    #[test]
    fn ranked_sorts_descending() {
        let importance = FeatureImportance::from_scores([10.0, 100.0, 0.0, 55.0, 10.0, 0.0, 1.0]);
        let ranked = importance.ranked();
        assert_eq!(ranked[0].0, InputField::Longitude);
        assert_eq!(ranked[1].0, InputField::WindSpeed);
        assert_eq!(ranked[2].0, InputField::Latitude);
        assert_eq!(ranked[3].0, InputField::TemperatureRange);
    }

    #[test]
    fn compact_importance_reads_first_row() {
        let mut matrix = vec![0.0; 35];
        matrix[1] = -0.5;
        matrix[7 + 1] = 0.9; // second row is ignored
        let weights = NetworkWeights::from_parts(matrix, vec![0.0; 5]).unwrap();

        let importance = importance_for(NetworkVariant::Compact, &[1.0; INPUT_COUNT], &weights);
        assert_eq!(importance.get(InputField::Longitude), 50.0);
        assert_eq!(importance.get(InputField::Latitude), 0.0);
    }
}
