use crate::inputs::{InputField, RawInputs, INPUT_COUNT};
use crate::network::NetworkVariant;

/// Map raw inputs onto the declared ranges: `(raw - min) / (max - min)`.
///
/// No clamping: values outside a range land outside [0, 1].
pub fn normalize(inputs: &RawInputs) -> [f64; INPUT_COUNT] {
    InputField::ALL.map(|field| {
        let range = field.range();
        (inputs.get(field) - range.min) / range.span()
    })
}

/// Scale each raw value by its range maximum (latitude / 90, longitude / 180, ...).
/// Used by the compact variant; symmetric ranges therefore map to [-1, 1].
pub fn scale_by_max(inputs: &RawInputs) -> [f64; INPUT_COUNT] {
    InputField::ALL.map(|field| inputs.get(field) / field.range().max)
}

/// Normalization rule for the given variant
pub fn normalize_for(variant: NetworkVariant, inputs: &RawInputs) -> [f64; INPUT_COUNT] {
    match variant {
        NetworkVariant::Detailed => normalize(inputs),
        NetworkVariant::Compact => scale_by_max(inputs),
    }
}
