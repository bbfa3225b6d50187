/// Presentation rounding. Internal computation always runs at full
/// precision; only the fields of a finished result are rounded.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
