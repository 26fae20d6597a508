//! Named metric-set presets.
//!
//! Each preset is a fixed table of FunctionFilter tokens, kept as data so
//! the catalogs can be audited and tested in isolation. `{}` marks the spot
//! where the caller's nilsson level (in whole centimetres) is substituted
//! before parsing.

/// Minimal set for area-based regression: one density column, the spread
/// and upper-percentile ladder above the nilsson level, and the
/// first-return penetration pair. Seven entries, expanded in this order.
pub const BASIC_LINEAR: &[&str] = &[
    "count_all",
    "variance_all_ge{}cm",
    "p30_all_ge{}cm",
    "p80_all_ge{}cm",
    "p95_all_ge{}cm",
    "count_1ret_ge{}cm",
    "count_1ret",
];

/// Field-inventory profile: counts, the four conventional moments and a
/// coarse percentile ladder above the nilsson level, plus the first-return
/// penetration pair. Fourteen entries.
pub const INKA_BERRIES: &[&str] = &[
    "count_all",
    "count_all_ge{}cm",
    "mean_all_ge{}cm",
    "variance_all_ge{}cm",
    "skewness_all_ge{}cm",
    "kurtosis_all_ge{}cm",
    "p10_all_ge{}cm",
    "p30_all_ge{}cm",
    "p50_all_ge{}cm",
    "p70_all_ge{}cm",
    "p90_all_ge{}cm",
    "p95_all_ge{}cm",
    "count_1ret_ge{}cm",
    "count_1ret",
];

/// The full battery: every moment, L-moment and robust-spread column plus a
/// dense percentile ladder above the nilsson level, and the first-return
/// columns. Twenty-nine entries.
pub const EXTRA_ALLT: &[&str] = &[
    "count_all",
    "count_all_ge{}cm",
    "mean_all_ge{}cm",
    "mean2_all_ge{}cm",
    "variance_all_ge{}cm",
    "skewness_all_ge{}cm",
    "kurtosis_all_ge{}cm",
    "L2_all_ge{}cm",
    "L3_all_ge{}cm",
    "L4_all_ge{}cm",
    "mad_all_ge{}cm",
    "p5_all_ge{}cm",
    "p10_all_ge{}cm",
    "p20_all_ge{}cm",
    "p25_all_ge{}cm",
    "p30_all_ge{}cm",
    "p40_all_ge{}cm",
    "p50_all_ge{}cm",
    "p60_all_ge{}cm",
    "p70_all_ge{}cm",
    "p75_all_ge{}cm",
    "p80_all_ge{}cm",
    "p90_all_ge{}cm",
    "p95_all_ge{}cm",
    "p99_all_ge{}cm",
    "count_1ret",
    "count_1ret_ge{}cm",
    "mean_1ret_ge{}cm",
    "p95_1ret_ge{}cm",
];

/// Look up a preset table by its public name.
pub fn preset_tokens(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "basic-linear" => Some(BASIC_LINEAR),
        "inka-berries" => Some(INKA_BERRIES),
        "extra-allt" => Some(EXTRA_ALLT),
        _ => None,
    }
}
