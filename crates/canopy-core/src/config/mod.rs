//! Text-driven metric configuration.
//!
//! A metric column is named by a `<function>_<filter>` token, e.g.
//! `p95_all_ge200cm`. Tokens and preset names are resolved eagerly into
//! immutable values before any point is streamed; every parse failure is a
//! `ConfigError` and fails the whole configuration.

pub mod filter;
pub mod function;
pub mod preset;

pub use filter::Filter;
pub use function::Function;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A (statistic, point-subset) pair — one output column.
///
/// Field order carries the derived total order: primary key is the filter,
/// secondary the function, which makes duplicate removal deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FunctionFilter {
    pub filter: Filter,
    pub function: Function,
}

impl FunctionFilter {
    pub fn new(function: Function, filter: Filter) -> Self {
        Self { filter, function }
    }

    /// Split `<function>_<filter>` at the first `_`; function names never
    /// contain one, so the filter sub-grammar starts right after it.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let (func_text, filter_text) = text
            .split_once('_')
            .ok_or_else(|| ConfigError::UnknownFilter(text.to_string()))?;
        Ok(Self {
            function: Function::parse(func_text)?,
            filter: Filter::parse(filter_text)?,
        })
    }

    pub fn to_text(&self) -> String {
        format!("{}_{}", self.function.to_text(), self.filter.to_text())
    }
}

impl std::fmt::Display for FunctionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Fill `{}` placeholders with the nilsson level, metres rounded to whole
/// centimetres, so `p95_all_ge{}cm` at 2.0 m becomes `p95_all_ge200cm`.
pub fn substitute_level(token: &str, nilsson_m: f64) -> String {
    if token.contains("{}") {
        let cm = (nilsson_m * 100.0).round() as i64;
        token.replace("{}", &cm.to_string())
    } else {
        token.to_string()
    }
}

/// Resolve a mixed list of metric tokens and preset names into a duplicate-
/// free column set.
///
/// Expansion preserves input order (first occurrence wins); the
/// FunctionFilter total order backs the seen-set, so removal is
/// deterministic regardless of how presets and single tokens overlap.
pub fn create_set<I, S>(
    tokens: I,
    nilsson_m: f64,
) -> Result<Vec<FunctionFilter>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: BTreeSet<FunctionFilter> = BTreeSet::new();
    let mut out = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if let Some(table) = preset::preset_tokens(token) {
            for entry in table {
                let ff =
                    FunctionFilter::parse(&substitute_level(entry, nilsson_m))?;
                if seen.insert(ff) {
                    out.push(ff);
                }
            }
        } else if token.contains('_') {
            let ff = FunctionFilter::parse(&substitute_level(token, nilsson_m))?;
            if seen.insert(ff) {
                out.push(ff);
            }
        } else {
            return Err(ConfigError::UnknownPreset(token.to_string()));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_tokens_round_trip() {
        for token in [
            "count_all",
            "p95_all_ge200cm",
            "mad_1ret_ge150cm_lt2500cm",
            "L3_all",
            "mean2_1ret",
        ] {
            let ff = FunctionFilter::parse(token).unwrap();
            assert_eq!(ff.to_text(), token, "round trip of `{token}`");
        }
    }

    #[test]
    fn split_happens_at_the_first_underscore() {
        let ff = FunctionFilter::parse("p50_1ret_ge100cm").unwrap();
        assert_eq!(ff.function, Function::Percentile(50));
        assert!(ff.filter.first_only());
        assert_eq!(ff.filter.min_cm(), 100);
    }

    #[test]
    fn missing_filter_part_is_an_error() {
        assert!(FunctionFilter::parse("count").is_err());
        assert!(FunctionFilter::parse("p95").is_err());
    }

    #[test]
    fn substitution_rounds_metres_to_centimetres() {
        assert_eq!(substitute_level("p95_all_ge{}cm", 2.0), "p95_all_ge200cm");
        assert_eq!(substitute_level("count_all_ge{}cm", 1.337), "count_all_ge134cm");
        assert_eq!(substitute_level("count_all", 2.0), "count_all");
    }

    #[test]
    fn basic_linear_expands_in_table_order() {
        let set = create_set(["basic-linear"], 2.0).unwrap();
        let names: Vec<String> = set.iter().map(|ff| ff.to_text()).collect();
        assert_eq!(
            names,
            [
                "count_all",
                "variance_all_ge200cm",
                "p30_all_ge200cm",
                "p80_all_ge200cm",
                "p95_all_ge200cm",
                "count_1ret_ge200cm",
                "count_1ret",
            ]
        );
    }

    #[test]
    fn overlapping_sources_are_deduplicated() {
        let set = create_set(
            ["count_all", "basic-linear", "p95_all_ge{}cm", "count_all"],
            2.0,
        )
        .unwrap();
        let names: Vec<String> = set.iter().map(|ff| ff.to_text()).collect();
        // `count_all` and `p95_all_ge200cm` appear once, at their first
        // positions.
        assert_eq!(names.iter().filter(|n| *n == "count_all").count(), 1);
        assert_eq!(
            names.iter().filter(|n| *n == "p95_all_ge200cm").count(),
            1
        );
        assert_eq!(names[0], "count_all");
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn presets_can_be_combined() {
        let basic = create_set(["basic-linear"], 2.0).unwrap();
        let both = create_set(["basic-linear", "inka-berries"], 2.0).unwrap();
        assert!(both.len() > basic.len());
        // basic-linear is a prefix of the combination.
        assert_eq!(&both[..basic.len()], &basic[..]);
    }

    #[test]
    fn any_parse_failure_rejects_the_whole_set() {
        assert!(create_set(["count_all", "p200_all"], 2.0).is_err());
        assert!(create_set(["no-such-preset"], 2.0).is_err());
        assert!(matches!(
            create_set(["count"], 2.0),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn nilsson_level_flows_into_every_placeholder() {
        let set = create_set(["extra-allt"], 1.5).unwrap();
        for ff in &set {
            let min = ff.filter.min_cm();
            assert!(
                min == 0 || min == 150,
                "unexpected bound {min} in {ff}"
            );
        }
    }

    #[test]
    fn total_order_sorts_by_filter_then_function() {
        let a = FunctionFilter::parse("p95_all").unwrap();
        let b = FunctionFilter::parse("count_all_ge200cm").unwrap();
        let c = FunctionFilter::parse("count_1ret").unwrap();
        let mut v = vec![c, b, a];
        v.sort();
        assert_eq!(v, vec![a, b, c]);
    }
}
