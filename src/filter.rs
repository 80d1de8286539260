use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::config::Thresholds;
use crate::sqlite::{Predicate, QueryOperator};

/// Which blood-sugar range a retrieval is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BloodSugarFilter {
    #[default]
    All,
    /// Strictly below the low threshold.
    Low,
    /// Strictly above the high threshold.
    High,
    /// Either of the above.
    LowHigh,
}

impl BloodSugarFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodSugarFilter::All => "all",
            BloodSugarFilter::Low => "low",
            BloodSugarFilter::High => "high",
            BloodSugarFilter::LowHigh => "lowhigh",
        }
    }

    /// The WHERE term restricting `column`, or `None` for [`BloodSugarFilter::All`].
    pub fn predicate(&self, column: &str, thresholds: Thresholds) -> Option<Predicate> {
        let low = || Predicate::condition(column, QueryOperator::LessThan(thresholds.low.into()));
        let high =
            || Predicate::condition(column, QueryOperator::GreaterThan(thresholds.high.into()));
        match self {
            BloodSugarFilter::All => None,
            BloodSugarFilter::Low => Some(low()),
            BloodSugarFilter::High => Some(high()),
            BloodSugarFilter::LowHigh => Some(Predicate::Any(vec![low(), high()])),
        }
    }
}

/// Case-insensitive; anything unrecognized selects [`BloodSugarFilter::All`].
impl FromStr for BloodSugarFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for BloodSugarFilter {
    fn from(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("low") {
            BloodSugarFilter::Low
        } else if mode.eq_ignore_ascii_case("high") {
            BloodSugarFilter::High
        } else if mode.eq_ignore_ascii_case("lowhigh") {
            BloodSugarFilter::LowHigh
        } else {
            BloodSugarFilter::All
        }
    }
}

impl fmt::Display for BloodSugarFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{Params, Query};

    fn render(filter: BloodSugarFilter) -> Option<String> {
        let predicate = filter.predicate("bloodsugar", Thresholds::default())?;
        Query::new()
            .with_predicate(predicate)
            .to_where(&mut Params::new())
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(BloodSugarFilter::from("LOW"), BloodSugarFilter::Low);
        assert_eq!(BloodSugarFilter::from("High"), BloodSugarFilter::High);
        assert_eq!(BloodSugarFilter::from("LowHigh"), BloodSugarFilter::LowHigh);
        assert_eq!("all".parse::<BloodSugarFilter>(), Ok(BloodSugarFilter::All));
    }

    #[test]
    fn test_unknown_mode_falls_back_to_all() {
        assert_eq!(BloodSugarFilter::from("sideways"), BloodSugarFilter::All);
        assert_eq!(BloodSugarFilter::from(""), BloodSugarFilter::All);
    }

    #[test]
    fn test_padded_mode_is_not_recognized() {
        assert_eq!(BloodSugarFilter::from(" low "), BloodSugarFilter::All);
        assert_eq!(BloodSugarFilter::from("low\n"), BloodSugarFilter::All);
        assert_eq!(BloodSugarFilter::from("\tHIGH"), BloodSugarFilter::All);
    }

    #[test]
    fn test_predicates() {
        assert_eq!(render(BloodSugarFilter::All), None);
        assert_eq!(render(BloodSugarFilter::Low).as_deref(), Some("bloodsugar < :p0"));
        assert_eq!(render(BloodSugarFilter::High).as_deref(), Some("bloodsugar > :p0"));
        assert_eq!(
            render(BloodSugarFilter::LowHigh).as_deref(),
            Some("(bloodsugar < :p0 OR bloodsugar > :p1)")
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for filter in [
            BloodSugarFilter::All,
            BloodSugarFilter::Low,
            BloodSugarFilter::High,
            BloodSugarFilter::LowHigh,
        ] {
            assert_eq!(BloodSugarFilter::from(filter.to_string().as_str()), filter);
        }
    }
}
