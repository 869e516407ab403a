use std::{fmt::Display, ops::Deref};

use chrono::TimeDelta;

/// Fraction of the workday that has passed. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.)
    }
}

impl Progress {
    pub const NONE: Progress = Progress(0.);
    pub const COMPLETE: Progress = Progress(1.);

    /// Clamps `value` into `[0, 1]`. NaN is treated as no progress.
    pub fn clamped(value: f64) -> Progress {
        if value.is_nan() {
            Progress::NONE
        } else {
            Progress(value.clamp(0., 1.))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Progress {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// `value / whole`, clamped. A non-positive `whole` has no meaningful fraction and yields
/// [Progress::NONE].
pub fn duration_fraction(value: TimeDelta, whole: TimeDelta) -> Progress {
    if whole <= TimeDelta::zero() {
        return Progress::NONE;
    }
    Progress::clamped(value.num_milliseconds() as f64 / whole.num_milliseconds() as f64)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::{duration_fraction, Progress};

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Progress::clamped(-0.5), Progress::NONE);
        assert_eq!(Progress::clamped(1.5), Progress::COMPLETE);
        assert_eq!(Progress::clamped(f64::NAN), Progress::NONE);
        assert_eq!(Progress::clamped(f64::INFINITY), Progress::COMPLETE);
        assert_eq!(*Progress::clamped(0.25), 0.25);
    }

    #[test]
    fn empty_whole_is_no_progress() {
        assert_eq!(
            duration_fraction(TimeDelta::hours(1), TimeDelta::zero()),
            Progress::NONE
        );
        assert_eq!(
            duration_fraction(TimeDelta::hours(1), TimeDelta::hours(-2)),
            Progress::NONE
        );
    }

    #[test]
    fn formats_as_percentage() {
        assert_eq!(Progress::clamped(0.5).to_string(), "50.0%");
        assert_eq!(
            duration_fraction(TimeDelta::minutes(15), TimeDelta::hours(1)).to_string(),
            "25.0%"
        );
    }
}
