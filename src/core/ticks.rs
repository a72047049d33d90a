use serde::{Deserialize, Serialize};

/// Label format applied to axis tick values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickFormat {
    /// Precision derived from the tick step.
    #[default]
    Auto,
    Fixed {
        decimals: u8,
    },
    Scientific {
        decimals: u8,
    },
}

impl TickFormat {
    #[must_use]
    pub fn format(self, value: f64, step: f64) -> String {
        // Avoid "-0" labels around the origin.
        let value = if value == 0.0 { 0.0 } else { value };
        match self {
            Self::Auto => {
                let decimals = precision_for_step(step);
                format!("{value:.decimals$}")
            }
            Self::Fixed { decimals } => format!("{value:.prec$}", prec = usize::from(decimals)),
            Self::Scientific { decimals } => {
                format!("{value:.prec$e}", prec = usize::from(decimals))
            }
        }
    }
}

fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Nice 1/2/5 x 10^n step spanning `[start, stop]` with roughly `count` ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if count == 0 || !span.is_finite() || span == 0.0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Tick values between `start` and `stop` (either order), ascending.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    if last < first {
        return Vec::new();
    }
    // Dividing by the inverse step keeps small steps exact (0.1 * 3 != 0.3).
    let inverse = if step < 1.0 { (1.0 / step).round() } else { 0.0 };
    (first..=last)
        .map(|index| {
            if inverse > 0.0 {
                index as f64 / inverse
            } else {
                index as f64 * step
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{TickFormat, linear_ticks, tick_step};

    #[test]
    fn ticks_follow_nice_increments() {
        assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn reversed_bounds_produce_ascending_ticks() {
        assert_eq!(linear_ticks(10.0, 0.0, 2), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        assert_eq!(linear_ticks(3.0, 3.0, 5), vec![3.0]);
        assert!(linear_ticks(f64::NAN, 3.0, 5).is_empty());
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn auto_format_uses_step_precision() {
        assert_eq!(TickFormat::Auto.format(0.2, 0.2), "0.2");
        assert_eq!(TickFormat::Auto.format(15.0, 5.0), "15");
        assert_eq!(TickFormat::Fixed { decimals: 2 }.format(1.5, 1.0), "1.50");
        assert_eq!(TickFormat::Scientific { decimals: 1 }.format(1500.0, 500.0), "1.5e3");
    }
}
