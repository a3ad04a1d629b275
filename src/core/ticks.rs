//! Human-friendly numeric steps: every step is 1, 2 or 5 × 10^k.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Signed tick increment for roughly `count` intervals over `[start, stop]`.
///
/// A positive result is the step itself. A negative result `-n` encodes a
/// fractional step of `1 / n`, which keeps sub-unit steps exact when
/// multiplying instead of dividing.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    let step = (stop - start) / count as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0.0;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Extends `[start, stop]` outward to multiples of the tick increment until
/// the increment stops changing.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let (mut start, mut stop) = (start, stop);
    let mut previous_step = None;

    // Converges in two or three passes; the bound only guards against
    // floating-point oscillation.
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if step == 0.0 || !step.is_finite() || previous_step == Some(step) {
            break;
        }
        let (next_start, next_stop) = if step > 0.0 {
            ((start / step).floor() * step, (stop / step).ceil() * step)
        } else {
            ((start * step).ceil() / step, (stop * step).floor() / step)
        };
        // Rounding past f64::MAX keeps the last finite domain.
        if !next_start.is_finite() || !next_stop.is_finite() {
            break;
        }
        (start, stop) = (next_start, next_stop);
        previous_step = Some(step);
    }

    (start, stop)
}

/// Tick values inside `[start, stop]` at a nice increment.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    if lo == hi {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }

    let increment = tick_increment(lo, hi, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    let mut values = Vec::new();
    if increment > 0.0 {
        let mut first = (lo / increment).round();
        let mut last = (hi / increment).round();
        if first * increment < lo {
            first += 1.0;
        }
        if last * increment > hi {
            last -= 1.0;
        }
        let mut index = first;
        while index <= last {
            values.push(index * increment);
            index += 1.0;
        }
    } else {
        let inverse = -increment;
        let mut first = (lo * inverse).round();
        let mut last = (hi * inverse).round();
        if first / inverse < lo {
            first += 1.0;
        }
        if last / inverse > hi {
            last -= 1.0;
        }
        let mut index = first;
        while index <= last {
            values.push(index / inverse);
            index += 1.0;
        }
    }

    if start > stop {
        values.reverse();
    }
    values
}

/// Absolute distance between consecutive ticks, used to pick label precision.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let increment = tick_increment(start.min(stop), start.max(stop), count);
    if increment < 0.0 {
        -1.0 / increment
    } else {
        increment
    }
}

/// Formats a tick value with just enough decimals for `step`.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // Avoid "-0" for ticks that land on zero.
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_owned()
    } else {
        text
    }
}
