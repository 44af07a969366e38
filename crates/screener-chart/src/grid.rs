// File: crates/screener-chart/src/grid.rs
// Summary: Tick layout helpers for the value axis gridlines.

/// Round `raw` to a "nice" step: 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let frac = raw / mag;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 2.5 {
        2.5
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Tick values at multiples of a nice step covering `[min, max]`, aiming for
/// roughly `target` intervals.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min || !(max - min).is_finite() {
        return vec![min];
    }
    let target = target.max(1);
    let step = nice_step((max - min) / target as f64);
    let eps = step * 1e-9;
    let first = (min / step).ceil() as i64;
    let last = ((max + eps) / step).floor() as i64;
    match last.checked_sub(first) {
        Some(n) if (0..=target as i64 * 4).contains(&n) => {}
        _ => return vec![min],
    }
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // avoid printing -0.00
            if v.abs() < eps { 0.0 } else { v }
        })
        .collect()
}

/// Label precision that keeps distinct ticks distinguishable.
pub fn tick_decimals(step: f64) -> usize {
    if step >= 1.0 {
        return 0;
    }
    let mag = -step.log10().floor();
    let scaled = step * 10f64.powf(mag);
    let fract = scaled.fract();
    mag as usize + usize::from(fract > 1e-9 && fract < 1.0 - 1e-9)
}
