//! Continuous and banded scales mapping data values to positions.

/// Thresholds for choosing 10, 5 or 2 as the tick step multiplier.
const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// A linear mapping from a numeric domain onto a numeric range.
///
/// # Examples
///
/// ```
/// use collage::scale::LinearScale;
///
/// let scale = LinearScale::new((0.0, 10.0), (0.0, 200.0));
/// assert_eq!(scale.apply(2.5), 50.0);
/// assert_eq!(scale.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    pub fn range_start(&self) -> f64 {
        self.range.0
    }

    pub fn range_end(&self) -> f64 {
        self.range.1
    }

    /// Maps a domain value onto the range, extrapolating outside it.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back onto the domain.
    pub fn invert(&self, position: f64) -> f64 {
        Self::new(self.range, self.domain).apply(position)
    }

    /// Returns roughly `count` evenly spaced, human-friendly values within
    /// the domain, using steps of 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
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
        -10f64.powf(-power) / factor
    }
}

fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (start, stop) = if reverse { (stop, start) } else { (start, stop) };

    let step = tick_increment(start, stop, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let mut values: Vec<f64> = if step > 0.0 {
        let first = (start / step).ceil() as i64;
        let last = (stop / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        let step = -step;
        let first = (start * step).ceil() as i64;
        let last = (stop * step).floor() as i64;
        (first..=last).map(|i| i as f64 / step).collect()
    };

    if reverse {
        values.reverse();
    }
    values
}

/// An ordinal scale dividing a continuous range into uniform bands.
///
/// Each domain value owns one band; [`apply`](Self::apply) returns the start
/// of its band. Padding is expressed as a fraction of the step.
///
/// # Examples
///
/// ```
/// use collage::scale::BandScale;
///
/// let scale = BandScale::new(vec!["a", "b", "c", "d"], (0.0, 100.0));
/// assert_eq!(scale.step(), 25.0);
/// assert_eq!(scale.apply(&"c"), Some(50.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<D> {
    domain: Vec<D>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
    step: f64,
    bandwidth: f64,
    positions: Vec<f64>,
}

impl<D: PartialEq> BandScale<D> {
    pub fn new(domain: Vec<D>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
            step: 0.0,
            bandwidth: 0.0,
            positions: Vec::new(),
        };
        scale.rescale();
        scale
    }

    /// Sets both inner and outer padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self.rescale();
        self
    }

    /// Sets the space between bands, as a fraction of the step in `[0, 1]`.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    /// Sets the space before the first and after the last band.
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self.rescale();
        self
    }

    /// Sets how outer space is distributed: 0 at the end, 1 at the start.
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self.rescale();
        self
    }

    /// Rounds the step, band starts and bandwidth to whole pixels.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self.rescale();
        self
    }

    pub fn domain(&self) -> &[D] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn range_start(&self) -> f64 {
        self.range.0
    }

    pub fn range_end(&self) -> f64 {
        self.range.1
    }

    pub fn is_round(&self) -> bool {
        self.round
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the start of the band for `value`, or `None` if it is not in
    /// the domain.
    pub fn apply(&self, value: &D) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == value)?;
        self.positions.get(index).copied()
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };

        let mut step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        start += (stop - start - step * (n - self.padding_inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            start = start.round();
            bandwidth = bandwidth.round();
        }

        let mut positions: Vec<f64> = (0..self.domain.len())
            .map(|i| start + step * i as f64)
            .collect();
        if reverse {
            positions.reverse();
        }

        self.step = step;
        self.bandwidth = bandwidth;
        self.positions = positions;
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn domain_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-1.0e3..1.0e3_f64, 1.0e-2..1.0e4_f64).prop_map(|(start, span)| (start, start + span))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Ticks stay inside the domain, ascend and are evenly spaced.
    fn check_ticks_within_domain(domain: (f64, f64), count: usize) -> Result<(), TestCaseError> {
        let values = ticks(domain.0, domain.1, count);
        let magnitude = domain.0.abs().max(domain.1.abs());
        let tolerance = magnitude * 1e-12 + (domain.1 - domain.0) * 1e-9;
        for value in &values {
            prop_assert!(*value >= domain.0 - tolerance && *value <= domain.1 + tolerance);
        }
        if values.len() > 2 {
            let step = values[1] - values[0];
            prop_assert!(step > 0.0);
            for pair in values.windows(2) {
                prop_assert!(approx_eq!(f64, pair[1] - pair[0], step, epsilon = step * 1e-6));
            }
        }
        Ok(())
    }

    /// Inverting an applied value returns the original.
    fn check_invert_round_trips(domain: (f64, f64), t: f64) -> Result<(), TestCaseError> {
        let scale = LinearScale::new(domain, (0.0, 500.0));
        let value = domain.0 + (domain.1 - domain.0) * t;
        let tolerance = (domain.1 - domain.0).abs() * 1e-9 + 1e-9;
        prop_assert!((scale.invert(scale.apply(value)) - value).abs() <= tolerance);
        Ok(())
    }

    proptest! {
        #[test]
        fn ticks_within_domain(domain in domain_strategy(), count in 1usize..20) {
            check_ticks_within_domain(domain, count)?;
        }

        #[test]
        fn invert_round_trips(domain in domain_strategy(), t in 0.0..1.0_f64) {
            check_invert_round_trips(domain, t)?;
        }
    }
}
