//! Eruption regime classification.
//!
//! A fixed table maps points in (depth, gas) space to an eruption regime.
//! Classification is a nearest-neighbour lookup with a distance cutoff;
//! points too far from every table entry have no regime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eruptive behaviour of the volcano.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// No eruption. The state before any classification has happened.
    #[default]
    Idle,
    Weak,
    Transitional,
    Plinian,
}

impl Regime {
    pub fn name(self) -> &'static str {
        match self {
            Regime::Idle => "idle",
            Regime::Weak => "weak",
            Regime::Transitional => "transitional",
            Regime::Plinian => "plinian",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the regime table.
///
/// `h0`, `h10` and `h20` are plume heights (km) at wind speeds of 0, 10 and 20 m/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimePoint {
    pub depth: f32,
    pub gas: f32,
    pub h0: f32,
    pub h10: f32,
    pub h20: f32,
    pub regime: Regime,
}

const fn row(depth: f32, gas: f32, h0: f32, h10: f32, h20: f32, regime: Regime) -> RegimePoint {
    RegimePoint { depth, gas, h0, h10, h20, regime }
}

use Regime::{Plinian as P, Transitional as T, Weak as W};

/// The regime table, in lookup order.
pub static REGIME_TABLE: [RegimePoint; 28] = [
    row(2.5, 0.0, 5.9, 5.7, 5.4, W),
    row(2.5, 1.0, 6.1, 5.9, 5.6, W),
    row(2.5, 2.0, 6.4, 6.1, 5.8, W),
    row(2.5, 3.0, 6.7, 6.3, 6.0, T),
    row(2.5, 4.0, 7.0, 6.6, 6.3, T),
    row(2.5, 5.0, 7.3, 6.9, 6.6, P),
    row(2.5, 6.0, 7.6, 7.2, 6.8, P),
    row(5.0, 0.0, 6.2, 5.9, 5.6, W),
    row(5.0, 1.0, 6.6, 6.2, 5.9, W),
    row(5.0, 2.0, 6.9, 6.5, 6.2, T),
    row(5.0, 3.0, 7.3, 6.9, 6.6, T),
    row(5.0, 4.0, 7.7, 7.3, 7.0, P),
    row(5.0, 5.0, 8.0, 7.6, 7.3, P),
    row(5.0, 6.0, 8.4, 8.0, 7.6, P),
    row(7.5, 0.0, 6.5, 6.1, 5.8, W),
    row(7.5, 1.0, 6.9, 6.5, 6.2, T),
    row(7.5, 2.0, 7.3, 6.9, 6.6, T),
    row(7.5, 3.0, 7.7, 7.3, 7.0, P),
    row(7.5, 4.0, 8.1, 7.7, 7.3, P),
    row(7.5, 5.0, 8.5, 8.1, 7.7, P),
    row(7.5, 6.0, 8.9, 8.5, 8.1, P),
    row(10.0, 0.0, 6.8, 6.4, 6.0, W),
    row(10.0, 1.0, 7.2, 6.8, 6.5, T),
    row(10.0, 2.0, 7.7, 7.3, 7.0, T),
    row(10.0, 3.0, 8.1, 7.7, 7.3, P),
    row(10.0, 4.0, 8.6, 8.2, 7.8, P),
    row(10.0, 5.0, 9.0, 8.6, 8.2, P),
    row(10.0, 6.0, 9.5, 9.1, 8.7, P),
];

/// Maximum distance from a table entry for a point to be classified.
pub const CLASSIFY_CUTOFF: f32 = 2.5;

impl RegimePoint {
    fn distance_squared(&self, depth: f32, gas: f32) -> f32 {
        let dd = self.depth - depth;
        let dg = self.gas - gas;
        dd * dd + dg * dg
    }

    /// Plume height for a wind speed, interpolated between the 0/10/20 m/s columns.
    ///
    /// Wind outside `[0, 20]` uses the nearest column.
    pub fn plume_height(&self, wind: f32) -> f32 {
        let wind = if wind.is_finite() { wind.clamp(0.0, 20.0) } else { 0.0 };
        if wind <= 10.0 {
            lerp(self.h0, self.h10, wind / 10.0)
        } else {
            lerp(self.h10, self.h20, (wind - 10.0) / 10.0)
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Nearest-neighbour classifier over a regime table.
#[derive(Clone, Copy, Debug)]
pub struct RegimeClassifier {
    table: &'static [RegimePoint],
    cutoff_squared: f32,
}

impl RegimeClassifier {
    /// Classifier over [`REGIME_TABLE`] with the standard cutoff.
    pub fn new() -> Self {
        Self::with_table(&REGIME_TABLE, CLASSIFY_CUTOFF)
    }

    pub fn with_table(table: &'static [RegimePoint], cutoff: f32) -> Self {
        Self {
            table,
            cutoff_squared: cutoff * cutoff,
        }
    }

    /// The closest table entry within the cutoff.
    ///
    /// Ties keep the entry that comes first in the table.
    pub fn nearest(&self, depth: f32, gas: f32) -> Option<&'static RegimePoint> {
        if !depth.is_finite() || !gas.is_finite() {
            return None;
        }
        let mut best: Option<(&'static RegimePoint, f32)> = None;
        for point in self.table {
            let d = point.distance_squared(depth, gas);
            match best {
                Some((_, min)) if d >= min => {}
                _ => best = Some((point, d)),
            }
        }
        best.filter(|&(_, d)| d <= self.cutoff_squared)
            .map(|(point, _)| point)
    }

    /// Regime of the nearest table entry, or `None` if nothing is within the cutoff.
    pub fn classify(&self, depth: f32, gas: f32) -> Option<Regime> {
        self.nearest(depth, gas).map(|p| p.regime)
    }

    pub fn table(&self) -> &'static [RegimePoint] {
        self.table
    }
}

impl Default for RegimeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Remembers the last regime and reports only real transitions.
///
/// Re-applying the same regime would restart audio and shake, so callers
/// act only on what [`RegimeTracker::observe`] returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegimeTracker {
    current: Regime,
}

impl RegimeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Regime {
        self.current
    }

    /// Record a regime. Returns it if it differs from the previous one.
    pub fn observe(&mut self, regime: Regime) -> Option<Regime> {
        if regime == self.current {
            return None;
        }
        self.current = regime;
        Some(regime)
    }

    /// Forget the cached regime, returning to [`Regime::Idle`].
    pub fn reset(&mut self) {
        self.current = Regime::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_table_hits() {
        let classifier = RegimeClassifier::new();
        for point in REGIME_TABLE.iter() {
            assert_eq!(classifier.classify(point.depth, point.gas), Some(point.regime));
        }
    }

    #[test]
    fn test_far_points_are_unclassified() {
        let classifier = RegimeClassifier::new();
        assert_eq!(classifier.classify(20.0, 3.0), None);
        assert_eq!(classifier.classify(5.0, -10.0), None);
        assert_eq!(classifier.classify(-1.0, 9.0), None);
    }

    #[test]
    fn test_cutoff_boundary() {
        let classifier = RegimeClassifier::new();
        // Exactly 2.5 from (10, 6)
        assert_eq!(classifier.classify(12.5, 6.0), Some(Regime::Plinian));
        assert_eq!(classifier.classify(12.6, 6.0), None);
    }

    #[test]
    fn test_tie_prefers_table_order() {
        let classifier = RegimeClassifier::new();
        // Equidistant between (2.5, 2) weak and (2.5, 3) transitional
        assert_eq!(classifier.classify(2.5, 2.5), Some(Regime::Weak));
    }

    #[test]
    fn test_nan_is_unclassified() {
        let classifier = RegimeClassifier::new();
        assert_eq!(classifier.classify(f32::NAN, 1.0), None);
    }

    #[test]
    fn test_plume_height() {
        let point = REGIME_TABLE[0];
        assert_eq!(point.plume_height(0.0), 5.9);
        assert!((point.plume_height(5.0) - 5.8).abs() < 1e-5);
        assert_eq!(point.plume_height(20.0), 5.4);
        assert_eq!(point.plume_height(50.0), 5.4);
    }

    #[test]
    fn test_tracker_reports_transitions_once() {
        let mut tracker = RegimeTracker::new();
        assert_eq!(tracker.current(), Regime::Idle);
        assert_eq!(tracker.observe(Regime::Weak), Some(Regime::Weak));
        assert_eq!(tracker.observe(Regime::Weak), None);
        assert_eq!(tracker.observe(Regime::Plinian), Some(Regime::Plinian));
        tracker.reset();
        assert_eq!(tracker.current(), Regime::Idle);
    }
}
