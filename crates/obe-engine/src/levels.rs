//! Attainment level resolver.
//!
//! Maps the percentage of a roster that passed a CO to a discrete level
//! through a threshold table. The table is sorted on construction, so
//! callers may pass it in any order.

use obe_core::schema::LevelThreshold;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelResolver {
    /// Sorted by descending threshold.
    table: Vec<LevelThreshold>,
}

impl LevelResolver {
    #[must_use]
    pub fn new(levels: &[LevelThreshold]) -> Self {
        let mut table = levels.to_vec();
        table.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Self { table }
    }

    /// Level of the first threshold (highest first) that `percentage`
    /// reaches. The boundary is inclusive. Nothing matched, or a NaN
    /// percentage, resolves to level 0.
    #[must_use]
    pub fn resolve(&self, percentage: f64) -> u8 {
        if percentage.is_nan() {
            return 0;
        }
        self.table
            .iter()
            .find(|entry| percentage >= entry.threshold)
            .map_or(0, |entry| entry.level)
    }

    /// Thresholds in the order they are matched.
    #[must_use]
    pub fn table(&self) -> &[LevelThreshold] {
        &self.table
    }
}
