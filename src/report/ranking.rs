use crate::domain::PropertyRecord;

pub const DEFAULT_TOP_N: usize = 10;

/// Newest `count` records by year built.
///
/// Records without a year are left out. The sort is stable, so listings built
/// in the same year keep their document order.
pub fn newest_properties(records: &[PropertyRecord], count: usize) -> Vec<&PropertyRecord> {
    let mut ranked: Vec<&PropertyRecord> = records.iter().filter(|r| r.has_year_built()).collect();
    ranked.sort_by(|a, b| b.year_built.cmp(&a.year_built));
    ranked.truncate(count);
    ranked
}
