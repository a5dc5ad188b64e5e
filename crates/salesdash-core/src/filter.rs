//! Filter stage.

use crate::criteria::FilterCriteria;
use crate::record::SalesRecord;

/// Keep the records that satisfy every active predicate in `criteria`.
///
/// Row order is preserved and records are borrowed, not copied, so the
/// output can be fed back in: filtering is idempotent.
pub fn apply<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a SalesRecord>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    if criteria.is_unrestricted() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
