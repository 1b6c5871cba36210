use indexmap::IndexSet;

use crate::models::{Dimension, FilterSelection, TrainingRecord};

impl FilterSelection {
    /// True iff every constrained dimension matches the record exactly.
    /// Records missing a constrained field carry the empty string there
    /// and only match an explicit empty-string constraint.
    pub fn matches(&self, record: &TrainingRecord) -> bool {
        let constraints = [
            (&self.region, &record.region),
            (&self.country, &record.country),
            (&self.segment, &record.segment),
            (&self.manager, &record.manager),
            (&self.job_function, &record.job_function),
            (&self.assignment_type, &record.assignment_type),
            (&self.theme, &record.theme),
        ];

        constraints
            .into_iter()
            .all(|(wanted, actual)| match wanted {
                Some(value) => value == actual,
                None => true,
            })
    }
}

/// Order-preserving subset of `records` satisfying `selection`.
pub fn filter_records<'a>(
    records: &'a [TrainingRecord],
    selection: &FilterSelection,
) -> Vec<&'a TrainingRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}

/// Distinct values of one dimension, in first-encounter order. Feeds the
/// filter-option listings.
pub fn distinct_values(records: &[TrainingRecord], dimension: Dimension) -> Vec<String> {
    let mut values: IndexSet<&str> = IndexSet::new();
    for record in records {
        values.insert(dimension.value_of(record));
    }
    values.into_iter().map(str::to_string).collect()
}
