use std::collections::HashSet;

use indexmap::IndexMap;

use crate::models::{
    Dimension, GroupSummary, ItemStatus, Kpis, StatusCount, TrainingRecord,
};

/// Running totals for one group of records. Ratios are derived at read
/// time so an empty group can never divide by zero.
#[derive(Debug, Default)]
pub struct GroupStats {
    pub records: usize,
    pub associates: HashSet<String>,
    pub total_hours: f64,
    pub in_scope: usize,
    pub completed: usize,
    pub region: Option<String>,
}

impl GroupStats {
    pub fn add(&mut self, record: &TrainingRecord) {
        self.records += 1;
        self.associates.insert(record.associate_id.clone());
        self.total_hours += record.hours();
        if self.region.is_none() {
            self.region = Some(record.region.clone());
        }
        if record.course_in_scope {
            self.in_scope += 1;
            if record.item_status == ItemStatus::Completed {
                self.completed += 1;
            }
        }
    }

    pub fn of(records: &[&TrainingRecord]) -> GroupStats {
        let mut stats = GroupStats::default();
        for record in records {
            stats.add(record);
        }
        stats
    }

    pub fn completion_rate(&self) -> f64 {
        if self.in_scope > 0 {
            self.completed as f64 / self.in_scope as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_hours_per_associate(&self) -> f64 {
        if self.associates.is_empty() {
            0.0
        } else {
            self.total_hours / self.associates.len() as f64
        }
    }
}

/// Splits `subset` into member lists keyed by the dimension's value, in
/// first-encounter order so recomputation over identical input yields
/// identical ordering.
pub fn partition_by<'a>(
    subset: &[&'a TrainingRecord],
    dimension: Dimension,
) -> IndexMap<String, Vec<&'a TrainingRecord>> {
    let mut groups: IndexMap<String, Vec<&TrainingRecord>> = IndexMap::new();
    for &record in subset {
        groups
            .entry(dimension.value_of(record).to_string())
            .or_default()
            .push(record);
    }
    groups
}

/// One summary per distinct value of `dimension` over `subset`. The
/// region is only carried on country groupings, where it is well defined.
pub fn aggregate_by(subset: &[&TrainingRecord], dimension: Dimension) -> Vec<GroupSummary> {
    partition_by(subset, dimension)
        .into_iter()
        .map(|(name, members)| {
            let stats = GroupStats::of(&members);
            GroupSummary {
                name,
                region: if dimension == Dimension::Country {
                    stats.region.clone()
                } else {
                    None
                },
                records: stats.records,
                associates: stats.associates.len(),
                total_hours: stats.total_hours,
                in_scope: stats.in_scope,
                completed: stats.completed,
                completion_rate: stats.completion_rate(),
                avg_hours_per_associate: stats.avg_hours_per_associate(),
            }
        })
        .collect()
}

/// Global scalars over the filtered subset. Total over its domain: an
/// empty subset yields all-zero KPIs.
pub fn reduce_kpis(subset: &[&TrainingRecord]) -> Kpis {
    let stats = GroupStats::of(subset);
    Kpis {
        completion_rate: stats.completion_rate(),
        avg_hours_per_associate: stats.avg_hours_per_associate(),
        total_associates: stats.associates.len(),
    }
}

/// Counts for the three reported statuses. Statuses outside the fixed
/// set are not a slice of the distribution.
pub fn status_breakdown(subset: &[&TrainingRecord]) -> Vec<StatusCount> {
    let mut completed = 0;
    let mut in_progress = 0;
    let mut overdue = 0;

    for record in subset {
        match record.item_status {
            ItemStatus::Completed => completed += 1,
            ItemStatus::InProgress => in_progress += 1,
            ItemStatus::Overdue => overdue += 1,
            ItemStatus::Other(_) => {}
        }
    }

    vec![
        StatusCount { name: "Completed", value: completed },
        StatusCount { name: "In Progress", value: in_progress },
        StatusCount { name: "Overdue", value: overdue },
    ]
}
