use std::collections::BTreeSet;

use crate::aggregate::{partition_by, GroupStats};
use crate::color;
use crate::models::{
    Dimension, HierarchyGraph, HierarchyLink, HierarchyNode, NodeInfo, TrainingRecord,
};

/// Nesting order of the drill-down hierarchy. Courses are keyed by the
/// record's theme, which names the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Region,
    Country,
    Segment,
    JobFunction,
    AssignmentType,
    Course,
}

impl Level {
    pub fn index(self) -> u8 {
        match self {
            Level::Region => 0,
            Level::Country => 1,
            Level::Segment => 2,
            Level::JobFunction => 3,
            Level::AssignmentType => 4,
            Level::Course => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Region => "Region",
            Level::Country => "Country",
            Level::Segment => "Segment",
            Level::JobFunction => "Job Function",
            Level::AssignmentType => "Assignment Type",
            Level::Course => "Course",
        }
    }

    fn dimension(self) -> Dimension {
        match self {
            Level::Region => Dimension::Region,
            Level::Country => Dimension::Country,
            Level::Segment => Dimension::Segment,
            Level::JobFunction => Dimension::JobFunction,
            Level::AssignmentType => Dimension::AssignmentType,
            Level::Course => Dimension::Theme,
        }
    }

    fn child(self) -> Option<Level> {
        match self {
            Level::Region => Some(Level::Country),
            Level::Country => Some(Level::Segment),
            Level::Segment => Some(Level::JobFunction),
            Level::JobFunction => Some(Level::AssignmentType),
            Level::AssignmentType => Some(Level::Course),
            Level::Course => None,
        }
    }

    fn val(self) -> u32 {
        match self {
            Level::Region => 35,
            Level::Country => 30,
            Level::Segment => 15,
            Level::JobFunction => 12,
            Level::AssignmentType => 10,
            Level::Course => 8,
        }
    }
}

/// A node's identifier is a pure function of its level and ancestor key
/// path, so recomputation under the same inputs yields byte-identical
/// ids and previously-toggled nodes keep correlating.
fn node_id(level: Level, path: &[String]) -> String {
    let joined = path.join("-");
    match level {
        Level::Region => format!("region-{joined}"),
        Level::Country => format!("country-{joined}"),
        Level::Segment => format!("segment-{joined}"),
        Level::JobFunction => format!("job-{joined}"),
        Level::AssignmentType => format!("assign-{joined}"),
        Level::Course => format!("course-{joined}"),
    }
}

/// Set of node ids currently open one level deeper. `toggle` hands back
/// a new set; callers replace their copy wholesale.
#[derive(Debug, Clone, Default)]
pub struct ExpansionSet(BTreeSet<String>);

impl ExpansionSet {
    pub fn new() -> Self {
        ExpansionSet::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        ExpansionSet(ids.into_iter().collect())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn toggle(&self, id: &str) -> ExpansionSet {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.to_string());
        }
        ExpansionSet(next)
    }
}

/// Builds the node/link graph for the selected country, descending one
/// level past every expanded node. Region and country are always
/// emitted once a country is selected.
pub fn materialize(
    subset: &[&TrainingRecord],
    selected_country: Option<&str>,
    expansion: &ExpansionSet,
) -> HierarchyGraph {
    let Some(country) = selected_country else {
        return HierarchyGraph::empty();
    };

    let members: Vec<&TrainingRecord> = subset
        .iter()
        .copied()
        .filter(|r| r.country == country)
        .collect();
    let stats = GroupStats::of(&members);
    let region_name = stats.region.clone().unwrap_or_default();

    let region_members: Vec<&TrainingRecord> = subset
        .iter()
        .copied()
        .filter(|r| r.region == region_name)
        .collect();
    let region_stats = GroupStats::of(&region_members);

    let mut graph = HierarchyGraph::empty();

    let region_id = node_id(Level::Region, &[region_name.clone()]);
    graph.nodes.push(HierarchyNode {
        id: region_id.clone(),
        name: region_name,
        level: Level::Region.index(),
        val: Level::Region.val(),
        color: color::REGION,
        has_children: !region_members.is_empty(),
        info: NodeInfo {
            label: Level::Region.label(),
            records: region_stats.records,
            associates: region_stats.associates.len(),
            hours: region_stats.total_hours,
            completion_rate: region_stats.completion_rate(),
        },
    });

    let country_id = node_id(Level::Country, &[country.to_string()]);
    let country_rate = stats.completion_rate();
    let country_color = color::completion_color(country_rate);
    graph.nodes.push(HierarchyNode {
        id: country_id.clone(),
        name: country.to_string(),
        level: Level::Country.index(),
        val: Level::Country.val(),
        color: country_color,
        has_children: !members.is_empty(),
        info: NodeInfo {
            label: Level::Country.label(),
            records: stats.records,
            associates: stats.associates.len(),
            hours: stats.total_hours,
            completion_rate: country_rate,
        },
    });
    graph.links.push(HierarchyLink {
        source: region_id,
        target: country_id.clone(),
        color: color::link_tint(country_color),
    });

    if expansion.contains(&country_id) {
        descend(&mut graph, &members, Level::Segment, &country_id, &[], expansion);
    }

    graph
}

fn descend(
    graph: &mut HierarchyGraph,
    parent_members: &[&TrainingRecord],
    level: Level,
    parent_id: &str,
    path: &[String],
    expansion: &ExpansionSet,
) {
    for (key, members) in partition_by(parent_members, level.dimension()) {
        let mut child_path = path.to_vec();
        child_path.push(key.clone());
        let id = node_id(level, &child_path);

        let stats = GroupStats::of(&members);
        let rate = stats.completion_rate();
        let node_color = color::completion_color(rate);
        // The next-level grouping is non-empty exactly when members exist.
        let has_children = level.child().is_some() && !members.is_empty();

        graph.nodes.push(HierarchyNode {
            id: id.clone(),
            name: key,
            level: level.index(),
            val: level.val(),
            color: node_color,
            has_children,
            info: NodeInfo {
                label: level.label(),
                records: stats.records,
                associates: stats.associates.len(),
                hours: stats.total_hours,
                completion_rate: rate,
            },
        });
        graph.links.push(HierarchyLink {
            source: parent_id.to_string(),
            target: id.clone(),
            color: color::link_tint(node_color),
        });

        if has_children && expansion.contains(&id) {
            if let Some(next) = level.child() {
                descend(graph, &members, next, &id, &child_path, expansion);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;

    fn record(
        associate: &str,
        segment: &str,
        job_function: &str,
        assignment: &str,
        theme: &str,
        status: ItemStatus,
    ) -> TrainingRecord {
        TrainingRecord {
            associate_id: associate.to_string(),
            region: "LATAM".to_string(),
            country: "Brazil".to_string(),
            segment: segment.to_string(),
            manager: "Dana Cruz".to_string(),
            job_function: job_function.to_string(),
            job_family: "Field".to_string(),
            assignment_type: assignment.to_string(),
            theme: theme.to_string(),
            department: "Commercial Ops".to_string(),
            training_hours: Some(1.0),
            course_in_scope: true,
            item_status: status,
        }
    }

    fn sample() -> Vec<TrainingRecord> {
        vec![
            record("A-1", "Commercial", "Sales", "Mandatory", "Safety", ItemStatus::Completed),
            record("A-2", "Commercial", "Sales", "Elective", "Ethics", ItemStatus::Completed),
            record("A-3", "Commercial", "Marketing", "Mandatory", "Safety", ItemStatus::Overdue),
            record("A-4", "Industrial", "Operations", "Mandatory", "Safety", ItemStatus::Completed),
        ]
    }

    fn refs(records: &[TrainingRecord]) -> Vec<&TrainingRecord> {
        records.iter().collect()
    }

    #[test]
    fn no_selection_yields_empty_graph() {
        let records = sample();
        let graph = materialize(&refs(&records), None, &ExpansionSet::new());
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
    }

    #[test]
    fn collapsed_root_emits_region_country_pair() {
        let records = sample();
        let graph = materialize(&refs(&records), Some("Brazil"), &ExpansionSet::new());

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.nodes[0].id, "region-LATAM");
        assert_eq!(graph.nodes[1].id, "country-Brazil");
        assert!(graph.nodes[1].has_children);
        assert_eq!(graph.links[0].source, "region-LATAM");
        assert_eq!(graph.links[0].target, "country-Brazil");
    }

    #[test]
    fn expanding_the_country_adds_segment_nodes() {
        let records = sample();
        let expansion = ExpansionSet::new().toggle("country-Brazil");
        let graph = materialize(&refs(&records), Some("Brazil"), &expansion);

        let segment_ids: Vec<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.level == 2)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(segment_ids, vec!["segment-Commercial", "segment-Industrial"]);
        assert!(graph
            .links
            .iter()
            .any(|l| l.source == "country-Brazil" && l.target == "segment-Commercial"));
    }

    #[test]
    fn ids_are_composed_from_the_ancestor_path() {
        let records = sample();
        let expansion = ExpansionSet::from_ids(
            [
                "country-Brazil",
                "segment-Commercial",
                "job-Commercial-Sales",
            ]
            .into_iter()
            .map(String::from),
        );
        let graph = materialize(&refs(&records), Some("Brazil"), &expansion);

        let assignment_ids: Vec<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.level == 4)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(
            assignment_ids,
            vec![
                "assign-Commercial-Sales-Mandatory",
                "assign-Commercial-Sales-Elective"
            ]
        );
    }

    #[test]
    fn sibling_expansion_does_not_change_identifiers() {
        let records = sample();
        let base = ExpansionSet::new().toggle("country-Brazil");
        let wider = base.toggle("segment-Commercial");

        let before = materialize(&refs(&records), Some("Brazil"), &base);
        let after = materialize(&refs(&records), Some("Brazil"), &wider);

        for node in &before.nodes {
            assert!(
                after.nodes.iter().any(|n| n.id == node.id),
                "lost node {}",
                node.id
            );
        }
    }

    #[test]
    fn materialization_is_idempotent() {
        let records = sample();
        let expansion = ExpansionSet::from_ids(
            ["country-Brazil", "segment-Commercial"]
                .into_iter()
                .map(String::from),
        );

        let first = materialize(&refs(&records), Some("Brazil"), &expansion);
        let second = materialize(&refs(&records), Some("Brazil"), &expansion);

        let ids = |g: &HierarchyGraph| -> Vec<String> {
            g.nodes.iter().map(|n| n.id.clone()).collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.links, second.links);
    }

    #[test]
    fn every_non_root_node_has_one_incoming_link() {
        let records = sample();
        let expansion = ExpansionSet::from_ids(
            [
                "country-Brazil",
                "segment-Commercial",
                "segment-Industrial",
                "job-Commercial-Sales",
                "assign-Commercial-Sales-Mandatory",
            ]
            .into_iter()
            .map(String::from),
        );
        let graph = materialize(&refs(&records), Some("Brazil"), &expansion);

        assert_eq!(graph.links.len(), graph.nodes.len() - 1);
        for node in graph.nodes.iter().skip(1) {
            let incoming = graph.links.iter().filter(|l| l.target == node.id).count();
            assert_eq!(incoming, 1, "node {} incoming links", node.id);
        }
    }

    #[test]
    fn filtered_out_country_still_emits_a_safe_pair() {
        let records = sample();
        let expansion = ExpansionSet::new().toggle("country-Peru");
        let graph = materialize(&refs(&records), Some("Peru"), &expansion);

        assert_eq!(graph.nodes.len(), 2);
        let country = &graph.nodes[1];
        assert!(!country.has_children);
        assert_eq!(country.info.records, 0);
        assert_eq!(country.info.completion_rate, 0.0);
    }

    #[test]
    fn course_nodes_are_always_leaves() {
        let records = sample();
        let expansion = ExpansionSet::from_ids(
            [
                "country-Brazil",
                "segment-Commercial",
                "job-Commercial-Sales",
                "assign-Commercial-Sales-Mandatory",
            ]
            .into_iter()
            .map(String::from),
        );
        let graph = materialize(&refs(&records), Some("Brazil"), &expansion);

        let course = graph
            .nodes
            .iter()
            .find(|n| n.level == 5)
            .expect("course node");
        assert_eq!(course.id, "course-Commercial-Sales-Mandatory-Safety");
        assert!(!course.has_children);
    }

    #[test]
    fn toggle_twice_restores_the_original_set() {
        let set = ExpansionSet::new();
        let opened = set.toggle("segment-Commercial");
        assert!(opened.contains("segment-Commercial"));

        let closed = opened.toggle("segment-Commercial");
        assert!(!closed.contains("segment-Commercial"));
    }

    #[test]
    fn node_colors_follow_completion_banding() {
        let records = vec![
            record("A-1", "Commercial", "Sales", "Mandatory", "Safety", ItemStatus::Completed),
            record("A-2", "Commercial", "Sales", "Mandatory", "Safety", ItemStatus::Overdue),
        ];
        let graph = materialize(&refs(&records), Some("Brazil"), &ExpansionSet::new());

        // 1 of 2 in scope completed: 50% lands in the warning band.
        assert_eq!(graph.nodes[1].color, crate::color::WARNING);
        assert_eq!(graph.links[0].color, "#f59e0b33");
    }
}
