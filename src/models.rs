use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion status of a single assignment, as reported by the source
/// system. Anything outside the three known states decodes to `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    Completed,
    InProgress,
    Overdue,
    Other(String),
}

impl From<String> for ItemStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Completed" => ItemStatus::Completed,
            "In Progress" => ItemStatus::InProgress,
            "Overdue" => ItemStatus::Overdue,
            _ => ItemStatus::Other(raw),
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Completed => "Completed".to_string(),
            ItemStatus::InProgress => "In Progress".to_string(),
            ItemStatus::Overdue => "Overdue".to_string(),
            ItemStatus::Other(raw) => raw,
        }
    }
}

fn yes_no<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw == "Yes")
}

fn yes_no_ser<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Yes" } else { "No" })
}

/// One training-assignment observation. Field names on the wire (CSV
/// header, JSON keys) are the source dataset's own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    #[serde(rename = "Associate ID", default)]
    pub associate_id: String,
    #[serde(rename = "Region", default)]
    pub region: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Segment (updated)", default)]
    pub segment: String,
    #[serde(rename = "Manager Full Name", default)]
    pub manager: String,
    #[serde(rename = "Job Function", default)]
    pub job_function: String,
    #[serde(rename = "Job Family", default)]
    pub job_family: String,
    #[serde(rename = "Assignment Type", default)]
    pub assignment_type: String,
    #[serde(rename = "Theme", default)]
    pub theme: String,
    #[serde(rename = "Department description", default)]
    pub department: String,
    #[serde(rename = "Training Hours", default)]
    pub training_hours: Option<f64>,
    #[serde(
        rename = "Course In Scope",
        default,
        deserialize_with = "yes_no",
        serialize_with = "yes_no_ser"
    )]
    pub course_in_scope: bool,
    #[serde(rename = "Item Status", default = "unknown_status")]
    pub item_status: ItemStatus,
}

fn unknown_status() -> ItemStatus {
    ItemStatus::Other(String::new())
}

impl TrainingRecord {
    /// Absent hours count as zero everywhere.
    pub fn hours(&self) -> f64 {
        self.training_hours.unwrap_or(0.0)
    }
}

/// A filterable grouping dimension of the record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Dimension {
    Region,
    Country,
    Segment,
    Manager,
    JobFunction,
    JobFamily,
    AssignmentType,
    Theme,
    Department,
}

impl Dimension {
    pub fn value_of<'a>(&self, record: &'a TrainingRecord) -> &'a str {
        match self {
            Dimension::Region => &record.region,
            Dimension::Country => &record.country,
            Dimension::Segment => &record.segment,
            Dimension::Manager => &record.manager,
            Dimension::JobFunction => &record.job_function,
            Dimension::JobFamily => &record.job_family,
            Dimension::AssignmentType => &record.assignment_type,
            Dimension::Theme => &record.theme,
            Dimension::Department => &record.department,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Country => "Country",
            Dimension::Segment => "Segment",
            Dimension::Manager => "Manager",
            Dimension::JobFunction => "Job Function",
            Dimension::JobFamily => "Job Family",
            Dimension::AssignmentType => "Assignment Type",
            Dimension::Theme => "Theme",
            Dimension::Department => "Department",
        }
    }
}

/// Equality constraints over the record collection. `None` means "all"
/// for that dimension; setting one dimension never touches another.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub region: Option<String>,
    pub country: Option<String>,
    pub segment: Option<String>,
    pub manager: Option<String>,
    pub job_function: Option<String>,
    pub assignment_type: Option<String>,
    pub theme: Option<String>,
}

/// Per-group rollup for one value of a grouping dimension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub name: String,
    /// Region the group belongs to; populated for country groupings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub records: usize,
    pub associates: usize,
    pub total_hours: f64,
    pub in_scope: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub avg_hours_per_associate: f64,
}

/// Global scalar summaries for the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub completion_rate: f64,
    pub avg_hours_per_associate: f64,
    pub total_associates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub name: &'static str,
    pub value: usize,
}

/// One plotted country on the globe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobePoint {
    pub lat: f64,
    pub lng: f64,
    pub size: f64,
    pub color: &'static str,
    pub country: String,
    pub region: String,
    pub associates: usize,
    pub completion_rate: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub label: &'static str,
    pub records: usize,
    pub associates: usize,
    pub hours: f64,
    pub completion_rate: f64,
}

/// One aggregation-level instance in the materialized hierarchy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub val: u32,
    pub color: &'static str,
    pub has_children: bool,
    pub info: NodeInfo,
}

/// Directed parent → child edge between materialized nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyLink {
    pub source: String,
    pub target: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HierarchyGraph {
    pub nodes: Vec<HierarchyNode>,
    pub links: Vec<HierarchyLink>,
}

impl HierarchyGraph {
    pub fn empty() -> Self {
        HierarchyGraph {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}
