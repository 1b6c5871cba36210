use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::models::{ItemStatus, TrainingRecord};

/// Reads training records from CSV with the source dataset's headers.
/// Optional fields resolve to safe defaults instead of failing the row.
pub fn load_records<R: Read>(reader: R) -> anyhow::Result<Vec<TrainingRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<TrainingRecord>() {
        records.push(row?);
    }

    Ok(records)
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<TrainingRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let records = load_records(file)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(count = records.len(), path = %path.display(), "loaded training records");
    Ok(records)
}

/// Realistic sample data so every subcommand is runnable out of the box.
pub fn seed_records() -> Vec<TrainingRecord> {
    type Row = (
        &'static str, // associate
        &'static str, // region
        &'static str, // country
        &'static str, // segment
        &'static str, // manager
        &'static str, // job function
        &'static str, // job family
        &'static str, // assignment type
        &'static str, // theme
        &'static str, // department
        Option<f64>,  // hours
        bool,         // in scope
        &'static str, // status
    );

    let rows: Vec<Row> = vec![
        ("BR-1001", "LATAM", "Brazil", "Commercial", "Dana Cruz", "Sales", "Field", "Mandatory", "Safety Essentials", "Commercial Ops", Some(2.5), true, "Completed"),
        ("BR-1001", "LATAM", "Brazil", "Commercial", "Dana Cruz", "Sales", "Field", "Elective", "Leadership Foundations", "Commercial Ops", Some(4.0), true, "In Progress"),
        ("BR-1002", "LATAM", "Brazil", "Commercial", "Dana Cruz", "Marketing", "Office", "Mandatory", "Code of Conduct", "Brand Team", Some(1.5), true, "Completed"),
        ("BR-1003", "LATAM", "Brazil", "Industrial", "Rafael Lima", "Operations", "Plant", "Mandatory", "Safety Essentials", "Plant Maintenance", Some(6.0), true, "Overdue"),
        ("BR-1004", "LATAM", "Brazil", "Industrial", "Rafael Lima", "Operations", "Plant", "Onboarding", "Quality Systems", "Plant Maintenance", None, false, "In Progress"),
        ("CL-2001", "LATAM", "Chile", "Commercial", "Elena Rojas", "Sales", "Field", "Mandatory", "Safety Essentials", "Commercial Ops", Some(2.0), true, "Completed"),
        ("CL-2002", "LATAM", "Chile", "Corporate", "Elena Rojas", "Finance", "Office", "Mandatory", "Data Privacy", "Controlling", Some(1.0), true, "Completed"),
        ("CL-2002", "LATAM", "Chile", "Corporate", "Elena Rojas", "Finance", "Office", "Elective", "Leadership Foundations", "Controlling", Some(3.5), true, "Overdue"),
        ("DE-3001", "EMEA", "Germany", "Industrial", "Jonas Weber", "Engineering", "Plant", "Mandatory", "Quality Systems", "Process Engineering", Some(5.0), true, "Completed"),
        ("DE-3001", "EMEA", "Germany", "Industrial", "Jonas Weber", "Engineering", "Plant", "Mandatory", "Safety Essentials", "Process Engineering", Some(2.0), true, "Completed"),
        ("DE-3002", "EMEA", "Germany", "Corporate", "Petra Vogel", "Finance", "Office", "Mandatory", "Data Privacy", "Treasury", Some(1.0), true, "In Progress"),
        ("DE-3003", "EMEA", "Germany", "Commercial", "Petra Vogel", "Sales", "Field", "Elective", "Leadership Foundations", "Key Accounts", None, true, "Overdue"),
        ("IN-4001", "APAC", "India", "Corporate", "Asha Iyer", "Engineering", "Office", "Mandatory", "Data Privacy", "Shared Services", Some(2.5), true, "Completed"),
        ("IN-4002", "APAC", "India", "Corporate", "Asha Iyer", "Engineering", "Office", "Mandatory", "Code of Conduct", "Shared Services", Some(1.5), true, "Completed"),
        ("IN-4003", "APAC", "India", "Commercial", "Vikram Rao", "Sales", "Field", "Onboarding", "Safety Essentials", "Commercial Ops", Some(8.0), true, "In Progress"),
        ("JP-5001", "APAC", "Japan", "Industrial", "Keiko Tanaka", "Operations", "Plant", "Mandatory", "Quality Systems", "Assembly Line", Some(3.0), true, "Completed"),
        ("JP-5002", "APAC", "Japan", "Industrial", "Keiko Tanaka", "Operations", "Plant", "Mandatory", "Safety Essentials", "Assembly Line", Some(3.0), true, "Overdue"),
        ("US-6001", "NAMER", "United States", "Commercial", "Sam Porter", "Sales", "Field", "Mandatory", "Code of Conduct", "Regional Sales", Some(1.5), true, "Completed"),
        ("US-6002", "NAMER", "United States", "Commercial", "Sam Porter", "Marketing", "Office", "Elective", "Leadership Foundations", "Brand Team", Some(4.5), true, "Completed"),
        ("US-6003", "NAMER", "United States", "Corporate", "Joan Ellis", "Finance", "Office", "Mandatory", "Data Privacy", "Treasury", Some(1.0), true, "Overdue"),
        ("US-6003", "NAMER", "United States", "Corporate", "Joan Ellis", "Finance", "Office", "Mandatory", "Code of Conduct", "Treasury", Some(1.0), false, "Completed"),
    ];

    rows.into_iter()
        .map(
            |(
                associate,
                region,
                country,
                segment,
                manager,
                job_function,
                job_family,
                assignment,
                theme,
                department,
                hours,
                in_scope,
                status,
            )| TrainingRecord {
                associate_id: associate.to_string(),
                region: region.to_string(),
                country: country.to_string(),
                segment: segment.to_string(),
                manager: manager.to_string(),
                job_function: job_function.to_string(),
                job_family: job_family.to_string(),
                assignment_type: assignment.to_string(),
                theme: theme.to_string(),
                department: department.to_string(),
                training_hours: hours,
                course_in_scope: in_scope,
                item_status: ItemStatus::from(status.to_string()),
            },
        )
        .collect()
}

pub fn write_seed(path: &Path) -> anyhow::Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let records = seed_records();
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}
