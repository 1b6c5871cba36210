use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

mod aggregate;
mod color;
mod dataset;
mod filter;
mod geo;
mod hierarchy;
mod models;
mod report;

use models::{Dimension, FilterSelection};

#[derive(Parser)]
#[command(name = "training-atlas")]
#[command(about = "Training analytics derivations for globe and network dashboards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Equality filters shared by every derivation subcommand. Omitted
/// flags mean "all" for that dimension.
#[derive(Args, Default)]
struct FilterArgs {
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    segment: Option<String>,
    #[arg(long)]
    manager: Option<String>,
    #[arg(long)]
    job_function: Option<String>,
    #[arg(long)]
    assignment_type: Option<String>,
    #[arg(long)]
    theme: Option<String>,
}

impl FilterArgs {
    fn into_selection(self) -> FilterSelection {
        FilterSelection {
            region: self.region,
            country: self.country,
            segment: self.segment,
            manager: self.manager,
            job_function: self.job_function,
            assignment_type: self.assignment_type,
            theme: self.theme,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a realistic sample dataset
    Seed {
        #[arg(long, default_value = "training-data.csv")]
        out: PathBuf,
    },
    /// List the distinct values of every grouping dimension
    Dimensions {
        #[arg(long)]
        data: PathBuf,
    },
    /// Global KPIs over the filtered records
    Kpis {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Per-group summaries for one dimension
    Summary {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, value_enum, default_value = "country")]
        by: Dimension,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Per-country globe points as JSON
    Globe {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Drill-down node/link graph for one country as JSON
    Graph {
        /// Country selected as the root of the drill-down
        #[arg(value_name = "COUNTRY")]
        selected: String,
        #[arg(long)]
        data: PathBuf,
        /// Node ids opened one level deeper; repeatable
        #[arg(long = "expand")]
        expanded: Vec<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { out } => {
            let written = dataset::write_seed(&out)?;
            println!("Wrote {written} seed records to {}.", out.display());
        }
        Commands::Dimensions { data } => {
            let records = dataset::load_csv(&data)?;
            let dimensions = [
                Dimension::Region,
                Dimension::Country,
                Dimension::Segment,
                Dimension::Manager,
                Dimension::JobFunction,
                Dimension::JobFamily,
                Dimension::AssignmentType,
                Dimension::Theme,
                Dimension::Department,
            ];
            for dimension in dimensions {
                let values = filter::distinct_values(&records, dimension);
                println!("{}: {}", dimension.label(), values.join(", "));
            }
        }
        Commands::Kpis { data, json, filters } => {
            let records = dataset::load_csv(&data)?;
            let selection = filters.into_selection();
            let subset = filter::filter_records(&records, &selection);
            let kpis = aggregate::reduce_kpis(&subset);

            if json {
                println!("{}", serde_json::to_string_pretty(&kpis)?);
            } else {
                println!("Completion rate: {:.1}%", kpis.completion_rate);
                println!("Avg hours per associate: {:.1}", kpis.avg_hours_per_associate);
                println!("Total associates: {}", kpis.total_associates);
            }
        }
        Commands::Summary { data, by, json, filters } => {
            let records = dataset::load_csv(&data)?;
            let selection = filters.into_selection();
            let subset = filter::filter_records(&records, &selection);
            let summaries = aggregate::aggregate_by(&subset, by);

            if summaries.is_empty() {
                println!("No records match this selection.");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{} summary:", by.label());
                for summary in summaries.iter() {
                    println!(
                        "- {}: {:.1}% completion, {} associates, {:.1} hours across {} records",
                        summary.name,
                        summary.completion_rate,
                        summary.associates,
                        summary.total_hours,
                        summary.records
                    );
                }
            }
        }
        Commands::Globe { data, out, filters } => {
            let records = dataset::load_csv(&data)?;
            let selection = filters.into_selection();
            let subset = filter::filter_records(&records, &selection);
            let countries = aggregate::aggregate_by(&subset, Dimension::Country);
            let points = geo::globe_points(&countries);

            emit(out.as_deref(), &serde_json::to_string_pretty(&points)?)?;
        }
        Commands::Graph {
            selected,
            data,
            expanded,
            out,
            filters,
        } => {
            let records = dataset::load_csv(&data)?;
            let selection = filters.into_selection();
            let subset = filter::filter_records(&records, &selection);
            let expansion = hierarchy::ExpansionSet::from_ids(expanded);
            let graph = hierarchy::materialize(&subset, Some(&selected), &expansion);

            emit(out.as_deref(), &serde_json::to_string_pretty(&graph)?)?;
        }
        Commands::Report { data, out, filters } => {
            let records = dataset::load_csv(&data)?;
            let selection = filters.into_selection();
            let subset = filter::filter_records(&records, &selection);
            let scope = scope_label(&selection);
            let generated_on = chrono::Utc::now().date_naive();
            let rendered = report::build_report(scope.as_deref(), generated_on, &subset);

            std::fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn emit(out: Option<&std::path::Path>, payload: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, payload)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Written to {}.", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

fn scope_label(selection: &FilterSelection) -> Option<String> {
    let mut parts = Vec::new();
    let constraints = [
        ("region", &selection.region),
        ("country", &selection.country),
        ("segment", &selection.segment),
        ("manager", &selection.manager),
        ("job function", &selection.job_function),
        ("assignment type", &selection.assignment_type),
        ("theme", &selection.theme),
    ];

    for (label, value) in constraints {
        if let Some(value) = value {
            parts.push(format!("{label} {value}"));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
