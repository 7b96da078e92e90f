//! Simulate command implementation
//!
//! Runs the configured scenarios through the engine and writes the export
//! document as JSON, CSV rows or a plain-text summary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use adoption_core::types::Series;
use adoption_engine::mc::ScenarioSimulator;
use adoption_engine::report::ExportDocument;
use tracing::info;

use crate::config::RunConfig;
use crate::{CliError, Result};

/// Output format of the simulate command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed export document
    Json,
    /// One row per (scenario, series, year)
    Csv,
    /// Final-year summary
    Table,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

/// Options of the simulate command
#[derive(Clone, Debug)]
pub struct SimulateOptions {
    /// Output format
    pub format: OutputFormat,
    /// Output file; stdout when `None`
    pub output: Option<PathBuf>,
    /// Include raw paths in the JSON export
    pub raw: bool,
}

/// Run the simulate command
pub fn run(mut config: RunConfig, options: &SimulateOptions) -> Result<()> {
    if options.raw && options.format == OutputFormat::Json {
        config.simulation.retain_paths = true;
    }
    config.validate()?;

    let params = config.to_parameter_set()?;
    let engine = config.to_engine_config()?;
    let selectors = config.selectors()?;

    info!("Starting simulation...");
    info!("  Scenarios: {}", selectors.len());
    info!("  Paths: {}", params.num_paths());
    info!("  Horizon: {} years", params.time_horizon());
    info!("  Seed: {}", engine.seed());

    let start = Instant::now();
    let simulator = ScenarioSimulator::new(params, engine)?;
    let report = simulator.run_analysis(&selectors)?;
    let document = ExportDocument::build(&report, &config.impact)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Simulation complete"
    );

    match &options.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_document(&document, options.format, &mut writer)?;
            writer.flush()?;
            info!("Results written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_document(&document, options.format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Writes the document in the requested format
pub fn write_document<W: Write>(
    document: &ExportDocument,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, document)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *writer);
            for row in document.rows() {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Table => write_table(document, writer)?,
    }
    Ok(())
}

fn write_table<W: Write>(document: &ExportDocument, writer: &mut W) -> Result<()> {
    for scenario in &document.scenarios {
        writeln!(writer, "Scenario: {}", scenario.label)?;
        writeln!(
            writer,
            "  {:<18}{:>10}{:>10}{:>10}{:>10}",
            "final year", "mean", "p5", "median", "p95"
        )?;
        for series in Series::ALL {
            if let Some(summary) = scenario.statistics.series(series).final_year() {
                writeln!(
                    writer,
                    "  {:<18}{:>10.3}{:>10.3}{:>10.3}{:>10.3}",
                    series.name(),
                    summary.mean,
                    summary.p5,
                    summary.median,
                    summary.p95
                )?;
            }
        }
        let impact = &scenario.economic_impact;
        writeln!(
            writer,
            "  GDP impact {:.1} | jobs {} | productivity gain {:.1}%",
            impact.gdp_impact, impact.jobs_created, impact.productivity_gain_percent
        )?;
        writeln!(writer)?;
    }

    if let Some(recommendations) = &document.policy_recommendations {
        writeln!(writer, "Policy recommendations:")?;
        if recommendations.is_empty() {
            writeln!(writer, "  none")?;
        }
        for rec in recommendations {
            writeln!(
                writer,
                "  [{}] {}: {}",
                rec.priority, rec.area, rec.recommendation
            )?;
            writeln!(writer, "      {}; {}", rec.impact, rec.economic_benefit)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioEntry;

    fn small_config() -> RunConfig {
        RunConfig::default().with_overrides(Some(40), Some(3), Some(5))
    }

    fn document(config: &RunConfig) -> ExportDocument {
        let simulator = ScenarioSimulator::new(
            config.to_parameter_set().unwrap(),
            config.to_engine_config().unwrap(),
        )
        .unwrap();
        let report = simulator
            .run_analysis(&config.selectors().unwrap())
            .unwrap();
        ExportDocument::build(&report, &config.impact).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        write_document(&document(&small_config()), OutputFormat::Json, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(
            value["baseline"]["statistics"]["sme_adoption"]["median"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
        assert!(value["policy_recommendations"].is_array());
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        write_document(&document(&small_config()), OutputFormat::Csv, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "scenario,series,year,mean,median,p5,p25,p75,p95,std"
        );
        // 5 scenarios x 4 series x 4 years
        assert_eq!(lines.count(), 80);
        assert!(text.contains("\nbaseline,market_size,0,7.56,"));
    }

    #[test]
    fn test_table_output() {
        let mut buffer = Vec::new();
        write_document(&document(&small_config()), OutputFormat::Table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Scenario: baseline"));
        assert!(text.contains("Scenario: disruption"));
        assert!(text.contains("overall_adoption"));
        assert!(text.contains("Policy recommendations:"));
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let mut config = small_config();
        config.scenarios = vec![ScenarioEntry {
            name: "optimistic".to_string(),
            policy_effects: None,
        }];
        let options = SimulateOptions {
            format: OutputFormat::Json,
            output: Some(path.clone()),
            raw: true,
        };

        run(config, &options).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["optimistic"]["paths"].as_array().unwrap().len(), 40);
        assert!(value.get("policy_recommendations").is_none());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = RunConfig::default().with_overrides(Some(0), None, None);
        let options = SimulateOptions {
            format: OutputFormat::Csv,
            output: None,
            raw: false,
        };
        assert!(matches!(run(config, &options), Err(CliError::Config(_))));
    }
}
