//! Check command implementation
//!
//! Validates the run configuration without simulating.

use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::Result;

/// Run the check command
pub fn run(path: &Path, config: &RunConfig) -> Result<()> {
    info!("Checking configuration...");
    if path.exists() {
        info!("  Config file: {}", path.display());
    } else {
        warn!("  Config file {} not found, using defaults", path.display());
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_summary(config, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Validates the configuration and writes a one-line summary
pub fn write_summary<W: Write>(config: &RunConfig, writer: &mut W) -> Result<()> {
    config.validate()?;
    let params = config.to_parameter_set()?;
    let names: Vec<&str> = config.scenarios.iter().map(|s| s.name.as_str()).collect();

    writeln!(
        writer,
        "Configuration OK: {} paths, {} years, seed {}, scenarios [{}]",
        params.num_paths(),
        params.time_horizon(),
        config.simulation.seed,
        names.join(", ")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::CliError;

    #[test]
    fn test_default_summary() {
        let mut buffer = Vec::new();
        write_summary(&RunConfig::default(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Configuration OK: 1000 paths, 6 years, seed 42"));
        assert!(text.contains("policy_intervention"));
    }

    #[test]
    fn test_file_with_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adoption.toml");
        std::fs::write(
            &path,
            "[simulation]\ntime_horizon = 0\n\n[[scenarios]]\nname = \"sideways\"\n",
        )
        .unwrap();
        let config = RunConfig::load(&path).unwrap();

        let mut buffer = Vec::new();
        match write_summary(&config, &mut buffer) {
            Err(CliError::Config(ConfigError::Validation(errors))) => {
                assert_eq!(errors.len(), 2, "{errors:?}");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
        assert!(buffer.is_empty());
    }
}
