//! Scenarios command implementation
//!
//! Prints the multipliers each configured scenario resolves to.

use std::io::{self, Write};

use adoption_core::types::Segment;
use adoption_engine::EngineError;
use adoption_models::scenarios::{ScenarioSelector, ScenarioTable};
use tracing::info;

use crate::config::RunConfig;
use crate::Result;

/// Run the scenarios command
pub fn run(config: &RunConfig) -> Result<()> {
    let engine = config.to_engine_config()?;
    let selectors = config.selectors()?;
    info!("Resolving {} scenarios", selectors.len());

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_multipliers(engine.table(), &selectors, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the resolved multipliers of each selector
pub fn write_multipliers<W: Write>(
    table: &ScenarioTable,
    selectors: &[ScenarioSelector],
    writer: &mut W,
) -> Result<()> {
    for selector in selectors {
        let multipliers = table.resolve(selector).map_err(EngineError::from)?;

        writeln!(writer, "{}: {}", selector, selector.kind().description())?;
        if let Some(effects) = selector.policy_effects() {
            for (name, magnitude) in effects.iter() {
                writeln!(writer, "  policy effect {} = {}", name, magnitude)?;
            }
        }
        writeln!(
            writer,
            "  market growth x{:.3}",
            multipliers.market_growth
        )?;
        writeln!(
            writer,
            "  {:<8}{:>12}{:>12}{:>12}",
            "segment", "innovation", "imitation", "potential"
        )?;
        for segment in Segment::ALL {
            let m = multipliers.segment(segment);
            writeln!(
                writer,
                "  {:<8}{:>12.3}{:>12.3}{:>12.3}",
                segment.name(),
                m.innovation,
                m.imitation,
                m.potential
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use adoption_models::scenarios::PolicyEffects;

    #[test]
    fn test_standard_set_output() {
        let mut buffer = Vec::new();
        write_multipliers(
            &ScenarioTable::default(),
            &ScenarioSelector::standard_set(),
            &mut buffer,
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("pessimistic:"));
        assert!(text.contains("market growth x0.850"));
        assert!(text.contains("policy effect sme_support = 0.15"));
        // Policy scenario: 0.8 + 0.15 * 0.3
        assert!(text.contains("0.845"));
    }

    #[test]
    fn test_invalid_policy_effects_fail() {
        let selector =
            ScenarioSelector::PolicyIntervention(PolicyEffects::new().with("tax_credit", 0.1));
        let mut buffer = Vec::new();
        let result = write_multipliers(&ScenarioTable::default(), &[selector], &mut buffer);
        assert!(matches!(result, Err(CliError::Engine(EngineError::Scenario(_)))));
    }
}
