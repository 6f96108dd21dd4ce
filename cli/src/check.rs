use crate::error::{CliError, Result};
use crate::render::{self, Overrides};
use crate::ui;
use baseline_report::{BaselineReport, GenerationOutcome, RecordingSink};
use std::path::{Path, PathBuf};

/// Render into a recording sink and report on the resulting structure
pub fn execute(config_path: &Path, input: PathBuf, overrides: Overrides) -> Result<()> {
    ui::section_header("Baseline Check");

    let outcome = record(config_path, &input, overrides)?;
    let sink = &outcome.sink;

    ui::section_header("Outline");
    for line in sink.outline() {
        ui::outline_line(&line);
    }
    ui::info_message(&format!(
        "{} item(s), deepest list nesting {}",
        sink.items().len(),
        sink.max_list_depth()
    ));

    if let Some(err) = outcome.error {
        let context = if err.is_structural() {
            "Event stream rejected"
        } else {
            "Rendering failed"
        };
        return Err(CliError::Report(err).with_context(context));
    }
    if !sink.is_balanced() {
        return Err(CliError::Unbalanced {
            mismatches: sink.mismatches(),
            open: sink.open_scopes().len(),
        });
    }

    ui::success_message("Outline is balanced");
    Ok(())
}

fn record(
    config_path: &Path,
    input: &Path,
    overrides: Overrides,
) -> Result<GenerationOutcome<RecordingSink>> {
    let config = render::load_config(config_path, overrides)?;
    let baseline = render::read_baseline(input)?;
    let report = BaselineReport::new(config)?;
    Ok(report.generate(&baseline, RecordingSink::new()))
}
