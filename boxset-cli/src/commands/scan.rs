use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use boxset_lib::core::Field;
use boxset_lib::{Pipeline, PipelineConfig, PlanAction, Settings, absolutize};

use crate::cli_types::LibraryArgs;
use crate::error::CliError;
use crate::spinner::spinner;

/// List the collections a library declares, with member counts and the
/// local metadata each one already has.
pub(crate) fn run_scan(
    library: LibraryArgs,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<bool, CliError> {
    let settings = Settings::load()?;
    let root = super::require_library(&settings, library.library)?;
    let output = settings.resolve_output(output);

    let config = PipelineConfig::new(
        absolutize(&root),
        output.as_deref().map(absolutize).unwrap_or_default(),
    )
    .overwrite(settings.output.overwrite)
    .require_video(!library.allow_missing_video);
    let pipeline = Pipeline::new(config, None);

    let pb = spinner(quiet, format!("Scanning {}...", root.display()));
    let plan = pipeline.plan();
    pb.finish_and_clear();
    let plan = plan?;

    log::info!(
        "{} {} titles, {} collections",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        plan.titles_scanned,
        plan.collections.len()
    );
    log::info!("");

    for collection in &plan.collections {
        let status = match (output.is_some(), collection.action) {
            (false, _) => String::new(),
            (true, PlanAction::Create) => "new".if_supports_color(Stdout, |t| t.green()).to_string(),
            (true, PlanAction::Overwrite) => {
                "overwrite".if_supports_color(Stdout, |t| t.yellow()).to_string()
            }
            (true, PlanAction::Skip) => "exists".if_supports_color(Stdout, |t| t.dimmed()).to_string(),
            (true, PlanAction::Conflict) => {
                "folder taken".if_supports_color(Stdout, |t| t.red()).to_string()
            }
        };
        let missing: Vec<&str> = collection
            .local_fields
            .missing()
            .iter()
            .map(Field::key)
            .collect();
        log::info!(
            "  {} {} {}",
            collection.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({} titles)", collection.members).if_supports_color(Stdout, |t| t.dimmed()),
            status
        );
        if !missing.is_empty() {
            log::debug!("      missing locally: {}", missing.join(", "));
        }
    }

    if !plan.ungrouped.is_empty() {
        log::info!("");
        log::info!(
            "  {} titles have no collection",
            plan.ungrouped.len().if_supports_color(Stdout, |t| t.dimmed())
        );
        for path in &plan.ungrouped {
            log::debug!("      {}", path.display());
        }
    }

    if !plan.warnings.is_empty() {
        log::info!("");
        for warning in &plan.warnings {
            log::warn!(
                "  {} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                warning
            );
        }
    }

    Ok(true)
}
