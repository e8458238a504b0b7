//! Run command - select records by id and run one action

use crate::config::SelectionUiConfig;
use crate::records::{
    Applied, Record, apply, collect_records, command_callbacks, command_channel, load_records,
    populate, save_records,
};
use crate::selection::{
    ActionOutcome, IdExtractor, SelectionAction, SelectionController, SelectionOptions, SkipReason,
};
use crate::ui::{ConfirmPrompt, DialoguerConfirm, MemoryHost, OutputWriter, ScriptedConfirm, StdoutWriter};
use crate::{Result, SelectionError};
use futures::executor::block_on;
use log::debug;
use std::path::Path;

/// What a run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Controller outcome for the action
    pub outcome: ActionOutcome,
    /// Ids created by a copy
    pub created: Vec<String>,
    /// Records after the action
    pub records: Vec<Record>,
}

/// Execute the run command
///
/// # Errors
///
/// Returns an error if the record file cannot be loaded, an id does not
/// name a selectable record, the action cannot run on the selection, or
/// the output file cannot be written.
pub fn execute(
    config: &SelectionUiConfig,
    items: &Path,
    select: &[String],
    action: SelectionAction,
    yes: bool,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let records = load_records(items)?;
    let confirm: Box<dyn ConfirmPrompt> = if yes {
        Box::new(ScriptedConfirm::accept())
    } else {
        Box::new(DialoguerConfirm::new())
    };

    let report = run_action(config, &records, select, action, confirm, &StdoutWriter::new(), quiet)?;

    for id in &report.created {
        println!("{id}");
    }

    if let Some(output) = output
        && report.outcome.is_dispatched()
    {
        save_records(output, &report.records)?;
        if !quiet {
            StdoutWriter::new().info(&format!("wrote {}", output.display()));
        }
    }

    Ok(())
}

/// Select `select` among `records` and run `action` on them.
///
/// Duplicate ids are selected once.
///
/// # Errors
///
/// Returns `SelectionError::InvalidInput` for unknown or unselectable ids
/// and for actions the selection does not allow, and
/// `SelectionError::HandlerError` if the handler fails.
pub fn run_action(
    config: &SelectionUiConfig,
    records: &[Record],
    select: &[String],
    action: SelectionAction,
    confirm: Box<dyn ConfirmPrompt>,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<RunReport> {
    let host = MemoryHost::with_markers(config.markers.clone());
    populate(&host, records);

    let (sender, mut commands) = command_channel();
    let options = SelectionOptions::new(command_callbacks(&sender))
        .with_labels(config.labels.clone())
        .with_root_class(config.markers.root_class.clone())
        .with_id_extractor(IdExtractor::attribute(config.markers.id_attribute.clone()));
    let mut controller = SelectionController::new(host.clone(), confirm, options);

    controller.enter_selection_mode();
    for id in select {
        if controller.is_selected(id) {
            continue;
        }
        let element = host
            .find_by_id(id)
            .ok_or_else(|| SelectionError::InvalidInput(format!("no record with id {id:?}")))?;
        controller.toggle_item_selection(&element);
        if !controller.is_selected(id) {
            return Err(SelectionError::InvalidInput(format!("record {id:?} is not selectable")));
        }
    }

    if !quiet {
        out.info(&controller.labels().count(controller.selected_count()));
    }

    let outcome = block_on(controller.execute(action))
        .map_err(|e| SelectionError::HandlerError(e.to_string()))?;
    debug!("{} finished: {outcome:?}", action.caption());

    match outcome {
        ActionOutcome::Dispatched => {}
        ActionOutcome::Declined => {
            if !quiet {
                out.warning("cancelled");
            }
        }
        ActionOutcome::Skipped(SkipReason::NotSingleSelection) => {
            return Err(SelectionError::InvalidInput(
                "edit needs exactly one selected record".to_string(),
            ));
        }
        ActionOutcome::Skipped(reason) => {
            return Err(SelectionError::InvalidInput(format!(
                "{} skipped: {reason:?}",
                action.caption()
            )));
        }
    }

    let labels = controller.labels().clone();
    let mut created = Vec::new();
    while let Ok(command) = commands.try_recv() {
        match apply(&host, command) {
            Applied::Copied { created: ids, .. } => {
                if !quiet {
                    out.success(&labels.copied(ids.len()));
                }
                created.extend(ids);
            }
            Applied::Deleted { removed } => {
                if !quiet {
                    out.success(&labels.deleted(removed));
                }
            }
            Applied::EditRequested { id, label } => {
                out.write(&format!("{}\t{}", labels.edit(&id), label.unwrap_or_default()));
            }
        }
    }

    controller.exit_selection_mode();

    Ok(RunReport {
        outcome,
        created,
        records: collect_records(&host),
    })
}
