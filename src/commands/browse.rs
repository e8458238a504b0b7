//! Browse command - interactive terminal host over a record file

use crate::Result;
use crate::config::SelectionUiConfig;
use crate::records::{collect_records, load_records, populate, save_records};
use crate::ui::terminal::{
    BrowseSession, BrowseView, TerminalConfirm, cleanup_terminal, setup_terminal,
};
use crate::ui::{ConfirmPrompt, MemoryHost, ScriptedConfirm, ToastQueue, UiError};
use log::info;
use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::rc::Rc;

/// Execute the browse command
///
/// # Errors
///
/// Returns an error if the record file cannot be loaded, the terminal
/// cannot be used, or the output file cannot be written.
pub fn execute(
    config: &SelectionUiConfig,
    items: &Path,
    no_confirm: bool,
    output: Option<&Path>,
) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(UiError::Terminal("stdout is not a terminal".to_string()).into());
    }

    let records = load_records(items)?;
    info!("browsing {} record(s) from {}", records.len(), items.display());

    let host = MemoryHost::with_markers(config.markers.clone());
    populate(&host, &records);

    let title = items
        .file_name()
        .map_or_else(|| items.display().to_string(), |name| name.to_string_lossy().into_owned());
    let view = BrowseView::new(
        host.clone(),
        ToastQueue::with_duration(config.toast.duration()),
        config.keybinds.clone(),
    )
    .with_title(title);
    let view = Rc::new(RefCell::new(view));

    let terminal = setup_terminal()?;
    let confirm: Box<dyn ConfirmPrompt> = if no_confirm {
        Box::new(ScriptedConfirm::accept())
    } else {
        Box::new(TerminalConfirm::new(Rc::clone(&terminal), Rc::clone(&view)))
    };

    let mut session = BrowseSession::new(view, confirm, config).with_clipboard();
    let result = session.run(&terminal);
    cleanup_terminal()?;
    result?;

    if let Some(output) = output {
        let records = collect_records(&host);
        save_records(output, &records)?;
        info!("wrote {} record(s) to {}", records.len(), output.display());
    }

    Ok(())
}
