//! Record files
//!
//! `selui browse` and `selui run` read a JSON array of records, host
//! them in a [`MemoryHost`] and wire selection handlers that post
//! [`RecordCommand`]s. The caller drains the commands after each action
//! and applies them to the document.
//!
//! ```json
//! [
//!   { "id": "a1", "label": "Invoice 2024-01" },
//!   { "id": "a2", "label": "Draft", "selectable": false }
//! ]
//! ```

use crate::{Result, SelectionError};
use crate::selection::{HandlerError, SelectionCallbacks};
use crate::ui::{ElementId, MemoryHost};
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Suffix appended to the label of a copied record
pub const COPY_LABEL_SUFFIX: &str = " (コピー)";

/// One hosted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique within the file
    pub id: String,
    /// Display text
    pub label: String,
    /// Whether the record takes part in selection
    #[serde(default = "default_selectable")]
    pub selectable: bool,
}

const fn default_selectable() -> bool {
    true
}

impl Record {
    /// Create a selectable record
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            selectable: true,
        }
    }
}

/// Parse records from JSON text
///
/// # Errors
///
/// Returns `SelectionError::Json` if the text is not an array of records
/// and `SelectionError::InvalidInput` if two records share an id.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = records.iter().find(|record| !seen.insert(record.id.as_str())) {
        return Err(SelectionError::InvalidInput(format!(
            "duplicate record id {:?}",
            duplicate.id
        )));
    }

    Ok(records)
}

/// Read records from a JSON file
///
/// # Errors
///
/// Returns `SelectionError::IoError` if the file cannot be read and
/// `SelectionError::Json` if it does not hold an array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    parse_records(&text)
}

/// Append `records` to the document, in order
pub fn populate(host: &MemoryHost, records: &[Record]) -> Vec<ElementId> {
    records
        .iter()
        .map(|record| host.push_record(&record.id, &record.label, record.selectable))
        .collect()
}

/// Records currently in the document, in order
///
/// Elements without an identifier are left out.
#[must_use]
pub fn collect_records(host: &MemoryHost) -> Vec<Record> {
    host.snapshot()
        .into_iter()
        .filter_map(|view| {
            view.record_id.map(|id| Record {
                id,
                label: view.label,
                selectable: view.selectable,
            })
        })
        .collect()
}

/// Write records as pretty-printed JSON
///
/// # Errors
///
/// Returns `SelectionError::IoError` if the file cannot be written.
pub fn save_records(path: &Path, records: &[Record]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json + "\n")?;
    Ok(())
}

/// Work requested by a selection handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCommand {
    /// Duplicate these records
    Copy(Vec<String>),
    /// Remove these records
    Delete(Vec<String>),
    /// Open this record
    Edit(String),
}

/// What applying a command did to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// New records created, one per copied id that still existed
    Copied {
        /// Source ids, in request order
        sources: Vec<String>,
        /// Ids of the new records
        created: Vec<String>,
    },
    /// Records removed
    Deleted {
        /// Number of records actually removed
        removed: usize,
    },
    /// Edit requested for a record
    EditRequested {
        /// Record id
        id: String,
        /// Current label, if the record exists
        label: Option<String>,
    },
}

/// Channel carrying commands from handlers to the event loop
#[must_use]
pub fn command_channel() -> (UnboundedSender<RecordCommand>, UnboundedReceiver<RecordCommand>) {
    unbounded()
}

/// Handlers that forward every action to `sender`
///
/// `on_cancel` is left to the caller.
#[must_use]
pub fn command_callbacks(sender: &UnboundedSender<RecordCommand>) -> SelectionCallbacks {
    let copy_tx = sender.clone();
    let delete_tx = sender.clone();
    let edit_tx = sender.clone();

    SelectionCallbacks::new()
        .on_copy(move |ids| {
            let sent = send(&copy_tx, RecordCommand::Copy(ids));
            async move { sent }
        })
        .on_delete(move |ids| {
            let sent = send(&delete_tx, RecordCommand::Delete(ids));
            async move { sent }
        })
        .on_edit(move |id| {
            let sent = send(&edit_tx, RecordCommand::Edit(id));
            async move { sent }
        })
}

fn send(
    sender: &UnboundedSender<RecordCommand>,
    command: RecordCommand,
) -> std::result::Result<(), HandlerError> {
    sender
        .unbounded_send(command)
        .map_err(|e| HandlerError::from(e.into_send_error()))
}

/// Apply one command to the document
pub fn apply(host: &MemoryHost, command: RecordCommand) -> Applied {
    match command {
        RecordCommand::Copy(ids) => {
            let created = ids.iter().filter_map(|id| copy_record(host, id)).collect();
            Applied::Copied {
                sources: ids,
                created,
            }
        }
        RecordCommand::Delete(ids) => {
            let removed = ids
                .iter()
                .filter(|id| host.find_by_id(id).is_some_and(|element| host.remove(element)))
                .count();
            Applied::Deleted { removed }
        }
        RecordCommand::Edit(id) => {
            let label = host.find_by_id(&id).and_then(|element| host.label(element));
            Applied::EditRequested { id, label }
        }
    }
}

fn copy_record(host: &MemoryHost, id: &str) -> Option<String> {
    let label = host.find_by_id(id).and_then(|element| host.label(element))?;

    let mut n = 1;
    let new_id = loop {
        let candidate = format!("{id}-copy{n}");
        if host.find_by_id(&candidate).is_none() {
            break candidate;
        }
        n += 1;
    };

    host.push_record(&new_id, &format!("{label}{COPY_LABEL_SUFFIX}"), true);
    Some(new_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::executor::block_on;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn host_with(records: &[Record]) -> MemoryHost {
        let host = MemoryHost::new();
        populate(&host, records);
        host
    }

    #[test]
    fn test_parse_records_defaults_selectable() {
        let records =
            parse_records(r#"[{"id": "a", "label": "A"}, {"id": "b", "label": "B", "selectable": false}]"#)
                .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].selectable);
        assert!(!records[1].selectable);
    }

    #[test]
    fn test_parse_records_rejects_garbage() {
        let err = parse_records("{\"id\": 1}").unwrap_err();
        assert!(matches!(err, SelectionError::Json(_)));
    }

    #[test]
    fn test_parse_records_rejects_duplicate_ids() {
        let err = parse_records(r#"[{"id": "x", "label": "A"}, {"id": "x", "label": "B"}]"#)
            .unwrap_err();
        assert!(matches!(err, SelectionError::InvalidInput(msg) if msg.contains("\"x\"")));
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"id": "r1", "label": "First"}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records, vec![Record::new("r1", "First")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SelectionError::IoError(_)));
    }

    #[test]
    fn test_saved_records_load_back() {
        let host = host_with(&[Record::new("a", "A")]);
        host.push_record("b", "B", false);
        host.push_element("header", [("class", "header")]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_records(&path, &collect_records(&host)).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], Record::new("a", "A"));
        assert!(!loaded[1].selectable);
    }

    #[test]
    fn test_populate_keeps_order() {
        let host = host_with(&[Record::new("a", "A"), Record::new("b", "B")]);
        let ids: Vec<_> = host
            .snapshot()
            .into_iter()
            .filter_map(|view| view.record_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_copy_creates_fresh_ids() {
        let host = host_with(&[Record::new("a", "Alpha")]);

        let first = apply(&host, RecordCommand::Copy(vec!["a".into()]));
        let second = apply(&host, RecordCommand::Copy(vec!["a".into()]));

        assert_eq!(
            first,
            Applied::Copied {
                sources: vec!["a".into()],
                created: vec!["a-copy1".into()]
            }
        );
        assert!(matches!(second, Applied::Copied { created, .. } if created == vec!["a-copy2"]));

        let copy = host.find_by_id("a-copy1").unwrap();
        assert_eq!(host.label(copy).unwrap(), "Alpha (コピー)");
        assert_eq!(host.len(), 3);
    }

    #[test]
    fn test_copy_skips_missing_records() {
        let host = host_with(&[Record::new("a", "Alpha")]);
        let applied = apply(&host, RecordCommand::Copy(vec!["zzz".into()]));
        assert!(matches!(applied, Applied::Copied { created, .. } if created.is_empty()));
    }

    #[test]
    fn test_delete_counts_removed() {
        let host = host_with(&[Record::new("a", "A"), Record::new("b", "B")]);
        let applied = apply(&host, RecordCommand::Delete(vec!["a".into(), "nope".into()]));
        assert_eq!(applied, Applied::Deleted { removed: 1 });
        assert!(host.find_by_id("a").is_none());
        assert!(host.find_by_id("b").is_some());
    }

    #[test]
    fn test_edit_reports_label() {
        let host = host_with(&[Record::new("a", "Alpha")]);
        let applied = apply(&host, RecordCommand::Edit("a".into()));
        assert_eq!(
            applied,
            Applied::EditRequested {
                id: "a".into(),
                label: Some("Alpha".into())
            }
        );
    }

    #[test]
    fn test_callbacks_forward_commands() {
        let (tx, mut rx) = command_channel();
        let callbacks = command_callbacks(&tx);

        block_on(callbacks.copy(vec!["a".into()]).unwrap()).unwrap();
        block_on(callbacks.edit("b".into()).unwrap()).unwrap();

        assert_eq!(block_on(rx.next()), Some(RecordCommand::Copy(vec!["a".into()])));
        assert_eq!(block_on(rx.next()), Some(RecordCommand::Edit("b".into())));
    }

    #[test]
    fn test_callbacks_fail_when_loop_is_gone() {
        let (tx, rx) = command_channel();
        let callbacks = command_callbacks(&tx);
        drop(rx);

        assert!(block_on(callbacks.delete(vec!["a".into()]).unwrap()).is_err());
    }
}
