//! User-facing text templates
//!
//! Templates use `{n}` for a count and `{id}` for an identifier.

use serde::{Deserialize, Serialize};

/// Text shown by the controller and its hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Selection counter, e.g. `3件選択`
    #[serde(rename = "count", default = "default_count")]
    pub count_template: String,

    /// Delete confirmation prompt
    #[serde(rename = "delete_confirm", default = "default_delete_confirm")]
    pub delete_confirm_template: String,

    /// Toast after a copy request was handled
    #[serde(rename = "copied", default = "default_copied")]
    pub copied_template: String,

    /// Toast after a delete request was handled
    #[serde(rename = "deleted", default = "default_deleted")]
    pub deleted_template: String,

    /// Toast after an edit request was handled
    #[serde(rename = "edit", default = "default_edit")]
    pub edit_template: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            count_template: default_count(),
            delete_confirm_template: default_delete_confirm(),
            copied_template: default_copied(),
            deleted_template: default_deleted(),
            edit_template: default_edit(),
        }
    }
}

fn default_count() -> String {
    "{n}件選択".to_string()
}

fn default_delete_confirm() -> String {
    "選択した{n}件のデータを削除しますか？".to_string()
}

fn default_copied() -> String {
    "{n}件のデータをコピーしました".to_string()
}

fn default_deleted() -> String {
    "{n}件のデータを削除しました".to_string()
}

fn default_edit() -> String {
    "編集: {id}".to_string()
}

fn fill_count(template: &str, n: usize) -> String {
    template.replace("{n}", &n.to_string())
}

impl Labels {
    /// Selection counter text for `n` selected items
    #[must_use]
    pub fn count(&self, n: usize) -> String {
        fill_count(&self.count_template, n)
    }

    /// Delete confirmation message for `n` selected items
    #[must_use]
    pub fn delete_confirm(&self, n: usize) -> String {
        fill_count(&self.delete_confirm_template, n)
    }

    /// Copy result message
    #[must_use]
    pub fn copied(&self, n: usize) -> String {
        fill_count(&self.copied_template, n)
    }

    /// Delete result message
    #[must_use]
    pub fn deleted(&self, n: usize) -> String {
        fill_count(&self.deleted_template, n)
    }

    /// Edit request message
    #[must_use]
    pub fn edit(&self, id: &str) -> String {
        self.edit_template.replace("{id}", id)
    }
}
