//! Caller-supplied handlers and identifier extraction

use crate::ui::ItemHost;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::fmt;
use std::future::Future;

/// Error returned by a caller-supplied handler.
///
/// The controller passes it through untouched.
pub type HandlerError = Box<dyn std::error::Error>;

/// Result of a caller-supplied handler
pub type HandlerResult = Result<(), HandlerError>;

type IdsHandler = Box<dyn Fn(Vec<String>) -> LocalBoxFuture<'static, HandlerResult>>;
type IdHandler = Box<dyn Fn(String) -> LocalBoxFuture<'static, HandlerResult>>;
type CancelHandler = Box<dyn Fn()>;

/// Optional handlers invoked by the controller.
///
/// Built once and handed to the controller; there is no way to swap a
/// handler afterwards.
///
/// # Examples
///
/// ```
/// use selection_ui::selection::SelectionCallbacks;
///
/// let callbacks = SelectionCallbacks::new()
///     .on_copy(|ids| async move {
///         println!("copy {ids:?}");
///         Ok(())
///     })
///     .on_cancel(|| println!("cancelled"));
/// assert!(callbacks.has_copy());
/// assert!(!callbacks.has_delete());
/// ```
#[derive(Default)]
pub struct SelectionCallbacks {
    on_copy: Option<IdsHandler>,
    on_delete: Option<IdsHandler>,
    on_edit: Option<IdHandler>,
    on_cancel: Option<CancelHandler>,
}

impl SelectionCallbacks {
    /// Create an empty handler set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler for the copy action
    #[must_use]
    pub fn on_copy<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Vec<String>) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        self.on_copy = Some(Box::new(move |ids| handler(ids).boxed_local()));
        self
    }

    /// Handler for the delete action, called only after confirmation
    #[must_use]
    pub fn on_delete<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Vec<String>) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        self.on_delete = Some(Box::new(move |ids| handler(ids).boxed_local()));
        self
    }

    /// Handler for edit requests (edit action and browsing-mode clicks)
    #[must_use]
    pub fn on_edit<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(String) -> Fut + 'static,
        Fut: Future<Output = HandlerResult> + 'static,
    {
        self.on_edit = Some(Box::new(move |id| handler(id).boxed_local()));
        self
    }

    /// Handler run whenever selection mode is exited
    #[must_use]
    pub fn on_cancel<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    /// Check if a copy handler is configured
    #[must_use]
    pub const fn has_copy(&self) -> bool {
        self.on_copy.is_some()
    }

    /// Check if a delete handler is configured
    #[must_use]
    pub const fn has_delete(&self) -> bool {
        self.on_delete.is_some()
    }

    /// Check if an edit handler is configured
    #[must_use]
    pub const fn has_edit(&self) -> bool {
        self.on_edit.is_some()
    }

    pub(crate) fn copy(&self, ids: Vec<String>) -> Option<LocalBoxFuture<'static, HandlerResult>> {
        self.on_copy.as_ref().map(|handler| handler(ids))
    }

    pub(crate) fn delete(&self, ids: Vec<String>) -> Option<LocalBoxFuture<'static, HandlerResult>> {
        self.on_delete.as_ref().map(|handler| handler(ids))
    }

    pub(crate) fn edit(&self, id: String) -> Option<LocalBoxFuture<'static, HandlerResult>> {
        self.on_edit.as_ref().map(|handler| handler(id))
    }

    pub(crate) fn cancel(&self) {
        if let Some(handler) = &self.on_cancel {
            handler();
        }
    }
}

impl fmt::Debug for SelectionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCallbacks")
            .field("on_copy", &self.on_copy.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_edit", &self.on_edit.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Attribute read by the default identifier extractor
pub const DEFAULT_ID_ATTRIBUTE: &str = "data-id";

/// Derives an item's identifier from its host representation
pub struct IdExtractor<H: ItemHost> {
    extract: Box<dyn Fn(&H, &H::Item) -> String>,
}

impl<H: ItemHost> IdExtractor<H> {
    /// Use a custom extraction function
    #[must_use]
    pub fn new<F>(extract: F) -> Self
    where
        F: Fn(&H, &H::Item) -> String + 'static,
    {
        Self {
            extract: Box::new(extract),
        }
    }

    /// Read the identifier from a host attribute.
    ///
    /// Items without the attribute yield an empty identifier.
    #[must_use]
    pub fn attribute(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |host: &H, item: &H::Item| host.attribute(item, &name).unwrap_or_default())
    }

    /// Identifier of `item`
    #[must_use]
    pub fn extract(&self, host: &H, item: &H::Item) -> String {
        (self.extract)(host, item)
    }
}

impl<H: ItemHost> Default for IdExtractor<H> {
    fn default() -> Self {
        Self::attribute(DEFAULT_ID_ATTRIBUTE)
    }
}

impl<H: ItemHost> fmt::Debug for IdExtractor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdExtractor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_missing_handlers_yield_none() {
        let callbacks = SelectionCallbacks::new();
        assert!(callbacks.copy(vec!["a".into()]).is_none());
        assert!(callbacks.delete(vec!["a".into()]).is_none());
        assert!(callbacks.edit("a".into()).is_none());
        callbacks.cancel();
    }

    #[test]
    fn test_handlers_receive_arguments() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callbacks = SelectionCallbacks::new().on_copy(move |ids| {
            let sink = Rc::clone(&sink);
            async move {
                sink.borrow_mut().extend(ids);
                Ok(())
            }
        });

        let future = callbacks.copy(vec!["x".into(), "y".into()]).unwrap();
        block_on(future).unwrap();
        assert_eq!(*seen.borrow(), vec!["x", "y"]);
    }

    #[test]
    fn test_debug_reports_configured_handlers() {
        let callbacks = SelectionCallbacks::new().on_cancel(|| {});
        let debug = format!("{callbacks:?}");
        assert!(debug.contains("on_cancel: true"));
        assert!(debug.contains("on_copy: false"));
    }
}
