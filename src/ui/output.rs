//! Toast notifications
//!
//! Hosts report action results through [`OutputWriter`]. The CLI prints
//! them; the terminal host keeps them in a [`ToastQueue`] and draws the
//! ones that have not expired yet.

use colored::Colorize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default toast lifetime
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Most toasts kept before old ones are dropped
const MAX_TOASTS: usize = 20;

/// Trait for notification output
///
/// # Examples
///
/// ```
/// use selection_ui::ui::{OutputWriter, ToastQueue};
///
/// let toasts = ToastQueue::new();
/// toasts.success("2件のデータをコピーしました");
/// assert_eq!(toasts.active().len(), 1);
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message
    fn info(&self, message: &str);

    /// Drop pending messages
    fn clear(&self);
}

/// CLI implementation - writes to stdout/stderr
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn clear(&self) {}
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity
    pub level: MessageLevel,
    /// Text
    pub message: String,
}

/// Expiring toast buffer for the terminal host.
///
/// Clones share the same buffer, so action handlers can push toasts that
/// the render loop picks up.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<(Toast, Instant)>>>,
    duration: Duration,
}

impl ToastQueue {
    /// Queue with the default 5 second lifetime
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_TOAST_DURATION)
    }

    /// Queue with a custom lifetime
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Toast, Instant)>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Toasts that have not expired, oldest first
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|(_, shown)| now.duration_since(*shown) < self.duration)
            .map(|(toast, _)| toast.clone())
            .collect()
    }

    /// The newest toast that has not expired
    #[must_use]
    pub fn latest(&self) -> Option<Toast> {
        let now = Instant::now();
        self.lock()
            .iter()
            .rev()
            .find(|(_, shown)| now.duration_since(*shown) < self.duration)
            .map(|(toast, _)| toast.clone())
    }

    /// Drop expired toasts
    pub fn prune(&self) {
        let now = Instant::now();
        let duration = self.duration;
        self.lock()
            .retain(|(_, shown)| now.duration_since(*shown) < duration);
    }

    fn push(&self, level: MessageLevel, message: &str) {
        let mut toasts = self.lock();
        toasts.push((
            Toast {
                level,
                message: message.to_string(),
            },
            Instant::now(),
        ));

        if toasts.len() > MAX_TOASTS {
            let excess = toasts.len() - MAX_TOASTS;
            toasts.drain(0..excess);
        }
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for ToastQueue {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
