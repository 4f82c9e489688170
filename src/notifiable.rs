//! Capability interface for exception-like message objects.
//!
//! Any error type can travel through the logging pipeline as a record
//! message by implementing [`Notifiable`]. Every capability has a default,
//! so a bare `impl Notifiable for MyError {}` is enough; richer errors
//! override the hooks they care about and the formatter falls back to the
//! error's `Display` output for the rest.

use std::any::{self, TypeId};
use std::error::Error;
use std::sync::Arc;

/// Error type that can be rendered as a notification.
pub trait Notifiable: Error + Send + Sync + 'static {
    /// Short type name, e.g. `"ValueError"` for `my_app::errors::ValueError`.
    fn class_name(&self) -> &'static str {
        short_type_name(any::type_name::<Self>())
    }

    /// Message stored separately from the `Display` form, if any.
    fn message_field(&self) -> Option<String> {
        None
    }

    /// Markdown text to use instead of the `Display` form.
    fn notify_text(&self) -> Option<String> {
        None
    }

    /// Pretext to show above the attachment.
    fn notify_pretext(&self) -> Option<String> {
        None
    }

    /// Severity override used to colour the attachment.
    fn notify_level(&self) -> Option<u32> {
        None
    }

    /// Sub-payloads rendered as one attachment each.
    ///
    /// `None` means the capability is absent; `Some(vec![])` expands to zero
    /// attachments.
    fn attachment_payloads(&self) -> Option<Vec<Arc<dyn Notifiable>>> {
        None
    }

    /// Identity of the concrete type, used by type-based filters.
    fn type_key(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Strip module path and generic arguments from a type name.
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// `"<ClassName>: <message>"`, the form attachment text takes for errors.
pub fn describe(err: &dyn Notifiable) -> String {
    format!("{}: {}", err.class_name(), err)
}
