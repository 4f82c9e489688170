//! Error types standing in for application exceptions.

use std::fmt;
use std::sync::Arc;

use crate::notifiable::Notifiable;

macro_rules! plain_error {
    ($name:ident) => {
        #[derive(Debug)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(message: &str) -> Self {
                Self(message.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::error::Error for $name {}
        impl Notifiable for $name {}
    };
}

plain_error!(Exception);
plain_error!(ValueError);
plain_error!(KeyError);
plain_error!(TypeError);

/// Error whose `Display` differs from its message field.
#[derive(Debug)]
pub struct DetailedError {
    pub msg: String,
}

impl fmt::Display for DetailedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DetailedError({})", self.msg)
    }
}

impl std::error::Error for DetailedError {}

impl Notifiable for DetailedError {
    fn message_field(&self) -> Option<String> {
        Some(self.msg.clone())
    }
}

/// Error exposing every optional capability.
#[derive(Debug)]
pub struct ExtendedError {
    pub msg: String,
    pub level: u32,
    pub children: Option<Vec<Arc<dyn Notifiable>>>,
}

impl ExtendedError {
    pub fn new(msg: &str, level: u32) -> Self {
        Self {
            msg: msg.to_owned(),
            level,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Arc<dyn Notifiable>>) -> Self {
        self.children = Some(children);
        self
    }
}

impl fmt::Display for ExtendedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for ExtendedError {}

impl Notifiable for ExtendedError {
    fn message_field(&self) -> Option<String> {
        Some(self.msg.clone())
    }

    fn notify_text(&self) -> Option<String> {
        Some("Some error message".to_owned())
    }

    fn notify_pretext(&self) -> Option<String> {
        Some("Some pretext".to_owned())
    }

    fn notify_level(&self) -> Option<u32> {
        Some(self.level)
    }

    fn attachment_payloads(&self) -> Option<Vec<Arc<dyn Notifiable>>> {
        self.children.clone()
    }
}
