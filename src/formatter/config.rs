//! Formatter configuration.
//!
//! Options arrive either through the typed builder methods or as an untyped
//! mapping (`header`, `footer`, `footer_url`, `pretext`). Mappings are parsed
//! once, when the configuration is built, so a malformed rule is reported at
//! registration time rather than on the first record.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Rule value selecting the message's error type name.
pub const EXCEPTION_CLASS_RULE: &str = "__exception_class__";
/// Rule value selecting the message's embedded error message.
pub const EXCEPTION_MESSAGE_RULE: &str = "__exception_msg__";

const KNOWN_OPTIONS: [&str; 4] = ["header", "footer", "footer_url", "pretext"];

/// Errors raised while building a [`FormatterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown formatter option: {0:?}")]
    UnknownOption(String),
    #[error("invalid {option} rule: {value:?}")]
    InvalidRule { option: &'static str, value: String },
    #[error("formatter option {0:?} must be a string")]
    InvalidType(&'static str),
    #[error("invalid formatter configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `[[text]]` yields `text`.
fn literal(rule: &str) -> Option<&str> {
    rule.strip_prefix("[[")?.strip_suffix("]]")
}

/// How the message header is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HeaderRule {
    /// The error's type name. Plain-text messages have none, so no header.
    ExceptionClass,
    /// The error's message field, falling back to its string form.
    ExceptionMessage,
    /// Fixed text.
    Literal(String),
    /// A record attribute looked up by name.
    Attribute(String),
    /// The record's message rendered as text.
    #[default]
    RawMessage,
}

impl HeaderRule {
    /// Parse the rule grammar; any other string names a record attribute.
    pub fn parse(rule: &str) -> Self {
        match rule {
            EXCEPTION_CLASS_RULE => Self::ExceptionClass,
            EXCEPTION_MESSAGE_RULE => Self::ExceptionMessage,
            other => match literal(other) {
                Some(text) => Self::Literal(text.to_owned()),
                None => Self::Attribute(other.to_owned()),
            },
        }
    }
}

/// How the footer text is derived. Footers have no attribute lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FooterRule {
    /// The error's type name; absent for plain-text messages.
    ExceptionClass,
    ExceptionMessage,
    Literal(String),
}

impl FromStr for FooterRule {
    type Err = ConfigError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        match rule {
            EXCEPTION_CLASS_RULE => Ok(Self::ExceptionClass),
            EXCEPTION_MESSAGE_RULE => Ok(Self::ExceptionMessage),
            other => literal(other)
                .map(|text| Self::Literal(text.to_owned()))
                .ok_or_else(|| ConfigError::InvalidRule {
                    option: "footer",
                    value: other.to_owned(),
                }),
        }
    }
}

/// How the attachment pretext is derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PretextRule {
    /// The record's level name.
    #[default]
    LevelName,
    /// No pretext.
    Suppressed,
    /// A record attribute looked up by name.
    Attribute(String),
}

/// Immutable formatter settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct FormatterConfig {
    header: HeaderRule,
    footer: Option<FooterRule>,
    footer_url: Option<String>,
    pretext: PretextRule,
}

impl FormatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, rule: HeaderRule) -> Self {
        self.header = rule;
        self
    }

    pub fn with_footer(mut self, rule: FooterRule) -> Self {
        self.footer = Some(rule);
        self
    }

    /// Footer icon URL; only used when a footer rule is also configured.
    pub fn with_footer_url(mut self, url: impl Into<String>) -> Self {
        self.footer_url = Some(url.into());
        self
    }

    pub fn with_pretext(mut self, rule: PretextRule) -> Self {
        self.pretext = rule;
        self
    }

    pub fn header(&self) -> &HeaderRule {
        &self.header
    }

    pub fn footer(&self) -> Option<&FooterRule> {
        self.footer.as_ref()
    }

    pub fn pretext(&self) -> &PretextRule {
        &self.pretext
    }

    /// The icon override, present only when both footer and URL are set.
    pub fn footer_icon_url(&self) -> Option<&str> {
        self.footer.as_ref().and(self.footer_url.as_deref())
    }

    /// Parse an untyped option mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown option names, non-string rule
    /// values (other than `null`, or a falsy `pretext`) and footer rules
    /// outside the sentinel/literal grammar.
    pub fn from_mapping(options: &Map<String, Value>) -> Result<Self, ConfigError> {
        if let Some(unknown) = options.keys().find(|k| !KNOWN_OPTIONS.contains(&k.as_str())) {
            return Err(ConfigError::UnknownOption(unknown.clone()));
        }

        let header = optional_str(options, "header")?
            .map_or_else(HeaderRule::default, HeaderRule::parse);
        let footer = optional_str(options, "footer")?
            .map(str::parse::<FooterRule>)
            .transpose()?;
        let footer_url = optional_str(options, "footer_url")?.map(str::to_owned);
        let pretext = match options.get("pretext") {
            None => PretextRule::LevelName,
            Some(value) if !is_truthy(value) => PretextRule::Suppressed,
            Some(Value::String(name)) => PretextRule::Attribute(name.clone()),
            Some(_) => return Err(ConfigError::InvalidType("pretext")),
        };

        Ok(Self {
            header,
            footer,
            footer_url,
            pretext,
        })
    }

    /// Parse a JSON object of options.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Map<String, Value> = serde_json::from_str(json)?;
        Self::from_mapping(&options)
    }
}

impl TryFrom<Map<String, Value>> for FormatterConfig {
    type Error = ConfigError;

    fn try_from(options: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_mapping(&options)
    }
}

fn optional_str<'a>(
    options: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>, ConfigError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ConfigError::InvalidType(key)),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
