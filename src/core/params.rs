//! Parameter type schema for console commands.
//!
//! Commands declare their signature with a compact format string such as
//! `"$s $i $f $b"`. The string is parsed once at registration into a list of
//! [`ParamType`]s, which the validator then checks arguments against.

use std::fmt;

/// Declared type of a single command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamType {
    /// Any text (`$s`). Always accepted.
    #[default]
    String,
    /// Signed 32-bit integer (`$i`).
    Int,
    /// Decimal number (`$f`).
    Float,
    /// `true` or `false`, case-insensitive (`$b`).
    Bool,
}

impl ParamType {
    /// Parse a single format tag.
    ///
    /// Tags are case-insensitive. Anything unrecognized is treated as `$s`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "$i" => ParamType::Int,
            "$f" => ParamType::Float,
            "$b" => ParamType::Bool,
            _ => ParamType::String,
        }
    }

    /// The format tag for this type.
    pub fn tag(&self) -> &'static str {
        match self {
            ParamType::String => "$s",
            ParamType::Int => "$i",
            ParamType::Float => "$f",
            ParamType::Bool => "$b",
        }
    }

    /// Human readable type name.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
        }
    }

    /// Check whether `value` parses as this type.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ParamType::String => true,
            ParamType::Int => value.parse::<i32>().is_ok(),
            ParamType::Float => value.parse::<f32>().is_ok(),
            ParamType::Bool => {
                value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
            }
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a parameter format string into a list of types.
///
/// # Examples
///
/// ```
/// use bevy_command_console::core::{parse_format, ParamType};
///
/// assert_eq!(
///     parse_format("$s $I $f"),
///     vec![ParamType::String, ParamType::Int, ParamType::Float],
/// );
/// assert!(parse_format("").is_empty());
/// ```
pub fn parse_format(format: &str) -> Vec<ParamType> {
    format.split_whitespace().map(ParamType::from_tag).collect()
}

/// Render a parameter list back into its format string.
pub fn format_signature(params: &[ParamType]) -> String {
    params
        .iter()
        .map(ParamType::tag)
        .collect::<Vec<_>>()
        .join(" ")
}
