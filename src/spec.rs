//! Device specification strings
//!
//! A specification is a `:`-separated list such as
//! `/dev/input/event3:xoffset=10:accel=0.4`. Tokens starting with `/dev/`
//! name device nodes; everything else is an argument.

const DEVICE_PREFIX: &str = "/dev/";

/// Result of splitting a specification string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSpecification {
    /// The specification with device nodes removed
    pub spec: String,
    /// Explicitly named device nodes, in order
    pub devices: Vec<String>,
    /// Every token, device nodes included
    pub args: Vec<String>,
}

pub fn parse_specification(specification: &str) -> ParsedSpecification {
    let args: Vec<String> = specification
        .split(':')
        .filter(|arg| !arg.is_empty())
        .map(String::from)
        .collect();

    let (devices, rest): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|arg| arg.starts_with(DEVICE_PREFIX));

    ParsedSpecification {
        spec: rest
            .iter()
            .map(|arg| arg.as_str())
            .collect::<Vec<_>>()
            .join(":"),
        devices: devices.into_iter().cloned().collect(),
        args,
    }
}

/// Pick the environment override when it is set and non-empty
///
/// Whitespace is significant: a blank override still replaces the default.
pub fn resolve_specification(override_value: Option<String>, default: &str) -> String {
    match override_value {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
