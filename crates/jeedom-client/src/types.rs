//! Request types for the Jeedom HTTP API

use std::fmt;
use std::str::FromStr;

/// Path of the control endpoint, relative to the server root
pub const API_PATH: &str = "/core/api/jeeApi.php";

/// Value of the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    Scenario,
    Cmd,
    Message,
    Object,
    EqLogic,
    Command,
    FullData,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Cmd => "cmd",
            Self::Message => "message",
            Self::Object => "object",
            Self::EqLogic => "eqLogic",
            Self::Command => "command",
            Self::FullData => "fullData",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action applied to a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioAction {
    /// Run the scenario (accepts tags)
    Start,
    /// Stop a running scenario
    Stop,
    /// Enable the scenario
    Activate,
    /// Disable the scenario
    Deactivate,
}

impl ScenarioAction {
    /// Wire value expected by the server
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Activate => "activer",
            Self::Deactivate => "désactiver",
        }
    }
}

impl fmt::Display for ScenarioAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown scenario action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario action '{0}' (expected start, stop, activate or deactivate)")]
pub struct ParseScenarioActionError(pub String);

impl FromStr for ScenarioAction {
    type Err = ParseScenarioActionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "activate" | "enable" | "activer" => Ok(Self::Activate),
            "deactivate" | "disable" | "désactiver" | "desactiver" => Ok(Self::Deactivate),
            _ => Err(ParseScenarioActionError(s.to_string())),
        }
    }
}

/// Build the query string pairs for a request.
///
/// The fixed `apikey` and `type` pair comes first. Caller parameters are
/// merged over it: a caller key equal to a fixed key replaces that value in
/// place, any other key is appended.
pub fn build_query(
    api_key: Option<&str>,
    kind: &str,
    params: &[(&str, String)],
) -> Vec<(String, String)> {
    let mut query = vec![
        ("apikey".to_string(), api_key.unwrap_or_default().to_string()),
        ("type".to_string(), kind.to_string()),
    ];

    for (key, value) in params {
        match query.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.clone(),
            None => query.push((key.to_string(), value.clone())),
        }
    }

    query
}
