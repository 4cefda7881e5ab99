use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{is_voided_verb, DISPLAY_LANGUAGE};

/// Language tag to label mapping, e.g. `{"en-US": "completed"}`.
pub type LanguageMap = BTreeMap<String, String>;

/// Account-style identity of an agent: a name scoped by a home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAccount {
    pub home_page: String,
    pub name: String,
}

fn agent_object_type() -> String {
    "Agent".to_string()
}

/// The actor of a statement.
///
/// Agents built by the connector always carry an account. Agents read back
/// from the store may use any inverse functional identifier, so the
/// remaining properties are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(rename = "objectType", default = "agent_object_type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AgentAccount>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Agent {
    /// Creates an agent identified by an account on `home_page`.
    pub fn with_account(home_page: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_type: agent_object_type(),
            name: None,
            account: Some(AgentAccount {
                home_page: home_page.into(),
                name: name.into(),
            }),
            extra: Map::new(),
        }
    }

    /// Returns the account name, if the agent is identified by an account.
    pub fn account_name(&self) -> Option<&str> {
        self.account.as_ref().map(|account| account.name.as_str())
    }
}

/// A verb: canonical URI plus human-readable display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub display: LanguageMap,
}

impl Verb {
    /// Creates a verb with a single `en-US` display label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut display = LanguageMap::new();
        display.insert(DISPLAY_LANGUAGE.to_string(), label.into());
        Self {
            id: id.into(),
            display,
        }
    }

    /// Returns the `en-US` display label, if present.
    pub fn label(&self) -> Option<&str> {
        self.display.get(DISPLAY_LANGUAGE).map(String::as_str)
    }
}

/// An activity object, identified by its IRI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Value>,
}

impl Activity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            definition: None,
        }
    }
}

/// Reference to a previously stored statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRef {
    pub id: Uuid,
}

/// Object of a statement.
///
/// Activities and statement references are modelled; agents, groups and
/// sub-statements pass through untouched as `Other`. A missing `objectType`
/// means `Activity`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementObject {
    Activity(Activity),
    StatementRef(StatementRef),
    Other(Value),
}

#[derive(Serialize)]
#[serde(tag = "objectType")]
enum TaggedObject<'a> {
    Activity(&'a Activity),
    StatementRef(&'a StatementRef),
}

impl Serialize for StatementObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Activity(activity) => TaggedObject::Activity(activity).serialize(serializer),
            Self::StatementRef(reference) => {
                TaggedObject::StatementRef(reference).serialize(serializer)
            }
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StatementObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let object_type = value
            .get("objectType")
            .and_then(Value::as_str)
            .unwrap_or("Activity")
            .to_string();

        match object_type.as_str() {
            "Activity" => serde_json::from_value(value)
                .map(Self::Activity)
                .map_err(serde::de::Error::custom),
            "StatementRef" => serde_json::from_value(value)
                .map(Self::StatementRef)
                .map_err(serde::de::Error::custom),
            _ => Ok(Self::Other(value)),
        }
    }
}

/// An ISO 8601 timestamp that serializes back to the exact text it was
/// parsed from, keeping the original UTC offset and fractional digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parses an RFC 3339 timestamp.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    /// The timestamp text as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant: instant.fixed_offset(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// An xAPI statement.
///
/// `id`, `timestamp` and `stored` are assigned by the store; statements
/// built locally leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub actor: Agent,
    pub verb: Verb,
    pub object: StatementObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Statement {
    pub fn new(actor: Agent, verb: Verb, object: StatementObject) -> Self {
        Self {
            id: None,
            actor,
            verb,
            object,
            timestamp: None,
            stored: None,
            extra: Map::new(),
        }
    }

    /// Returns `true` if this statement's verb is a voiding verb.
    pub fn is_voiding(&self) -> bool {
        is_voided_verb(&self.verb.id)
    }

    /// Returns the referenced statement id if the object is a statement reference.
    pub fn referenced_statement(&self) -> Option<Uuid> {
        match &self.object {
            StatementObject::StatementRef(reference) => Some(reference.id),
            _ => None,
        }
    }

    /// Returns the activity id if the object is an activity.
    pub fn activity_id(&self) -> Option<&str> {
        match &self.object {
            StatementObject::Activity(activity) => Some(activity.id.as_str()),
            _ => None,
        }
    }
}
