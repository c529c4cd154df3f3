use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One poll cycle's worth of deployment status as served by `GET /api/status`.
///
/// The server stores its status in a loosely typed map, so every field is
/// decoded leniently: missing, `null` and unexpected shapes degrade to "absent"
/// instead of failing the whole snapshot. The body itself must be a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct StatusSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansible_stage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub htcondor_status: Option<String>,

    /// Seeded by the server as `clusterStatus`; pages read `htcondorStatus`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_status: Option<String>,

    pub alerts: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

/// Field-level decoding of the status object.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSnapshot {
    #[serde(default, deserialize_with = "lenient_label")]
    ansible_stage: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    htcondor_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    cluster_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_alerts")]
    alerts: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    last_update: Option<DateTime<Utc>>,
}

impl TryFrom<Map<String, Value>> for StatusSnapshot {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let wire: WireSnapshot = serde_json::from_value(Value::Object(map))?;
        Ok(Self {
            ansible_stage: wire.ansible_stage,
            htcondor_status: wire.htcondor_status,
            cluster_status: wire.cluster_status,
            alerts: wire.alerts,
            last_update: wire.last_update,
        })
    }
}

impl StatusSnapshot {
    /// Current pipeline phase, `None` when absent or empty.
    pub fn stage(&self) -> Option<&str> {
        non_empty(self.ansible_stage.as_deref())
    }

    /// Cluster health label. `htcondorStatus` wins over `clusterStatus`.
    pub fn cluster_status(&self) -> Option<&str> {
        non_empty(self.htcondor_status.as_deref()).or(non_empty(self.cluster_status.as_deref()))
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// Renders a JSON scalar or structure as display text.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Status labels: `false` and zero read as "not set", like any falsy value in
/// the page scripts.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let falsy = match &value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    };
    if falsy {
        return Ok(None);
    }
    Ok(value_text(value))
}

fn lenient_alerts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let alerts = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
        Value::Null => Vec::new(),
        other => value_text(other).into_iter().collect(),
    };
    Ok(alerts)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_timestamp(&Value::deserialize(deserializer)?))
}

/// Accepts epoch milliseconds (number or digit string) and RFC 3339 strings.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(ms) = s.parse::<i64>() {
                return DateTime::from_timestamp_millis(ms);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}
