//! Raw sheet records and their one-time normalization into [`Snapshot`].
//!
//! The upstream sheet is loosely typed: numbers arrive as strings, columns go missing, and
//! a few columns exist in two spellings. Every default is applied here, exactly once.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::model::{
    DEFAULT_RULE_CATEGORY, DEFAULT_UPDATE_MEMBER, Member, PointsDelta, Rule, Snapshot,
    UpdateEvent, format_number,
};
use crate::time_format::Timestamp;

#[derive(Debug, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub members: Option<Vec<RawMember>>,
    #[serde(default)]
    pub updates: Option<Vec<RawUpdate>>,
    #[serde(default)]
    pub rules: Option<Vec<RawRule>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMember {
    #[serde(rename = "Member")]
    pub member: Option<Value>,
    #[serde(rename = "member")]
    pub member_lower: Option<Value>,
    #[serde(rename = "Points")]
    pub points: Option<Value>,
    #[serde(rename = "Color")]
    pub color: Option<Value>,
    #[serde(rename = "color")]
    pub color_lower: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawUpdate {
    #[serde(rename = "Member")]
    pub member: Option<Value>,
    #[serde(rename = "Points")]
    pub points: Option<Value>,
    #[serde(rename = "Description")]
    pub description: Option<Value>,
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawRule {
    #[serde(rename = "Category")]
    pub category: Option<Value>,
    #[serde(rename = "Rule")]
    pub rule: Option<Value>,
    #[serde(rename = "Points")]
    pub points: Option<Value>,
}

/// Parse a response body into a normalized snapshot.
pub fn parse_snapshot(body: &str) -> Result<Snapshot, serde_json::Error> {
    let raw: RawSnapshot = serde_json::from_str(body)?;
    Ok(raw.into_snapshot())
}

impl RawSnapshot {
    /// Normalize every record. Members come out sorted by score, highest first, with
    /// equal scores keeping their sheet order.
    pub fn into_snapshot(self) -> Snapshot {
        let raw_members = self.members.unwrap_or_default();
        let raw_member_count = raw_members.len();
        let mut members: Vec<Member> = raw_members
            .into_iter()
            .filter_map(RawMember::into_member)
            .collect();
        if members.len() < raw_member_count {
            debug!(
                dropped = raw_member_count - members.len(),
                "dropped member rows without a name"
            );
        }
        members.sort_by(|a, b| b.score.total_cmp(&a.score));

        let updates = self
            .updates
            .unwrap_or_default()
            .into_iter()
            .map(RawUpdate::into_update)
            .collect();
        let rules = self
            .rules
            .unwrap_or_default()
            .into_iter()
            .map(RawRule::into_rule)
            .collect();

        Snapshot {
            members,
            updates,
            rules,
        }
    }
}

impl RawMember {
    fn into_member(self) -> Option<Member> {
        let name = truthy_text(self.member.as_ref())
            .or_else(|| truthy_text(self.member_lower.as_ref()))?
            .trim()
            .to_owned();
        if name.is_empty() {
            return None;
        }
        let color_key = truthy_text(self.color.as_ref())
            .or_else(|| truthy_text(self.color_lower.as_ref()))
            .map(|color| color.trim().to_lowercase())
            .unwrap_or_default();

        Some(Member {
            name,
            color_key,
            score: coerce_score(self.points.as_ref()),
        })
    }
}

impl RawUpdate {
    fn into_update(self) -> UpdateEvent {
        let member = truthy_text(self.member.as_ref())
            .unwrap_or_else(|| DEFAULT_UPDATE_MEMBER.to_owned())
            .trim()
            .to_owned();
        let points = match self.points {
            Some(Value::Number(number)) => PointsDelta::Amount(number.as_f64().unwrap_or(0.0)),
            Some(Value::Null) | None => PointsDelta::default(),
            Some(other) => PointsDelta::Text(verbatim_text(&other)),
        };
        let timestamp = match self.timestamp {
            Some(Value::Number(number)) => number
                .as_i64()
                .map(Timestamp::from_epoch_millis)
                .unwrap_or_else(|| Timestamp::parse(number.to_string())),
            Some(Value::String(raw)) => Timestamp::parse(raw),
            _ => Timestamp::default(),
        };

        UpdateEvent {
            member,
            points,
            description: truthy_text(self.description.as_ref()).unwrap_or_default(),
            timestamp,
        }
    }
}

impl RawRule {
    fn into_rule(self) -> Rule {
        Rule {
            category: truthy_text(self.category.as_ref())
                .unwrap_or_else(|| DEFAULT_RULE_CATEGORY.to_owned()),
            text: truthy_text(self.rule.as_ref()).unwrap_or_default(),
            points: self.points.as_ref().map(verbatim_text).unwrap_or_default(),
        }
    }
}

/// Text for a value that counts as "present": non-empty strings, non-zero numbers, `true`.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => number
            .as_f64()
            .filter(|value| *value != 0.0)
            .map(format_number),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Display text for any scalar, including zero and `false`. Null renders empty.
fn verbatim_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.as_f64().map(format_number).unwrap_or_default(),
        other => other.to_string(),
    }
}

fn coerce_score(value: Option<&Value>) -> f64 {
    let score = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                text.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    score
        .filter(|score| score.is_finite())
        .map(|score| if score == 0.0 { 0.0 } else { score })
        .unwrap_or(0.0)
}
