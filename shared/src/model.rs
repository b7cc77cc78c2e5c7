use serde::{Deserialize, Serialize};

use crate::time_format::Timestamp;

pub const DEFAULT_RULE_CATEGORY: &str = "General";
pub const DEFAULT_UPDATE_MEMBER: &str = "Member";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Trimmed and lowercased; empty when the sheet leaves it blank.
    pub color_key: String,
    pub score: f64,
}

/// Signed point change as the sheet provides it: either a bare number or text such as `"+5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointsDelta {
    Amount(f64),
    Text(String),
}

impl Default for PointsDelta {
    fn default() -> Self {
        Self::Amount(0.0)
    }
}

impl PointsDelta {
    /// Display text with an explicit sign. Values already starting with `+` or `-` pass through.
    pub fn display(&self) -> String {
        let text = match self {
            Self::Amount(value) => format_number(*value),
            Self::Text(text) => text.clone(),
        };
        if text.starts_with('+') || text.starts_with('-') {
            text
        } else {
            format!("+{text}")
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
        .filter(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub member: String,
    pub points: PointsDelta,
    pub description: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub category: String,
    pub text: String,
    /// Shown verbatim; the sheet may hold ranges like `"5-10"`.
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub updates: Vec<UpdateEvent>,
    pub rules: Vec<Rule>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.updates.is_empty() && self.rules.is_empty()
    }
}

/// Shortest decimal form: `5.0` renders as `5`, `2.5` as `2.5`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Folds -0.0 into "0".
        return "0".to_owned();
    }
    value.to_string()
}

/// Unit label for a point count: singular only for a magnitude of exactly one.
pub fn points_label(value: f64) -> &'static str {
    if value.abs() == 1.0 { "point" } else { "points" }
}

#[cfg(test)]
mod tests {
    use super::{PointsDelta, format_number, points_label};

    #[test]
    fn bare_positive_amount_gains_plus_sign() {
        assert_eq!(PointsDelta::Amount(5.0).display(), "+5");
        assert_eq!(PointsDelta::Amount(0.0).display(), "+0");
    }

    #[test]
    fn negative_amount_keeps_its_sign() {
        assert_eq!(PointsDelta::Amount(-3.0).display(), "-3");
    }

    #[test]
    fn prefixed_text_is_not_prefixed_twice() {
        assert_eq!(PointsDelta::Text("+5".into()).display(), "+5");
        assert_eq!(PointsDelta::Text("-2".into()).display(), "-2");
        assert_eq!(PointsDelta::Text("7".into()).display(), "+7");
    }

    #[test]
    fn text_delta_value_parses_signed_numbers() {
        assert_eq!(PointsDelta::Text("+5".into()).value(), Some(5.0));
        assert_eq!(PointsDelta::Text(" -1 ".into()).value(), Some(-1.0));
        assert_eq!(PointsDelta::Text("lots".into()).value(), None);
    }

    #[test]
    fn format_number_uses_shortest_form() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn points_label_is_singular_only_for_one() {
        assert_eq!(points_label(1.0), "point");
        assert_eq!(points_label(-1.0), "point");
        assert_eq!(points_label(0.0), "points");
        assert_eq!(points_label(12.0), "points");
    }
}
