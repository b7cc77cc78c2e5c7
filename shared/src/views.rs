use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Member, Rule, Snapshot, UpdateEvent, format_number, points_label};
use crate::rank::{RankTable, is_podium};
use crate::theme::{ColorLookup, ColorTheme, Podium, resolve_theme};
use crate::time_format::time_ago;

const FALLBACK_INITIAL: &str = "P";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medal {
    pub emoji: &'static str,
    pub label: &'static str,
    pub title: &'static str,
}

impl From<Podium> for Medal {
    fn from(podium: Podium) -> Self {
        Self {
            emoji: podium.emoji(),
            label: podium.label(),
            title: podium.title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCard {
    pub name: String,
    pub initial: String,
    pub score: f64,
    pub score_display: String,
    pub points_label: &'static str,
    pub rank: u32,
    pub podium: bool,
    pub medal: Option<Medal>,
    pub theme: ColorTheme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateCard {
    pub member: String,
    pub points_display: String,
    pub points_label: &'static str,
    pub description: String,
    pub timestamp: String,
    pub relative_time: String,
    pub theme: ColorTheme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCard {
    pub text: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleGroup {
    pub category: String,
    pub rules: Vec<RuleCard>,
}

/// Members in snapshot order, annotated with rank, medal and theme.
pub fn project_members(members: &[Member]) -> Vec<MemberCard> {
    let ranks = RankTable::from_members(members);
    members
        .iter()
        .map(|member| {
            let rank = ranks.rank_of(member.score);
            let podium = Podium::from_rank(rank);
            MemberCard {
                name: member.name.clone(),
                initial: avatar_initial(&member.name),
                score: member.score,
                score_display: format_number(member.score),
                points_label: points_label(member.score),
                rank,
                podium: is_podium(rank),
                medal: podium.map(Medal::from),
                theme: *resolve_theme(rank, &member.color_key),
            }
        })
        .collect()
}

/// Updates, most recent first. Unparsable timestamps order as the epoch and equal
/// timestamps keep their snapshot order.
pub fn order_updates(updates: &[UpdateEvent]) -> Vec<&UpdateEvent> {
    let mut ordered: Vec<&UpdateEvent> = updates.iter().collect();
    ordered.sort_by_key(|update| std::cmp::Reverse(update.timestamp.sort_key()));
    ordered
}

pub fn project_updates(
    updates: &[UpdateEvent],
    colors: &ColorLookup,
    now: DateTime<Utc>,
) -> Vec<UpdateCard> {
    order_updates(updates)
        .into_iter()
        .map(|update| UpdateCard {
            member: update.member.clone(),
            points_display: update.points.display(),
            points_label: update
                .points
                .value()
                .map(|value| points_label(value.trunc()))
                .unwrap_or("points"),
            description: update.description.clone(),
            timestamp: update.timestamp.raw.clone(),
            relative_time: time_ago(&update.timestamp, now),
            theme: *colors.theme_for(&update.member),
        })
        .collect()
}

/// Rules grouped by category. Groups appear in the order their category first shows up.
pub fn project_rules(rules: &[Rule]) -> Vec<RuleGroup> {
    let mut groups: Vec<RuleGroup> = Vec::new();
    for rule in rules {
        let card = RuleCard {
            text: rule.text.clone(),
            points: rule.points.clone(),
        };
        match groups.iter_mut().find(|group| group.category == rule.category) {
            Some(group) => group.rules.push(card),
            None => groups.push(RuleGroup {
                category: rule.category.clone(),
                rules: vec![card],
            }),
        }
    }
    groups
}

/// All three views for one snapshot at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub members: Vec<MemberCard>,
    pub updates: Vec<UpdateCard>,
    pub rules: Vec<RuleGroup>,
}

impl Dashboard {
    pub fn project(snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        let colors = ColorLookup::from_members(&snapshot.members);
        Self {
            members: project_members(&snapshot.members),
            updates: project_updates(&snapshot.updates, &colors, now),
            rules: project_rules(&snapshot.rules),
        }
    }
}

fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|first| first.to_uppercase().collect::<String>())
        .unwrap_or_else(|| FALLBACK_INITIAL.to_owned())
}
