use std::collections::HashMap;

use serde::Serialize;

use crate::model::Member;

/// Style tokens applied to one member's card, avatar, name pill and badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorTheme {
    pub card: &'static str,
    pub avatar: &'static str,
    pub member_pill: &'static str,
    pub badge: &'static str,
}

macro_rules! palette_theme {
    ($hue:literal) => {
        ColorTheme {
            card: concat!(
                "bg-gradient-to-br from-", $hue, "-50/70 via-", $hue, "-50/60 to-white/30"
            ),
            avatar: concat!("bg-", $hue, "-900/90 text-", $hue, "-100"),
            member_pill: concat!("bg-", $hue, "-200/60 border-", $hue, "-900/10 text-stone-900"),
            badge: concat!("bg-", $hue, "-900 text-", $hue, "-100"),
        }
    };
}

const BLUE: ColorTheme = palette_theme!("blue");
const YELLOW: ColorTheme = palette_theme!("amber");
const RED: ColorTheme = palette_theme!("rose");
const PINK: ColorTheme = palette_theme!("pink");
const GREEN: ColorTheme = palette_theme!("green");
const PURPLE: ColorTheme = palette_theme!("purple");
const ORANGE: ColorTheme = palette_theme!("orange");
const TEAL: ColorTheme = palette_theme!("teal");
const GRAY: ColorTheme = palette_theme!("gray");

const NEUTRAL: ColorTheme = ColorTheme {
    card: "bg-gradient-to-br from-stone-50/70 via-stone-50/60 to-white/30",
    avatar: "bg-stone-900/90 text-amber-100",
    member_pill: "bg-amber-200/60 border-amber-900/10 text-stone-900",
    badge: "bg-stone-900 text-amber-100",
};

const GOLD: ColorTheme = ColorTheme {
    card: "bg-gradient-to-br from-amber-50/80 via-yellow-50/70 to-white/40",
    avatar: "bg-amber-500 text-amber-50",
    member_pill: "bg-amber-200/70 border-amber-900/10 text-stone-900",
    badge: "bg-amber-600 text-amber-50",
};

const SILVER: ColorTheme = ColorTheme {
    card: "bg-gradient-to-br from-zinc-50/80 via-gray-50/70 to-white/40",
    avatar: "bg-zinc-500 text-zinc-50",
    member_pill: "bg-zinc-200/70 border-zinc-900/10 text-stone-900",
    badge: "bg-zinc-600 text-zinc-50",
};

const BRONZE: ColorTheme = ColorTheme {
    card: "bg-gradient-to-br from-orange-50/80 via-amber-50/70 to-white/40",
    avatar: "bg-orange-600 text-orange-50",
    member_pill: "bg-orange-200/70 border-orange-900/10 text-stone-900",
    badge: "bg-orange-700 text-orange-50",
};

/// Named colors a member may declare in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Blue,
    Yellow,
    Red,
    Pink,
    Green,
    Purple,
    Orange,
    Teal,
    Gray,
    Default,
}

impl ColorCategory {
    /// Case-insensitive lookup; unknown or empty keys map to `Default`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "blue" => Self::Blue,
            "yellow" => Self::Yellow,
            "red" => Self::Red,
            "pink" => Self::Pink,
            "green" => Self::Green,
            "purple" => Self::Purple,
            "orange" => Self::Orange,
            "teal" => Self::Teal,
            "gray" => Self::Gray,
            _ => Self::Default,
        }
    }

    pub fn theme(self) -> &'static ColorTheme {
        match self {
            Self::Blue => &BLUE,
            Self::Yellow => &YELLOW,
            Self::Red => &RED,
            Self::Pink => &PINK,
            Self::Green => &GREEN,
            Self::Purple => &PURPLE,
            Self::Orange => &ORANGE,
            Self::Teal => &TEAL,
            Self::Gray => &GRAY,
            Self::Default => &NEUTRAL,
        }
    }
}

/// Medal position for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    pub fn from_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }

    /// Short title, e.g. for a tooltip.
    pub fn title(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }

    /// Accessible label for the medal marker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold medal",
            Self::Silver => "Silver medal",
            Self::Bronze => "Bronze medal",
        }
    }

    pub fn theme(self) -> &'static ColorTheme {
        match self {
            Self::Gold => &GOLD,
            Self::Silver => &SILVER,
            Self::Bronze => &BRONZE,
        }
    }
}

/// Theme for a ranked member: podium ranks override the declared color.
pub fn resolve_theme(rank: u32, color_key: &str) -> &'static ColorTheme {
    match Podium::from_rank(rank) {
        Some(podium) => podium.theme(),
        None => ColorCategory::from_key(color_key).theme(),
    }
}

/// Member name -> declared color key, for views that only know a member by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorLookup {
    colors: HashMap<String, String>,
}

impl ColorLookup {
    /// Later members win when a name repeats.
    pub fn from_members(members: &[Member]) -> Self {
        let colors = members
            .iter()
            .filter(|member| !member.name.is_empty())
            .map(|member| (member.name.clone(), member.color_key.clone()))
            .collect();
        Self { colors }
    }

    pub fn color_key(&self, name: &str) -> &str {
        self.colors.get(name).map(String::as_str).unwrap_or("")
    }

    /// Non-podium theme for `name`; unknown members get the neutral theme.
    pub fn theme_for(&self, name: &str) -> &'static ColorTheme {
        ColorCategory::from_key(self.color_key(name)).theme()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorCategory, ColorLookup, Podium, resolve_theme};
    use crate::model::Member;

    fn member(name: &str, color_key: &str, score: f64) -> Member {
        Member {
            name: name.into(),
            color_key: color_key.into(),
            score,
        }
    }

    #[test]
    fn podium_overrides_declared_color() {
        for rank in 1..=3 {
            let podium = Podium::from_rank(rank).expect("podium rank");
            assert_eq!(resolve_theme(rank, "blue"), podium.theme());
            assert_eq!(resolve_theme(rank, ""), podium.theme());
        }
    }

    #[test]
    fn declared_color_applies_below_podium() {
        assert_eq!(resolve_theme(4, "blue"), ColorCategory::Blue.theme());
        assert_eq!(resolve_theme(9, "BLUE"), ColorCategory::Blue.theme());
        assert_eq!(resolve_theme(4, "Teal "), ColorCategory::Teal.theme());
    }

    #[test]
    fn unknown_or_empty_color_falls_back_to_default() {
        assert_eq!(resolve_theme(4, "chartreuse"), ColorCategory::Default.theme());
        assert_eq!(resolve_theme(4, ""), ColorCategory::Default.theme());
    }

    #[test]
    fn palette_uses_sheet_color_names() {
        assert_eq!(ColorCategory::Yellow.theme().badge, "bg-amber-900 text-amber-100");
        assert_eq!(ColorCategory::Red.theme().avatar, "bg-rose-900/90 text-rose-100");
        assert_eq!(
            ColorCategory::Blue.theme().card,
            "bg-gradient-to-br from-blue-50/70 via-blue-50/60 to-white/30"
        );
        assert_eq!(ColorCategory::from_key("gray"), ColorCategory::Gray);
    }

    #[test]
    fn medals_match_rank() {
        assert_eq!(Podium::from_rank(1).map(Podium::emoji), Some("🥇"));
        assert_eq!(Podium::from_rank(2).map(Podium::label), Some("Silver medal"));
        assert_eq!(Podium::from_rank(3).map(Podium::title), Some("Bronze"));
        assert_eq!(Podium::from_rank(4), None);
    }

    #[test]
    fn lookup_never_applies_podium() {
        let members = vec![member("Ada", "blue", 50.0), member("Lin", "", 10.0)];
        let lookup = ColorLookup::from_members(&members);

        assert_eq!(lookup.theme_for("Ada"), ColorCategory::Blue.theme());
        assert_eq!(lookup.theme_for("Lin"), ColorCategory::Default.theme());
        assert_eq!(lookup.theme_for("Stranger"), ColorCategory::Default.theme());
    }

    #[test]
    fn theme_serializes_with_snake_case_keys() {
        let json = serde_json::to_value(ColorCategory::Pink.theme()).expect("serialize theme");
        let mut keys: Vec<&str> = json
            .as_object()
            .expect("theme object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["avatar", "badge", "card", "member_pill"]);
        assert_eq!(json["member_pill"], ColorCategory::Pink.theme().member_pill);
    }

    #[test]
    fn lookup_keeps_last_color_for_repeated_name() {
        let members = vec![member("Ada", "blue", 50.0), member("Ada", "pink", 1.0)];
        let lookup = ColorLookup::from_members(&members);
        assert_eq!(lookup.color_key("Ada"), "pink");
    }
}
