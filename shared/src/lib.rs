pub mod model;
pub mod normalize;
pub mod rank;
pub mod status;
pub mod theme;
pub mod time_format;
pub mod views;

pub use model::*;
pub use normalize::parse_snapshot;
pub use rank::{RankTable, is_podium};
pub use status::LoadStatus;
pub use theme::{ColorCategory, ColorLookup, ColorTheme, Podium, resolve_theme};
pub use time_format::{Timestamp, time_ago};
pub use views::*;
