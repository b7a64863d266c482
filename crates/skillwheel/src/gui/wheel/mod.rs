pub mod model;
pub mod view;

pub use model::{Hit, IconGeometry, Skill, State};
pub use view::draw;

pub const REFERENCE_HEIGHT: f64 = 1440.0;
pub const ICON_SIZE: i32 = 256;
pub const SKILL_RADIUS: f64 = 34.0; // icon bg circle at scale 1.0
pub const HUB_RADIUS: f64 = 30.0; // click to toggle
pub const PANEL_PADDING: f64 = 18.0; // base disc margin around the icons
pub const ICON_FILL: f64 = 0.7; // icon size relative to its circle
pub const DETAIL_GAP: f64 = 14.0; // hub to label panel
pub const DETAIL_FONT_SIZE: f64 = 16.0;
