pub mod help;
pub mod hud;
pub mod panel;
pub mod popup;
pub mod shortcuts;
pub mod tooltips;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use panel::nav_panel;
pub use popup::node_popup;
pub use shortcuts::handle_shortcuts;
pub use tooltips::tooltip_overlay;

pub const PANEL_W: f32 = 260.0;
pub const HUD_EDGE_PADDING: f32 = 12.0;
pub const HUD_PANEL_GAP: f32 = 12.0;
pub const TOOLTIP_OFFSET: (f32, f32) = (10.0, -25.0);
pub const POPUP_W: f32 = 320.0;
