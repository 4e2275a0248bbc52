pub mod alert_overlay;
pub mod help_overlay;
pub mod log_panel;
pub mod zone_list;
pub mod zone_viewer;
