pub mod app_state;
pub mod categories;
pub mod comment_browser;
pub mod comments;
pub mod config;
pub mod handlers_comments;
pub mod handlers_config;
pub mod handlers_health;
pub mod handlers_map;
pub mod handlers_static;
pub mod handlers_tabs;
pub mod map_explorer;
pub mod map_surface;
pub mod pipeline;
pub mod poi;
pub mod popup;
pub mod routes;
pub mod tabs;
pub mod warp_helpers;
