//! HTTP API handlers for tunesift-web

pub mod auth;
pub mod forms;
pub mod health;
pub mod playlists;
pub mod ui;

pub use auth::auth_routes;
pub use health::health_routes;
pub use playlists::playlist_routes;
