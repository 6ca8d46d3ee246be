pub mod app;
pub mod chat_panel;
pub mod components;
pub mod pages;
pub mod state;

pub use app::MarketplaceApp;
pub use state::AppState;
