//! HTTP request handlers.

pub mod check_slug;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod slugs;

pub use check_slug::check_slug_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use slugs::slug_list_handler;
