pub mod auth;
pub mod catalog;
pub mod genres;
pub mod resolver;
pub mod view_controller;

pub use auth::AuthService;
pub use catalog::{CatalogClient, HttpCatalogClient};
pub use genres::GenreCatalog;
pub use resolver::Resolver;
pub use view_controller::ViewController;
