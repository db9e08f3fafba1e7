pub mod api;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod services;
pub mod session;
pub mod table;
pub mod utils;
pub mod view;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used items
pub use api::{AdminApiClient, AppConfig};
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use presenter::*;
pub use services::*;
pub use session::Session;
pub use table::*;
pub use utils::*;
pub use view::*;
