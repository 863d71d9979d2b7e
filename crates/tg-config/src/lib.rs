pub mod app;
pub mod paths;
pub mod store;

pub use app::AppConfig;
pub use paths::ConfigPaths;
pub use store::StoreConfig;
