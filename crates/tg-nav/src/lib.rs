pub mod controller;
pub mod error;
pub mod route;
pub mod session;
pub mod view;

pub use controller::NavigationController;
pub use error::NavError;
pub use route::Route;
pub use session::{AuthError, AuthMode, SessionContext};
pub use view::{Missing, View};
