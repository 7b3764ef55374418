pub mod bootstrap;
pub mod controller;
pub mod state;

pub use controller::AppController;
pub use state::{DashboardState, FetchStatus};
