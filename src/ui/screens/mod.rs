pub mod dashboard;
pub mod login;

pub use dashboard::{run_dashboard, DashboardOutcome};
pub use login::{run_login, LoginOutcome};
