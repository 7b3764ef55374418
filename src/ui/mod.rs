pub mod components;
pub mod screens;

pub use components::TerminalGuard;
pub use screens::{run_dashboard, run_login, DashboardOutcome, LoginOutcome};
