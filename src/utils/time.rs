use chrono::{DateTime, Local};

/// Clock text for the dashboard's last-updated line.
pub fn format_clock(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}
