//! Readout formatting helpers

/// Width of the text progress bar, in cells
pub const PROGRESS_WIDTH: usize = 30;

/// Application name shown in the terminal title and notifications
pub const APP_NAME: &str = "ChronoPulse";

/// Format seconds as zero-padded `HH:MM:SS`
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Render a progress fraction as a fixed-width bar
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Terminal title for the given remaining time
pub fn window_title(total_seconds: u64) -> String {
    format!("({}) {}", format_hms(total_seconds), APP_NAME)
}

/// Format an uptime duration as a short human string
pub fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
