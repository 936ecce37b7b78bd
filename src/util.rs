/// Format a millisecond duration for display: `s.xx` under a minute,
/// `m:ss.xx` (zero-padded seconds) at or above one minute.
pub fn format_ms(ms: u64) -> String {
    let total_seconds = ms as f64 / 1000.0;
    let minutes = (total_seconds / 60.0).floor() as u64;
    let seconds = total_seconds - (minutes * 60) as f64;

    if minutes > 0 {
        format!("{}:{:05.2}", minutes, seconds)
    } else {
        format!("{:.2}", seconds)
    }
}
