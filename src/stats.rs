//! Trimmed rolling averages over a time-log snapshot.
//!
//! All functions are pure, take durations in milliseconds, and return
//! `None` when too few entries exist. Seconds formatting happens only at
//! the display edge via [`format_average`].

/// Mean after dropping exactly one lowest and one highest value (a single
/// occurrence each, not all ties). Needs at least 3 entries; exactly 3
/// yields the middle value.
pub fn trimmed_mean(entries: &[u64]) -> Option<f64> {
    if entries.len() < 3 {
        return None;
    }

    let mut sorted = entries.to_vec();
    sorted.sort_unstable();

    let trimmed = &sorted[1..sorted.len() - 1];
    let sum: u64 = trimmed.iter().sum();

    Some(sum as f64 / trimmed.len() as f64)
}

/// Trimmed mean of the most recent `count` entries. `None` when the log
/// holds fewer than `count` entries overall.
pub fn rolling_average(entries: &[u64], count: usize) -> Option<f64> {
    if entries.len() < count {
        return None;
    }

    trimmed_mean(&entries[entries.len() - count..])
}

/// Minimum trimmed mean over every window of `count` consecutive entries,
/// in chronological order. The minimum is over per-window averages, not
/// over raw entries.
pub fn best_rolling_average(entries: &[u64], count: usize) -> Option<f64> {
    if count == 0 || entries.len() < count {
        return None;
    }

    entries
        .windows(count)
        .filter_map(trimmed_mean)
        .fold(None, |best: Option<f64>, avg| match best {
            Some(b) if b <= avg => Some(b),
            _ => Some(avg),
        })
}

/// Trimmed mean over the entire log.
pub fn session_average(entries: &[u64]) -> Option<f64> {
    trimmed_mean(entries)
}

/// Render a statistic in seconds with two decimals, or `-` when there is
/// not enough data.
pub fn format_average(average_ms: Option<f64>) -> String {
    match average_ms {
        Some(ms) => format!("{:.2}", ms / 1000.0),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_mean_three_entries_is_middle_value() {
        assert_eq!(trimmed_mean(&[500, 1000, 1500]), Some(1000.0));
        assert_eq!(format_average(trimmed_mean(&[500, 1000, 1500])), "1.00");
    }

    #[test]
    fn test_trimmed_mean_insufficient_data() {
        assert_eq!(trimmed_mean(&[]), None);
        assert_eq!(trimmed_mean(&[1000]), None);
        assert_eq!(trimmed_mean(&[1000, 2000]), None);
    }

    #[test]
    fn test_trimmed_mean_drops_single_occurrence_of_ties() {
        // only one of the tied minima and one of the tied maxima is dropped
        assert_eq!(trimmed_mean(&[1000, 1000, 3000, 3000]), Some(2000.0));
    }

    #[test]
    fn test_trimmed_mean_unsorted_input() {
        assert_eq!(trimmed_mean(&[1500, 500, 1000]), Some(1000.0));
    }

    #[test]
    fn test_rolling_average_exact_window() {
        let times = [1000, 2000, 3000, 4000, 5000];
        // trim removes 1000 and 5000; mean of [2000, 3000, 4000]
        assert_eq!(rolling_average(&times, 5), Some(3000.0));
        assert_eq!(format_average(rolling_average(&times, 5)), "3.00");
    }

    #[test]
    fn test_rolling_average_uses_most_recent_entries() {
        let times = [9000, 9000, 9000, 1000, 2000, 3000, 4000, 5000];
        // last five are [1000..5000]; earlier slow solves are ignored
        assert_eq!(rolling_average(&times, 5), Some(3000.0));
    }

    #[test]
    fn test_rolling_average_insufficient_data() {
        assert_eq!(rolling_average(&[1000, 2000, 3000], 5), None);
        assert_eq!(rolling_average(&[], 5), None);
    }

    #[test]
    fn test_best_rolling_average_minimum_over_windows() {
        let times = [3000, 1000, 2000, 5000, 1500, 1600];
        // windows of 3 (chronological) and their trimmed means:
        // [3000,1000,2000] -> 2000, [1000,2000,5000] -> 2000,
        // [2000,5000,1500] -> 2000, [5000,1500,1600] -> 1600
        assert_eq!(best_rolling_average(&times, 3), Some(1600.0));
    }

    #[test]
    fn test_best_rolling_average_single_window_equals_rolling() {
        let times = [1000, 2000, 3000, 4000, 5000];
        assert_eq!(best_rolling_average(&times, 5), rolling_average(&times, 5));
    }

    #[test]
    fn test_best_rolling_average_insufficient_data() {
        assert_eq!(best_rolling_average(&[1000, 2000], 3), None);
        assert_eq!(best_rolling_average(&[], 5), None);
    }

    #[test]
    fn test_best_rolling_average_zero_count() {
        assert_eq!(best_rolling_average(&[1000, 2000, 3000], 0), None);
    }

    #[test]
    fn test_session_average_whole_log() {
        let times = [500, 1000, 1500, 8000];
        // drops 500 and 8000, averages [1000, 1500]
        assert_eq!(session_average(&times), Some(1250.0));
    }

    #[test]
    fn test_session_average_insufficient_data() {
        assert_eq!(session_average(&[1000, 2000]), None);
    }

    #[test]
    fn test_format_average_sentinel() {
        assert_eq!(format_average(None), "-");
    }

    #[test]
    fn test_format_average_two_decimals() {
        assert_eq!(format_average(Some(12340.0)), "12.34");
        assert_eq!(format_average(Some(1250.0)), "1.25");
        assert_eq!(format_average(Some(1000.0)), "1.00");
        assert_eq!(format_average(Some(0.0)), "0.00");
    }

    #[test]
    fn test_statistics_on_empty_log_all_none() {
        let empty: [u64; 0] = [];
        assert_eq!(trimmed_mean(&empty), None);
        assert_eq!(rolling_average(&empty, 5), None);
        assert_eq!(best_rolling_average(&empty, 5), None);
        assert_eq!(session_average(&empty), None);
    }
}
