//! Timestamp renderings shared by log lines and log file names.

use chrono::{DateTime, TimeZone};

/// `YYYY-MM-DD HH:mm:ss`, prefixed to every CLI log line.
pub const LINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD-HH-mm-ss`, used for the per-process log file name.
pub const FILE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub fn line_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(LINE_FORMAT).to_string()
}

/// Log file name for a process started at `started_at`.
pub fn log_file_name<Tz: TimeZone>(started_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.log", started_at.format(FILE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid date")
            .and_utc()
    }

    #[test]
    fn line_timestamp_is_zero_padded() {
        assert_eq!(line_timestamp(&at(4, 5, 6)), "2024-03-07 04:05:06");
    }

    #[test]
    fn log_file_name_uses_dashes() {
        assert_eq!(log_file_name(&at(23, 59, 1)), "2024-03-07-23-59-01.log");
    }
}
