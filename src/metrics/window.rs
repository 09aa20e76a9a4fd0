use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    Today,
    CurrentMonth,
}

impl Window {
    pub const ALL: [Window; 2] = [Window::Today, Window::CurrentMonth];
}

/// Epoch-millisecond bounds of both windows, fixed at one instant.
///
/// Both windows end at the same `now`, so a build may fall into both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub today_start_ms: i64,
    pub month_start_ms: i64,
    pub now_ms: i64,
}

impl WindowBounds {
    /// Day and month boundaries are taken in the time zone of `now`.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_of_month =
            NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);

        Self {
            today_start_ms: start_of_day(&tz, today),
            month_start_ms: start_of_day(&tz, first_of_month),
            now_ms: now.timestamp_millis(),
        }
    }

    pub fn contains(&self, window: Window, timestamp_ms: i64) -> bool {
        let start = match window {
            Window::Today => self.today_start_ms,
            Window::CurrentMonth => self.month_start_ms,
        };

        (start..=self.now_ms).contains(&timestamp_ms)
    }

    pub fn windows_containing(&self, timestamp_ms: i64) -> impl Iterator<Item = Window> + '_ {
        Window::ALL
            .into_iter()
            .filter(move |window| self.contains(*window, timestamp_ms))
    }
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);

    // A DST gap can swallow local midnight
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
        .timestamp_millis()
}
