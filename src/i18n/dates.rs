//! Locale-aware date labels
//!
//! Timestamps are stored in UTC and shown in the viewer's timezone, which is
//! taken from the `now` argument so callers (and tests) control both the
//! clock and the zone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};

use super::{Language, TextKey, Translator};

/// Messages older than this many days get an absolute date instead of a weekday
const WEEKDAY_WINDOW_DAYS: i64 = 6;

/// Whole calendar days from `day` to `today`; negative for future days
pub fn days_ago(day: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(day).num_days()
}

fn local<Tz: TimeZone>(ts: &DateTime<Utc>, now: &DateTime<Tz>) -> NaiveDateTime {
    ts.with_timezone(&now.timezone()).naive_local()
}

/// Calendar day of `ts` in the viewer's timezone
pub fn local_day<Tz: TimeZone>(ts: &DateTime<Utc>, now: &DateTime<Tz>) -> NaiveDate {
    local(ts, now).date()
}

/// `HH:MM` in the viewer's timezone
pub fn format_time<Tz: TimeZone>(ts: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    local(ts, now).format("%H:%M").to_string()
}

pub fn weekday_name(weekday: Weekday, language: Language) -> &'static str {
    match language {
        Language::Es => match weekday {
            Weekday::Mon => "lunes",
            Weekday::Tue => "martes",
            Weekday::Wed => "miércoles",
            Weekday::Thu => "jueves",
            Weekday::Fri => "viernes",
            Weekday::Sat => "sábado",
            Weekday::Sun => "domingo",
        },
        Language::En => match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        },
    }
}

/// Absolute date with the locale's field order: `dd/mm/yyyy` or `mm/dd/yyyy`
pub fn format_date(day: NaiveDate, language: Language) -> String {
    match language {
        Language::Es => day.format("%d/%m/%Y").to_string(),
        Language::En => day.format("%m/%d/%Y").to_string(),
    }
}

/// Shared ladder for day labels; `today` decides what the current day shows
fn relative_label(day: NaiveDate, today: NaiveDate, tr: &Translator, today_label: String) -> String {
    match days_ago(day, today) {
        0 => today_label,
        1 => tr.t(TextKey::Yesterday).to_string(),
        n if (2..=WEEKDAY_WINDOW_DAYS).contains(&n) => {
            weekday_name(day.weekday(), tr.language()).to_string()
        }
        _ => format_date(day, tr.language()),
    }
}

/// Separator label for a day of messages: today, yesterday, weekday or date
pub fn day_label<Tz: TimeZone>(day: NaiveDate, now: &DateTime<Tz>, tr: &Translator) -> String {
    let today = now.naive_local().date();
    relative_label(day, today, tr, tr.t(TextKey::Today).to_string())
}

/// Label shown next to a conversation in the chat list.
///
/// Same as [`day_label`] except that today's entries show the time.
pub fn chat_list_label<Tz: TimeZone>(
    ts: &DateTime<Utc>,
    now: &DateTime<Tz>,
    tr: &Translator,
) -> String {
    let today = now.naive_local().date();
    relative_label(local_day(ts, now), today, tr, format_time(ts, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    // Wednesday 2024-05-15 12:00 UTC
    fn now() -> DateTime<Utc> {
        at(2024, 5, 15, 12, 0)
    }

    #[test]
    fn test_day_labels_english() {
        let tr = Translator::new(Language::En);
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

        assert_eq!(day_label(day(15), &now(), &tr), "Today");
        assert_eq!(day_label(day(14), &now(), &tr), "Yesterday");
        assert_eq!(day_label(day(13), &now(), &tr), "Monday");
        assert_eq!(day_label(day(9), &now(), &tr), "Thursday");
        assert_eq!(day_label(day(8), &now(), &tr), "05/08/2024");
    }

    #[test]
    fn test_day_labels_spanish() {
        let tr = Translator::new(Language::Es);
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

        assert_eq!(day_label(day(15), &now(), &tr), "Hoy");
        assert_eq!(day_label(day(14), &now(), &tr), "Ayer");
        assert_eq!(day_label(day(11), &now(), &tr), "sábado");
        assert_eq!(day_label(day(1), &now(), &tr), "01/05/2024");
    }

    #[test]
    fn test_future_day_gets_absolute_date() {
        let tr = Translator::new(Language::En);
        let tomorrow = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        assert_eq!(day_label(tomorrow, &now(), &tr), "05/16/2024");
    }

    #[test]
    fn test_local_day_follows_viewer_timezone() {
        // 02:00 UTC on the 15th is still the 14th in Buenos Aires (UTC-3)
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let viewer_now = now().with_timezone(&offset);
        let ts = at(2024, 5, 15, 2, 0);

        assert_eq!(local_day(&ts, &viewer_now), NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
        assert_eq!(format_time(&ts, &viewer_now), "23:00");
    }

    #[test]
    fn test_chat_list_label_shows_time_today() {
        let tr = Translator::new(Language::En);
        assert_eq!(chat_list_label(&at(2024, 5, 15, 9, 5), &now(), &tr), "09:05");
        assert_eq!(chat_list_label(&at(2024, 5, 14, 9, 5), &now(), &tr), "Yesterday");
        assert_eq!(chat_list_label(&at(2024, 4, 1, 9, 5), &now(), &tr), "04/01/2024");
    }
}
