use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// "Jul 4, 2025"
pub fn short_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

/// "Jul 4"
pub fn short_month_day(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| date.to_string())
}

/// "July 4"
pub fn long_month_day(date: Date) -> String {
    date.format(format_description!("[month repr:long] [day padding:none]"))
        .unwrap_or_else(|_| date.to_string())
}

/// "Friday, July 4"
pub fn weekday_month_day(date: Date) -> String {
    date.format(format_description!(
        "[weekday], [month repr:long] [day padding:none]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

pub fn weekday_long(date: Date) -> String {
    date.weekday().to_string()
}

/// "Fri"
pub fn weekday_short(date: Date) -> String {
    date.format(format_description!("[weekday repr:short]"))
        .unwrap_or_else(|_| date.weekday().to_string())
}

/// "Jun 30 - Jul 6, 2025"
pub fn date_range(start: Date, end: Date) -> String {
    format!("{} - {}", short_month_day(start), short_date(end))
}

/// "9:05 AM"
pub fn clock_time(at: PrimitiveDateTime) -> String {
    at.format(format_description!(
        "[hour repr:12 padding:none]:[minute] [period]"
    ))
    .unwrap_or_else(|_| at.time().to_string())
}

/// "Jul 4, 2025 9:05 AM"
pub fn date_time(at: PrimitiveDateTime) -> String {
    format!("{} {}", short_date(at.date()), clock_time(at))
}
