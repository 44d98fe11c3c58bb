//! French (fr-FR) date and time formatting
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Column headers of the week grid, Monday first
pub const DAY_NAMES: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Capitalized day name, e.g. `Mercredi`
pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// `12/06/2024`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `12/06`
pub fn day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// `09:30`
pub fn time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%H:%M").to_string()
}

/// `mercredi 12 juin 2024`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        day_name(date.weekday()).to_lowercase(),
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// `12/06/2024 09:30:00`
pub fn date_time(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d/%m/%Y %H:%M:%S").to_string()
}
