use calamine::Data;
use chrono::{Duration, NaiveDate};

const MILLIS_PER_DAY: i64 = 86_400_000;
/// Serial of 9999-12-31, the last date Excel can represent.
const MAX_SERIAL: f64 = 2_958_465.0;

/// Display text of a decoded cell. Empty cells give an empty string.
pub(crate) fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // f64's Display drops the fraction of whole numbers: 5551234.0 -> "5551234"
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) if dt.is_duration() => duration_text(dt.as_f64()),
        Data::DateTime(dt) => serial_to_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Render an Excel serial date as Excel displays it.
///
/// The 1900 date system counts a 1900-02-29 that never existed: serial 60 is
/// that day, and serials below it are one day later than the 1899-12-30
/// epoch suggests.
fn serial_to_text(serial: f64) -> String {
    if !(0.0..=MAX_SERIAL).contains(&serial) {
        return serial.to_string();
    }
    let (epoch_day, days) = match serial {
        s if s < 60.0 => (31, s),
        s if s < 61.0 => (31, s - 1.0),
        s => (30, s),
    };
    let Some(epoch) =
        NaiveDate::from_ymd_opt(1899, 12, epoch_day).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return serial.to_string();
    };

    let millis = (days * MILLIS_PER_DAY as f64).round() as i64;
    let text = match epoch.checked_add_signed(Duration::milliseconds(millis)) {
        Some(dt) if millis % MILLIS_PER_DAY == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => return serial.to_string(),
    };

    if (60.0..61.0).contains(&serial) {
        text.replacen("1900-02-28", "1900-02-29", 1)
    } else {
        text
    }
}

/// Render a duration serial (fractional days) as elapsed `H:MM:SS`, the way
/// Excel's `[h]:mm:ss` format does. Hours do not wrap at 24.
fn duration_text(serial: f64) -> String {
    if !(0.0..=MAX_SERIAL).contains(&serial) {
        return serial.to_string();
    }
    let seconds = (serial * 86_400.0).round() as i64;
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}
