use chrono::Utc;

pub fn get_utc_iso_datetime() -> String {
    let timestamp = Utc::now().to_rfc3339();
    return timestamp;
}
