use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn format_rfc3339(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

/// Milliseconds since the Unix epoch, used for diagnostics file names.
pub fn epoch_millis(value: OffsetDateTime) -> i128 {
    value.unix_timestamp_nanos() / 1_000_000
}
