//! Resolving the configured timezone name to a concrete UTC offset.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for `canonical_timezone`, e.g. "America/Bogota".
///
/// Returns `None` if the string is not a known canonical timezone name.
/// The offset is evaluated for the current instant, so daylight saving is
/// accounted for at the moment of the call.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::get_local_offset;

    #[test]
    fn resolves_utc() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn resolves_fixed_offset_zone() {
        // Bogota does not observe daylight saving, so the offset is stable.
        let offset = get_local_offset("America/Bogota").expect("known timezone");
        assert_eq!(offset.whole_hours(), -5);
    }

    #[test]
    fn rejects_unknown_name() {
        assert_eq!(get_local_offset("Narnia/Lantern_Waste"), None);
    }
}
