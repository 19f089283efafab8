//! Registration date formatting

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Reformat a `D/M/YYYY` date into `Month D, YYYY`.
///
/// Input that does not split into exactly three numeric parts, or whose
/// month is outside 1..=12, is returned unchanged. The day is not range
/// checked.
#[must_use]
pub fn format_registration_date(raw: &str) -> String {
    parse_day_month_year(raw).map_or_else(
        || raw.to_string(),
        |(day, month, year)| format!("{} {day}, {year}", MONTHS[month - 1]),
    )
}

fn parse_day_month_year(raw: &str) -> Option<(u32, usize, u32)> {
    let parts: Vec<&str> = raw.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = numeric(day)?;
    let month = usize::try_from(numeric(month)?).ok()?;
    let year = numeric(year)?;

    (1..=12).contains(&month).then_some((day, month, year))
}

fn numeric(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_day_month_year() {
        assert_eq!(format_registration_date("5/3/2024"), "March 5, 2024");
        assert_eq!(format_registration_date("17/11/2023"), "November 17, 2023");
        assert_eq!(format_registration_date("31/12/1999"), "December 31, 1999");
    }

    #[test]
    fn test_zero_padding_is_dropped() {
        assert_eq!(format_registration_date("05/03/2024"), "March 5, 2024");
    }

    #[test]
    fn test_passthrough() {
        for raw in [
            "not-a-date",
            "2024-03-05",
            "5/3",
            "5/3/2024/1",
            "a/3/2024",
            "5/13/2024",
            "5/0/2024",
            "",
            "//",
        ] {
            assert_eq!(format_registration_date(raw), raw, "input {raw:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_in_parts() {
        assert_eq!(format_registration_date(" 5 / 3 / 2024 "), "March 5, 2024");
    }
}
