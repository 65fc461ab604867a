/// An inclusive model-year range.
#[derive(Debug, Clone, Copy)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
    pub label: &'static str,
}

pub static YEAR_RANGES: &[YearRange] = &[
    YearRange { start: 1985, end: 1989, label: "1985-1989" },
    YearRange { start: 1990, end: 1995, label: "1990-1995" },
    YearRange { start: 1996, end: 2000, label: "1996-2000" },
    YearRange { start: 2001, end: 2005, label: "2001-2005" },
    YearRange { start: 2006, end: 2010, label: "2006-2010" },
    YearRange { start: 2011, end: 2015, label: "2011-2015" },
    YearRange { start: 2016, end: 2020, label: "2016-2020" },
];

pub const UNKNOWN_YEAR: &str = "Unknown";

/// Returns the label of the first range containing `year`, or `"Unknown"`.
pub fn categorize_year(year: i32) -> &'static str {
    YEAR_RANGES
        .iter()
        .find(|r| year >= r.start && year <= r.end)
        .map(|r| r.label)
        .unwrap_or(UNKNOWN_YEAR)
}
