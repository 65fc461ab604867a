pub static BODY_KEYWORDS: &[&str] = &[
    "coupe",
    "sedan",
    "suv",
    "minivan",
    "truck",
    "van",
    "wagon",
    "hatchback",
    "convertible",
    "roadster",
    "cab",
];

/// Substring overrides checked before the keyword scan, in order.
static BODY_OVERRIDES: &[(&str, &str)] = &[
    ("koup", "coupe"),
    // misspelled in the source data
    ("navitgation", "suv"),
    ("supercrew", "truck"),
];

pub const OTHER_BODY: &str = "Other";

/// Normalizes a free-form body description to one of [`BODY_KEYWORDS`] or `"Other"`.
pub fn categorize_body(body: &str) -> &'static str {
    let lower = body.to_lowercase();

    if let Some((_, label)) = BODY_OVERRIDES.iter().find(|(marker, _)| lower.contains(*marker)) {
        return *label;
    }

    BODY_KEYWORDS
        .iter()
        .find(|keyword| lower.contains(**keyword))
        .copied()
        .unwrap_or(OTHER_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keywords() {
        assert_eq!(categorize_body("Sedan"), "sedan");
        assert_eq!(categorize_body("SUV"), "suv");
        assert_eq!(categorize_body("Crew Cab"), "cab");
        assert_eq!(categorize_body("G Convertible"), "convertible");
    }

    #[test]
    fn test_overrides_take_precedence() {
        assert_eq!(categorize_body("Koup"), "coupe");
        assert_eq!(categorize_body("Navitgation"), "suv");
        // "supercrew" would otherwise fall through to nothing
        assert_eq!(categorize_body("SuperCrew"), "truck");
        // both rules match; the override must win
        assert_eq!(categorize_body("Navitgation Sedan"), "suv");
        assert_eq!(categorize_body("SuperCrew Cab"), "truck");
        assert_eq!(categorize_body("Koup Convertible"), "coupe");
    }

    #[test]
    fn test_keyword_order_matters() {
        // minivan is listed before van
        assert_eq!(categorize_body("Minivan"), "minivan");
        assert_eq!(categorize_body("E-Series Van"), "van");
        // "sedan" is scanned before "wagon"
        assert_eq!(categorize_body("sedan/wagon"), "sedan");
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(categorize_body("Unspecified"), OTHER_BODY);
        assert_eq!(categorize_body(""), OTHER_BODY);
    }
}
