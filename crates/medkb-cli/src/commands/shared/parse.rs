use std::str::FromStr;

/// Parse a tier enum (`faq`, `Basic`) through its case-insensitive `FromStr`.
pub fn parse_tier<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use medkb_core::enums::{ContentType, DifficultyLevel, UrgencyLevel};

    use super::parse_tier;

    #[test]
    fn parses_lowercase_tier() {
        let content_type: ContentType = parse_tier("faq", "content type").expect("should parse");
        assert_eq!(content_type, ContentType::Faq);
    }

    #[test]
    fn parses_mixed_case_tier() {
        let difficulty: DifficultyLevel =
            parse_tier(" Advanced ", "difficulty").expect("should parse");
        assert_eq!(difficulty, DifficultyLevel::Advanced);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for urgency in UrgencyLevel::ALL {
            let parsed: UrgencyLevel =
                parse_tier(&urgency.to_string(), "urgency").expect("should parse");
            assert_eq!(parsed, urgency);
        }
    }

    #[test]
    fn rejects_unknown_tier() {
        let error = parse_tier::<ContentType>("podcast", "content type").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("invalid content type 'podcast'"));
        assert!(message.contains("unknown content type"));
    }
}
