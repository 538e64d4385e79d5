use serde::{Deserialize, Serialize};

/// Structured parts of a free-text "City, State/Region, Country" label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationParts {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Split a station label into city/state/country. Purely syntactic: segments
/// are comma-separated and trimmed, city is the first segment, country the
/// last, state the second segment only when three or more exist. A two-segment
/// "City, Country" label leaves the state slot unset.
pub fn extract_location_parts(label: &str) -> LocationParts {
    let parts: Vec<&str> = label.split(',').map(str::trim).collect();
    let segment = |idx: usize| parts.get(idx).copied().unwrap_or("").to_string();

    LocationParts {
        city: segment(0),
        state: if parts.len() >= 3 { segment(1) } else { String::new() },
        country: parts.last().copied().unwrap_or("").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_segments() {
        let parts = extract_location_parts("Shinjuku, Tokyo, Japan");
        assert_eq!(parts.city, "Shinjuku");
        assert_eq!(parts.state, "Tokyo");
        assert_eq!(parts.country, "Japan");
    }

    #[test]
    fn test_two_segments_leaves_state_unset() {
        let parts = extract_location_parts("Reykjavik, Iceland");
        assert_eq!(parts.city, "Reykjavik");
        assert_eq!(parts.state, "");
        assert_eq!(parts.country, "Iceland");
    }

    #[test]
    fn test_single_segment_is_both_city_and_country() {
        let parts = extract_location_parts("Singapore");
        assert_eq!(parts.city, "Singapore");
        assert_eq!(parts.state, "");
        assert_eq!(parts.country, "Singapore");
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(extract_location_parts(""), LocationParts::default());
    }

    #[test]
    fn test_whitespace_is_trimmed_per_segment() {
        let parts = extract_location_parts("  Pasadena ,  California ,  USA ");
        assert_eq!(parts.city, "Pasadena");
        assert_eq!(parts.state, "California");
        assert_eq!(parts.country, "USA");
    }
}
