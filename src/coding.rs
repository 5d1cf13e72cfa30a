// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

//! Transfer-compression negotiation over the `Accept-Encoding` request
//! header.
//!
//! # Definition
//! ```text
//! Accept-Encoding = #( codings [ weight ] )
//! weight          = OWS ";" OWS "q=" qvalue
//! qvalue          = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
//! ```
//!
//! # References
//! * [RFC 9110 Section 12.5.3](https://www.rfc-editor.org/rfc/rfc9110.html#section-12.5.3)
//! * [RFC 9110 Section 12.4.2](https://www.rfc-editor.org/rfc/rfc9110.html#name-quality-values)

/// A content coding with the quality the user agent assigned to it.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct WeightedCoding<'a> {
    pub name: &'a str,
    pub weight: f32,
}

/// Parses an `Accept-Encoding` field-value as a weighted list. Empty list
/// elements are skipped, weights default to `1.0`, and a malformed qvalue
/// falls back to `1.0` as well (the sender MUST NOT generate one, and the
/// specification leaves the receiver free to pick a default).
pub fn parse_weighted_list(value: &str) -> impl Iterator<Item = WeightedCoding<'_>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(|element| {
            let mut parts = element.split(';');
            let name = parts.next().unwrap_or_default().trim();
            let weight = parts
                .next()
                .and_then(|parameter| parameter.trim().strip_prefix("q=").map(str::trim))
                .map_or(1.0, parse_quality_value);
            WeightedCoding { name, weight }
        })
        .filter(|coding| !coding.name.is_empty())
}

/// Picks the best acceptable coding out of `allowed`, or `None` when the user
/// agent accepts none of them.
///
/// Codings with `q=0` are explicitly refused. Ties are broken by first
/// occurrence in the header, which keeps the choice deterministic across
/// platforms.
#[must_use]
pub fn acceptable_encoding<'a>(accept_encoding: &str, allowed: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, f32)> = None;

    for coding in parse_weighted_list(accept_encoding) {
        if coding.weight <= 0.0 {
            continue;
        }
        let Some(candidate) = allowed
            .iter()
            .find(|name| name.eq_ignore_ascii_case(coding.name))
        else {
            continue;
        };

        // Strictly-greater comparison: the earliest occurrence wins a tie.
        if best.map_or(true, |(_, weight)| coding.weight > weight) {
            best = Some((candidate, coding.weight));
        }
    }

    best.map(|(name, _)| name)
}

/// Parses a `qvalue`. Out-of-range or malformed values degrade to `1.0`.
fn parse_quality_value(value: &str) -> f32 {
    const DEFAULT_VALUE_FOR_INVALID_SYNTAX: f32 = 1.0;

    if value.is_empty() || value.len() > 5 {
        return DEFAULT_VALUE_FOR_INVALID_SYNTAX;
    }

    match value.parse::<f32>() {
        Ok(quality) if (0.0..=1.0).contains(&quality) => quality,
        _ => DEFAULT_VALUE_FOR_INVALID_SYNTAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rstest::rstest;

    const GZIP_ONLY: &[&str] = &["gzip"];

    #[rstest]
    #[case("", None)]
    #[case("gzip", Some("gzip"))]
    #[case("GZIP", Some("gzip"))]
    #[case("gzip;q=0", None)]
    #[case("gzip;q=0.0", None)]
    #[case("gzip; q=0.5", Some("gzip"))]
    #[case("identity", None)]
    #[case("identity, gzip;q=0.5", Some("gzip"))]
    #[case("br, deflate", None)]
    #[case("br;q=1.0, gzip;q=0.8", Some("gzip"))]
    #[case("    ,    ", None)]
    fn negotiate_gzip(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(acceptable_encoding(header, GZIP_ONLY), expected);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let allowed = &["gzip", "br"];
        assert_eq!(acceptable_encoding("br, gzip", allowed), Some("br"));
        assert_eq!(acceptable_encoding("gzip, br", allowed), Some("gzip"));
        assert_eq!(acceptable_encoding("gzip;q=0.5, br", allowed), Some("br"));
    }

    #[rstest]
    #[case("gzip", &[("gzip", 1.0)])]
    #[case("gzip;q=0.5, br", &[("gzip", 0.5), ("br", 1.0)])]
    #[case("gzip;q=not-a-weight", &[("gzip", 1.0)])]
    #[case("gzip;q=2.0", &[("gzip", 1.0)])]
    #[case(" , gzip ;q=0.001,", &[("gzip", 0.001)])]
    fn weighted_list(#[case] input: &str, #[case] expected: &[(&str, f32)]) {
        let parsed: Vec<WeightedCoding<'_>> = parse_weighted_list(input).collect();
        assert_eq!(parsed.len(), expected.len());
        for (coding, &(name, weight)) in parsed.iter().zip(expected) {
            assert_eq!(coding.name, name);
            assert!(
                approx_eq!(f32, coding.weight, weight, ulps = 3),
                "weight mismatch for {name}: {} != {weight}",
                coding.weight
            );
        }
    }
}
