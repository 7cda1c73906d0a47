//! Maps a trust's type, attributes and direction onto an edge color and
//! orientation.
//!
//! Attribute and direction values are matched by substring since exports
//! often combine several flags in one field (`"WITHIN_FOREST,NON_TRANSITIVE"`).

use std::fmt;

const EXTERNAL_ATTRIBUTES: [&str; 3] = ["TREAT_AS_EXTERNAL", "FILTER_SIDS", "CROSS_ORGANIZATION"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustColor {
    /// MIT (Kerberos realm) trust.
    Black,
    /// Intra-forest trust.
    Green,
    /// Forest to forest trust.
    Blue,
    /// External trust.
    Red,
    /// Unrecognized attribute combination.
    Violet,
}

impl TrustColor {
    pub fn hex(self) -> &'static str {
        match self {
            TrustColor::Black => "#000000",
            TrustColor::Green => "#009900",
            TrustColor::Blue => "#0000CC",
            TrustColor::Red => "#FF0000",
            TrustColor::Violet => "#EE82EE",
        }
    }
}

impl fmt::Display for TrustColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrustColor::Black => "black",
            TrustColor::Green => "green",
            TrustColor::Blue => "blue",
            TrustColor::Red => "red",
            TrustColor::Violet => "violet",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Source to target, arrows on both ends.
    Bidirectional,
    /// Source to target.
    Forward,
    /// Target to source. Outbound trusts point back at the trusting domain.
    Reverse,
    /// No edge is drawn.
    Unrecognized,
}

impl Orientation {
    /// Resolves the (from, to) endpoints for an edge, or `None` when the
    /// direction was not recognized.
    pub fn endpoints<'a>(self, source: &'a str, target: &'a str) -> Option<(&'a str, &'a str)> {
        match self {
            Orientation::Bidirectional | Orientation::Forward => Some((source, target)),
            Orientation::Reverse => Some((target, source)),
            Orientation::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub color: TrustColor,
    pub orientation: Orientation,
}

pub fn classify(trust_type: &str, trust_attributes: &str, trust_direction: &str) -> Classification {
    Classification {
        color: classify_color(trust_type, trust_attributes),
        orientation: classify_direction(trust_direction),
    }
}

fn classify_color(trust_type: &str, trust_attributes: &str) -> TrustColor {
    if trust_type == "MIT" {
        TrustColor::Black
    } else if trust_attributes.contains("WITHIN_FOREST") {
        TrustColor::Green
    } else if trust_attributes.contains("FOREST_TRANSITIVE") {
        TrustColor::Blue
    } else if trust_attributes.is_empty()
        || EXTERNAL_ATTRIBUTES
            .iter()
            .any(|attr| trust_attributes.contains(*attr))
    {
        TrustColor::Red
    } else {
        TrustColor::Violet
    }
}

fn classify_direction(trust_direction: &str) -> Orientation {
    // order matters, "Bidirectional" wins over anything else in the field
    if trust_direction.contains("Bidirectional") {
        Orientation::Bidirectional
    } else if trust_direction.contains("Outbound") {
        Orientation::Reverse
    } else if trust_direction.contains("Inbound") {
        Orientation::Forward
    } else {
        Orientation::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mit_is_always_black() {
        assert_eq!(classify("MIT", "", "Inbound").color, TrustColor::Black);
        assert_eq!(classify("MIT", "WITHIN_FOREST", "Inbound").color, TrustColor::Black);
        assert_eq!(classify("MIT", "SOME_UNKNOWN_FLAG", "nowhere").color, TrustColor::Black);
        // exact and case-sensitive
        assert_eq!(classify("mit", "", "Inbound").color, TrustColor::Red);
        assert_eq!(classify("MIT_REALM", "", "Inbound").color, TrustColor::Red);
    }

    #[test]
    fn test_attribute_colors() {
        let color = |attrs| classify("WINDOWS_ACTIVE_DIRECTORY", attrs, "Inbound").color;

        assert_eq!(color("WITHIN_FOREST,X"), TrustColor::Green);
        assert_eq!(color("FOREST_TRANSITIVE"), TrustColor::Blue);
        assert_eq!(color(""), TrustColor::Red);
        assert_eq!(color("TREAT_AS_EXTERNAL"), TrustColor::Red);
        assert_eq!(color("FILTER_SIDS"), TrustColor::Red);
        assert_eq!(color("NON_TRANSITIVE,CROSS_ORGANIZATION"), TrustColor::Red);
        assert_eq!(color("SOME_UNKNOWN_FLAG"), TrustColor::Violet);
    }

    #[test]
    fn test_attribute_precedence() {
        let color = |attrs| classify("", attrs, "Inbound").color;

        assert_eq!(color("FOREST_TRANSITIVE,WITHIN_FOREST"), TrustColor::Green);
        assert_eq!(color("FILTER_SIDS,FOREST_TRANSITIVE"), TrustColor::Blue);
        assert_eq!(color("within_forest"), TrustColor::Violet);
    }

    #[test]
    fn test_directions() {
        let orientation = |dir| classify("", "", dir).orientation;

        assert_eq!(orientation("Bidirectional"), Orientation::Bidirectional);
        assert_eq!(orientation("Outbound"), Orientation::Reverse);
        assert_eq!(orientation("Inbound"), Orientation::Forward);
        assert_eq!(orientation("Disabled"), Orientation::Unrecognized);
        assert_eq!(orientation("outbound"), Orientation::Unrecognized);
        assert_eq!(orientation("Inbound,Outbound"), Orientation::Reverse);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Orientation::Forward.endpoints("a", "b"), Some(("a", "b")));
        assert_eq!(Orientation::Bidirectional.endpoints("a", "b"), Some(("a", "b")));
        assert_eq!(Orientation::Reverse.endpoints("a", "b"), Some(("b", "a")));
        assert_eq!(Orientation::Unrecognized.endpoints("a", "b"), None);
    }

    #[test]
    fn test_hex_values() {
        assert_eq!(TrustColor::Green.hex(), "#009900");
        assert_eq!(TrustColor::Violet.hex(), "#EE82EE");
        assert_eq!(TrustColor::Blue.to_string(), "blue");
    }
}
