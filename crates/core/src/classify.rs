//! Classification of a single integer
//!
//! [`classify`] runs every primitive over one number and assembles the fixed
//! property record, the ordered tag list and a decorative emoji. The fun fact
//! is resolved elsewhere (it may require I/O) and attached with
//! [`Classification::with_fun_fact`].

use serde::Serialize;

use crate::primitives::{self, Factorial};
use crate::Error;

/// Sign of a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    pub fn of(n: i64) -> Self {
        match n.signum() {
            1 => Sign::Positive,
            -1 => Sign::Negative,
            _ => Sign::Zero,
        }
    }
}

/// Classification tags, declared in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Even,
    Odd,
    Prime,
    Composite,
    Fibonacci,
    PerfectSquare,
    PerfectCube,
    PowerOfTwo,
    Armstrong,
    PerfectNumber,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Even => "even",
            Tag::Odd => "odd",
            Tag::Prime => "prime",
            Tag::Composite => "composite",
            Tag::Fibonacci => "fibonacci",
            Tag::PerfectSquare => "perfect-square",
            Tag::PerfectCube => "perfect-cube",
            Tag::PowerOfTwo => "power-of-two",
            Tag::Armstrong => "armstrong",
            Tag::PerfectNumber => "perfect-number",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mathematical properties of a number
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Properties {
    pub is_even: bool,
    pub is_prime: bool,
    pub is_fibonacci: bool,
    pub is_perfect_square: bool,
    pub is_perfect_cube: bool,
    pub is_power_of_two: bool,
    pub is_armstrong: bool,
    pub is_perfect_number: bool,
    pub absolute_value: u64,
    pub sign: Sign,
    pub factors: Vec<u64>,
    pub digit_sum: u32,
    pub binary: String,
    pub hexadecimal: String,
    pub factorial: Factorial,
}

/// Pure classification result, everything but the fun fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub number: i64,
    pub properties: Properties,
    pub emoji: String,
    pub classification: Vec<Tag>,
}

/// Complete response record for a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberProperties {
    pub number: i64,
    pub properties: Properties,
    pub fun_fact: String,
    pub emoji: String,
    pub classification: Vec<Tag>,
}

impl Classification {
    /// Attach a resolved fun fact, producing the response record
    pub fn with_fun_fact(self, fun_fact: String) -> NumberProperties {
        NumberProperties {
            number: self.number,
            properties: self.properties,
            fun_fact,
            emoji: self.emoji,
            classification: self.classification,
        }
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.classification.contains(&tag)
    }
}

/// Compute every property of `n` along with its tags
///
/// Factorial goes through [`primitives::factorial`] for non-negative input and
/// its failure propagates; negative input records [`Factorial::Undefined`].
pub fn classify(n: i64) -> Result<Classification, Error> {
    let factorial = if n < 0 {
        Factorial::Undefined
    } else {
        primitives::factorial(n)?
    };

    let factors = primitives::factors(n);

    let properties = Properties {
        is_even: primitives::is_even(n),
        is_prime: primitives::is_prime(n),
        is_fibonacci: primitives::is_fibonacci(n),
        is_perfect_square: primitives::is_perfect_square(n),
        is_perfect_cube: primitives::is_perfect_cube(n),
        is_power_of_two: primitives::is_power_of_two(n),
        is_armstrong: primitives::is_armstrong(n),
        is_perfect_number: primitives::is_perfect_from_factors(n, &factors),
        absolute_value: n.unsigned_abs(),
        sign: Sign::of(n),
        factors,
        digit_sum: primitives::digit_sum(n),
        binary: primitives::binary_digits(n),
        hexadecimal: primitives::hex_digits(n),
        factorial,
    };

    let classification = tags_for(&properties);
    let emoji = emoji_for(&classification).to_string();

    Ok(Classification {
        number: n,
        properties,
        emoji,
        classification,
    })
}

/// Build the tag list from a property record
pub fn tags_for(properties: &Properties) -> Vec<Tag> {
    let mut tags = vec![
        if properties.is_even { Tag::Even } else { Tag::Odd },
        if properties.is_prime {
            Tag::Prime
        } else {
            Tag::Composite
        },
    ];

    let optional = [
        (properties.is_fibonacci, Tag::Fibonacci),
        (properties.is_perfect_square, Tag::PerfectSquare),
        (properties.is_perfect_cube, Tag::PerfectCube),
        (properties.is_power_of_two, Tag::PowerOfTwo),
        (properties.is_armstrong, Tag::Armstrong),
        (properties.is_perfect_number, Tag::PerfectNumber),
    ];

    tags.extend(
        optional
            .into_iter()
            .filter(|(holds, _)| *holds)
            .map(|(_, tag)| tag),
    );

    tags
}

/// Decorative emoji for a tag list, rarest property first
pub fn emoji_for(tags: &[Tag]) -> &'static str {
    const PRIORITY: [(Tag, &str); 7] = [
        (Tag::PerfectNumber, "💎"),
        (Tag::Armstrong, "💪"),
        (Tag::Prime, "✨"),
        (Tag::Fibonacci, "🌀"),
        (Tag::PerfectSquare, "🟩"),
        (Tag::PerfectCube, "🧊"),
        (Tag::PowerOfTwo, "⚡"),
    ];

    PRIORITY
        .iter()
        .find(|(tag, _)| tags.contains(tag))
        .map(|(_, emoji)| *emoji)
        .unwrap_or("🔢")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // classify tests
    // ============================================================================

    #[test]
    fn test_classify_zero() {
        let result = classify(0).unwrap();
        let p = &result.properties;

        assert!(p.is_even);
        assert!(!p.is_prime);
        assert_eq!(p.absolute_value, 0);
        assert_eq!(p.sign, Sign::Zero);
        assert!(p.factors.is_empty());
        assert_eq!(p.digit_sum, 0);
        assert_eq!(p.binary, "0");
        assert_eq!(p.hexadecimal, "0");
        assert_eq!(p.factorial, Factorial::Exact(1));
        assert!(result.has_tag(Tag::Even));
        assert!(result.has_tag(Tag::Composite));
    }

    #[test]
    fn test_classify_seven() {
        let result = classify(7).unwrap();
        assert!(result.properties.is_prime);
        assert_eq!(
            result.classification,
            vec![Tag::Odd, Tag::Prime, Tag::Armstrong]
        );
        assert_eq!(result.properties.factorial, Factorial::Exact(5040));
    }

    #[test]
    fn test_classify_power_of_two_sign() {
        assert!(classify(8).unwrap().has_tag(Tag::PowerOfTwo));

        let negative = classify(-8).unwrap();
        assert!(!negative.has_tag(Tag::PowerOfTwo));
        assert_eq!(negative.properties.sign, Sign::Negative);
        assert_eq!(negative.properties.absolute_value, 8);
        assert_eq!(negative.properties.factorial, Factorial::Undefined);
        assert!(negative.has_tag(Tag::PerfectCube));
    }

    #[test]
    fn test_classify_tag_order() {
        // 1 is odd, not prime, fibonacci, square, cube, power of two, armstrong
        let result = classify(1).unwrap();
        assert_eq!(
            result.classification,
            vec![
                Tag::Odd,
                Tag::Composite,
                Tag::Fibonacci,
                Tag::PerfectSquare,
                Tag::PerfectCube,
                Tag::PowerOfTwo,
                Tag::Armstrong,
            ]
        );
    }

    #[test]
    fn test_classify_perfect_number() {
        let result = classify(28).unwrap();
        assert!(result.has_tag(Tag::PerfectNumber));
        assert_eq!(result.emoji, "💎");
    }

    #[test]
    fn test_classify_exactly_one_of_each_pair() {
        for n in -500..500 {
            let tags = classify(n).unwrap().classification;
            let parity = tags
                .iter()
                .filter(|t| matches!(t, Tag::Even | Tag::Odd))
                .count();
            let primality = tags
                .iter()
                .filter(|t| matches!(t, Tag::Prime | Tag::Composite))
                .count();
            assert_eq!(parity, 1, "parity tags for {n}");
            assert_eq!(primality, 1, "primality tags for {n}");
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        for n in [-1_000, -1, 0, 1, 42, 496, 1_000_003, 1 << 40] {
            let first = serde_json::to_string(&classify(n).unwrap()).unwrap();
            let second = serde_json::to_string(&classify(n).unwrap()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_classify_large_factorial_sentinel() {
        let result = classify(25).unwrap();
        assert_eq!(result.properties.factorial, Factorial::TooLarge);
    }

    // ============================================================================
    // serialization tests
    // ============================================================================

    #[test]
    fn test_properties_key_order() {
        let json = serde_json::to_string(&classify(12).unwrap().properties).unwrap();

        let expected = [
            "is_even",
            "is_prime",
            "is_fibonacci",
            "is_perfect_square",
            "is_perfect_cube",
            "is_power_of_two",
            "is_armstrong",
            "is_perfect_number",
            "absolute_value",
            "sign",
            "factors",
            "digit_sum",
            "binary",
            "hexadecimal",
            "factorial",
        ];
        let positions: Vec<usize> = expected
            .iter()
            .map(|key| json.find(&format!("\"{key}\":")).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_number_properties_shape() {
        let record = classify(-12)
            .unwrap()
            .with_fun_fact("-12 is an even number.".to_string());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["number"], -12);
        assert_eq!(value["fun_fact"], "-12 is an even number.");
        assert_eq!(value["properties"]["sign"], "negative");
        assert_eq!(
            value["properties"]["factorial"],
            "undefined for negative numbers"
        );
        assert_eq!(
            value["classification"],
            serde_json::json!(["even", "composite"])
        );
    }

    // ============================================================================
    // emoji tests
    // ============================================================================

    #[test]
    fn test_emoji_priority() {
        assert_eq!(emoji_for(&[Tag::Odd, Tag::Prime, Tag::Armstrong]), "💪");
        assert_eq!(emoji_for(&[Tag::Odd, Tag::Prime]), "✨");
        assert_eq!(emoji_for(&[Tag::Even, Tag::Composite, Tag::PowerOfTwo]), "⚡");
        assert_eq!(emoji_for(&[Tag::Even, Tag::Composite]), "🔢");
    }

    #[test]
    fn test_tag_display_matches_serialization() {
        for tag in [Tag::PerfectSquare, Tag::PowerOfTwo, Tag::PerfectNumber] {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{tag}\""));
        }
    }
}
