use std::ops::Range;

// ============================================================================
// Phone formatting — digits in, `+7(XXX)XXX-XX-XX` out
// ============================================================================

/// Maximum number of digits kept from any phone input.
pub const MAX_PHONE_DIGITS: usize = 11;

/// Upper bound for the sum of all phone digits.
pub const MAX_DIGIT_SUM: u32 = 30;

/// A run of digits rendered after a fixed prefix character.
struct PhoneGroup {
    range: Range<usize>,
    prefix: char,
}

const PHONE_GROUPS: [PhoneGroup; 5] = [
    PhoneGroup { range: 0..1, prefix: '+' },
    PhoneGroup { range: 1..4, prefix: '(' },
    PhoneGroup { range: 4..7, prefix: ')' },
    PhoneGroup { range: 7..9, prefix: '-' },
    PhoneGroup { range: 9..11, prefix: '-' },
];

/// Pure phone helpers. Stateless; every method takes raw user input.
pub struct PhoneFormatter;

impl PhoneFormatter {
    /// Strip everything but ASCII digits and keep at most 11 of them.
    pub fn clear_from_chars(input: &str) -> String {
        input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(MAX_PHONE_DIGITS)
            .collect()
    }

    /// Render the digits of `input` progressively as `+7(916)123-45-67`.
    ///
    /// A group's prefix is only emitted once the group holds a digit, so
    /// `"7916"` renders as `"+7(916"`.
    pub fn output_view(input: &str) -> String {
        let digits = Self::clear_from_chars(input);
        let mut out = String::with_capacity(digits.len() + PHONE_GROUPS.len());

        for group in &PHONE_GROUPS {
            if group.range.start >= digits.len() {
                break;
            }
            let end = group.range.end.min(digits.len());
            out.push(group.prefix);
            // digits are ASCII, byte offsets equal char offsets
            out.push_str(&digits[group.range.start..end]);
        }

        out
    }

    /// True when the formatted input is a complete `+7(DDD)DDD-DD-DD` number
    /// whose digits sum to at most 30.
    pub fn validate(input: &str) -> bool {
        let formatted = Self::output_view(input);
        has_complete_shape(&formatted) && digit_sum(&formatted) <= MAX_DIGIT_SUM
    }
}

/// Checks `+7(DDD)DDD-DD-DD` exactly.
fn has_complete_shape(formatted: &str) -> bool {
    const SHAPE: &str = "+7(DDD)DDD-DD-DD";

    formatted.len() == SHAPE.len()
        && formatted
            .chars()
            .zip(SHAPE.chars())
            .all(|(c, expected)| match expected {
                'D' => c.is_ascii_digit(),
                other => c == other,
            })
}

fn digit_sum(input: &str) -> u32 {
    input.chars().filter_map(|c| c.to_digit(10)).sum()
}
