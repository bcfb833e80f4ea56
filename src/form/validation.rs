use crate::form::form_model::{FieldName, FormState, ValidationResult};
use crate::phone::formatter::PhoneFormatter;

/// Mail domains accepted by the email rule. A `.` matches any character.
pub const EMAIL_DOMAINS: [&str; 6] = [
    "ya.ru",
    "yandex.ru",
    "yandex.ua",
    "yandex.by",
    "yandex.kz",
    "yandex.com",
];

/// Validate every field; all must pass for the form to be valid.
pub fn validate_form(state: &FormState) -> ValidationResult {
    let error_fields = FieldName::ALL
        .into_iter()
        .filter(|&field| !validate_field(field, state.get(field)))
        .collect();

    ValidationResult::from_error_fields(error_fields)
}

pub fn validate_field(field: FieldName, value: &str) -> bool {
    match field {
        FieldName::Fio => validate_fio(value),
        FieldName::Email => validate_email(value),
        FieldName::Phone => PhoneFormatter::validate(value),
    }
}

/// Exactly three words separated by runs of [`is_form_space`], no digits
/// anywhere.
pub fn validate_fio(value: &str) -> bool {
    let words = value.split(is_form_space).filter(|w| !w.is_empty()).count();
    words == 3 && !value.chars().any(|c| c.is_ascii_digit())
}

/// Word separators of the name rule. Unlike `char::is_whitespace` this
/// excludes U+0085 and includes U+FEFF.
pub fn is_form_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Some text, an `@`, then one of [`EMAIL_DOMAINS`].
///
/// The match is a search, not a full match: anything may follow the domain,
/// and the dots in the domains are wildcards. `user@yandexXru` passes.
pub fn validate_email(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();

    chars.iter().enumerate().any(|(i, &c)| {
        c == '@'
            && i > 0
            && !is_line_terminator(chars[i - 1])
            && EMAIL_DOMAINS
                .iter()
                .any(|domain| matches_domain(&chars[i + 1..], domain))
    })
}

fn matches_domain(rest: &[char], domain: &str) -> bool {
    let pattern: Vec<char> = domain.chars().collect();

    rest.len() >= pattern.len()
        && rest.iter().zip(&pattern).all(|(&c, &p)| match p {
            '.' => !is_line_terminator(c),
            literal => c == literal,
        })
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
