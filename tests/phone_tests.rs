use form_submit::phone::formatter::{MAX_PHONE_DIGITS, PhoneFormatter};

// =========================================================================
// clear_from_chars
// =========================================================================

#[test]
fn clear_strips_everything_but_digits() {
    assert_eq!(PhoneFormatter::clear_from_chars("+7 (916) 123-45-67"), "79161234567");
    assert_eq!(PhoneFormatter::clear_from_chars("abc"), "");
    assert_eq!(PhoneFormatter::clear_from_chars(""), "");
}

#[test]
fn clear_truncates_to_eleven_digits() {
    let cleared = PhoneFormatter::clear_from_chars("7 916 123 45 67 89 00");
    assert_eq!(cleared, "79161234567");
    assert_eq!(cleared.len(), MAX_PHONE_DIGITS);
}

#[test]
fn clear_ignores_non_ascii_digits() {
    // Arabic-Indic three and a fullwidth one are not phone digits
    assert_eq!(PhoneFormatter::clear_from_chars("7\u{0663}9\u{FF11}0"), "790");
}

// =========================================================================
// output_view
// =========================================================================

#[test]
fn output_view_empty_is_empty() {
    assert_eq!(PhoneFormatter::output_view(""), "");
    assert_eq!(PhoneFormatter::output_view("no digits"), "");
}

#[test]
fn output_view_full_number() {
    assert_eq!(PhoneFormatter::output_view("79161234567"), "+7(916)123-45-67");
    assert_eq!(PhoneFormatter::output_view("+7 916 123 45 67"), "+7(916)123-45-67");
}

#[test]
fn output_view_ten_digits_shift_into_country_slot() {
    assert_eq!(PhoneFormatter::output_view("9161234567"), "+9(161)234-56-7");
}

#[test]
fn output_view_formats_progressively() {
    let cases = [
        ("7", "+7"),
        ("79", "+7(9"),
        ("7916", "+7(916"),
        ("79161", "+7(916)1"),
        ("7916123", "+7(916)123"),
        ("79161234", "+7(916)123-4"),
        ("791612345", "+7(916)123-45"),
        ("7916123456", "+7(916)123-45-6"),
        ("79161234567", "+7(916)123-45-67"),
    ];

    for (typed, shown) in cases {
        assert_eq!(PhoneFormatter::output_view(typed), shown, "typed {:?}", typed);
    }
}

#[test]
fn output_view_is_idempotent() {
    for input in ["", "7", "7916", "+7(916)123-4", "79161234567", "7916123456789"] {
        let once = PhoneFormatter::output_view(input);
        assert_eq!(PhoneFormatter::output_view(&once), once);
    }
}

#[test]
fn output_view_keeps_the_digits() {
    let digits = "31415926535";
    for len in 0..=digits.len() {
        let s = &digits[..len];
        let shown = PhoneFormatter::output_view(s);
        assert_eq!(
            PhoneFormatter::clear_from_chars(&shown),
            PhoneFormatter::clear_from_chars(s),
            "digits lost formatting {:?}",
            s
        );
    }
}

// =========================================================================
// validate
// =========================================================================

#[test]
fn validate_rejects_digit_sum_above_thirty() {
    // 7+9+1+6+1+2+3+4+5+6+7 = 51
    assert!(!PhoneFormatter::validate("+7(916)123-45-67"));
}

#[test]
fn validate_accepts_low_digit_sum() {
    assert!(PhoneFormatter::validate("+7(900)000-00-00"));
    assert!(PhoneFormatter::validate("+7(111)111-11-11"));
}

#[test]
fn validate_digit_sum_boundary() {
    // 7+9+9+5 = 30
    assert!(PhoneFormatter::validate("+7(995)000-00-00"));
    // 31
    assert!(!PhoneFormatter::validate("+7(996)000-00-00"));
}

#[test]
fn validate_requires_country_digit_seven() {
    assert!(!PhoneFormatter::validate("+8(900)000-00-00"));
    assert!(!PhoneFormatter::validate("+1(900)000-00-00"));
}

#[test]
fn validate_requires_all_eleven_digits() {
    assert!(!PhoneFormatter::validate(""));
    assert!(!PhoneFormatter::validate("+7(900)000-00-0"));
    assert!(!PhoneFormatter::validate("+7(900)"));
}

#[test]
fn validate_formats_raw_input_first() {
    assert!(PhoneFormatter::validate("79000000000"));
    assert!(PhoneFormatter::validate("7 900 000 00 00"));
}

#[test]
fn validate_truncates_extra_digits() {
    // the trailing 9s are cut before the digit sum is taken
    assert!(PhoneFormatter::validate("79000000000999"));
}
