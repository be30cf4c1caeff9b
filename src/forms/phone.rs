//! Phone number formatting for tel inputs
//!
//! Applied on every keystroke: non-digits are dropped and the digits are
//! laid out as "(XXX) XXX-XXXX". Anything past ten digits is discarded.

pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len >= 6 {
        let end = len.min(10);
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..end])
    } else if len >= 3 {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}
