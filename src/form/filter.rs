use crate::options::ValueType;

/// How a type filter judges the current contents of a text field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acceptance {
    /// Complete and well-formed
    Acceptable,
    /// Could become acceptable with more typing, e.g. `-` or `1e`
    Intermediate,
    /// Can never become acceptable by appending text
    Invalid,
}

impl Acceptance {
    pub fn is_acceptable(self) -> bool {
        self == Acceptance::Acceptable
    }
}

/// Type-restricting filter attached to numeric text fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFilter {
    Integer,
    Float,
}

impl InputFilter {
    /// The filter a value of the given type needs, if any
    pub fn for_type(value_type: ValueType) -> Option<InputFilter> {
        match value_type {
            ValueType::String => None,
            ValueType::Integer => Some(InputFilter::Integer),
            ValueType::Float => Some(InputFilter::Float),
        }
    }

    pub fn check(self, text: &str) -> Acceptance {
        match self {
            InputFilter::Integer => check_integer(text),
            InputFilter::Float => check_float(text),
        }
    }
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['-', '+']).unwrap_or(text)
}

fn check_integer(text: &str) -> Acceptance {
    let digits = strip_sign(text);
    if digits.is_empty() {
        return Acceptance::Intermediate;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Acceptance::Invalid;
    }
    match text.parse::<i64>() {
        Ok(_) => Acceptance::Acceptable,
        // too many digits to ever fit
        Err(_) => Acceptance::Invalid,
    }
}

fn check_float(text: &str) -> Acceptance {
    let body = strip_sign(text);
    if body.is_empty() {
        return Acceptance::Intermediate;
    }

    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };

    // mantissa: digits with at most one dot
    if mantissa.chars().filter(|&c| c == '.').count() > 1
        || !mantissa.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return Acceptance::Invalid;
    }
    let mantissa_has_digits = mantissa.chars().any(|c| c.is_ascii_digit());

    match exponent {
        None if mantissa_has_digits => Acceptance::Acceptable,
        None => Acceptance::Intermediate,
        Some(_) if !mantissa_has_digits => Acceptance::Invalid,
        Some(exponent) => {
            let digits = strip_sign(exponent);
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                Acceptance::Invalid
            } else if digits.is_empty() {
                Acceptance::Intermediate
            } else {
                Acceptance::Acceptable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_need_no_filter() {
        assert_eq!(InputFilter::for_type(ValueType::String), None);
    }

    #[test]
    fn integer_filter_classifies_input() {
        let filter = InputFilter::Integer;
        assert_eq!(filter.check("5"), Acceptance::Acceptable);
        assert_eq!(filter.check("-12"), Acceptance::Acceptable);
        assert_eq!(filter.check(""), Acceptance::Intermediate);
        assert_eq!(filter.check("-"), Acceptance::Intermediate);
        assert_eq!(filter.check("abc"), Acceptance::Invalid);
        assert_eq!(filter.check("1.5"), Acceptance::Invalid);
        assert_eq!(filter.check("99999999999999999999"), Acceptance::Invalid);
    }

    #[test]
    fn float_filter_classifies_input() {
        let filter = InputFilter::Float;
        assert_eq!(filter.check("1.5"), Acceptance::Acceptable);
        assert_eq!(filter.check(".5"), Acceptance::Acceptable);
        assert_eq!(filter.check("2."), Acceptance::Acceptable);
        assert_eq!(filter.check("-3e10"), Acceptance::Acceptable);
        assert_eq!(filter.check("1e-3"), Acceptance::Acceptable);
        assert_eq!(filter.check("."), Acceptance::Intermediate);
        assert_eq!(filter.check("1e"), Acceptance::Intermediate);
        assert_eq!(filter.check("1e-"), Acceptance::Intermediate);
        assert_eq!(filter.check(""), Acceptance::Intermediate);
        assert_eq!(filter.check("inf"), Acceptance::Invalid);
        assert_eq!(filter.check("1.2.3"), Acceptance::Invalid);
        assert_eq!(filter.check("e5"), Acceptance::Invalid);
    }

    #[test]
    fn acceptable_floats_parse() {
        for text in ["1.5", ".5", "2.", "-3e10", "1e-3", "+7"] {
            assert_eq!(InputFilter::Float.check(text), Acceptance::Acceptable);
            assert!(text.parse::<f64>().is_ok(), "{text} should parse");
        }
    }
}
