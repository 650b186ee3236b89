//! Length rules. Lengths count Unicode scalar values, not bytes.

use crate::foundation::{ArgumentError, RuleContent};
use crate::rule::{Control, ErrorMessage, RuleSpec};

use super::usize_arg;

fn char_len<C: RuleContent>(content: &C) -> usize {
    content.pattern_text().chars().count()
}

/// `minLength:N`
pub fn min_length<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "minLength",
        Control::try_func(|content: &C, args: &[String]| -> Result<bool, ArgumentError> {
            let min = usize_arg("minLength", args, 0)?;
            Ok(char_len(content) >= min)
        }),
        ErrorMessage::func(|_: &C, args: &[String]| {
            format!("Must be at least {} characters", args.first().map_or("?", String::as_str))
        }),
    )
}

/// `maxLength:N`
pub fn max_length<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "maxLength",
        Control::try_func(|content: &C, args: &[String]| -> Result<bool, ArgumentError> {
            let max = usize_arg("maxLength", args, 0)?;
            Ok(char_len(content) <= max)
        }),
        ErrorMessage::func(|_: &C, args: &[String]| {
            format!("Must be at most {} characters", args.first().map_or("?", String::as_str))
        }),
    )
}

/// `length:MIN:MAX`
pub fn length<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "length",
        Control::try_func(|content: &C, args: &[String]| -> Result<bool, ArgumentError> {
            let min = usize_arg("length", args, 0)?;
            let max = usize_arg("length", args, 1)?;
            if min > max {
                return Err(ArgumentError::new("length", 1, "max must be >= min"));
            }
            Ok((min..=max).contains(&char_len(content)))
        }),
        ErrorMessage::func(|_: &C, args: &[String]| {
            let bound = |i: usize| args.get(i).map_or("?", String::as_str);
            format!("Must be between {} and {} characters", bound(0), bound(1))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case("abc", "3", true)]
    #[case("ab", "3", false)]
    #[case("héé", "3", true)]
    #[case("", "0", true)]
    #[tokio::test]
    async fn min_length_counts_chars(#[case] input: &str, #[case] min: &str, #[case] ok: bool) {
        let rule = Rule::new(min_length::<String>());
        let verdict = rule.verify(&input.to_owned(), &args(&[min])).await.unwrap();
        assert_eq!(verdict.value, ok);
        assert!(!verdict.terminal);
    }

    #[tokio::test]
    async fn max_length_bounds() {
        let rule = Rule::new(max_length::<String>());
        assert!(rule.verify(&"abc".to_owned(), &args(&["3"])).await.unwrap().value);
        assert!(!rule.verify(&"abcd".to_owned(), &args(&["3"])).await.unwrap().value);
        assert_eq!(
            rule.error_message(&"abcd".to_owned(), &args(&["3"])).await.unwrap(),
            "Must be at most 3 characters"
        );
    }

    #[tokio::test]
    async fn length_range_is_inclusive() {
        let rule = Rule::new(length::<String>());
        for (input, ok) in [("ab", false), ("abc", true), ("abcde", true), ("abcdef", false)] {
            let verdict = rule.verify(&input.to_owned(), &args(&["3", "5"])).await.unwrap();
            assert_eq!(verdict.value, ok, "{input}");
        }
    }

    #[tokio::test]
    async fn length_rejects_inverted_range() {
        let rule = Rule::new(length::<String>());
        let err = rule.verify(&"abc".to_owned(), &args(&["5", "3"])).await.unwrap_err();
        let err = err.downcast_ref::<ArgumentError>().unwrap();
        assert_eq!(err.index, 1);
    }

    #[tokio::test]
    async fn missing_argument_is_an_error() {
        let rule = Rule::new(min_length::<String>());
        let err = rule.verify(&"abc".to_owned(), &[]).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ArgumentError>(),
            Some(&ArgumentError::missing("minLength", 0))
        );
    }

    #[tokio::test]
    async fn json_content_uses_text_form() {
        let rule = Rule::new(min_length::<serde_json::Value>());
        let verdict = rule.verify(&serde_json::json!(12345), &args(&["5"])).await.unwrap();
        assert!(verdict.value);
    }
}
