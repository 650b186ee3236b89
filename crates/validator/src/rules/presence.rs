//! Presence rules.

use crate::foundation::{RuleContent, Verdict};
use crate::rule::{Control, RuleSpec};

/// `required`: fails on blank content.
pub fn required<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "required",
        Control::func(|content: &C, _: &[String]| !content.is_blank()),
        "This field is required",
    )
}

/// `notRequired`: never fails. Blank content ends the chain, so the rules
/// after it only apply when a value was given.
pub fn not_required<C: RuleContent>() -> RuleSpec<C> {
    RuleSpec::new(
        "notRequired",
        Control::func(|content: &C, _: &[String]| {
            if content.is_blank() {
                Verdict::stop(true)
            } else {
                Verdict::pass()
            }
        }),
        "",
    )
}
