use crate::{
    context::Context,
    stage::{Stage, StageError, replace_all},
};
use memchr::memchr;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// ISO-8601 combined date and time in UTC, e.g. `2020-01-01T00:00:00Z`.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z").expect("valid timestamp pattern")
});

/// Deletes ISO-8601 `YYYY-MM-DDTHH:MM:SSZ` timestamps (any script's digits).
pub struct StripTimestamp;

impl Stage for StripTimestamp {
    fn name(&self) -> &'static str {
        "strip_timestamp"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        Ok(memchr(b'Z', text.as_bytes()).is_some() && TIMESTAMP.is_match(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(replace_all(&TIMESTAMP, text, ""))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for StripTimestamp {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["2020-01-01", "2020-01-01T00:00:00", "Zebra", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("at 2020-01-01T00:00:00Z now", "at  now"),
            ("۲۰۲۰-۰۱-۰۱T۱۲:۳۰:۰۰Z", ""),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(StripTimestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_timestamp() {
        let out = StripTimestamp
            .apply(
                Cow::Borrowed("a 2021-03-04T05:06:07Z b 1999-12-31T23:59:59Z c"),
                &Context::default(),
            )
            .unwrap();
        assert_eq!(out, "a  b  c");
    }

    #[test]
    fn offset_timestamps_are_not_matched() {
        let text = "2021-03-04T05:06:07+03:30";
        assert!(!StripTimestamp.needs_apply(text, &Context::default()).unwrap());
    }
}
