use crate::{
    context::Context,
    stage::{Stage, StageError, replace_all},
};
use memchr::memmem;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url pattern"));

/// Replaces `http://` and `https://` URLs (up to the next whitespace) with a
/// fixed token, by default the empty string.
#[derive(Debug, Clone, Default)]
pub struct StripUrl {
    pub replacement: String,
}

impl StripUrl {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }
}

impl Stage for StripUrl {
    fn name(&self) -> &'static str {
        "strip_url"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> Result<bool, StageError> {
        if memmem::find(text.as_bytes(), b"http").is_none() {
            return Ok(false);
        }
        Ok(URL.find_iter(text).any(|m| m.as_str() != self.replacement))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if memmem::find(text.as_bytes(), b"http").is_none() {
            return Ok(text);
        }
        Ok(replace_all(&URL, text, &self.replacement))
    }
}

#[cfg(test)]
impl crate::testing::stage_contract::StageTestConfig for StripUrl {
    fn should_pass_through(_lang: crate::lang::Lang) -> &'static [&'static str] {
        &["http", "ftp://example.com", "see http:/x", ""]
    }

    fn should_transform(_lang: crate::lang::Lang) -> &'static [(&'static str, &'static str)] {
        &[
            ("see http://x.co/a now", "see  now"),
            ("https://example.com/path?q=1#frag", ""),
            ("لینک:https://a.ir/ب", "لینک:"),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(StripUrl::default());
    }
}
