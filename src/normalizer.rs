use thiserror::Error;

use crate::{
    context::Context,
    lang::{DEFAULT_LANG, Lang},
    pipeline::Pipeline,
    stage::{
        Stage, StageError,
        collapse_specials::CollapseSpecials,
        collapse_whitespace::CollapseWhitespace,
        localize_digits::LocalizeDigits,
        localize_punctuation::LocalizePunctuation,
        normalize_hamza::NormalizeHamza,
        remove_diacritics::RemoveDiacritics,
        replace_zwnj::ReplaceZwnj,
        segment_affixes::{AffixStrategy, SegmentAffixes},
        strip_foreign::StripForeign,
        strip_markup::StripMarkup,
        strip_tatweel::StripTatweel,
        strip_timestamp::StripTimestamp,
        strip_url::StripUrl,
        unify_arabic_letters::UnifyArabicLetters,
    },
};
use std::{borrow::Cow, sync::Arc};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("stage error: {0}")]
    Stage(#[from] StageError),
    #[error("affix catalog error: {0}")]
    Affix(#[from] &'static crate::affix::AffixError),
}

/// Everything a [`Normalizer`] can be configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub lang: Lang,
    /// Placed around punctuation runs; `None` disables spacing.
    pub punctuation_separator: Option<String>,
    /// Replaces the gap between a prefix and its stem.
    pub prefix_separator: String,
    /// Replaces the gap between a stem and its suffix.
    pub suffix_separator: String,
    pub zwnj_replacement: String,
    pub url_replacement: String,
    pub affix_strategy: AffixStrategy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG,
            punctuation_separator: Some(" ".to_owned()),
            prefix_separator: String::new(),
            suffix_separator: String::new(),
            zwnj_replacement: " ".to_owned(),
            url_replacement: String::new(),
            affix_strategy: AffixStrategy::default(),
        }
    }
}

/// The full normalization pipeline bound to one locale.
///
/// ```
/// use farsnorm::Normalizer;
///
/// let n = Normalizer::builder().prefix_separator("\u{200C}").build();
/// assert_eq!(n.normalize("نمی رود").unwrap(), "نمی\u{200C}رود");
/// ```
#[derive(Debug)]
pub struct Normalizer {
    ctx: Context,
    config: NormalizerConfig,
    pipeline: Pipeline,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl Normalizer {
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    pub fn new(config: NormalizerConfig) -> Self {
        let ctx = Context::new(config.lang);
        let stages: Vec<Arc<dyn Stage>> = vec![
            Arc::new(StripMarkup),
            Arc::new(StripTimestamp),
            Arc::new(CollapseSpecials),
            Arc::new(StripUrl::new(config.url_replacement.clone())),
            Arc::new(CollapseWhitespace),
            Arc::new(RemoveDiacritics),
            Arc::new(StripTatweel),
            Arc::new(UnifyArabicLetters),
            Arc::new(LocalizeDigits),
            Arc::new(NormalizeHamza),
            Arc::new(LocalizePunctuation::new(config.punctuation_separator.clone())),
            Arc::new(ReplaceZwnj::new(config.zwnj_replacement.clone())),
            Arc::new(
                SegmentAffixes::new(
                    config.prefix_separator.clone(),
                    config.suffix_separator.clone(),
                )
                .with_strategy(config.affix_strategy),
            ),
        ];
        Self {
            ctx,
            config,
            pipeline: Pipeline::new(stages),
        }
    }

    pub fn lang(&self) -> Lang {
        self.ctx.lang
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Stage names in the order they run.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline.stage_names()
    }

    /// Fails only when the locale's affix catalog is malformed.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        crate::affix::compiled_for(self.ctx.lang)?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(lang = self.ctx.lang.code()))]
    pub fn normalize<'a>(
        &self,
        text: impl Into<Cow<'a, str>>,
    ) -> Result<Cow<'a, str>, NormalizeError> {
        let text = text.into();
        tracing::trace!(len = text.len(), "normalize");
        Ok(self.pipeline.process(text, &self.ctx)?)
    }

    pub fn normalize_owned(&self, text: &str) -> Result<String, NormalizeError> {
        self.normalize(text).map(Cow::into_owned)
    }

    /// Delete everything outside the locale's script. Not part of
    /// [`normalize`](Self::normalize).
    pub fn strip_foreign<'a>(
        &self,
        text: impl Into<Cow<'a, str>>,
    ) -> Result<Cow<'a, str>, NormalizeError> {
        let text = text.into();
        if !StripForeign.needs_apply(&text, &self.ctx)? {
            return Ok(text);
        }
        Ok(StripForeign.apply(text, &self.ctx)?)
    }
}

#[derive(Debug, Default)]
pub struct NormalizerBuilder {
    config: NormalizerConfig,
}

impl NormalizerBuilder {
    pub fn lang(mut self, lang: Lang) -> Self {
        self.config.lang = lang;
        self
    }

    /// Locale by code; unknown codes fall back to Persian.
    pub fn locale(mut self, code: &str) -> Self {
        self.config.lang = Lang::resolve(code);
        self
    }

    pub fn punctuation_separator(mut self, separator: Option<&str>) -> Self {
        self.config.punctuation_separator = separator.map(str::to_owned);
        self
    }

    pub fn prefix_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.prefix_separator = separator.into();
        self
    }

    pub fn suffix_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.suffix_separator = separator.into();
        self
    }

    pub fn zwnj_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.config.zwnj_replacement = replacement.into();
        self
    }

    pub fn url_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.config.url_replacement = replacement.into();
        self
    }

    pub fn affix_strategy(mut self, strategy: AffixStrategy) -> Self {
        self.config.affix_strategy = strategy;
        self
    }

    pub fn config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Normalizer {
        Normalizer::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ENG, FAS};

    #[test]
    fn fixed_stage_order() {
        assert_eq!(
            Normalizer::default().stage_names(),
            [
                "strip_markup",
                "strip_timestamp",
                "collapse_specials",
                "strip_url",
                "collapse_whitespace",
                "remove_diacritics",
                "strip_tatweel",
                "unify_arabic_letters",
                "localize_digits",
                "normalize_hamza",
                "localize_punctuation",
                "replace_zwnj",
                "segment_affixes",
            ]
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_persian() {
        assert_eq!(Normalizer::builder().locale("xx").build().lang(), FAS);
        assert_eq!(Normalizer::builder().locale("EN").build().lang(), ENG);
    }

    #[test]
    fn default_config_values() {
        let cfg = NormalizerConfig::default();
        assert_eq!(cfg.lang, FAS);
        assert_eq!(cfg.punctuation_separator.as_deref(), Some(" "));
        assert_eq!(cfg.zwnj_replacement, " ");
        assert!(cfg.prefix_separator.is_empty() && cfg.suffix_separator.is_empty());
        assert_eq!(cfg.affix_strategy, AffixStrategy::CatalogOrder);
    }

    #[test]
    fn builder_overrides_config() {
        let n = Normalizer::builder()
            .punctuation_separator(None)
            .url_replacement("<url>")
            .build();
        assert_eq!(n.config().punctuation_separator, None);
        assert_eq!(n.normalize("see https://x.ir/a").unwrap(), "see <url>");
    }

    #[test]
    fn validate_passes_for_shipped_catalogs() {
        Normalizer::default().validate().unwrap();
        Normalizer::builder().lang(ENG).build().validate().unwrap();
    }

    #[test]
    fn strip_foreign_is_separate() {
        let n = Normalizer::default();
        assert_eq!(n.strip_foreign("سلام hello").unwrap(), "سلام ");
        assert_eq!(n.normalize("سلام hello").unwrap(), "سلام hello");
    }
}
