pub mod affix;
pub mod context;
pub mod lang;
pub mod normalizer;
pub mod pipeline;
pub mod stage;
pub mod unicode;

#[cfg(test)]
pub(crate) mod testing {
    pub mod stage_contract;
}

pub use context::Context;
pub use lang::{ENG, FAS, Lang, all_langs};
pub use normalizer::{NormalizeError, Normalizer, NormalizerBuilder, NormalizerConfig};
pub use pipeline::Pipeline;
pub use stage::collapse_specials::CollapseSpecials;
pub use stage::collapse_whitespace::CollapseWhitespace;
pub use stage::localize_digits::LocalizeDigits;
pub use stage::localize_punctuation::LocalizePunctuation;
pub use stage::normalize_hamza::NormalizeHamza;
pub use stage::remove_diacritics::RemoveDiacritics;
pub use stage::replace_zwnj::ReplaceZwnj;
pub use stage::segment_affixes::{AffixSelection, AffixStrategy, SegmentAffixes};
pub use stage::strip_foreign::StripForeign;
pub use stage::strip_markup::StripMarkup;
pub use stage::strip_tatweel::StripTatweel;
pub use stage::strip_timestamp::StripTimestamp;
pub use stage::strip_url::StripUrl;
pub use stage::unify_arabic_letters::UnifyArabicLetters;
pub use stage::{Stage, StageError};
