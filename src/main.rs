//! farsnorm CLI - normalize a directory of Persian documents

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use farsnorm::{AffixStrategy, Normalizer, NormalizerBuilder};

/// Document extensions picked up from the input directory.
const EXTENSIONS: [&str; 3] = ["txt", "xml", "html"];

/// farsnorm - Persian text normalization
#[derive(Parser, Debug)]
#[command(name = "farsnorm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory with .txt, .xml and .html documents
    #[arg(required_unless_present = "stdin")]
    input: Option<PathBuf>,

    /// Directory the normalized `<name>.txt` files are written to
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Normalize standard input to standard output instead
    #[arg(long, conflicts_with = "input")]
    stdin: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Locale code (`fa` or `en`); unknown codes fall back to `fa`
    #[arg(short, long, default_value = "fa")]
    locale: String,

    /// Separator placed around punctuation
    #[arg(long, default_value = " ")]
    punctuation_separator: String,

    /// Do not pad punctuation at all
    #[arg(long)]
    no_punctuation_spacing: bool,

    /// Replaces the gap between a prefix and its stem
    #[arg(long, default_value = "")]
    prefix_separator: String,

    /// Replaces the gap between a stem and its suffix
    #[arg(long, default_value = "")]
    suffix_separator: String,

    /// Replacement for zero-width non-joiners
    #[arg(long, default_value = " ")]
    zwnj_replacement: String,

    /// Replacement for URLs
    #[arg(long, default_value = "")]
    url_replacement: String,

    /// Let the longest affix win instead of the first in catalog order
    #[arg(long)]
    longest_match: bool,

    /// Also delete every character outside the locale's script
    #[arg(long)]
    strip_foreign: bool,
}

impl Cli {
    fn normalizer(&self) -> Normalizer {
        let punctuation =
            (!self.no_punctuation_spacing).then_some(self.punctuation_separator.as_str());
        let strategy = if self.longest_match {
            AffixStrategy::LongestMatch
        } else {
            AffixStrategy::CatalogOrder
        };
        NormalizerBuilder::default()
            .locale(&self.locale)
            .punctuation_separator(punctuation)
            .prefix_separator(self.prefix_separator.as_str())
            .suffix_separator(self.suffix_separator.as_str())
            .zwnj_replacement(self.zwnj_replacement.as_str())
            .url_replacement(self.url_replacement.as_str())
            .affix_strategy(strategy)
            .build()
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

fn normalize_text(normalizer: &Normalizer, raw: &str, strip_foreign: bool) -> Result<String> {
    let text = normalizer.normalize(raw)?;
    if strip_foreign {
        return Ok(normalizer.strip_foreign(text)?.into_owned());
    }
    Ok(text.into_owned())
}

fn is_document(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let known = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e));
    !hidden && known
}

/// Normalize every document directly inside `input` into `output`.
/// Returns the number of files written.
fn process_dir(
    normalizer: &Normalizer,
    input: &Path,
    output: &Path,
    strip_foreign: bool,
) -> Result<usize> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let entries: Vec<_> = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to read input directory {}", input.display()))?;

    let mut written = 0;
    for entry in entries {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_document(path) {
            debug!(path = %path.display(), "skipping");
            continue;
        }

        info!("Processing {}", path.display());
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = normalize_text(normalizer, &raw, strip_foreign)
            .with_context(|| format!("Failed to normalize {}", path.display()))?;

        let mut name = path.file_stem().unwrap_or(entry.file_name()).to_os_string();
        name.push(".txt");
        let target = output.join(name);
        std::fs::write(&target, text)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!("Saved {}", target.display());
        written += 1;
    }
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let normalizer = cli.normalizer();
    normalizer.validate()?;
    debug!(lang = %normalizer.lang(), stages = ?normalizer.stage_names(), "normalizer ready");

    if cli.stdin {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read standard input")?;
        let text = normalize_text(&normalizer, &raw, cli.strip_foreign)?;
        std::io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write standard output")?;
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .context("An input directory is required without --stdin")?;
    let written = process_dir(&normalizer, input, &cli.output, cli.strip_foreign)?;
    info!("Normalized {} file(s) into {}", written, cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn only_visible_documents_are_processed() {
        assert!(is_document(Path::new("a/news.txt")));
        assert!(is_document(Path::new("page.html")));
        assert!(is_document(Path::new("feed.xml")));
        assert!(!is_document(Path::new(".DS_Store")));
        assert!(!is_document(Path::new(".hidden.txt")));
        assert!(!is_document(Path::new("image.png")));
        assert!(!is_document(Path::new("README")));
    }

    #[test]
    fn directory_is_normalized_into_txt_files() {
        let input = tempdir().unwrap();
        let output = input.path().join("out");
        std::fs::write(input.path().join("doc.html"), "<p>كتاب 12</p>").unwrap();
        std::fs::write(input.path().join("notes.txt"), "سلام،خوبی؟").unwrap();
        std::fs::write(input.path().join(".skip.txt"), "x").unwrap();
        std::fs::write(input.path().join("data.csv"), "x").unwrap();

        let normalizer = Normalizer::default();
        let written = process_dir(&normalizer, input.path(), &output, false).unwrap();

        assert_eq!(written, 2);
        assert_eq!(std::fs::read_to_string(output.join("doc.txt")).unwrap(), "کتاب ۱۲");
        assert_eq!(
            std::fs::read_to_string(output.join("notes.txt")).unwrap(),
            "سلام ، خوبی ؟"
        );
        assert!(!output.join(".skip.txt").exists());
        assert!(!output.join("data.txt").exists());
    }

    #[test]
    fn cli_flags_reach_the_normalizer() {
        let cli = Cli::parse_from([
            "farsnorm",
            "--stdin",
            "--locale",
            "en",
            "--no-punctuation-spacing",
            "--longest-match",
        ]);
        let normalizer = cli.normalizer();
        assert_eq!(normalizer.lang(), farsnorm::ENG);
        assert_eq!(normalizer.config().punctuation_separator, None);
        assert_eq!(normalizer.config().affix_strategy, AffixStrategy::LongestMatch);
    }

    #[test]
    fn strip_foreign_flag_drops_latin() {
        let normalizer = Normalizer::default();
        assert_eq!(normalize_text(&normalizer, "سلام hello", true).unwrap(), "سلام ");
        assert_eq!(normalize_text(&normalizer, "سلام hello", false).unwrap(), "سلام hello");
    }
}
