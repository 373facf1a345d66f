//! The two manifest layouts we understand, and their parsers. Both turn a
//! manifest into a `DependencyMap`. Neither fails on a malformed line: such
//! lines are reported with `tracing::warn!` and skipped, so one typo in a
//! manifest doesn't sink the whole comparison.
use bstr::ByteSlice;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::{fmt, io, str::FromStr};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::source::ManifestSource;

/// Maps each dependency coordinate (`group:artifact`) to its version. An
/// unspecified version is the empty string.
///
/// Keys keep the order of their first appearance in the manifest. When a
/// coordinate appears again, the later version replaces the earlier one.
pub type DependencyMap = IndexMap<String, String, FxBuildHasher>;

/// The manifest layouts `depcompare` can read
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ManifestFormat {
    /// One dependency per line, `group:artifact[:version]`
    ShortForm,
    /// A Gradle build script, with dependencies quoted inside a
    /// `dependencies { ... }` block
    BuildScript,
}

impl ManifestFormat {
    /// Every tag `from_str` accepts, short spellings first
    pub const TAGS: [&'static str; 4] = ["gradleb", "gradlet", "gradlebuild", "gradletxt"];

    /// Parses the manifest in `source`. `origin` names the manifest in
    /// warnings about skipped lines.
    pub fn parse(self, source: impl ManifestSource, origin: &str) -> io::Result<DependencyMap> {
        let dependencies = match self {
            ManifestFormat::ShortForm => parse_short_form(source, origin)?,
            ManifestFormat::BuildScript => parse_build_script(source, origin)?,
        };
        debug!(origin, format = %self, count = dependencies.len(), "parsed manifest");
        Ok(dependencies)
    }
}

impl FromStr for ManifestFormat {
    type Err = LoadError;

    /// Tags are matched without regard to case
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "gradlet" | "gradletxt" => Ok(ManifestFormat::ShortForm),
            "gradleb" | "gradlebuild" => Ok(ManifestFormat::BuildScript),
            _ => Err(LoadError::Format { tag: tag.to_owned() }),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestFormat::ShortForm => write!(f, "gradlet"),
            ManifestFormat::BuildScript => write!(f, "gradleb"),
        }
    }
}

/// Splits `group:artifact[:version[:...]]` into the coordinate and the
/// version. Fields after the version are ignored; a missing version is the
/// empty string. Returns `None` if there are fewer than two fields.
fn split_coordinate(entry: &str) -> Option<(String, String)> {
    let mut fields = entry.split(':');
    let group = fields.next()?;
    let artifact = fields.next()?;
    let version = fields.next().unwrap_or_default();
    Some((format!("{group}:{artifact}"), version.to_owned()))
}

/// Parses a manifest with one `group:artifact[:version]` dependency per line.
/// Fields are taken verbatim, surrounding whitespace included. Blank lines are
/// ignored.
pub fn parse_short_form(source: impl ManifestSource, origin: &str) -> io::Result<DependencyMap> {
    let mut dependencies = DependencyMap::default();
    let mut line_number = 0_usize;
    source.for_byte_line(|line| {
        line_number += 1;
        let line = line.to_str_lossy();
        if line.trim().is_empty() {
            return;
        }
        match split_coordinate(&line) {
            Some((coordinate, version)) => {
                dependencies.insert(coordinate, version);
            }
            None => {
                let expected = "group:artifact[:version]";
                warn!(origin, line = line_number, "skipping line: expected {expected}");
            }
        }
    })?;
    Ok(dependencies)
}

const BLOCK_MARKER: &str = "dependencies";

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

/// The text between the first and last single quote of `line`
fn quoted(line: &str) -> Option<&str> {
    let start = line.find('\'')?;
    let end = line.rfind('\'')?;
    (start < end).then(|| &line[start + 1..end])
}

/// Parses a Gradle build script. Only lines strictly inside a dependency block
/// count: the block opens on a line mentioning `dependencies` (in any case)
/// and closes on the next line containing `}`, wherever the brace sits on that
/// line. A later line naming `dependencies` inside the open block is skipped,
/// not parsed. Inside the block, each line's coordinate is the text between
/// its first and last single quote, as in
///
/// ```text
/// implementation 'org.apache.commons:commons-lang3:3.12.0'
/// ```
///
/// Comment lines (`//`, `/*` or `*` after leading whitespace) are skipped
/// wherever they are, so they never open or close a block.
pub fn parse_build_script(source: impl ManifestSource, origin: &str) -> io::Result<DependencyMap> {
    let mut dependencies = DependencyMap::default();
    let mut line_number = 0_usize;
    let mut in_block = false;
    source.for_byte_line(|line| {
        line_number += 1;
        let line = line.to_str_lossy();
        let line = line.trim();
        if is_comment(line) {
            return;
        }

        if in_block && line.contains('}') {
            in_block = false;
            return;
        }
        let lowered = line.to_lowercase();
        if let Some(at) = lowered.find(BLOCK_MARKER) {
            if in_block {
                warn!(origin, line = line_number, "skipping line: it names a dependency block");
            } else {
                // `dependencies { }` on one line opens and closes an empty block
                in_block = !lowered[at..].contains('}');
            }
            return;
        }
        if !in_block || line.is_empty() {
            return;
        }

        let Some(entry) = quoted(line) else {
            warn!(origin, line = line_number, "skipping line: no quoted dependency found");
            return;
        };
        match split_coordinate(entry) {
            Some((coordinate, version)) => {
                dependencies.insert(coordinate, version);
            }
            None => {
                let expected = "'group:artifact[:version]'";
                warn!(origin, line = line_number, "skipping line: expected {expected}");
            }
        }
    })?;
    Ok(dependencies)
}
