//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

use crate::compare::ResultKey;
use crate::style::ColorChoice;

/// Returns the parsed command line
#[must_use]
pub fn parsed() -> Args {
    let parsed = CliArgs::parse();
    let selection = match parsed.mode {
        CliMode::Intersect => Selection::One(ResultKey::Intersect),
        CliMode::Diff | CliMode::BaseOnly => Selection::One(ResultKey::BaseOnly),
        CliMode::DepOnly => Selection::One(ResultKey::DepOnly),
        CliMode::All => Selection::All,
    };
    Args {
        format_tag: parsed.format_tag,
        selection,
        color: parsed.color,
        verbosity: parsed.verbose,
        dependencies: parsed.dependencies,
        target: parsed.target,
    }
}

/// The usage line, as a reminder after a fatal error
#[must_use]
pub fn usage() -> String {
    CliArgs::command().render_usage().to_string()
}

/// The parsed command line
pub struct Args {
    /// The manifest format tag, still unchecked
    pub format_tag: String,
    /// Which of the comparison's lists to print
    pub selection: Selection,
    /// When to color section titles
    pub color: ColorChoice,
    /// How many times `-v` was given
    pub verbosity: u8,
    /// The candidate manifest
    pub dependencies: PathBuf,
    /// The target manifest, the baseline the candidate is compared with
    pub target: PathBuf,
}

/// What to print
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Selection {
    /// Just the named list, one coordinate per line
    One(ResultKey),
    /// Every list, each under its own title
    All,
}

#[derive(Debug, Parser)]
#[command(name = "depcompare", version)]
/// Compares a dependency list against a target dependency list, and prints
/// the dependencies both declare, or the ones only one of them declares.
/// Versions are ignored.
struct CliArgs {
    #[arg(long = "type", value_name = "TYPE", default_value = "gradleb", env = "DEPCOMPARE_TYPE")]
    /// The manifest format: `gradleb` for a `build.gradle` script, `gradlet`
    /// for a text file with one `group:artifact[:version]` per line
    format_tag: String,
    #[arg(long, value_enum, default_value = "intersect", env = "DEPCOMPARE_MODE")]
    /// Which dependencies to print
    mode: CliMode,
    #[arg(long, value_enum, value_name = "WHEN", default_value = "auto")]
    /// When to color the section titles of `--mode all`
    color: ColorChoice,
    #[arg(short, long, action = ArgAction::Count)]
    /// Log more about parsing (`-vv` for even more); `RUST_LOG` overrides this
    verbose: u8,
    #[arg(value_name = "DEPENDENCY PATH")]
    /// The dependency list to compare
    dependencies: PathBuf,
    #[arg(value_name = "TARGET PATH")]
    /// The target dependency list to compare it with
    target: PathBuf,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Name of the requested output
enum CliMode {
    /// Print the dependencies present in both lists
    Intersect,
    /// Print the dependencies present in the target list but not the first
    Diff,
    /// Print the dependencies present only in the first list
    DepOnly,
    /// Same as `diff`
    BaseOnly,
    /// Print all three lists, each with a title
    All,
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn usage_names_both_paths() {
        let usage = usage();
        assert!(usage.contains("depcompare"), "{usage}");
        assert!(usage.contains("DEPENDENCY PATH") && usage.contains("TARGET PATH"), "{usage}");
    }

    #[test]
    fn defaults_are_build_scripts_and_intersect() {
        let parsed = CliArgs::try_parse_from(["depcompare", "a.gradle", "b.gradle"]).unwrap();
        assert_eq!(parsed.format_tag, "gradleb");
        assert_eq!(parsed.mode, CliMode::Intersect);
        assert_eq!(parsed.color, ColorChoice::Auto);
    }

    #[test]
    fn modes_use_kebab_case_names() {
        for (name, mode) in [
            ("dep-only", CliMode::DepOnly),
            ("base-only", CliMode::BaseOnly),
            ("diff", CliMode::Diff),
        ] {
            let parsed = CliArgs::try_parse_from(["depcompare", "--mode", name, "a", "b"]).unwrap();
            assert_eq!(parsed.mode, mode, "for {name}");
        }
    }

    #[test]
    fn both_paths_are_required() {
        assert!(CliArgs::try_parse_from(["depcompare", "a.gradle"]).is_err());
        assert!(CliArgs::try_parse_from(["depcompare", "a", "b", "c"]).is_err());
    }
}
