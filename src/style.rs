//! Colors for the section titles `--mode all` prints
use clap::ValueEnum;
use once_cell::sync::Lazy;

/// When to color output
#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal that supports it
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// The escape sequences wrapped around styled text
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    title_start: &'static str,
    end: &'static str,
}

impl StyleSheet {
    /// `s` styled as a section title
    #[must_use]
    pub fn title(&self, s: &str) -> String {
        format!("{}{}{}", self.title_start, s, self.end)
    }
}

const YELLOW: &str = "\x1B[33m";
const RESET: &str = "\x1B[m";
const ALWAYS: StyleSheet = StyleSheet { title_start: YELLOW, end: RESET };
const NEVER: StyleSheet = StyleSheet { title_start: "", end: "" };
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    let use_color = enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some();
    if use_color {
        ALWAYS
    } else {
        NEVER
    }
});

/// The style sheet for `choice`
#[must_use]
pub fn colored(choice: ColorChoice) -> &'static StyleSheet {
    match choice {
        ColorChoice::Always => &ALWAYS,
        ColorChoice::Never => &NEVER,
        ColorChoice::Auto => &*AUTO,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn never_leaves_titles_plain() {
        assert_eq!(colored(ColorChoice::Never).title("intersect:"), "intersect:");
    }

    #[test]
    fn always_wraps_titles_in_escapes() {
        assert_eq!(colored(ColorChoice::Always).title("intersect:"), "\x1B[33mintersect:\x1B[m");
    }
}
