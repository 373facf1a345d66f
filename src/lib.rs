//! `depcompare` compares two dependency manifests: `load` reads each one into a
//! `DependencyMap`, and `compare` splits their coordinates into the ones both
//! declare and the ones only one of them declares. The `args` module parses
//! the command line, and the `source` module hides I/O details.
//!
//! Current Limitations:
//! * Only Gradle manifests are understood, either as a `build.gradle` script or
//!   as a text file of short-form `group:artifact[:version]` lines.
//! * The build script reader is line-based, not a Groovy parser: it finds
//!   dependencies by their single quotes, and a dependency block ends at the
//!   first line with a closing brace.

#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use std::path::Path;

pub mod args;
pub mod compare;
pub mod error;
pub mod manifest;
pub mod source;
pub mod style;

pub use crate::compare::{compare, Comparison, ResultKey};
pub use crate::error::{LoadError, UnknownResultKey};
pub use crate::manifest::{DependencyMap, ManifestFormat};
pub use crate::source::{ManifestReader, ManifestSource};

/// Loads the manifest at `path`, reading it in the format named by
/// `format_tag` (one of `ManifestFormat::TAGS`, in any case).
///
/// The tag is checked before the file is opened. Lines that can't be parsed
/// are logged and skipped; only an unknown tag or an unreadable file is an
/// error.
pub fn load(format_tag: &str, path: &Path) -> Result<DependencyMap, LoadError> {
    let format: ManifestFormat = format_tag.parse()?;
    load_manifest(format, path)
}

/// Loads the manifest at `path`, reading it in the given `format`
pub fn load_manifest(format: ManifestFormat, path: &Path) -> Result<DependencyMap, LoadError> {
    let file_error = |source| LoadError::File { path: path.to_owned(), source };
    let reader = ManifestReader::open(path).map_err(file_error)?;
    format.parse(reader, &path.display().to_string()).map_err(file_error)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};

    const GRADLE_DEP_A: &str = "org.apache.commons:commons-lang3:3.12.0
org.apache.commons:commons-collections4:4.4
org.springframework.boot:spring-boot-starter-web
org.postgresql:postgresql
org.springframework.boot:spring-boot-starter-test
";

    const GRADLE_DEP_B: &str = "org.apache.commons:commons-lang3:3.12.0
org.apache.commons:commons-collections4:4.4
org.apache.commons:commons-csv:1.10.0
";

    const BUILD_A: &str = "plugins {
    id 'java'
}

dependencies {
    implementation 'org.apache.commons:commons-lang3:3.12.0'
    implementation 'org.apache.commons:commons-collections4:4.4'
    implementation 'org.springframework.boot:spring-boot-starter-web'
    runtimeOnly 'org.postgresql:postgresql'
    testImplementation 'org.springframework.boot:spring-boot-starter-test'
}
";

    fn entries(map: &DependencyMap) -> Vec<(&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    const EXPECTED_A: [(&str, &str); 5] = [
        ("org.apache.commons:commons-lang3", "3.12.0"),
        ("org.apache.commons:commons-collections4", "4.4"),
        ("org.springframework.boot:spring-boot-starter-web", ""),
        ("org.postgresql:postgresql", ""),
        ("org.springframework.boot:spring-boot-starter-test", ""),
    ];

    #[test]
    fn loads_both_formats_from_disk() {
        let temp = TempDir::new().unwrap();
        let text = temp.child("gradle-dep-a.txt");
        text.write_str(GRADLE_DEP_A).unwrap();
        let script = temp.child("build-a.gradle");
        script.write_str(BUILD_A).unwrap();

        assert_eq!(entries(&load("gradlet", text.path()).unwrap()), EXPECTED_A);
        assert_eq!(entries(&load("gradlebuild", script.path()).unwrap()), EXPECTED_A);
        let by_tag = load("GradleTxt", text.path()).unwrap();
        assert_eq!(by_tag, load_manifest(ManifestFormat::ShortForm, text.path()).unwrap());
    }

    #[test]
    fn loads_utf16_manifests() {
        let temp = TempDir::new().unwrap();
        let text = temp.child("gradle-dep-a.txt");
        let mut utf16 = b"\xff\xfe".to_vec();
        for b in GRADLE_DEP_A.as_bytes() {
            utf16.extend([*b, 0]);
        }
        text.write_binary(&utf16).unwrap();
        assert_eq!(entries(&load("gradlet", text.path()).unwrap()), EXPECTED_A);
    }

    #[test]
    fn an_unknown_tag_is_a_format_error_even_for_a_missing_file() {
        let err = load("maven", Path::new("/no/such/manifest")).unwrap_err();
        assert!(matches!(err, LoadError::Format { ref tag } if tag == "maven"), "{err:?}");
    }

    #[test]
    fn an_unreadable_path_is_a_file_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.child("invalid-path");
        let err = load("gradleb", missing.path()).unwrap_err();
        match err {
            LoadError::File { path, source } => {
                assert_eq!(path, missing.path());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a file error, got {other:?}"),
        }
        // A directory opens on some platforms but can never be read
        assert!(matches!(load("gradlet", temp.path()), Err(LoadError::File { .. })));
    }

    #[test]
    fn loaded_manifests_compare_as_expected() {
        let temp = TempDir::new().unwrap();
        let a = temp.child("gradle-dep-a.txt");
        a.write_str(GRADLE_DEP_A).unwrap();
        let b = temp.child("gradle-dep-b.txt");
        b.write_str(GRADLE_DEP_B).unwrap();

        let result =
            compare(&load("gradlet", b.path()).unwrap(), &load("gradlet", a.path()).unwrap());
        assert_eq!(
            result.intersection,
            ["org.apache.commons:commons-collections4", "org.apache.commons:commons-lang3"]
        );
        assert_eq!(result.first_only, ["org.apache.commons:commons-csv"]);
        assert_eq!(
            result.second_only,
            [
                "org.postgresql:postgresql",
                "org.springframework.boot:spring-boot-starter-test",
                "org.springframework.boot:spring-boot-starter-web",
            ]
        );
    }
}
