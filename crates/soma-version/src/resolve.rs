//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "module"
//! soma_type: "source"
//! soma_scope: "code"
//! soma_description: "Parsing of embedded engine version strings and headers."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
//! Parsers shared by the build script and the library.
//!
//! This module is compiled twice: once as part of `build.rs`, where it resolves
//! the engine version baked into the crate, and once as a regular library module.
//! It must therefore only depend on `std` and `thiserror`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Label the engine uses when it reports its own version.
pub const VERSION_LABEL: &str = "libtiledb=";

/// Location of the engine's version header below an include directory.
pub const VERSION_HEADER: &str = "tiledb/tiledb_version.h";

/// Build-time variable naming the engine version outright.
pub const ENV_OVERRIDE: &str = "SOMA_EMBEDDED_VERSION";

/// Build-time variable naming the engine's include directory.
pub const ENV_INCLUDE_DIR: &str = "TILEDB_INCLUDE_DIR";

/// Engine release the workspace is pinned against.
pub const PINNED: (u32, u32, u32) = (2, 15, 0);

const DEFINE_MAJOR: &str = "TILEDB_VERSION_MAJOR";
const DEFINE_MINOR: &str = "TILEDB_VERSION_MINOR";
const DEFINE_PATCH: &str = "TILEDB_VERSION_PATCH";

/// Failure to turn text into a `(major, minor, patch)` triple.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing left after trimming whitespace and the optional label.
    #[error("version string is empty")]
    Empty,
    /// The text does not have exactly three dot separated components.
    #[error("expected MAJOR.MINOR.PATCH, got '{input}'")]
    Malformed {
        /// Offending input.
        input: String,
    },
    /// A component is not a non-negative integer that fits in 32 bits.
    #[error("invalid {component} component in '{input}'")]
    InvalidComponent {
        /// Offending input.
        input: String,
        /// Which component failed (`major`, `minor` or `patch`).
        component: &'static str,
    },
    /// A version header lacks one of the three defines.
    #[error("{origin}: missing #define {define}")]
    MissingDefine {
        /// Where the header came from.
        origin: String,
        /// Name of the absent define.
        define: &'static str,
    },
    /// The version header could not be read.
    #[error("failed reading {}: {source}", path.display())]
    Io {
        /// Header path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

fn parse_component(
    raw: &str,
    input: &str,
    component: &'static str,
) -> Result<u32, ResolveError> {
    let invalid = || ResolveError::InvalidComponent {
        input: input.to_owned(),
        component,
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

/// Parse `MAJOR.MINOR.PATCH`, tolerating surrounding whitespace and a leading
/// `libtiledb=` label.
pub fn parse_version_text(input: &str) -> Result<(u32, u32, u32), ResolveError> {
    let trimmed = input.trim();
    let bare = trimmed.strip_prefix(VERSION_LABEL).unwrap_or(trimmed).trim();
    if bare.is_empty() {
        return Err(ResolveError::Empty);
    }
    let parts: Vec<&str> = bare.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(ResolveError::Malformed {
            input: input.to_owned(),
        });
    };
    Ok((
        parse_component(major, input, "major")?,
        parse_component(minor, input, "minor")?,
        parse_component(patch, input, "patch")?,
    ))
}

/// Extract the version triple from the contents of `tiledb_version.h`.
///
/// `origin` only feeds error messages.
pub fn parse_version_header(contents: &str, origin: &str) -> Result<(u32, u32, u32), ResolveError> {
    let mut major = None;
    let mut minor = None;
    let mut patch = None;

    for line in contents.lines() {
        let Some(rest) = line.trim().strip_prefix("#define") else {
            continue;
        };
        let mut tokens = rest.split_whitespace();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        match name {
            DEFINE_MAJOR => major = Some(parse_component(value, line, "major")?),
            DEFINE_MINOR => minor = Some(parse_component(value, line, "minor")?),
            DEFINE_PATCH => patch = Some(parse_component(value, line, "patch")?),
            _ => {}
        }
    }

    let missing = |define| ResolveError::MissingDefine {
        origin: origin.to_owned(),
        define,
    };
    Ok((
        major.ok_or_else(|| missing(DEFINE_MAJOR))?,
        minor.ok_or_else(|| missing(DEFINE_MINOR))?,
        patch.ok_or_else(|| missing(DEFINE_PATCH))?,
    ))
}

/// Path of the version header below `include_dir`.
pub fn header_path(include_dir: &Path) -> PathBuf {
    include_dir.join(VERSION_HEADER)
}

/// Read and parse the version header found below `include_dir`.
pub fn read_version_header(include_dir: &Path) -> Result<(u32, u32, u32), ResolveError> {
    let path = header_path(include_dir);
    let contents = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
        path: path.clone(),
        source,
    })?;
    parse_version_header(&contents, &path.display().to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the engine version from build-time variables.
///
/// `lookup` returns the value of a variable, if set. Blank values count as
/// unset. The override wins over the include directory, which wins over
/// [`PINNED`]. Returns the triple and the source tag (`override`, `header` or
/// `pinned`).
pub fn resolve(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<((u32, u32, u32), &'static str), ResolveError> {
    if let Some(raw) = non_blank(lookup(ENV_OVERRIDE)) {
        return Ok((parse_version_text(&raw)?, "override"));
    }
    if let Some(dir) = non_blank(lookup(ENV_INCLUDE_DIR)) {
        return Ok((read_version_header(Path::new(dir.trim()))?, "header"));
    }
    Ok((PINNED, "pinned"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
/* generated */
#ifndef TILEDB_VERSION_H
#define TILEDB_VERSION_H
#define TILEDB_VERSION_MAJOR 2
#define TILEDB_VERSION_MINOR 18
#define TILEDB_VERSION_PATCH 3
#endif
";

    #[test]
    fn parses_plain_and_labelled_text() {
        assert_eq!(parse_version_text("2.18.3").unwrap(), (2, 18, 3));
        assert_eq!(parse_version_text(" libtiledb=2.18.3 ").unwrap(), (2, 18, 3));
        assert_eq!(parse_version_text("0.0.0").unwrap(), (0, 0, 0));
    }

    #[test]
    fn rejects_bad_text() {
        assert!(matches!(parse_version_text(""), Err(ResolveError::Empty)));
        assert!(matches!(parse_version_text("libtiledb="), Err(ResolveError::Empty)));
        assert!(matches!(
            parse_version_text("2.18"),
            Err(ResolveError::Malformed { .. })
        ));
        assert!(matches!(
            parse_version_text("2.18.3.1"),
            Err(ResolveError::Malformed { .. })
        ));
        assert!(matches!(
            parse_version_text("2.x.3"),
            Err(ResolveError::InvalidComponent { component: "minor", .. })
        ));
        assert!(matches!(
            parse_version_text("-1.0.0"),
            Err(ResolveError::InvalidComponent { component: "major", .. })
        ));
        assert!(matches!(
            parse_version_text("+1.0.0"),
            Err(ResolveError::InvalidComponent { component: "major", .. })
        ));
        assert!(matches!(
            parse_version_text("1.0.99999999999"),
            Err(ResolveError::InvalidComponent { component: "patch", .. })
        ));
    }

    #[test]
    fn parses_header_defines() {
        assert_eq!(parse_version_header(HEADER, "inline").unwrap(), (2, 18, 3));
    }

    #[test]
    fn header_missing_define_is_reported() {
        let truncated = HEADER.replace("#define TILEDB_VERSION_PATCH 3\n", "");
        let err = parse_version_header(&truncated, "inline").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingDefine { define: "TILEDB_VERSION_PATCH", .. }
        ));
        assert!(err.to_string().starts_with("inline:"));
    }

    #[test]
    fn header_with_non_numeric_define_fails() {
        let broken = HEADER.replace("MINOR 18", "MINOR eighteen");
        assert!(matches!(
            parse_version_header(&broken, "inline"),
            Err(ResolveError::InvalidComponent { component: "minor", .. })
        ));
    }

    #[test]
    fn reads_header_from_include_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tiledb")).unwrap();
        std::fs::write(header_path(dir.path()), HEADER).unwrap();
        assert_eq!(read_version_header(dir.path()).unwrap(), (2, 18, 3));
    }

    fn include_dir_with(header: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tiledb")).unwrap();
        std::fs::write(header_path(dir.path()), header).unwrap();
        dir
    }

    fn lookup_from<'a>(
        vars: &'a [(&'a str, String)],
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn override_wins_over_header() {
        let dir = include_dir_with(HEADER);
        let vars = [
            (ENV_OVERRIDE, "libtiledb=2.21.1".to_owned()),
            (ENV_INCLUDE_DIR, dir.path().display().to_string()),
        ];
        assert_eq!(resolve(lookup_from(&vars)).unwrap(), ((2, 21, 1), "override"));
    }

    #[test]
    fn blank_override_falls_through_to_header() {
        let dir = include_dir_with(HEADER);
        let vars = [
            (ENV_OVERRIDE, "  ".to_owned()),
            (ENV_INCLUDE_DIR, dir.path().display().to_string()),
        ];
        assert_eq!(resolve(lookup_from(&vars)).unwrap(), ((2, 18, 3), "header"));
    }

    #[test]
    fn header_wins_over_pinned() {
        let dir = include_dir_with(HEADER);
        let vars = [(ENV_INCLUDE_DIR, dir.path().display().to_string())];
        assert_eq!(resolve(lookup_from(&vars)).unwrap(), ((2, 18, 3), "header"));
    }

    #[test]
    fn nothing_set_gives_pinned() {
        assert_eq!(resolve(|_| None).unwrap(), (PINNED, "pinned"));
        let vars = [
            (ENV_OVERRIDE, String::new()),
            (ENV_INCLUDE_DIR, " ".to_owned()),
        ];
        assert_eq!(resolve(lookup_from(&vars)).unwrap(), (PINNED, "pinned"));
    }

    #[test]
    fn malformed_override_is_an_error() {
        let dir = include_dir_with(HEADER);
        let vars = [
            (ENV_OVERRIDE, "2.18".to_owned()),
            (ENV_INCLUDE_DIR, dir.path().display().to_string()),
        ];
        assert!(matches!(
            resolve(lookup_from(&vars)),
            Err(ResolveError::Malformed { .. })
        ));
    }

    #[test]
    fn unreadable_include_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let vars = [(ENV_INCLUDE_DIR, dir.path().display().to_string())];
        assert!(matches!(
            resolve(lookup_from(&vars)),
            Err(ResolveError::Io { .. })
        ));
    }

    #[test]
    fn missing_header_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_version_header(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
        assert!(err.to_string().contains("tiledb_version.h"));
    }
}
