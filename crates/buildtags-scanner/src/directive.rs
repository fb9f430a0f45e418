//! Header line classification.
//!
//! Each line of a file header is matched, in order, against the package
//! clause and the two build-constraint comment forms:
//!
//! ```text
//! //go:build linux && (arm64 || amd64)
//! // +build linux,arm64 windows
//! package main
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace and word classes are ASCII-only: `[\t\n\f\r ]` and `[0-9A-Za-z_]`.

static GO_BUILD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^//[\t\n\f\r ]*go:build[\t\n\f\r ]+(.+)$").expect("Invalid go:build regex")
});

static PLUS_BUILD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^//[\t\n\f\r ]*\+build[\t\n\f\r ]+(.+)$").expect("Invalid +build regex")
});

static PACKAGE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\t\n\f\r ]*package[\t\n\f\r ]+[\p{L}_][0-9A-Za-z_]*")
        .expect("Invalid package regex")
});

/// What a single header line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `//go:build <expr>`
    GoBuild(&'a str),
    /// `// +build <expr>`
    PlusBuild(&'a str),
    /// `package <ident>`; ends the header region
    PackageClause,
    /// Anything else
    Other,
}

impl<'a> Directive<'a> {
    /// Tags carried by this line, in order.
    ///
    /// `go:build` expressions are split on whitespace only, so operators such
    /// as `&&` or `!linux` come through as opaque tokens. `+build` expressions
    /// are split on whitespace and then on commas.
    pub fn tags(&self) -> Vec<String> {
        match self {
            Directive::GoBuild(expr) => expr.split_whitespace().map(str::to_string).collect(),
            Directive::PlusBuild(expr) => expr
                .split_whitespace()
                .flat_map(|chunk| chunk.split(','))
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect(),
            Directive::PackageClause | Directive::Other => Vec::new(),
        }
    }

    pub fn is_package_clause(&self) -> bool {
        matches!(self, Directive::PackageClause)
    }
}

/// Classify one line of a file header.
pub fn classify_line(line: &str) -> Directive<'_> {
    if PACKAGE_CLAUSE.is_match(line) {
        return Directive::PackageClause;
    }

    let trimmed = line.trim();

    if let Some(expr) = capture_expr(&GO_BUILD, trimmed) {
        return Directive::GoBuild(expr);
    }

    if let Some(expr) = capture_expr(&PLUS_BUILD, trimmed) {
        return Directive::PlusBuild(expr);
    }

    Directive::Other
}

fn capture_expr<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
