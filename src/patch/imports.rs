//! `using` directive normalization.
//!
//! Entity files that reference a marker interface need the namespace that
//! declares it. The normalizer appends the directive to the file's leading
//! block of `using` lines, leaving every other line where it was.

use serde::{Deserialize, Serialize};

use super::insertion::LineEnding;

/// Directive declaring the marker interfaces.
pub const DEFAULT_IMPORT: &str = "using CoreApp.Domain.Entities.Common;";

const BOM: char = '\u{FEFF}';

/// When the directive is added.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Only together with at least one inserted member block.
    #[default]
    Atomic,
    /// Whenever a marker is referenced, even if no block could be inserted.
    Eager,
}

/// Adds a `using` directive to files that lack it.
///
/// # Example
///
/// ```
/// use contractfill::patch::ImportNormalizer;
///
/// let normalizer = ImportNormalizer::default();
/// let mut text = "using System;\n\nnamespace App;\n".to_string();
/// assert!(normalizer.ensure(&mut text));
/// assert_eq!(
///     text,
///     "using System;\nusing CoreApp.Domain.Entities.Common;\n\nnamespace App;\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ImportNormalizer {
    declaration: String,
    namespace: String,
}

impl ImportNormalizer {
    /// Create a normalizer for a full directive such as `using Foo.Bar;`.
    pub fn new(declaration: impl Into<String>) -> Self {
        let declaration = declaration.into();
        let namespace = directive_target(&declaration).unwrap_or_default().to_string();
        Self {
            declaration,
            namespace,
        }
    }

    /// Whether the directive, or another directive importing the same
    /// namespace, is already in the text.
    pub fn is_present(&self, text: &str) -> bool {
        if text.contains(&self.declaration) {
            return true;
        }
        leading_imports(text)
            .iter()
            .filter_map(|line| directive_target(line))
            .any(|target| target == self.namespace)
    }

    /// Add the directive if missing. Returns whether the text changed.
    pub fn ensure(&self, text: &mut String) -> bool {
        if self.is_present(text) {
            return false;
        }

        let ending = LineEnding::detect(text);
        let newline = if ending == LineEnding::CrLf { "\r\n" } else { "\n" };

        match leading_imports_end(text) {
            Some(end) if text[..end].ends_with('\n') => {
                text.insert_str(end, &format!("{}{}", self.declaration, newline));
            }
            Some(end) => {
                text.insert_str(end, &format!("{}{}", newline, self.declaration));
            }
            None => {
                let start = if text.starts_with(BOM) { BOM.len_utf8() } else { 0 };
                text.insert_str(start, &format!("{}{}", self.declaration, newline));
            }
        }
        true
    }
}

impl Default for ImportNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORT)
    }
}

/// Whether a line is a `using` directive, as opposed to a `using` statement
/// or declaration inside a method body.
pub fn is_import_line(line: &str) -> bool {
    let trimmed = trim_line(line);
    let trimmed = trimmed.strip_prefix("global ").unwrap_or(trimmed);
    trimmed.starts_with("using ")
        && !trimmed.starts_with("namespace")
        && !trimmed.starts_with("using var ")
        && !trimmed.contains('(')
}

/// Line without surrounding whitespace or a leading byte order mark.
fn trim_line(line: &str) -> &str {
    line.trim().trim_start_matches(BOM).trim_start()
}

/// Namespace a plain directive imports; `None` for `using static`, aliases
/// and non-directives.
fn directive_target(line: &str) -> Option<&str> {
    if !is_import_line(line) {
        return None;
    }
    let trimmed = trim_line(line);
    let rest = trimmed.strip_prefix("global ").unwrap_or(trimmed);
    let rest = rest.strip_prefix("using ")?.trim_start();
    if rest.starts_with("static ") {
        return None;
    }
    let target = rest.trim_end().strip_suffix(';')?.trim();
    if target.contains('=') {
        return None;
    }
    Some(target)
}

/// Lines between the start of the file and the first line that is neither
/// a directive nor blank, a comment or a preprocessor line.
fn header_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n')
        .scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line))
        })
        .take_while(|(_, line)| is_import_line(line) || is_header_filler(line))
}

fn is_header_filler(line: &str) -> bool {
    let trimmed = trim_line(line);
    trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with('#')
}

fn leading_imports(text: &str) -> Vec<&str> {
    header_lines(text)
        .map(|(_, line)| line)
        .filter(|line| is_import_line(line))
        .collect()
}

/// Offset just past the last leading `using` line.
fn leading_imports_end(text: &str) -> Option<usize> {
    header_lines(text)
        .filter(|(_, line)| is_import_line(line))
        .last()
        .map(|(start, line)| start + line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_after_last_leading_directive() {
        let normalizer = ImportNormalizer::default();
        let mut text =
            "using System;\nusing System.ComponentModel.DataAnnotations;\n\nnamespace App.Domain;\n\npublic class A : ISoftDeletableEntity\n{\n}\n"
                .to_string();

        assert!(normalizer.ensure(&mut text));
        assert_eq!(
            text,
            "using System;\nusing System.ComponentModel.DataAnnotations;\nusing CoreApp.Domain.Entities.Common;\n\nnamespace App.Domain;\n\npublic class A : ISoftDeletableEntity\n{\n}\n"
        );
    }

    #[test]
    fn prepends_when_no_directives() {
        let normalizer = ImportNormalizer::default();
        let mut text = "namespace App;\n".to_string();

        assert!(normalizer.ensure(&mut text));
        assert_eq!(text, "using CoreApp.Domain.Entities.Common;\nnamespace App;\n");
    }

    #[test]
    fn leaves_present_directive_alone() {
        let normalizer = ImportNormalizer::default();
        let original = "using CoreApp.Domain.Entities.Common;\nnamespace App;\n";
        let mut text = original.to_string();

        assert!(!normalizer.ensure(&mut text));
        assert_eq!(text, original);
    }

    #[test]
    fn recognizes_equivalent_directive_spelling() {
        let normalizer = ImportNormalizer::default();
        let text = "global using  CoreApp.Domain.Entities.Common ;\nnamespace App;\n";
        assert!(normalizer.is_present(text));
    }

    #[test]
    fn nested_namespace_is_not_the_same_import() {
        let normalizer = ImportNormalizer::default();
        let text = "using CoreApp.Domain.Entities.Common.Enums;\nnamespace App;\n";
        assert!(!normalizer.is_present(text));
    }

    #[test]
    fn using_statements_in_bodies_stay_put() {
        let normalizer = ImportNormalizer::default();
        let mut text = "using System;\nclass A\n{\n    void M()\n    {\n        using (var s = Open())\n        {\n        }\n        using var t = Open();\n    }\n}\n".to_string();

        normalizer.ensure(&mut text);

        assert!(text.starts_with("using System;\nusing CoreApp.Domain.Entities.Common;\nclass A\n"));
        assert!(text.contains("        using (var s = Open())\n"));
        assert!(text.contains("        using var t = Open();\n"));
    }

    #[test]
    fn skips_header_comments_and_pragmas() {
        let normalizer = ImportNormalizer::default();
        let mut text = "// <auto-generated />\n#nullable enable\nusing System;\nnamespace App;\n".to_string();

        normalizer.ensure(&mut text);

        assert_eq!(
            text,
            "// <auto-generated />\n#nullable enable\nusing System;\nusing CoreApp.Domain.Entities.Common;\nnamespace App;\n"
        );
    }

    #[test]
    fn keeps_crlf() {
        let normalizer = ImportNormalizer::default();
        let mut text = "using System;\r\nnamespace App;\r\n".to_string();

        normalizer.ensure(&mut text);

        assert_eq!(
            text,
            "using System;\r\nusing CoreApp.Domain.Entities.Common;\r\nnamespace App;\r\n"
        );
    }

    #[test]
    fn directive_without_trailing_newline() {
        let normalizer = ImportNormalizer::default();
        let mut text = "using System;".to_string();

        normalizer.ensure(&mut text);

        assert_eq!(text, "using System;\nusing CoreApp.Domain.Entities.Common;");
    }

    #[test]
    fn import_line_classification() {
        assert!(is_import_line("using System;"));
        assert!(is_import_line("  global using System.Linq;"));
        assert!(is_import_line("using static System.Math;"));
        assert!(!is_import_line("using (var x = Open())"));
        assert!(!is_import_line("using var x = Open();"));
        assert!(!is_import_line("namespace App;"));
    }

    #[test]
    fn custom_declaration() {
        let normalizer = ImportNormalizer::new("using My.Contracts;");
        assert!(normalizer.is_present("using My.Contracts ;\n"));

        let mut text = "namespace App;\n".to_string();
        normalizer.ensure(&mut text);
        assert_eq!(text, "using My.Contracts;\nnamespace App;\n");
    }

    #[test]
    fn bom_file_keeps_bom_first_and_appends_after_directives() {
        let normalizer = ImportNormalizer::default();
        let mut text = "\u{FEFF}using System;\n\nnamespace App;\n".to_string();

        assert!(normalizer.ensure(&mut text));
        assert_eq!(
            text,
            "\u{FEFF}using System;\nusing CoreApp.Domain.Entities.Common;\n\nnamespace App;\n"
        );
    }

    #[test]
    fn bom_file_without_directives_keeps_bom_first() {
        let normalizer = ImportNormalizer::default();
        let mut text = "\u{FEFF}namespace App;\n".to_string();

        normalizer.ensure(&mut text);
        assert_eq!(
            text,
            "\u{FEFF}using CoreApp.Domain.Entities.Common;\nnamespace App;\n"
        );
    }

    #[test]
    fn bom_does_not_hide_equivalent_directive() {
        let normalizer = ImportNormalizer::default();
        let text = "\u{FEFF}global using CoreApp.Domain.Entities.Common ;\nnamespace App;\n";
        assert!(normalizer.is_present(text));
    }

    #[test]
    fn static_import_is_not_the_namespace() {
        let normalizer = ImportNormalizer::default();
        let mut text = "using static CoreApp.Domain.Entities.Common;\nnamespace App;\n".to_string();

        assert!(!normalizer.is_present(&text));
        assert!(normalizer.ensure(&mut text));
        assert_eq!(
            text,
            "using static CoreApp.Domain.Entities.Common;\nusing CoreApp.Domain.Entities.Common;\nnamespace App;\n"
        );
    }
}
