//! testgen/extract.rs
//!
//! Lightweight per-language function extraction. Heuristic and
//! best-effort: bounded output, duplicates suppressed, silence on
//! anything it cannot read.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Language;

pub const MAX_SIGNATURES_PER_FILE: usize = 10;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    pub name: String,
    pub is_exported: bool,
}

/* ============================================================
   Export heuristics
   ============================================================ */

#[derive(Clone, Copy)]
enum Visibility {
    Exported,
    Private,
    /// Go convention: uppercase first letter means exported.
    UppercaseIsExported,
    /// Python/Ruby convention: leading underscore means private.
    UnderscoreIsPrivate,
}

fn is_exported(vis: Visibility, name: &str) -> bool {
    match vis {
        Visibility::Exported => true,
        Visibility::Private => false,
        Visibility::UppercaseIsExported => {
            name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        }
        Visibility::UnderscoreIsPrivate => !name.starts_with('_'),
    }
}

/* ============================================================
   Declaration patterns
   ============================================================ */

lazy_static! {
    static ref JS_EXPORT_FN: Regex =
        Regex::new(r"export\s+(?:default\s+)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)")
            .unwrap();
    static ref JS_EXPORT_ARROW: Regex =
        Regex::new(r"export\s+const\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s*)?\(").unwrap();
    static ref JS_COMMONJS: Regex =
        Regex::new(r"(?:module\.)?exports\.([A-Za-z_$][\w$]*)\s*=").unwrap();
    static ref JS_PLAIN_FN: Regex =
        Regex::new(r"(?m)^\s*(?:async\s+)?function\s+([A-Za-z_$][\w$]*)").unwrap();
    static ref JS_PLAIN_ARROW: Regex =
        Regex::new(r"(?m)^\s*const\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s*)?\([^)\n]*\)\s*=>")
            .unwrap();

    static ref PY_TOP_DEF: Regex =
        Regex::new(r"(?m)^(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap();
    static ref PY_METHOD: Regex =
        Regex::new(r"(?m)^[ \t]+(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap();

    static ref RUST_PUB_FN: Regex =
        Regex::new(r"(?m)^\s*pub(?:\([^)]*\))?\s+(?:async\s+)?fn\s+([a-z_]\w*)").unwrap();
    static ref RUST_FN: Regex =
        Regex::new(r"(?m)^\s*(?:async\s+)?fn\s+([a-z_]\w*)").unwrap();

    static ref GO_FUNC: Regex =
        Regex::new(r"(?m)^func\s+(?:\([^)]+\)\s*)?([A-Za-z_]\w*)\s*\(").unwrap();

    static ref JAVA_METHOD: Regex = Regex::new(
        r"(?m)^\s*(?:public|protected)\s+(?:static\s+)?[\w<>\[\],\s]+?\s(\w+)\s*\("
    )
    .unwrap();

    static ref RUBY_DEF: Regex =
        Regex::new(r"(?m)^\s*def\s+(?:self\.)?([a-z_]\w*[?!]?)").unwrap();

    static ref PHP_FUNCTION: Regex =
        Regex::new(r"(?m)^\s*(?:public\s+|static\s+)*function\s+([A-Za-z_]\w*)\s*\(").unwrap();
}

// Guard against regex matches on control-flow keywords.
const KEYWORD_BLACKLIST: &[&str] = &[
    "if", "for", "while", "switch", "return", "new", "catch", "function", "match",
];

/* ============================================================
   Public API
   ============================================================ */

/// Extract declared function names from file content. Unknown or
/// non-code languages yield an empty list, never an error.
pub fn extract_signatures(language: Language, content: &str) -> Vec<Signature> {
    let strategies: Vec<(&Regex, Visibility)> = match language {
        Language::JavaScript | Language::TypeScript => vec![
            (&*JS_EXPORT_FN, Visibility::Exported),
            (&*JS_EXPORT_ARROW, Visibility::Exported),
            (&*JS_COMMONJS, Visibility::Exported),
            (&*JS_PLAIN_FN, Visibility::Private),
            (&*JS_PLAIN_ARROW, Visibility::Private),
        ],
        Language::Python => vec![
            (&*PY_TOP_DEF, Visibility::UnderscoreIsPrivate),
            (&*PY_METHOD, Visibility::Private),
        ],
        Language::Rust => vec![
            (&*RUST_PUB_FN, Visibility::Exported),
            (&*RUST_FN, Visibility::Private),
        ],
        Language::Go => vec![(&*GO_FUNC, Visibility::UppercaseIsExported)],
        Language::Java => vec![(&*JAVA_METHOD, Visibility::Exported)],
        Language::Ruby => vec![(&*RUBY_DEF, Visibility::UnderscoreIsPrivate)],
        Language::Php => vec![(&*PHP_FUNCTION, Visibility::Exported)],
        _ => return Vec::new(),
    };

    let mut out: Vec<Signature> = Vec::new();

    // Exported-first pattern order, so an exported sighting of a name
    // wins over a later private one.
    for (re, vis) in &strategies {
        for cap in re.captures_iter(content) {
            let name = match cap.get(1) {
                Some(m) => m.as_str().to_string(),
                None => continue,
            };

            if KEYWORD_BLACKLIST.contains(&name.as_str()) {
                continue;
            }
            if name.starts_with("__") {
                continue; // dunder noise
            }
            if out.iter().any(|s| s.name == name) {
                continue;
            }

            let exported = is_exported(*vis, &name);
            out.push(Signature { name, is_exported: exported });

            if out.len() >= MAX_SIGNATURES_PER_FILE {
                return out;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn javascript_exports_detected() {
        let src = indoc! {r#"
            export function add(a, b) { return a + b; }
            export const mul = (a, b) => a * b;
            function helper() {}
        "#};
        let sigs = extract_signatures(Language::JavaScript, src);

        assert_eq!(sigs.len(), 3);
        assert!(sigs.iter().any(|s| s.name == "add" && s.is_exported));
        assert!(sigs.iter().any(|s| s.name == "mul" && s.is_exported));
        assert!(sigs.iter().any(|s| s.name == "helper" && !s.is_exported));
    }

    #[test]
    fn python_underscore_means_private() {
        let src = indoc! {r#"
            def load(path):
                pass

            def _slurp(path):
                pass
        "#};
        let sigs = extract_signatures(Language::Python, src);
        assert!(sigs.iter().any(|s| s.name == "load" && s.is_exported));
        assert!(sigs.iter().any(|s| s.name == "_slurp" && !s.is_exported));
    }

    #[test]
    fn rust_pub_fn_is_exported() {
        let src = "pub fn parse(input: &str) -> bool { true }\nfn inner() {}\n";
        let sigs = extract_signatures(Language::Rust, src);
        assert!(sigs.iter().any(|s| s.name == "parse" && s.is_exported));
        assert!(sigs.iter().any(|s| s.name == "inner" && !s.is_exported));
    }

    #[test]
    fn go_uppercase_is_exported() {
        let src = "func Sum(a int, b int) int { return a + b }\nfunc helper() {}\n";
        let sigs = extract_signatures(Language::Go, src);
        assert!(sigs.iter().any(|s| s.name == "Sum" && s.is_exported));
        assert!(sigs.iter().any(|s| s.name == "helper" && !s.is_exported));
    }

    #[test]
    fn duplicates_are_suppressed() {
        let src = "export function twice() {}\nfunction twice() {}\n";
        let sigs = extract_signatures(Language::JavaScript, src);
        assert_eq!(sigs.iter().filter(|s| s.name == "twice").count(), 1);
        assert!(sigs[0].is_exported);
    }

    #[test]
    fn output_is_capped() {
        let src: String = (0..50)
            .map(|i| format!("export function f{i}() {{}}\n"))
            .collect();
        let sigs = extract_signatures(Language::JavaScript, &src);
        assert_eq!(sigs.len(), MAX_SIGNATURES_PER_FILE);
    }

    #[test]
    fn unknown_language_yields_nothing() {
        assert!(extract_signatures(Language::Markdown, "# heading").is_empty());
    }
}
