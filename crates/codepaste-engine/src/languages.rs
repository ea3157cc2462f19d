use crate::collab::LanguageResolver;

/// Offline [`LanguageResolver`] backed by a fixed table of common languages.
pub struct BuiltinLanguages;

/// (display name, extensions)
const LANGUAGES: &[(&str, &[&str])] = &[
    ("Rust", &["rs"]),
    ("Python", &["py", "pyw"]),
    ("JavaScript", &["js", "mjs", "cjs"]),
    ("TypeScript", &["ts", "tsx"]),
    ("Go", &["go"]),
    ("Java", &["java"]),
    ("C", &["c", "h"]),
    ("C++", &["cpp", "cc", "cxx", "hpp", "hh", "hxx"]),
    ("C#", &["cs"]),
    ("D", &["d"]),
    ("Ruby", &["rb"]),
    ("Swift", &["swift"]),
    ("Kotlin", &["kt", "kts"]),
    ("Shell", &["sh", "bash", "zsh"]),
    ("JSON", &["json"]),
    ("TOML", &["toml"]),
    ("YAML", &["yml", "yaml"]),
    ("Markdown", &["md"]),
    ("Plain Text", &["txt"]),
];

/// Alternative names that are not extensions.
const ALIASES: &[(&str, &str)] = &[
    ("csharp", "C#"),
    ("cplusplus", "C++"),
    ("golang", "Go"),
    ("shell", "Shell"),
    ("text", "Plain Text"),
];

impl LanguageResolver for BuiltinLanguages {
    fn by_extension(&self, extension: &str) -> Option<String> {
        let ext = extension.to_ascii_lowercase();
        LANGUAGES
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(name, _)| name.to_string())
    }

    fn by_name(&self, name: &str) -> Option<String> {
        let name = name.trim();
        LANGUAGES
            .iter()
            .map(|(display, _)| *display)
            .find(|display| display.eq_ignore_ascii_case(name))
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
                    .map(|(_, display)| *display)
            })
            .map(str::to_string)
    }
}
