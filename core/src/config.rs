//! Reads and writes git config files (`.git/config`).
//!
//! The format is INI-like: a `[section]` header (optionally
//! `[section "subsection"]`) followed by `key = value` lines. Section and key
//! names are case-insensitive; subsection names and values are not.
//!
//! Only the subset of git's syntax needed to carry repository settings is
//! understood. Multi-line values (trailing `\` continuation) and `include`
//! directives are not supported.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reasons why config text could not be parsed. Line numbers are 1-based.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("line {0}: malformed section header")]
    BadSectionHeader(usize),

    #[error("line {0}: entry appears before any section header")]
    EntryOutsideSection(usize),

    #[error("line {0}: invalid key name")]
    BadKey(usize),

    #[error("line {0}: unterminated quoted value")]
    UnterminatedQuote(usize),
}

impl ParseError {
    /// Return the line on which the error was found.
    pub fn line(&self) -> usize {
        match self {
            ParseError::BadSectionHeader(n)
            | ParseError::EntryOutsideSection(n)
            | ParseError::BadKey(n)
            | ParseError::UnterminatedQuote(n) => *n,
        }
    }
}

/// An ordered collection of named sections, each holding string-valued keys.
///
/// A section named `remote "origin"` in the file is addressed as
/// `remote.origin` through this API.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Config {
        Config::default()
    }

    /// The config written into every newly created repository.
    pub fn for_new_repo() -> Config {
        let mut config = Config::new();
        config.set("core", "repositoryformatversion", "0");
        config.set("core", "filemode", "false");
        config.set("core", "bare", "false");
        config
    }

    /// Look up a value. Returns `None` if either the section or the key is absent.
    ///
    /// If a key appears more than once, the last value wins, as it does for git.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.section(section)?;
        let key = key.to_ascii_lowercase();

        section
            .entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, replacing any existing value for the same key.
    /// The section is appended if it doesn't exist yet.
    pub fn set<V: Into<String>>(&mut self, section: &str, key: &str, value: V) {
        let key = key.to_ascii_lowercase();
        let value = value.into();

        let section = self.section_mut(section);
        section.entries.retain(|(k, _)| *k != key);
        section.entries.push((key, value));
    }

    /// Return `true` if a section with this name exists.
    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    /// Iterate over section names in file order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Iterate over the `(key, value)` pairs of one section in file order.
    pub fn entries<'a>(&'a self, section: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.section(section)
            .into_iter()
            .flat_map(|s| s.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    fn section(&self, name: &str) -> Option<&Section> {
        let name = normalize_section_name(name);
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let name = normalize_section_name(name);

        match self.sections.iter().position(|s| s.name == name) {
            Some(n) => &mut self.sections[n],
            None => {
                self.sections.push(Section {
                    name,
                    entries: vec![],
                });
                let n = self.sections.len() - 1;
                &mut self.sections[n]
            }
        }
    }
}

impl FromStr for Config {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Config, ParseError> {
        let mut config = Config::new();
        let mut current: Option<String> = None;

        for (n, line) in text.lines().enumerate() {
            let line_no = n + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = parse_section_header(line).ok_or(ParseError::BadSectionHeader(line_no))?;
                config.section_mut(&name);
                current = Some(name);
                continue;
            }

            let section = match &current {
                Some(section) => section,
                None => return Err(ParseError::EntryOutsideSection(line_no)),
            };

            let (key, value) = match line.find('=') {
                Some(n) => (line[..n].trim(), Some(&line[n + 1..])),
                None => (line, None),
            };

            if !is_valid_key(key) {
                return Err(ParseError::BadKey(line_no));
            }

            let value = match value {
                Some(raw) => parse_value(raw).ok_or(ParseError::UnterminatedQuote(line_no))?,
                // A bare key is shorthand for a true boolean.
                None => "true".to_string(),
            };

            let key = key.to_ascii_lowercase();
            config.section_mut(section).entries.push((key, value));
        }

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            match section.name.find('.') {
                Some(n) => writeln!(
                    f,
                    "[{} \"{}\"]",
                    &section.name[..n],
                    escape(&section.name[n + 1..])
                )?,
                None => writeln!(f, "[{}]", section.name)?,
            }

            for (key, value) in &section.entries {
                writeln!(f, "\t{} = {}", key, format_value(value))?;
            }
        }
        Ok(())
    }
}

// Lower-case the section part of the name but leave any subsection alone.
fn normalize_section_name(name: &str) -> String {
    match name.find('.') {
        Some(n) => format!("{}{}", name[..n].to_ascii_lowercase(), &name[n..]),
        None => name.to_ascii_lowercase(),
    }
}

fn parse_section_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix('[')?;
    let close = find_header_end(rest)?;

    // Only a comment may follow the closing bracket.
    let trailing = rest[close + 1..].trim_start();
    if !(trailing.is_empty() || trailing.starts_with('#') || trailing.starts_with(';')) {
        return None;
    }

    let inner = rest[..close].trim();

    let (name, subsection) = match inner.find(char::is_whitespace) {
        Some(n) => (&inner[..n], Some(inner[n..].trim())),
        None => (inner, None),
    };

    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return None;
    }

    match subsection {
        None => Some(name.to_ascii_lowercase()),
        Some(sub) => {
            let sub = sub.strip_prefix('"')?.strip_suffix('"')?;
            let sub = unescape_subsection(sub)?;
            Some(format!("{}.{}", name.to_ascii_lowercase(), sub))
        }
    }
}

// Byte offset of the `]` that closes a section header, skipping any
// inside a quoted subsection name.
fn find_header_end(rest: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (n, c) in rest.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ']' if !in_quotes => return Some(n),
            _ => {}
        }
    }

    None
}

fn unescape_subsection(sub: &str) -> Option<String> {
    let mut out = String::with_capacity(sub.len());
    let mut chars = sub.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '-'),
        _ => false,
    }
}

// Returns None if a quote is left open. Comments (`#` or `;`) outside
// of quotes end the value.
fn parse_value(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut in_quotes = false;
    let mut chars = raw.trim().chars();

    // Length of `out` after the last character that was quoted or escaped;
    // trailing whitespace beyond that point gets trimmed.
    let mut keep = 0;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                keep = out.len();
            }
            '\\' => {
                let escaped = match chars.next() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some(c) => c,
                    None => break,
                };
                out.push(escaped);
                keep = out.len();
            }
            '#' | ';' if !in_quotes => break,
            c => {
                out.push(c);
                if in_quotes || !c.is_whitespace() {
                    keep = out.len();
                }
            }
        }
    }

    if in_quotes {
        return None;
    }

    out.truncate(keep);
    Some(out)
}

fn format_value(value: &str) -> String {
    let needs_quotes = value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains('#')
        || value.contains(';');

    let escaped = escape(value).replace('\n', "\\n").replace('\t', "\\t");

    if needs_quotes {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
