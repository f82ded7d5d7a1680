//! String properties that override the compiled-in service configuration.
//!
//! Properties come from an optional `.properties` file and from
//! environment variables named like the recognized keys behind the
//! `SIGNAL_CLI_` prefix, the environment taking precedence.

use std::{
    collections::BTreeMap,
    fs,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use signal_configuration::PropertyKeys;

use crate::PropertiesError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// File overrides, then environment overrides
    pub fn load(file: Option<&Path>) -> Result<Self, PropertiesError> {
        let mut properties = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        properties.extend(Self::from_env());
        Ok(properties)
    }

    pub fn from_file(path: &Path) -> Result<Self, PropertiesError> {
        let file = fs::File::open(path).map_err(|source| PropertiesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let properties = Self::parse(file)?;
        tracing::debug!(path = %path.display(), count = properties.len(), "loaded properties file");
        Ok(properties)
    }

    /// Recognized keys found in the process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Keeps `SIGNAL_CLI_<KEY>` variables whose key is recognized, without the prefix
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let properties: Self = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let key = name.strip_prefix(PropertyKeys::ENV_PREFIX)?;
                PropertyKeys::ALL
                    .into_iter()
                    .find(|known| *known == key)
                    .map(|known| (known, value))
            })
            .collect();
        if !properties.is_empty() {
            tracing::info!(
                keys = ?properties.0.keys().collect::<Vec<_>>(),
                "service properties overridden from environment"
            );
        }
        properties
    }

    /// Parses the line oriented `.properties` format.
    ///
    /// The key ends at the first unescaped `=`, `:` or whitespace, so
    /// `key=value`, `key: value` and `key value` are equivalent. `#` and `!`
    /// start a comment line, a trailing `\` continues the entry on the next
    /// line, and `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` are unescaped
    /// in keys and values. A line with only a key has an empty value.
    pub fn parse(reader: impl Read) -> Result<Self, PropertiesError> {
        let mut properties = Self::default();
        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next() {
            let line = line?;
            let mut entry = line.trim_start().to_string();
            if entry.is_empty() || entry.starts_with(['#', '!']) {
                continue;
            }
            while continues(&entry) {
                entry.pop();
                match lines.next() {
                    Some(next) => entry.push_str(next?.trim_start()),
                    None => break,
                }
            }
            let (key, value) = split_entry(&entry);
            properties.insert(unescape(key)?, unescape(value)?);
        }
        Ok(properties)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const BLANKS: [char; 3] = [' ', '\t', '\x0c'];

/// An odd number of trailing backslashes escapes the line break
fn continues(entry: &str) -> bool {
    entry.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(entry: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut end = entry.len();
    for (i, c) in entry.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                end = i;
                break;
            }
            c if BLANKS.contains(&c) => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    let rest = entry[end..].trim_start_matches(BLANKS);
    let rest = rest
        .strip_prefix(['=', ':'])
        .unwrap_or(rest)
        .trim_start_matches(BLANKS);
    (&entry[..end], rest)
}

fn unescape(raw: &str) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| PropertiesError::MalformedEscape(raw.to_string()))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Extend<(String, String)> for Properties {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Properties {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
