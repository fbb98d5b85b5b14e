// Named rule sets: archive loading, lookup and writing.

use std::path::Path;

use hashbrown::HashMap;

use crate::automaton::{Automaton, Fst};
use crate::compose;
use crate::format::{self, ArchiveHeader, HEADER_SIZE};
use crate::rule::Rule;
use crate::{FarError, RuleEngine};

/// A loaded archive of named rewrite rules.
///
/// Rules are read once and then only borrowed, so a single `RuleSet` can
/// serve any number of rewrites.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: HashMap<String, Rule>,
}

impl RuleSet {
    /// Read and parse the archive at `path`.
    pub fn load(path: &Path) -> Result<Self, FarError> {
        let data = std::fs::read(path).map_err(|source| FarError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules = Self::from_bytes(&data)?;
        tracing::debug!(
            path = %path.display(),
            rules = rules.len(),
            bytes = data.len(),
            "loaded rule archive"
        );
        Ok(rules)
    }

    /// Parse an archive held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FarError> {
        let header = format::parse_header(data)?;
        let mut rules = HashMap::with_capacity(header.rule_count as usize);
        let mut pos = HEADER_SIZE;

        for _ in 0..header.rule_count {
            let name_start = pos;
            while pos < data.len() && data[pos] != 0 {
                pos += 1;
            }
            if pos >= data.len() {
                return Err(FarError::TooShort {
                    expected: pos + 1,
                    actual: data.len(),
                });
            }
            let name = std::str::from_utf8(&data[name_start..pos])
                .ok()
                .filter(|name| !name.is_empty())
                .ok_or(FarError::InvalidRuleName { offset: name_start })?
                .to_string();
            pos = format::align4(pos + 1); // skip null terminator

            let (rule, end) = Rule::from_bytes_at(&name, data, pos)?;
            pos = end;

            if rules.contains_key(&name) {
                return Err(FarError::DuplicateRule(name));
            }
            tracing::trace!(rule = %name, states = rule.num_states(), "parsed rule");
            rules.insert(name, rule);
        }

        Ok(Self { rules })
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// All rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn rule_or_warn(&self, name: &str) -> Option<&Rule> {
        let rule = self.get(name);
        if rule.is_none() {
            tracing::warn!(rule = %name, "no such rule in archive");
        }
        rule
    }
}

impl RuleEngine for RuleSet {
    fn rewrite_bytes(&self, rule: &str, input: &[u8]) -> Option<Vec<u8>> {
        let rule = self.rule_or_warn(rule)?;
        compose::shortest_rewrite(&Automaton::linear(input), rule)
    }

    fn rewrite_automaton(&self, rule: &str, input: &Automaton) -> Option<Vec<u8>> {
        let rule = self.rule_or_warn(rule)?;
        compose::shortest_rewrite(input, rule)
    }
}

/// Writes rules into the archive format read by [`RuleSet`].
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    rules: Vec<(String, Rule)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `fst` and add it under `name`.
    ///
    /// Names must be non-empty, contain no NUL byte, and be unique.
    pub fn add_rule(&mut self, name: &str, fst: &Automaton) -> Result<&mut Self, FarError> {
        if name.is_empty() || name.contains('\0') {
            return Err(FarError::InvalidRuleName { offset: 0 });
        }
        if self.rules.iter().any(|(existing, _)| existing == name) {
            return Err(FarError::DuplicateRule(name.to_string()));
        }
        let rule = Rule::from_automaton(fst);
        rule.validate(name)?;
        self.rules.push((name.to_string(), rule));
        Ok(self)
    }

    /// Serialize all added rules.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        format::write_header(
            &mut out,
            &ArchiveHeader {
                rule_count: self.rules.len() as u32,
            },
        );
        for (name, rule) in &self.rules {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
            out.resize(format::align4(out.len()), 0);
            rule.write_to(&mut out);
        }
        out
    }

    /// Serialize all added rules to a file.
    pub fn write_to(&self, path: &Path) -> Result<(), FarError> {
        std::fs::write(path, self.to_bytes()).map_err(|source| FarError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
