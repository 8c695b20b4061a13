//! Fixture loading and management.

use std::borrow::Cow;
use std::path::Path;

use anyfmt_core::Value;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A typed argument as written in fixture JSON, e.g.
/// `{"kind": "i32", "value": -1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FixtureArg {
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    LongDouble(f64),
    Str(String),
    Size(usize),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    #[must_use]
    pub fn to_value(&self) -> Value<'_> {
        match self {
            Self::Bool(v) => Value::Bool(*v),
            Self::Char(v) => Value::Char(*v),
            Self::I8(v) => Value::I8(*v),
            Self::U8(v) => Value::U8(*v),
            Self::I16(v) => Value::I16(*v),
            Self::U16(v) => Value::U16(*v),
            Self::I32(v) => Value::I32(*v),
            Self::U32(v) => Value::U32(*v),
            Self::I64(v) => Value::I64(*v),
            Self::U64(v) => Value::U64(*v),
            Self::F32(v) => Value::F32(*v),
            Self::F64(v) => Value::F64(*v),
            Self::LongDouble(v) => Value::LongDouble(*v),
            Self::Str(s) => Value::Str(Cow::Borrowed(s)),
            Self::Size(v) => Value::Size(*v),
        }
    }

    /// Parse a command-line literal of the form `kind:value`, e.g.
    /// `i32:-1`, `str:hello`, `char:x`, `f64:1.5`.
    pub fn parse_literal(literal: &str) -> Result<Self, HarnessError> {
        let bad = |reason: String| HarnessError::BadArgument {
            literal: literal.to_string(),
            reason,
        };
        let (kind, raw) = literal
            .split_once(':')
            .ok_or_else(|| bad("expected kind:value".to_string()))?;

        macro_rules! num {
            ($variant:ident) => {
                raw.parse()
                    .map(Self::$variant)
                    .map_err(|e| bad(format!("{e}")))
            };
        }

        match kind {
            "bool" => num!(Bool),
            "char" => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(bad("char needs exactly one character".to_string())),
                }
            }
            "i8" => num!(I8),
            "u8" => num!(U8),
            "i16" => num!(I16),
            "u16" => num!(U16),
            "i32" => num!(I32),
            "u32" => num!(U32),
            "i64" => num!(I64),
            "u64" => num!(U64),
            "f32" => num!(F32),
            "f64" => num!(F64),
            "long_double" => num!(LongDouble),
            "str" => Ok(Self::Str(raw.to_string())),
            "size" => num!(Size),
            other => Err(bad(format!("unknown kind '{other}'"))),
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Template under test.
    pub template: String,
    /// Arguments, in consumption order.
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Expected rendering (ignored when `expected_error` is set).
    #[serde(default)]
    pub expected_output: String,
    /// Expected error code (`type_mismatch`, `argument_underflow`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
    /// `legacy`, `strict` or `both`.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    String::from("both")
}

impl FixtureCase {
    /// The string a run must produce: the rendering, or `error:<code>`.
    #[must_use]
    pub fn expectation(&self) -> String {
        match &self.expected_error {
            Some(code) => format!("error:{code}"),
            None => self.expected_output.clone(),
        }
    }
}

/// A collection of fixture cases for one conversion family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name (e.g. `integer`, `float`).
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Load every `*.json` set in `dir`, sorted by file name.
    ///
    /// Unreadable files are returned alongside the loaded sets so the
    /// caller can report them.
    pub fn load_dir(dir: &Path) -> Result<(Vec<Self>, Vec<(String, HarnessError)>), HarnessError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(HarnessError::NoFixtures(dir.to_path_buf()));
        }

        let mut sets = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            match Self::from_file(&path) {
                Ok(set) => sets.push(set),
                Err(err) => skipped.push((path.display().to_string(), err)),
            }
        }
        Ok((sets, skipped))
    }
}
