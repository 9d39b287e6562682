//! Table Emitter.
//!
//! Renders the abstract `(start, end, cidr)` sequence into source text for a
//! target language. Parsing and building never depend on the target syntax.

use crate::error::{Result, TableError};
use crate::models::AnnotatedEntry;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for identifiers accepted as package and variable names.
static IDENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_ident_regex() -> &'static Regex {
    IDENT_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid Regex"))
}

/// Target syntax of the emitted table.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// `var x = [][]uint32{ ... }`, identical to tables the old generator produced.
    #[default]
    Go,
    /// `pub static X: &[(u32, u32)] = &[ ... ];`
    Rust,
    /// Array of `{"start", "end", "cidr"}` objects.
    Json,
}

impl FromStr for TableFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "go" => Ok(TableFormat::Go),
            "rust" | "rs" => Ok(TableFormat::Rust),
            "json" => Ok(TableFormat::Json),
            other => Err(TableError::InvalidConfig(format!(
                "unknown table format '{other}', expected go, rust or json"
            ))),
        }
    }
}

/// Identity of the emitted table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EmitConfig {
    /// Package (or module) named in the header.
    pub package_name: String,
    /// Identifier the table is bound to.
    pub variable_name: String,
    /// Literal type of `start`/`end`. Only 32-bit unsigned, `uint32` or `u32`.
    pub numeric_type: String,
    pub format: TableFormat,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            package_name: "slowIP".to_string(),
            variable_name: "slowIP".to_string(),
            numeric_type: "uint32".to_string(),
            format: TableFormat::Go,
        }
    }
}

impl EmitConfig {
    fn validate(&self) -> Result<()> {
        if !U32_SPELLINGS.contains(&self.numeric_type.as_str()) {
            return Err(TableError::InvalidConfig(format!(
                "numeric_type '{}' is not a 32-bit unsigned type, expected one of {:?}",
                self.numeric_type, U32_SPELLINGS
            )));
        }
        for (what, value) in [
            ("package_name", &self.package_name),
            ("variable_name", &self.variable_name),
        ] {
            if !get_ident_regex().is_match(value) {
                return Err(TableError::InvalidConfig(format!(
                    "{what} '{value}' is not a valid identifier"
                )));
            }
        }
        Ok(())
    }
}

/// Accepted spellings of the table's numeric type. Each target prints its own.
const U32_SPELLINGS: [&str; 2] = ["uint32", "u32"];

/// `slowIP` -> `SLOW_IP`, `slow_ip` -> `SLOW_IP`, `slowIPTable` -> `SLOW_IP_TABLE`.
fn screaming_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// Render `entries` as a table declaration in the configured format.
///
/// Pure: the same entries and config always give the same bytes.
pub fn emit(entries: &[AnnotatedEntry], config: &EmitConfig) -> Result<String> {
    config.validate()?;
    log::debug!(
        "Emitting {} entries as {:?} {}.{}",
        entries.len(),
        config.format,
        config.package_name,
        config.variable_name
    );

    match config.format {
        TableFormat::Go => Ok(emit_go(entries, config)),
        TableFormat::Rust => Ok(emit_rust(entries, config)),
        TableFormat::Json => {
            let mut s = serde_json::to_string_pretty(entries)?;
            s.push('\n');
            Ok(s)
        }
    }
}

fn emit_go(entries: &[AnnotatedEntry], config: &EmitConfig) -> String {
    let mut s = format!(
        "package {}\n\nvar {} = [][]uint32{{\n",
        config.package_name, config.variable_name
    );
    for e in entries {
        s.push_str(&format!(
            "\t{{{}, {}}},     // {}\n",
            e.range.start, e.range.end, e.cidr
        ));
    }
    s.push_str("}\n");
    s
}

fn emit_rust(entries: &[AnnotatedEntry], config: &EmitConfig) -> String {
    let mut s = format!(
        "// {}\n\npub static {}: &[(u32, u32)] = &[\n",
        config.package_name,
        screaming_snake(&config.variable_name)
    );
    for e in entries {
        s.push_str(&format!(
            "    ({}, {}), // {}\n",
            e.range.start, e.range.end, e.cidr
        ));
    }
    s.push_str("];\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::RangeTableBuilder;

    fn sample() -> Vec<AnnotatedEntry> {
        RangeTableBuilder::default()
            .build(&["1.0.1.0/24", "1.0.2.0/23"])
            .unwrap()
    }

    #[test]
    fn test_emit_go() {
        let out = emit(&sample(), &EmitConfig::default()).unwrap();
        assert_eq!(
            out,
            "package slowIP\n\nvar slowIP = [][]uint32{\n\
             \t{16777472, 16777727},     // 1.0.1.0/24\n\
             \t{16777728, 16778239},     // 1.0.2.0/23\n\
             }\n"
        );
    }

    #[test]
    fn test_emit_go_empty() {
        let out = emit(&[], &EmitConfig::default()).unwrap();
        assert_eq!(out, "package slowIP\n\nvar slowIP = [][]uint32{\n}\n");
    }

    #[test]
    fn test_emit_rust() {
        let config = EmitConfig {
            package_name: "slow_ip".to_string(),
            variable_name: "slow_ip".to_string(),
            format: TableFormat::Rust,
            ..Default::default()
        };
        let out = emit(&sample(), &config).unwrap();
        assert_eq!(
            out,
            "// slow_ip\n\n\
             pub static SLOW_IP: &[(u32, u32)] = &[\n\
             \x20   (16777472, 16777727), // 1.0.1.0/24\n\
             \x20   (16777728, 16778239), // 1.0.2.0/23\n\
             ];\n"
        );
    }

    #[test]
    fn test_emit_rust_default_names() {
        let config = EmitConfig {
            format: TableFormat::Rust,
            ..Default::default()
        };
        let out = emit(&[], &config).unwrap();
        assert_eq!(out, "// slowIP\n\npub static SLOW_IP: &[(u32, u32)] = &[\n];\n");
    }

    #[test]
    fn test_screaming_snake() {
        assert_eq!(screaming_snake("slowIP"), "SLOW_IP");
        assert_eq!(screaming_snake("slow_ip"), "SLOW_IP");
        assert_eq!(screaming_snake("slowIPTable"), "SLOW_IP_TABLE");
        assert_eq!(screaming_snake("table2Ranges"), "TABLE2_RANGES");
        assert_eq!(screaming_snake("X"), "X");
    }

    #[test]
    fn test_numeric_type_must_be_u32() {
        for ty in ["int8", "string", "uint64", "int32"] {
            let config = EmitConfig {
                numeric_type: ty.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(emit(&sample(), &config), Err(TableError::InvalidConfig(_))),
                "{ty} should be rejected"
            );
        }
    }

    #[test]
    fn test_numeric_type_u32_spelling_in_go() {
        let config = EmitConfig {
            numeric_type: "u32".to_string(),
            ..Default::default()
        };
        let out = emit(&sample(), &config).unwrap();
        assert!(out.starts_with("package slowIP\n\nvar slowIP = [][]uint32{\n"));
    }

    #[test]
    fn test_emit_json() {
        let config = EmitConfig {
            format: TableFormat::Json,
            ..Default::default()
        };
        let out = emit(&sample(), &config).unwrap();
        let back: Vec<AnnotatedEntry> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_emit_is_deterministic() {
        let config = EmitConfig::default();
        assert_eq!(
            emit(&sample(), &config).unwrap(),
            emit(&sample(), &config).unwrap()
        );
    }

    #[test]
    fn test_emit_rejects_bad_identifier() {
        let config = EmitConfig {
            variable_name: "slow ip".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            emit(&sample(), &config),
            Err(TableError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_table_format_from_str() {
        assert_eq!("GO".parse::<TableFormat>().unwrap(), TableFormat::Go);
        assert_eq!("rs".parse::<TableFormat>().unwrap(), TableFormat::Rust);
        assert_eq!("json".parse::<TableFormat>().unwrap(), TableFormat::Json);
        assert!("yaml".parse::<TableFormat>().is_err());
    }
}
