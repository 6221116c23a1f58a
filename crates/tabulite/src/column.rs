//! Column definitions: name, value type, and rendering flags.
//!
//! Columns are defined once by the caller and borrowed by a
//! [`Table`](crate::Table) for its whole lifetime. They can be built in code
//! or loaded from YAML:
//!
//! ```rust
//! use tabulite::{parse_columns, ColumnFlags, ColumnType};
//!
//! let columns = parse_columns(r#"
//! - name: ID
//!   type: int
//!   flags: [right]
//! - name: STATUS
//!   type: bool
//!   flags: [bold, color]
//! - name: NOTE
//!   type: string
//! "#).unwrap();
//!
//! assert_eq!(columns[1].kind, ColumnType::Bool);
//! assert!(columns[1].flags.contains(ColumnFlags::BOLD | ColumnFlags::EXPLICIT_COLOR));
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::Deserialize;

use crate::error::{Result, TableError};

/// The type of values a column holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Text, copied into the table.
    String,
    /// Floating point, printed with six fractional digits.
    Double,
    /// Printed as `yes` or `no`.
    Bool,
}

impl ColumnType {
    /// Lowercase name used in schemas and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Long => "long",
            ColumnType::String => "string",
            ColumnType::Double => "double",
            ColumnType::Bool => "bool",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(ColumnType::Int),
            "long" => Ok(ColumnType::Long),
            "string" => Ok(ColumnType::String),
            "double" => Ok(ColumnType::Double),
            "bool" => Ok(ColumnType::Bool),
            _ => Err(TableError::UnsupportedColumnType(s.to_string())),
        }
    }
}

/// Converts a numeric type code, in declaration order starting at zero.
impl TryFrom<u8> for ColumnType {
    type Error = TableError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ColumnType::Int),
            1 => Ok(ColumnType::Long),
            2 => Ok(ColumnType::String),
            3 => Ok(ColumnType::Double),
            4 => Ok(ColumnType::Bool),
            other => Err(TableError::UnsupportedColumnType(other.to_string())),
        }
    }
}

bitflags! {
    /// Rendering flags for a column.
    ///
    /// `EXPLICIT_COLOR`, `RGB_COLOR` and `CUSTOM` each require a per-cell
    /// style payload and are mutually exclusive.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ColumnFlags: u8 {
        /// Each cell carries a decorator invoked around its text.
        const CUSTOM = 1;
        /// Pad on the left instead of the right.
        const JUSTIFY_RIGHT = 2;
        /// Wrap cell text in bold.
        const BOLD = 4;
        /// Each cell carries a [`NamedColor`](crate::NamedColor).
        const EXPLICIT_COLOR = 8;
        /// Each cell carries a packed RGB code.
        const RGB_COLOR = 16;
    }
}

impl ColumnFlags {
    /// Flags that each require their own style payload.
    pub const STYLE: ColumnFlags = ColumnFlags::CUSTOM
        .union(ColumnFlags::EXPLICIT_COLOR)
        .union(ColumnFlags::RGB_COLOR);

    /// Flags whose cells carry a color sequence.
    pub const COLORED: ColumnFlags = ColumnFlags::EXPLICIT_COLOR.union(ColumnFlags::RGB_COLOR);

    fn parse_one(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "custom" => Ok(ColumnFlags::CUSTOM),
            "right" => Ok(ColumnFlags::JUSTIFY_RIGHT),
            "bold" => Ok(ColumnFlags::BOLD),
            "color" => Ok(ColumnFlags::EXPLICIT_COLOR),
            "rgb" => Ok(ColumnFlags::RGB_COLOR),
            other => Err(TableError::Schema(format!("unknown column flag '{}'", other))),
        }
    }
}

/// A named, typed column with rendering flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    /// Header text, also the column's minimum width.
    pub name: String,
    /// Type of every value in this column.
    pub kind: ColumnType,
    /// Rendering flags.
    pub flags: ColumnFlags,
}

impl ColumnDef {
    /// Creates a column without flags.
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        ColumnDef {
            name: name.into(),
            kind,
            flags: ColumnFlags::empty(),
        }
    }

    /// Sets the column's flags.
    pub fn flags(mut self, flags: ColumnFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_right_justified(&self) -> bool {
        self.flags.contains(ColumnFlags::JUSTIFY_RIGHT)
    }

    pub fn is_bold(&self) -> bool {
        self.flags.contains(ColumnFlags::BOLD)
    }

    pub fn is_colored(&self) -> bool {
        self.flags.intersects(ColumnFlags::COLORED)
    }

    pub fn is_custom(&self) -> bool {
        self.flags.contains(ColumnFlags::CUSTOM)
    }

    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        if (self.flags & ColumnFlags::STYLE).bits().count_ones() > 1 {
            return Err(TableError::ConflictingStyleFlags { column: index });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawColumn {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    flags: Vec<String>,
}

impl TryFrom<RawColumn> for ColumnDef {
    type Error = TableError;

    fn try_from(raw: RawColumn) -> Result<Self> {
        let kind = raw.kind.parse()?;
        let flags = raw
            .flags
            .iter()
            .map(|f| ColumnFlags::parse_one(f))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .fold(ColumnFlags::empty(), |acc, f| acc | f);
        Ok(ColumnDef {
            name: raw.name,
            kind,
            flags,
        })
    }
}

/// Parses a YAML list of `{ name, type, flags }` column definitions.
///
/// Types are `int`, `long`, `string`, `double`, `bool`; flags are `right`,
/// `bold`, `color`, `rgb`, `custom`.
pub fn parse_columns(yaml: &str) -> Result<Vec<ColumnDef>> {
    let raw: Vec<RawColumn> = serde_yaml::from_str(yaml)?;
    raw.into_iter().map(ColumnDef::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_code() {
        assert_eq!(ColumnType::try_from(0).unwrap(), ColumnType::Int);
        assert_eq!(ColumnType::try_from(4).unwrap(), ColumnType::Bool);
        assert!(matches!(
            ColumnType::try_from(5),
            Err(TableError::UnsupportedColumnType(_))
        ));
    }

    #[test]
    fn test_type_from_name() {
        assert_eq!("Double".parse::<ColumnType>().unwrap(), ColumnType::Double);
        assert!(matches!(
            "float".parse::<ColumnType>(),
            Err(TableError::UnsupportedColumnType(name)) if name == "float"
        ));
    }

    #[test]
    fn test_flag_predicates() {
        let col = ColumnDef::new("X", ColumnType::Int)
            .flags(ColumnFlags::JUSTIFY_RIGHT | ColumnFlags::BOLD | ColumnFlags::RGB_COLOR);
        assert!(col.is_right_justified());
        assert!(col.is_bold());
        assert!(col.is_colored());
        assert!(!col.is_custom());
    }

    #[test]
    fn test_conflicting_style_flags() {
        let col = ColumnDef::new("X", ColumnType::Int)
            .flags(ColumnFlags::EXPLICIT_COLOR | ColumnFlags::CUSTOM);
        assert!(matches!(
            col.validate(3),
            Err(TableError::ConflictingStyleFlags { column: 3 })
        ));

        let ok = ColumnDef::new("Y", ColumnType::Int)
            .flags(ColumnFlags::EXPLICIT_COLOR | ColumnFlags::BOLD | ColumnFlags::JUSTIFY_RIGHT);
        assert!(ok.validate(0).is_ok());
    }

    #[test]
    fn test_parse_columns() {
        let columns = parse_columns(
            r#"
- name: N
  type: int
  flags: [right]
- name: OK
  type: bool
  flags: [color]
- name: HEX
  type: long
  flags: [rgb, bold]
"#,
        )
        .unwrap();

        assert_eq!(columns.len(), 3);
        assert_eq!(
            columns[0],
            ColumnDef::new("N", ColumnType::Int).flags(ColumnFlags::JUSTIFY_RIGHT)
        );
        assert_eq!(columns[1].flags, ColumnFlags::EXPLICIT_COLOR);
        assert_eq!(columns[2].flags, ColumnFlags::RGB_COLOR | ColumnFlags::BOLD);
    }

    #[test]
    fn test_parse_columns_unknown_type() {
        let err = parse_columns("- { name: A, type: decimal }").unwrap_err();
        assert!(matches!(err, TableError::UnsupportedColumnType(_)));
    }

    #[test]
    fn test_parse_columns_unknown_flag() {
        let err = parse_columns("- { name: A, type: int, flags: [italic] }").unwrap_err();
        assert!(matches!(err, TableError::Schema(msg) if msg.contains("italic")));
    }

    #[test]
    fn test_parse_columns_malformed_yaml() {
        let err = parse_columns("name: [unclosed").unwrap_err();
        assert!(matches!(err, TableError::Schema(_)));
    }
}
