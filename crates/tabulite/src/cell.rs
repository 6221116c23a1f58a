//! Cell values, per-cell style payloads, and the cell encoder.
//!
//! Each cell of a row is supplied as a [`CellArg`]: a typed [`Value`] plus a
//! [`Style`] payload. Which payload a cell needs is fixed by its column's
//! flags:
//!
//! | Column flag | Required style |
//! |-------------|----------------|
//! | `EXPLICIT_COLOR` | [`Style::Color`] |
//! | `RGB_COLOR` | [`Style::Rgb`] |
//! | `CUSTOM` | [`Style::Custom`] |
//! | none of the above | [`Style::Plain`] |
//!
//! Encoding turns the argument into a finished [`Cell`]: its display text and
//! its style. Color sequences are looked up by the renderer, so whether color
//! is on is decided once per render.

use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::column::{ColumnDef, ColumnFlags, ColumnType};
use crate::error::{Result, TableError};
use crate::palette::NamedColor;

/// Shown in place of a cell whose value is [`Value::Missing`].
pub const EMPTY_PLACEHOLDER: &str = "<empty>";

/// A single typed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Str(String),
    Double(f64),
    Bool(bool),
    /// No value; accepted by every column type.
    Missing,
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Str(_) => "string",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Missing => "missing",
        }
    }

    fn fits(&self, kind: ColumnType) -> bool {
        matches!(
            (self, kind),
            (Value::Missing, _)
                | (Value::Int(_), ColumnType::Int)
                | (Value::Long(_), ColumnType::Long)
                | (Value::Str(_), ColumnType::String)
                | (Value::Double(_), ColumnType::Double)
                | (Value::Bool(_), ColumnType::Bool)
        )
    }

    fn into_text(self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Long(v) => Some(v.to_string()),
            Value::Str(s) => Some(s),
            Value::Double(v) => Some(format!("{:.6}", v)),
            Value::Bool(true) => Some("yes".to_string()),
            Value::Bool(false) => Some("no".to_string()),
            Value::Missing => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// Which side of the cell text a decorator is called for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

type DecorateFn = dyn Fn(Phase, &mut dyn Write) -> io::Result<()>;

/// Caller-supplied hooks written around a cell's text.
///
/// The closure receives the phase and the output stream the table is being
/// rendered to. Its output does not count toward column width.
///
/// ```rust
/// use tabulite::{Decorator, Phase};
///
/// let blink = Decorator::new(|phase, out| match phase {
///     Phase::Start => out.write_all(b"\x1b[5m"),
///     Phase::End => out.write_all(b"\x1b[25m"),
/// });
/// ```
#[derive(Clone)]
pub struct Decorator(Rc<DecorateFn>);

impl Decorator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Phase, &mut dyn Write) -> io::Result<()> + 'static,
    {
        Decorator(Rc::new(f))
    }

    /// Invokes the decorator for one phase.
    pub fn call(&self, phase: Phase, out: &mut dyn Write) -> io::Result<()> {
        (self.0)(phase, out)
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Decorator(..)")
    }
}

/// Per-cell style payload.
#[derive(Clone, Debug, Default)]
pub enum Style {
    #[default]
    Plain,
    Color(NamedColor),
    /// Packed RGB code, see [`rgb_channels`](crate::rgb_channels).
    Rgb(u64),
    Custom(Decorator),
}

impl Style {
    fn kind(&self) -> StyleKind {
        match self {
            Style::Plain => StyleKind::Plain,
            Style::Color(_) => StyleKind::Color,
            Style::Rgb(_) => StyleKind::Rgb,
            Style::Custom(_) => StyleKind::Custom,
        }
    }
}

/// The payload-free shape of a [`Style`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StyleKind {
    Plain,
    Color,
    Rgb,
    Custom,
}

impl StyleKind {
    fn required_by(flags: ColumnFlags) -> Self {
        if flags.contains(ColumnFlags::EXPLICIT_COLOR) {
            StyleKind::Color
        } else if flags.contains(ColumnFlags::RGB_COLOR) {
            StyleKind::Rgb
        } else if flags.contains(ColumnFlags::CUSTOM) {
            StyleKind::Custom
        } else {
            StyleKind::Plain
        }
    }

    fn name(self) -> &'static str {
        match self {
            StyleKind::Plain => "plain",
            StyleKind::Color => "color",
            StyleKind::Rgb => "rgb",
            StyleKind::Custom => "custom",
        }
    }
}

/// One cell's worth of row input: a value and its style payload.
#[derive(Clone, Debug)]
pub struct CellArg {
    pub value: Value,
    pub style: Style,
}

impl CellArg {
    /// A value for a column without style flags.
    pub fn plain(value: impl Into<Value>) -> Self {
        CellArg {
            value: value.into(),
            style: Style::Plain,
        }
    }

    /// A value for an `EXPLICIT_COLOR` column.
    pub fn colored(color: NamedColor, value: impl Into<Value>) -> Self {
        CellArg {
            value: value.into(),
            style: Style::Color(color),
        }
    }

    /// A value for an `RGB_COLOR` column.
    pub fn rgb(code: u64, value: impl Into<Value>) -> Self {
        CellArg {
            value: value.into(),
            style: Style::Rgb(code),
        }
    }

    /// A value for a `CUSTOM` column.
    pub fn custom(decorator: Decorator, value: impl Into<Value>) -> Self {
        CellArg {
            value: value.into(),
            style: Style::Custom(decorator),
        }
    }
}

macro_rules! plain_cell_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellArg {
                fn from(v: $ty) -> Self {
                    CellArg::plain(v)
                }
            }
        )*
    };
}

plain_cell_from!(i32, i64, &str, String, f64, bool, Value);

/// An encoded cell: display text plus the style the renderer wraps it with.
#[derive(Clone, Debug)]
pub struct Cell {
    text: Option<String>,
    style: Style,
}

impl Cell {
    /// The encoded text, `None` for a missing value.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The text as printed, with the placeholder for a missing value.
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or(EMPTY_PLACEHOLDER)
    }

    /// Width of the printed text in bytes.
    pub fn width(&self) -> usize {
        self.display_text().len()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn decorator(&self) -> Option<&Decorator> {
        match &self.style {
            Style::Custom(decorator) => Some(decorator),
            _ => None,
        }
    }
}

/// Encodes one cell argument against its column.
pub(crate) fn encode(index: usize, column: &ColumnDef, arg: CellArg) -> Result<Cell> {
    let required = StyleKind::required_by(column.flags);
    let actual = arg.style.kind();
    if actual != required {
        return Err(TableError::StyleMismatch {
            column: index,
            expected: required.name(),
            actual: actual.name(),
        });
    }
    if !arg.value.fits(column.kind) {
        return Err(TableError::TypeMismatch {
            column: index,
            expected: column.kind.name(),
            actual: arg.value.type_name(),
        });
    }

    Ok(Cell {
        text: arg.value.into_text(),
        style: arg.style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_plain(kind: ColumnType, value: impl Into<Value>) -> Result<Cell> {
        encode(0, &ColumnDef::new("C", kind), CellArg::plain(value))
    }

    #[test]
    fn test_int_and_long_text() {
        assert_eq!(encode_plain(ColumnType::Int, -42).unwrap().text(), Some("-42"));
        assert_eq!(
            encode_plain(ColumnType::Long, i64::MAX).unwrap().text(),
            Some("9223372036854775807")
        );
    }

    #[test]
    fn test_double_uses_six_decimals() {
        let cell = encode_plain(ColumnType::Double, 2.5).unwrap();
        assert_eq!(cell.text(), Some("2.500000"));
        assert_eq!(cell.width(), 8);
    }

    #[test]
    fn test_bool_text() {
        let yes = encode_plain(ColumnType::Bool, true).unwrap();
        let no = encode_plain(ColumnType::Bool, false).unwrap();
        assert_eq!((yes.text(), yes.width()), (Some("yes"), 3));
        assert_eq!((no.text(), no.width()), (Some("no"), 2));
    }

    #[test]
    fn test_string_is_copied() {
        let source = String::from("hello");
        let cell = encode_plain(ColumnType::String, source.as_str()).unwrap();
        assert_eq!(cell.text(), Some("hello"));
        assert_eq!(source, "hello");
    }

    #[test]
    fn test_missing_value_uses_placeholder() {
        let cell = encode_plain(ColumnType::Int, None::<i32>).unwrap();
        assert_eq!(cell.text(), None);
        assert_eq!(cell.display_text(), "<empty>");
        assert_eq!(cell.width(), 7);
    }

    #[test]
    fn test_type_mismatch() {
        let err = encode_plain(ColumnType::Int, "nope").unwrap_err();
        assert!(matches!(
            err,
            TableError::TypeMismatch {
                expected: "int",
                actual: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_style_mismatch() {
        let column = ColumnDef::new("C", ColumnType::Bool).flags(ColumnFlags::EXPLICIT_COLOR);
        let err = encode(4, &column, CellArg::plain(true)).unwrap_err();
        assert!(matches!(
            err,
            TableError::StyleMismatch {
                column: 4,
                expected: "color",
                actual: "plain",
            }
        ));
    }

    #[test]
    fn test_style_kind_follows_flag_precedence() {
        assert_eq!(StyleKind::required_by(ColumnFlags::empty()), StyleKind::Plain);
        assert_eq!(
            StyleKind::required_by(ColumnFlags::RGB_COLOR | ColumnFlags::BOLD),
            StyleKind::Rgb
        );
        assert_eq!(
            StyleKind::required_by(ColumnFlags::EXPLICIT_COLOR | ColumnFlags::CUSTOM),
            StyleKind::Color
        );
        assert_eq!(StyleKind::required_by(ColumnFlags::CUSTOM), StyleKind::Custom);
    }

    #[test]
    fn test_rgb_style_mismatch_names_kinds() {
        let column = ColumnDef::new("C", ColumnType::Int).flags(ColumnFlags::RGB_COLOR);
        let err = encode(1, &column, CellArg::colored(NamedColor::Red, 3)).unwrap_err();
        assert!(matches!(
            err,
            TableError::StyleMismatch {
                column: 1,
                expected: "rgb",
                actual: "color",
            }
        ));
    }

    #[test]
    fn test_color_intent_is_kept_until_render() {
        let named = ColumnDef::new("C", ColumnType::Bool).flags(ColumnFlags::EXPLICIT_COLOR);
        let cell = encode(0, &named, CellArg::colored(NamedColor::Green, true)).unwrap();
        assert!(matches!(cell.style(), Style::Color(NamedColor::Green)));

        let rgb = ColumnDef::new("C", ColumnType::Int).flags(ColumnFlags::RGB_COLOR);
        let cell = encode(0, &rgb, CellArg::rgb(0xFF00_8000, 7)).unwrap();
        assert!(matches!(cell.style(), Style::Rgb(0xFF00_8000)));
    }

    #[test]
    fn test_custom_cell_keeps_decorator() {
        let column = ColumnDef::new("C", ColumnType::Long).flags(ColumnFlags::CUSTOM);
        let decorator = Decorator::new(|_, _| Ok(()));
        let cell = encode(0, &column, CellArg::custom(decorator, 42i64)).unwrap();
        assert!(cell.decorator().is_some());
        assert!(matches!(cell.style(), Style::Custom(_)));
        assert_eq!(cell.text(), Some("42"));
    }

    #[test]
    fn test_decorator_writes_to_stream() {
        let decorator = Decorator::new(|phase, out| match phase {
            Phase::Start => out.write_all(b"<"),
            Phase::End => out.write_all(b">"),
        });
        let mut buf = Vec::new();
        decorator.call(Phase::Start, &mut buf).unwrap();
        decorator.call(Phase::End, &mut buf).unwrap();
        assert_eq!(buf, b"<>");
    }
}
