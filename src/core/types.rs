use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Colour as delivered by the colour picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = String;

    /// Accepts `#rrggbb`, `#rrggbbaa` and a handful of CSS colour names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| format!("Invalid hex colour: {s}"))
            };
            return match hex.len() {
                6 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
                8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
                _ => Err(format!("Invalid hex colour: {s}")),
            };
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::new(255, 255, 255, 255)),
            "red" => Ok(Self::new(255, 0, 0, 255)),
            "green" => Ok(Self::new(0, 128, 0, 255)),
            "blue" => Ok(Self::new(0, 0, 255, 255)),
            "transparent" => Ok(Self::new(0, 0, 0, 0)),
            _ => Err(format!("Unknown colour: {s}")),
        }
    }
}

/// Comparison operator used by a condition bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolCode {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl SymbolCode {
    /// Operator as shown in the symbol picker
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
        }
    }

    /// Parse either the wire code (`GREATER_EQUAL`) or the displayed operator (`>=`).
    pub fn parse_input(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::iter()
            .find(|code| code.symbol() == input)
            .or_else(|| Self::from_str(input).ok())
    }

    /// (code, operator) pairs in picker order
    pub fn choices() -> Vec<(String, String)> {
        Self::iter()
            .map(|code| (code.to_string(), code.symbol().to_string()))
            .collect()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
}

impl Alignment {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Center => "Center",
        }
    }

    pub fn choices() -> Vec<(String, String)> {
        Self::iter()
            .map(|a| (a.to_string(), a.display_name().to_string()))
            .collect()
    }
}

/// Display format applied to a column's cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum ColumnFormat {
    #[serde(rename = "IN")]
    #[strum(serialize = "IN")]
    IndianNumber,
    #[serde(rename = "PERCENTAGE")]
    #[strum(serialize = "PERCENTAGE")]
    Percentage,
    #[serde(rename = "IMAGE")]
    #[strum(serialize = "IMAGE")]
    Image,
    #[serde(rename = "DATE")]
    #[strum(serialize = "DATE")]
    Date,
    #[serde(rename = "LINK")]
    #[strum(serialize = "LINK")]
    Link,
}

impl ColumnFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::IndianNumber => "Indian number",
            Self::Percentage => "Percentage",
            Self::Image => "Image",
            Self::Date => "Date",
            Self::Link => "Link",
        }
    }
}

/// Column metadata owned by the datasource. Never mutated by the editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub column_name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
}

impl ColumnDescriptor {
    pub fn new(column_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasource {
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

impl Datasource {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Exact, case-sensitive lookup by column name
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.column_name == name)
    }
}

/// A stored scalar: the coerced default value, thumbnail sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl TypedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric reading for consumers of verbatim fields such as thumbnail sizes
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(v) => v.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Bool(_) | Self::Null => None,
        }
    }
}

/// Raw input committed by a form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Rgba),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Color(_) => "color",
        }
    }

    /// Mirrors how an empty text box or an unset control reads: null and "" are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Rgba> for FieldValue {
    fn from(v: Rgba) -> Self {
        Self::Color(v)
    }
}

impl From<SymbolCode> for FieldValue {
    fn from(v: SymbolCode) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl From<TypedValue> for FieldValue {
    fn from(v: TypedValue) -> Self {
        match v {
            TypedValue::Null => Self::Null,
            TypedValue::Bool(b) => Self::Bool(b),
            TypedValue::Int(i) => Self::Int(i),
            TypedValue::Float(f) => Self::Float(f),
            TypedValue::Text(s) => Self::Text(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_hex_colours() {
        assert_eq!("#ff0000".parse::<Rgba>().unwrap(), Rgba::new(255, 0, 0, 255));
        assert_eq!("#00ff0080".parse::<Rgba>().unwrap(), Rgba::new(0, 255, 0, 128));
        assert!("#ff00".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_named_colours() {
        assert_eq!("Black".parse::<Rgba>().unwrap(), Rgba::BLACK);
        assert!("mauve-ish".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_symbol_parse_accepts_code_and_operator() {
        assert_eq!(SymbolCode::parse_input(">="), Some(SymbolCode::GreaterEqual));
        assert_eq!(SymbolCode::parse_input("LESS_EQUAL"), Some(SymbolCode::LessEqual));
        assert_eq!(SymbolCode::parse_input("="), Some(SymbolCode::Equal));
        assert_eq!(SymbolCode::parse_input("!="), None);
    }

    #[test]
    fn test_symbol_choices_in_picker_order() {
        let labels: Vec<String> = SymbolCode::choices().into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["=", ">", ">=", "<", "<="]);
    }

    #[test]
    fn test_format_codes() {
        assert_eq!(ColumnFormat::IndianNumber.to_string(), "IN");
        assert_eq!("LINK".parse::<ColumnFormat>().unwrap(), ColumnFormat::Link);
        assert_eq!(
            serde_json::to_string(&ColumnFormat::Percentage).unwrap(),
            "\"PERCENTAGE\""
        );
    }

    #[test]
    fn test_typed_value_untagged_serde() {
        let v: TypedValue = serde_json::from_str("50").unwrap();
        assert_eq!(v, TypedValue::Int(50));
        let v: TypedValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, TypedValue::Float(2.5));
        let v: TypedValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, TypedValue::Null);
        assert_eq!(serde_json::to_string(&TypedValue::Bool(true)).unwrap(), "true");
    }

    #[test]
    fn test_numeric_reading_of_verbatim_text() {
        assert_eq!(TypedValue::Text(" 64 ".into()).as_f64(), Some(64.0));
        assert_eq!(TypedValue::Int(50).as_f64(), Some(50.0));
        assert_eq!(TypedValue::Text("big".into()).as_f64(), None);
    }

    #[test]
    fn test_field_value_reads_color_objects() {
        let v: FieldValue = serde_json::from_str(r#"{"r":1,"g":2,"b":3,"a":4}"#).unwrap();
        assert_eq!(v, FieldValue::Color(Rgba::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_find_column_is_exact() {
        let ds = Datasource::new(vec![ColumnDescriptor::new("Amount", "INT")]);
        assert!(ds.find_column("Amount").is_some());
        assert!(ds.find_column("amount").is_none());
    }
}
