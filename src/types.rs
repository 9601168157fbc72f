use serde::Serialize;

//==============================================================================
// Field Types
//==============================================================================

/// Integer tag width, kept so the schema stub can name a scalar type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

/// Declared type of a worksheet column (the type row of the header)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Float,
    Double,
    Integer(IntWidth),
    /// Decide per cell from its native kind
    Auto,
    /// Empty type cell; resolved per target
    Unspecified,
}

impl FieldType {
    /// Parse a type tag from the header. Unknown tags are integers.
    pub fn from_tag(tag: &str) -> Self {
        Self::known_tag(tag).unwrap_or(FieldType::Integer(IntWidth::I32))
    }

    /// Parse a type tag, or None when the text is not one of the recognized tags
    pub fn known_tag(tag: &str) -> Option<Self> {
        let ty = match tag.trim().to_ascii_lowercase().as_str() {
            "" => FieldType::Unspecified,
            "string" | "str" | "text" => FieldType::String,
            "float" => FieldType::Float,
            "double" => FieldType::Double,
            "auto" => FieldType::Auto,
            "int8" | "byte" => FieldType::Integer(IntWidth::I8),
            "int16" | "short" => FieldType::Integer(IntWidth::I16),
            "int" | "int32" => FieldType::Integer(IntWidth::I32),
            "int64" | "long" => FieldType::Integer(IntWidth::I64),
            "uint8" => FieldType::Integer(IntWidth::U8),
            "uint16" => FieldType::Integer(IntWidth::U16),
            "uint32" | "uint" => FieldType::Integer(IntWidth::U32),
            "uint64" => FieldType::Integer(IntWidth::U64),
            _ => return None,
        };
        Some(ty)
    }

    /// Type used when reading cells for the given target
    pub fn resolve(self, target: Target) -> FieldType {
        match (self, target) {
            (FieldType::Unspecified, Target::Csv) => FieldType::Auto,
            (FieldType::Unspecified, _) => FieldType::Integer(IntWidth::I32),
            (ty, _) => ty,
        }
    }
}

/// Output formats a worksheet can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Csv,
    Json,
    KeyValue,
    Sql,
    Proto,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::Csv => "csv",
            Target::Json => "json",
            Target::KeyValue => "keyvalue",
            Target::Sql => "sql",
            Target::Proto => "proto",
        }
    }
}

//==============================================================================
// Schema
//==============================================================================

/// One worksheet column participating in export
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub column: usize,
    pub name: String,
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(column: usize, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            column,
            name: name.into(),
            field_type,
        }
    }
}

/// Export targets requested by the directive cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    /// Upper-cased directive text
    pub text: String,
    pub json: bool,
    pub sql: bool,
    pub key_value: bool,
    pub proto: bool,
    /// Leading `!`: no delimited-text output for this sheet
    pub suppress_csv: bool,
}

impl Directive {
    pub const SUPPRESS_MARKER: char = '!';

    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_uppercase();
        Self {
            json: text.contains("JSON"),
            sql: text.contains("SQL"),
            key_value: text.contains("KEYVALUE"),
            proto: text.contains("PROTO"),
            suppress_csv: text.starts_with(Self::SUPPRESS_MARKER),
            text,
        }
    }

    pub fn enables(&self, target: Target) -> bool {
        match target {
            Target::Csv => !self.suppress_csv,
            Target::Json => self.json,
            Target::KeyValue => self.key_value,
            Target::Sql => self.sql,
            Target::Proto => self.proto,
        }
    }
}

/// Which of the two field lists a target reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldList {
    /// Structured targets (JSON, SQL, proto)
    Primary,
    /// Delimited text
    Secondary,
}

/// Parsed header block of one worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub directive: Directive,
    pub output_name: String,
    pub primary: Vec<FieldSpec>,
    pub secondary: Vec<FieldSpec>,
    /// First data row (row count of the header block)
    pub data_start: usize,
}

impl Schema {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    pub fn fields(&self, list: FieldList) -> &[FieldSpec] {
        match list {
            FieldList::Primary => &self.primary,
            FieldList::Secondary => &self.secondary,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.primary.iter().rev().find(|f| f.name == name)
    }
}

//==============================================================================
// Records
//==============================================================================

/// A coerced cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Float(f64),
    Integer(i64),
}

impl Value {
    /// Text form used by delimited and SQL output.
    /// Floats print with the fewest digits that round-trip at f32 precision.
    pub fn render(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Float(f) => format!("{}", *f as f32),
            Value::Integer(i) => i.to_string(),
        }
    }
}

/// One fully-populated row: every field of the list, in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub row: usize,
    pub values: Vec<(String, Value)>,
}

impl Record {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.values.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last value stored under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.values {
            // serde_json writes non-finite floats as null, so this never falls back.
            let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
            map.insert(name.clone(), json);
        }
        map
    }
}
