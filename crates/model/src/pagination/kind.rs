/// Kind tag carried by every encoded field.
///
/// `STRING` and `TIME` are the tags of the original token format; the others
/// extend it without changing how those two are written. `STRING64` and
/// `JSON64` carry base64 text and are used for values containing a comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    String64,
    Time,
    Bool,
    Int,
    Uint,
    Float,
    Bytes,
    Json,
    Json64,
    Uuid,
}

impl FieldKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::String => "STRING",
            FieldKind::String64 => "STRING64",
            FieldKind::Time => "TIME",
            FieldKind::Bool => "BOOL",
            FieldKind::Int => "INT",
            FieldKind::Uint => "UINT",
            FieldKind::Float => "FLOAT",
            FieldKind::Bytes => "BYTES",
            FieldKind::Json => "JSON",
            FieldKind::Json64 => "JSON64",
            FieldKind::Uuid => "UUID",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "STRING" => Some(FieldKind::String),
            "STRING64" => Some(FieldKind::String64),
            "TIME" => Some(FieldKind::Time),
            "BOOL" => Some(FieldKind::Bool),
            "INT" => Some(FieldKind::Int),
            "UINT" => Some(FieldKind::Uint),
            "FLOAT" => Some(FieldKind::Float),
            "BYTES" => Some(FieldKind::Bytes),
            "JSON" => Some(FieldKind::Json),
            "JSON64" => Some(FieldKind::Json64),
            "UUID" => Some(FieldKind::Uuid),
            _ => None,
        }
    }
}
