use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Sort order of a paginated query. Applies to every key field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SortOrder;

    #[test]
    fn test_flip() {
        assert_eq!(SortOrder::Asc.flip(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.flip(), SortOrder::Asc);
    }

    #[test]
    fn test_parse() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!(" DESC ".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"ASC\"");
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"DESC\"").unwrap(),
            SortOrder::Desc
        );
    }
}
