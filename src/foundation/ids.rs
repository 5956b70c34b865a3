use std::fmt;

/// Key addressing an element or a timeline mark.
///
/// User keys are names or integers; `Token` values are minted by the engine for elements
/// that were handed over without a key, so they never collide with a user key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    /// A user name.
    Name(String),
    /// A user integer.
    Index(i64),
    /// Minted by the engine.
    Token(u64),
}

impl Identifier {
    /// The integer, for [`Identifier::Index`].
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether the engine minted this identifier.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) => f.write_str(s),
            Self::Index(i) => write!(f, "{i}"),
            Self::Token(t) => write!(f, "#token{t}"),
        }
    }
}

impl serde::Serialize for Identifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Name(s) => serializer.serialize_str(s),
            Self::Index(i) => serializer.serialize_i64(*i),
            Self::Token(_) => serializer.collect_str(self),
        }
    }
}

// Only user keys can be spelled in documents; tokens are never read back.
impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(i64),
            Name(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Index(i) => Self::Index(i),
            Repr::Name(s) => Self::Name(s),
        })
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Name(s.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<&String> for Identifier {
    fn from(s: &String) -> Self {
        Self::Name(s.clone())
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

macro_rules! index_from {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Identifier {
                fn from(i: $t) -> Self {
                    Self::Index(i64::from(i))
                }
            }
        )+
    };
}

index_from!(i8, i16, i32, i64, u8, u16, u32);

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
