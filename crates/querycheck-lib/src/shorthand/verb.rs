use std::fmt;
use std::str::FromStr;

/// Shorthand verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Verb {
    Find,
    List,
    Stream,
    Count,
    Exists,
    /// Recognised but never expanded.
    Update,
    /// Recognised but never expanded.
    Delete,
}

impl Verb {
    /// Verbs whose result is a row count rather than entities.
    pub fn is_count(self) -> bool {
        matches!(self, Verb::Count | Verb::Exists)
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Verb::Update | Verb::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Find => "find",
            Verb::List => "list",
            Verb::Stream => "stream",
            Verb::Count => "count",
            Verb::Exists => "exists",
            Verb::Update => "update",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown shorthand verb `{0}`")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    /// Accepts the `*All` spellings (`findAll`, `listAll`, ...) as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.strip_suffix("All").unwrap_or(s);
        match base {
            "find" => Ok(Verb::Find),
            "list" => Ok(Verb::List),
            "stream" => Ok(Verb::Stream),
            "count" => Ok(Verb::Count),
            "exists" => Ok(Verb::Exists),
            "update" => Ok(Verb::Update),
            "delete" => Ok(Verb::Delete),
            _ => Err(UnknownVerb(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Verb {
    type Error = UnknownVerb;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
