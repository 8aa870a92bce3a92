use {
    super::error::AuditError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Update,
    Destroy,
    Find,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [Self::Create, Self::Update, Self::Destroy, Self::Find];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
            Self::Find => "find",
        }
    }

    /// Only mutating actions carry attribute changes. A destroyed row has
    /// nothing left to diff against and a find mutates nothing.
    pub fn captures_changes(&self) -> bool {
        match self {
            Self::Create | Self::Update => true,
            Self::Destroy | Self::Find => false,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = AuditError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "destroy" => Ok(Self::Destroy),
            "find" => Ok(Self::Find),
            other => Err(AuditError::InvalidConfiguration(format!(
                "unknown action kind: {other}"
            ))),
        }
    }
}
