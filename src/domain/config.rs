use {
    super::{action::ActionKind, error::AuditError, filter::AttributeFilter},
    serde::Deserialize,
    std::collections::BTreeSet,
};

/// One attribute name or a list of them, as accepted by `only` / `except`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeNames {
    One(String),
    Many(Vec<String>),
}

impl AttributeNames {
    fn into_set(self) -> BTreeSet<String> {
        match self {
            Self::One(name) => BTreeSet::from([name]),
            Self::Many(names) => names.into_iter().collect(),
        }
    }
}

impl From<&str> for AttributeNames {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for AttributeNames {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for AttributeNames {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// Raw options for one action, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecorderOptions {
    #[serde(default)]
    pub only: Option<AttributeNames>,
    #[serde(default)]
    pub except: Option<AttributeNames>,
    /// Owner association; unset means the entity owns its own records.
    #[serde(default)]
    pub on: Option<String>,
}

impl RecorderOptions {
    pub fn only(mut self, names: impl Into<AttributeNames>) -> Self {
        self.only = Some(names.into());
        self
    }

    pub fn except(mut self, names: impl Into<AttributeNames>) -> Self {
        self.except = Some(names.into());
        self
    }

    pub fn on(mut self, association: impl Into<String>) -> Self {
        self.on = Some(association.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    action: ActionKind,
    filter: AttributeFilter,
    owner_association: Option<String>,
}

impl RecorderConfig {
    pub fn new(action: ActionKind, options: RecorderOptions) -> Result<Self, AuditError> {
        let only = validate_names("only", options.only)?;
        let except = validate_names("except", options.except)?;

        let owner_association = match options.on {
            Some(name) if name.trim().is_empty() => {
                return Err(AuditError::InvalidConfiguration(format!(
                    "owner association for {action} must be a non-empty name"
                )));
            }
            other => other,
        };

        Ok(Self {
            action,
            filter: AttributeFilter::from_sets(only, except),
            owner_association,
        })
    }

    /// No filtering, entity is its own owner.
    pub fn plain(action: ActionKind) -> Self {
        Self {
            action,
            filter: AttributeFilter::All,
            owner_association: None,
        }
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn filter(&self) -> &AttributeFilter {
        &self.filter
    }

    pub fn owner_association(&self) -> Option<&str> {
        self.owner_association.as_deref()
    }
}

fn validate_names(
    option: &str,
    names: Option<AttributeNames>,
) -> Result<BTreeSet<String>, AuditError> {
    let set = names.map(AttributeNames::into_set).unwrap_or_default();
    if set.iter().any(|name| name.trim().is_empty()) {
        return Err(AuditError::InvalidConfiguration(format!(
            "`{option}` contains a blank attribute name"
        )));
    }
    Ok(set)
}
