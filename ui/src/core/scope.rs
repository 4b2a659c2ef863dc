//! Which sessions a view considers: every user, or one named user.

use super::storage::SessionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    AllUsers,
    User(String),
}

impl Scope {
    pub fn user(name: impl Into<String>) -> Self {
        Self::User(name.into())
    }

    /// Interpret the `user` query parameter. Blank values mean "all users".
    pub fn from_query(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(name) if !name.is_empty() => Self::User(name.to_string()),
            _ => Self::AllUsers,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        match self {
            Self::AllUsers => None,
            Self::User(name) => Some(name.as_str()),
        }
    }

    pub fn includes(&self, record: &SessionRecord) -> bool {
        match self {
            Self::AllUsers => true,
            Self::User(name) => record.user == *name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_means_all_users() {
        assert_eq!(Scope::from_query(None), Scope::AllUsers);
        assert_eq!(Scope::from_query(Some("")), Scope::AllUsers);
        assert_eq!(Scope::from_query(Some("   ")), Scope::AllUsers);
        assert_eq!(Scope::from_query(Some(" Alice ")), Scope::user("Alice"));
    }
}
