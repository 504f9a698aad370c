use serde::{Deserialize, Serialize};

/// Role given to a student when none is supplied.
pub const DEFAULT_ROLE: &str = "Étudiant";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Avatar {
    Emoji { emoji: String, color: String },
    /// Opaque reference to an image (a file path once imported).
    Image(String),
}

impl Avatar {
    pub fn emoji(emoji: &str, color: &str) -> Self {
        Avatar::Emoji {
            emoji: emoji.to_string(),
            color: color.to_string(),
        }
    }

    /// Encode for the `avatar` column.
    ///
    /// Emoji pairs are stored as a JSON object, image references as-is.
    pub fn to_column(&self) -> String {
        match self {
            Avatar::Emoji { emoji, color } => {
                serde_json::json!({ "emoji": emoji, "color": color }).to_string()
            }
            Avatar::Image(uri) => uri.clone(),
        }
    }

    /// Decode a stored column value. Anything that is not an emoji object is
    /// treated as an image reference.
    pub fn from_column(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with('{') {
            if let Ok(avatar @ Avatar::Emoji { .. }) = serde_json::from_str::<Avatar>(raw) {
                return Some(avatar);
            }
        }
        Some(Avatar::Image(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<Avatar>,
}

impl Student {
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

/// Fields for a record that does not have an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub avatar: Option<Avatar>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
            avatar: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub fn role_or_default(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }
}

/// Partial update. `None` keeps the stored value; `avatar: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<Option<Avatar>>,
}

impl StudentPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.avatar.is_none()
    }

    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(role) = &self.role {
            student.role = role.clone();
        }
        if let Some(avatar) = &self.avatar {
            student.avatar = avatar.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_avatar_survives_the_column() {
        let avatar = Avatar::emoji("👩", "#FF69B4");
        let raw = avatar.to_column();
        assert_eq!(Avatar::from_column(&raw), Some(avatar));
    }

    #[test]
    fn plain_strings_are_image_references() {
        assert_eq!(
            Avatar::from_column("/tmp/a.png"),
            Some(Avatar::Image("/tmp/a.png".into()))
        );
        assert_eq!(
            Avatar::from_column("{not json"),
            Some(Avatar::Image("{not json".into()))
        );
        assert_eq!(Avatar::from_column(""), None);
    }

    #[test]
    fn empty_role_falls_back_to_default() {
        let s = NewStudent::new("A", "a@x").with_role("");
        assert_eq!(s.role_or_default(), DEFAULT_ROLE);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut student = Student {
            id: 1,
            name: "Alice".into(),
            email: "alice@campus.com".into(),
            role: DEFAULT_ROLE.into(),
            avatar: None,
        };
        StudentPatch::name("X").apply_to(&mut student);
        assert_eq!(student.name, "X");
        assert_eq!(student.email, "alice@campus.com");
        assert_eq!(student.role, DEFAULT_ROLE);
    }

    #[test]
    fn matches_is_case_insensitive_on_name_or_email() {
        let student = Student {
            id: 1,
            name: "Élodie Roux".into(),
            email: "eroux@campus.com".into(),
            role: DEFAULT_ROLE.into(),
            avatar: None,
        };
        assert!(student.matches("élodie"));
        assert!(student.matches("EROUX@"));
        assert!(!student.matches("bob"));
    }
}
