//! Add/edit form input and its validation.
//!
//! Validation runs before any store call: a form that fails here never
//! reaches the Record Store.

use crate::error::{CampusError, Result};
use crate::model::{Avatar, NewStudent, StudentPatch, DEFAULT_ROLE};

pub const MISSING_FIELDS: &str = "Please fill in all fields";
pub const INVALID_EMAIL: &str = "Invalid email";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub avatar: Option<Avatar>,
}

/// A form whose fields passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<Avatar>,
}

impl StudentForm {
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

    pub fn with_avatar(mut self, avatar: Option<Avatar>) -> Self {
        self.avatar = avatar;
        self
    }

    pub fn validate(&self) -> Result<ValidatedForm> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(CampusError::Validation(MISSING_FIELDS.to_string()));
        }
        if !email.contains('@') {
            return Err(CampusError::Validation(INVALID_EMAIL.to_string()));
        }

        Ok(ValidatedForm {
            name: name.to_string(),
            email: email.to_string(),
            role: self
                .role
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_ROLE)
                .to_string(),
            avatar: self.avatar.clone(),
        })
    }
}

impl ValidatedForm {
    pub fn to_new_student(&self) -> NewStudent {
        NewStudent {
            name: self.name.clone(),
            email: self.email.clone(),
            role: Some(self.role.clone()),
            avatar: self.avatar.clone(),
        }
    }

    /// Saving an edit rewrites name, email and role (back to the default label
    /// unless the form set one); the avatar only when one was chosen.
    pub fn to_patch(&self) -> StudentPatch {
        StudentPatch {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            avatar: self.avatar.clone().map(Some),
        }
    }
}
