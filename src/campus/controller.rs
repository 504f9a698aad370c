//! # List Controller
//!
//! [`StudentList`] is the UI-side state between the forms and the store: one
//! cached copy of the full record set, a search query, and the last notice to
//! show the user.
//!
//! ## Consistency
//!
//! After every successful mutation the cache is reloaded in full from the
//! store. There is no incremental patching. A failed mutation leaves the cache
//! untouched. A successful mutation whose reload fails keeps the
//! [`LOAD_FAILURE`] notice up instead of reporting success.
//!
//! ## Filtering
//!
//! [`StudentList::visible`] filters the cache on every call (case-insensitive
//! substring on name or email). It never calls the store, so it is cheap
//! enough to run per keystroke.

use crate::api::{CampusApi, CmdResult};
use crate::error::{CampusError, Result};
use crate::form::StudentForm;
use crate::model::{Avatar, Student, StudentPatch};
use crate::store::StudentStore;

pub const LOAD_FAILURE: &str = "Unable to load students";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub struct StudentList<S: StudentStore> {
    api: CampusApi<S>,
    students: Vec<Student>,
    query: String,
    notice: Option<Notice>,
    loaded: bool,
}

impl<S: StudentStore> StudentList<S> {
    pub fn new(api: CampusApi<S>) -> Self {
        Self {
            api,
            students: Vec::new(),
            query: String::new(),
            notice: None,
            loaded: false,
        }
    }

    /// Initialize the store and load every record. On failure the previous
    /// cache is kept and a notice is raised.
    pub fn load(&mut self) -> bool {
        let outcome = self
            .api
            .store_mut()
            .initialize()
            .and_then(|_| self.api.list_students());

        match outcome {
            Ok(result) => {
                tracing::debug!(count = result.listed_students.len(), "student list loaded");
                self.students = result.listed_students;
                self.loaded = true;
                true
            }
            Err(e) => {
                tracing::error!("error loading students: {}", e);
                self.notice = Some(Notice::error(LOAD_FAILURE));
                false
            }
        }
    }

    /// Pull-to-refresh.
    pub fn refresh(&mut self) -> bool {
        self.load()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn total(&self) -> usize {
        self.students.len()
    }

    /// Header line, e.g. "4 students".
    pub fn summary(&self) -> String {
        let n = self.total();
        format!("{} student{}", n, if n == 1 { "" } else { "s" })
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// The cached students matching the current query.
    pub fn visible(&self) -> Vec<&Student> {
        if self.query.is_empty() {
            return self.students.iter().collect();
        }
        self.students
            .iter()
            .filter(|s| s.matches(&self.query))
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn add(&mut self, form: &StudentForm) -> Result<Student> {
        let outcome = form
            .validate()
            .and_then(|valid| self.api.create_student(&valid.to_new_student()));
        let mut result = self.settle(outcome)?;
        Ok(result.affected_students.remove(0))
    }

    pub fn edit(&mut self, id: i64, form: &StudentForm) -> Result<Student> {
        let outcome = form
            .validate()
            .and_then(|valid| self.api.update_student(id, &valid.to_patch()));
        let mut result = self.settle(outcome)?;
        result
            .affected_students
            .pop()
            .ok_or(CampusError::StudentNotFound(id))
    }

    /// Replace or clear only the avatar of a student.
    pub fn set_avatar(&mut self, id: i64, avatar: Option<Avatar>) -> Result<Student> {
        let patch = StudentPatch {
            avatar: Some(avatar),
            ..Default::default()
        };
        let outcome = self.api.update_student(id, &patch);
        let mut result = self.settle(outcome)?;
        result
            .affected_students
            .pop()
            .ok_or(CampusError::StudentNotFound(id))
    }

    /// Delete one student. Unknown ids succeed quietly.
    pub fn remove(&mut self, id: i64) -> Result<Option<Student>> {
        let outcome = self.api.delete_students(&[id]);
        let mut result = self.settle(outcome)?;
        Ok(result.affected_students.pop())
    }

    /// Reload after success; raise the matching notice after failure.
    ///
    /// The success notice only replaces the current one when the reload
    /// worked. Otherwise the load failure stays visible, since the cache is
    /// now behind the store.
    fn settle(&mut self, outcome: Result<CmdResult>) -> Result<CmdResult> {
        match outcome {
            Ok(result) => {
                if self.load() {
                    self.notice = result
                        .messages
                        .last()
                        .map(|m| Notice::success(m.content.clone()));
                }
                Ok(result)
            }
            Err(e) => {
                match e {
                    CampusError::Validation(_)
                    | CampusError::DuplicateEmail(_)
                    | CampusError::StudentNotFound(_) => {
                        tracing::debug!("student operation rejected: {}", e)
                    }
                    _ => tracing::error!("student operation failed: {}", e),
                }
                self.notice = Some(Notice::error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn api(&self) -> &CampusApi<S> {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut CampusApi<S> {
        &mut self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CampusPaths;
    use crate::error::{DUPLICATE_EMAIL, GENERIC_FAILURE};
    use crate::form::{INVALID_EMAIL, MISSING_FIELDS};
    use crate::store::memory::InMemoryStore;

    fn list() -> StudentList<InMemoryStore> {
        let api = CampusApi::new(InMemoryStore::new(), CampusPaths::new("unused"));
        let mut list = StudentList::new(api);
        assert!(list.load());
        list
    }

    fn names(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn load_fills_cache_with_placeholders() {
        let list = list();
        assert!(list.is_loaded());
        assert_eq!(list.total(), 4);
        assert_eq!(list.summary(), "4 students");
    }

    #[test]
    fn filtering_uses_the_cache() {
        let mut list = list();
        list.set_query("ALI");
        assert_eq!(names(&list.visible()), vec!["Alice Martin"]);

        list.set_query("campus.com");
        assert_eq!(list.visible().len(), 4);

        list.set_query("nobody");
        assert!(list.visible().is_empty());

        list.clear_query();
        assert_eq!(list.visible().len(), 4);
    }

    #[test]
    fn add_reloads_in_full() {
        let mut list = list();
        let created = list
            .add(&StudentForm::new(" Eve Adams ", "eve@campus.com"))
            .unwrap();
        assert_eq!(created.name, "Eve Adams");
        assert_eq!(list.total(), 5);
        assert_eq!(list.notice().unwrap().kind, NoticeKind::Success);
        assert_eq!(list.find(created.id), Some(&created));
    }

    #[test]
    fn duplicate_add_has_specific_notice_and_keeps_cache() {
        let mut list = list();
        let before = list.students().to_vec();
        assert!(list
            .add(&StudentForm::new("Alice Bis", "alice@campus.com"))
            .is_err());
        assert_eq!(list.notice().unwrap().message, DUPLICATE_EMAIL);
        assert_eq!(list.students(), before.as_slice());
    }

    #[test]
    fn validation_errors_never_reach_the_store() {
        let mut list = list();
        list.api_mut().store_mut().fail_writes(true);

        list.add(&StudentForm::new("", "")).unwrap_err();
        assert_eq!(list.notice().unwrap().message, MISSING_FIELDS);

        list.add(&StudentForm::new("Ann", "nope")).unwrap_err();
        assert_eq!(list.notice().unwrap().message, INVALID_EMAIL);
    }

    #[test]
    fn other_store_failures_are_generic() {
        let mut list = list();
        list.api_mut().store_mut().fail_writes(true);
        list.add(&StudentForm::new("Ann", "ann@campus.com"))
            .unwrap_err();
        assert_eq!(list.notice().unwrap().message, GENERIC_FAILURE);
        assert_eq!(list.total(), 4);
    }

    #[test]
    fn edit_replaces_name_and_email() {
        let mut list = list();
        let bob = list.visible()[1].clone();
        let updated = list
            .edit(bob.id, &StudentForm::new("Robert Dupont", "robert@campus.com"))
            .unwrap();
        assert_eq!(updated.id, bob.id);
        assert_eq!(list.find(bob.id).unwrap().email, "robert@campus.com");
    }

    #[test]
    fn edit_unknown_student_fails() {
        let mut list = list();
        let err = list
            .edit(77, &StudentForm::new("Ghost", "ghost@campus.com"))
            .unwrap_err();
        assert!(matches!(err, CampusError::StudentNotFound(77)));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut list = list();
        let diana = list.visible()[3].id;
        assert!(list.remove(diana).unwrap().is_some());
        assert!(list.remove(diana).unwrap().is_none());
        assert_eq!(list.total(), 3);
    }

    #[test]
    fn set_avatar_touches_only_avatar() {
        let mut list = list();
        let alice = list.visible()[0].clone();
        let updated = list
            .set_avatar(alice.id, Some(Avatar::emoji("👩", "#FF69B4")))
            .unwrap();
        assert_eq!(updated.name, alice.name);
        assert_eq!(updated.email, alice.email);
        assert!(list.find(alice.id).unwrap().avatar.is_some());

        list.set_avatar(alice.id, None).unwrap();
        assert_eq!(list.find(alice.id).unwrap().avatar, None);
    }

    #[test]
    fn refresh_picks_up_writes_made_behind_the_cache() {
        let mut list = list();
        list.api_mut()
            .store_mut()
            .create(&crate::model::NewStudent::new("Eve", "eve@campus.com"))
            .unwrap();
        assert_eq!(list.total(), 4);

        assert!(list.refresh());
        assert_eq!(list.total(), 5);
    }

    #[test]
    fn failed_reload_after_write_is_not_reported_as_success() {
        let mut list = list();
        list.api_mut().store_mut().fail_reads(true);

        let created = list.add(&StudentForm::new("Eve", "eve@campus.com")).unwrap();
        assert_eq!(created.name, "Eve");

        let notice = list.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, LOAD_FAILURE);
        assert_eq!(list.total(), 4);

        list.api_mut().store_mut().fail_reads(false);
        assert!(list.refresh());
        assert_eq!(list.total(), 5);
    }

    #[test]
    fn dismissing_clears_notice() {
        let mut list = list();
        list.add(&StudentForm::new("", "")).unwrap_err();
        assert!(list.dismiss_notice().is_some());
        assert!(list.notice().is_none());
    }
}
