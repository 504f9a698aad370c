//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for campus operations regardless of the UI in front of it.
//!
//! It dispatches to `commands/*.rs` and returns structured [`CmdResult`]s.
//! Business logic lives in the commands; presentation lives in the client.
//!
//! ## Generic Over StudentStore
//!
//! `CampusApi<S: StudentStore>` owns its store, which the caller constructs
//! and passes in:
//! - Production: `CampusApi<SqliteStore>`
//! - Testing: `CampusApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{NewStudent, StudentPatch};
use crate::store::StudentStore;

pub struct CampusApi<S: StudentStore> {
    store: S,
    paths: commands::CampusPaths,
}

impl<S: StudentStore> CampusApi<S> {
    pub fn new(store: S, paths: commands::CampusPaths) -> Self {
        Self { store, paths }
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store, &self.paths)
    }

    pub fn list_students(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_students(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn view_student(&self, id: i64) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn create_student(&mut self, student: &NewStudent) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, student)
    }

    pub fn update_student(
        &mut self,
        id: i64,
        patch: &StudentPatch,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn delete_students(&mut self, ids: &[i64]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, ids)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::CampusPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CampusPaths, CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn api() -> CampusApi<crate::store::memory::InMemoryStore> {
        CampusApi::new(StoreFixture::new().store, CampusPaths::new("unused"))
    }

    #[test]
    fn create_dispatches_to_store() {
        let mut api = api();
        let result = api
            .create_student(&NewStudent::new("Eve", "eve@campus.com"))
            .unwrap();
        assert_eq!(result.affected_students.len(), 1);
        assert_eq!(api.list_students().unwrap().listed_students.len(), 5);
    }

    #[test]
    fn search_dispatches_to_store_search() {
        let api = api();
        let result = api.search_students("DUPONT").unwrap();
        assert_eq!(result.listed_students[0].email, "bob@campus.com");
    }

    #[test]
    fn delete_passes_all_ids() {
        let mut api = api();
        let result = api.delete_students(&[1, 2]).unwrap();
        assert_eq!(result.affected_students.len(), 2);
        assert_eq!(api.store().count().unwrap(), 2);
    }
}
