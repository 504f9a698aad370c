use crate::commands::CmdResult;
use crate::error::{CampusError, Result};
use crate::store::StudentStore;

pub fn run<S: StudentStore>(store: &S, id: i64) -> Result<CmdResult> {
    let student = store.get(id)?.ok_or(CampusError::StudentNotFound(id))?;
    Ok(CmdResult::default().with_listed_students(vec![student]))
}
