use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CampusError, Result};
use crate::model::StudentPatch;
use crate::store::StudentStore;

pub fn run<S: StudentStore>(store: &mut S, id: i64, patch: &StudentPatch) -> Result<CmdResult> {
    if patch.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    if !store.update(id, patch)? {
        return Err(CampusError::StudentNotFound(id));
    }
    let student = store.get(id)?.ok_or(CampusError::StudentNotFound(id))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student updated ({}): {}",
        student.id, student.name
    )));
    Ok(result.with_affected_students(vec![student]))
}
