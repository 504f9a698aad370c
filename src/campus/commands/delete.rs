use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::StudentStore;

/// Remove students by id. Ids that are already gone are reported, not failed.
pub fn run<S: StudentStore>(store: &mut S, ids: &[i64]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        let existing = store.get(id)?;
        store.delete(id)?;
        match existing {
            Some(student) => {
                result.add_message(CmdMessage::success(format!(
                    "Student deleted ({}): {}",
                    id, student.name
                )));
                result.affected_students.push(student);
            }
            None => {
                result.add_message(CmdMessage::info(format!("No student with id {}", id)));
            }
        }
    }

    Ok(result)
}
