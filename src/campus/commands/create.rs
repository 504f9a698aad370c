use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewStudent;
use crate::store::StudentStore;

pub fn run<S: StudentStore>(store: &mut S, student: &NewStudent) -> Result<CmdResult> {
    let created = store.create(student)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student added ({}): {}",
        created.id, created.name
    )));
    Ok(result.with_affected_students(vec![created]))
}
