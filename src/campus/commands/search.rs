use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::StudentStore;

/// Store-side search. The list controller filters its cache instead; this
/// path serves one-shot queries.
pub fn run<S: StudentStore>(store: &S, term: &str) -> Result<CmdResult> {
    let students = store.search(term.trim())?;
    let mut result = CmdResult::default();
    if students.is_empty() {
        result.add_message(CmdMessage::info(format!("No student matches \"{}\"", term)));
    }
    Ok(result.with_listed_students(students))
}
