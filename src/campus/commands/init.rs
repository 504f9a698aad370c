use crate::commands::{CampusPaths, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::StudentStore;
use std::fs;

pub fn run<S: StudentStore>(store: &mut S, paths: &CampusPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.home)?;
    store.initialize()?;
    let count = store.count()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized campus directory at {} ({} students)",
        paths.home.display(),
        count
    )));
    Ok(result)
}
