use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::StudentStore;

pub fn run<S: StudentStore>(store: &S) -> Result<CmdResult> {
    let students = store.list_all()?;
    Ok(CmdResult::default().with_listed_students(students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_placeholders_by_name() {
        let store = StoreFixture::new().store;
        let names: Vec<_> = run(&store)
            .unwrap()
            .listed_students
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec!["Alice Martin", "Bob Dupont", "Charlie Lambert", "Diana Prince"]
        );
    }

    #[test]
    fn uninitialized_store_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(run(&store).unwrap().listed_students.is_empty());
    }
}
