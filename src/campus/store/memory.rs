use super::{placeholder_students, sort_by_name, StudentStore};
use crate::error::{CampusError, Result};
use crate::model::{NewStudent, Student, StudentPatch};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    students: BTreeMap<i64, Student>,
    next_id: i64,
    initialized: bool,
    seeded: bool,
    fail_writes: bool,
    fail_reads: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An initialized store with no placeholder records.
    pub fn empty() -> Self {
        Self {
            initialized: true,
            seeded: true,
            ..Self::default()
        }
    }

    /// Make every subsequent write fail with a store error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make listing fail with a store error.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    fn check_writable(&self) -> Result<()> {
        if !self.initialized {
            return Err(CampusError::NotInitialized);
        }
        if self.fail_writes {
            return Err(CampusError::Api("simulated store failure".to_string()));
        }
        Ok(())
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }

    fn sorted(&self, mut students: Vec<Student>) -> Vec<Student> {
        sort_by_name(&mut students);
        students
    }
}

impl StudentStore for InMemoryStore {
    fn initialize(&mut self) -> Result<()> {
        self.initialized = true;
        if !self.seeded {
            self.seeded = true;
            for student in placeholder_students() {
                self.create(&student)?;
            }
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn list_all(&self) -> Result<Vec<Student>> {
        if self.fail_reads {
            return Err(CampusError::Api("simulated store failure".to_string()));
        }
        Ok(self.sorted(self.students.values().cloned().collect()))
    }

    fn get(&self, id: i64) -> Result<Option<Student>> {
        Ok(self.students.get(&id).cloned())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.students.len())
    }

    fn create(&mut self, student: &NewStudent) -> Result<Student> {
        self.check_writable()?;
        if self.email_taken(&student.email, None) {
            return Err(CampusError::DuplicateEmail(student.email.clone()));
        }

        self.next_id += 1;
        let created = Student {
            id: self.next_id,
            name: student.name.clone(),
            email: student.email.clone(),
            role: student.role_or_default().to_string(),
            avatar: student.avatar.clone(),
        };
        self.students.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&mut self, id: i64, patch: &StudentPatch) -> Result<bool> {
        self.check_writable()?;
        let Some(mut student) = self.students.get(&id).cloned() else {
            return Ok(false);
        };
        patch.apply_to(&mut student);
        if self.email_taken(&student.email, Some(id)) {
            return Err(CampusError::DuplicateEmail(student.email));
        }
        self.students.insert(id, student);
        Ok(true)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        self.check_writable()?;
        self.students.remove(&id);
        Ok(true)
    }

    fn search(&self, term: &str) -> Result<Vec<Student>> {
        let found = self
            .students
            .values()
            .filter(|s| s.matches(term))
            .cloned()
            .collect();
        Ok(self.sorted(found))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// Starts from an initialized, seeded store.
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            store.initialize().unwrap();
            Self { store }
        }

        pub fn empty() -> Self {
            Self {
                store: InMemoryStore::empty(),
            }
        }

        pub fn with_student(mut self, name: &str, email: &str) -> Self {
            self.store.create(&NewStudent::new(name, email)).unwrap();
            self
        }

        pub fn with_students(mut self, count: usize) -> Self {
            for i in 0..count {
                let student = NewStudent::new(
                    format!("Test Student {}", i + 1),
                    format!("student{}@campus.com", i + 1),
                );
                self.store.create(&student).unwrap();
            }
            self
        }

        pub fn id_of(&self, email: &str) -> i64 {
            self.store
                .list_all()
                .unwrap()
                .into_iter()
                .find(|s| s.email == email)
                .map(|s| s.id)
                .unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn mirrors_sqlite_uniqueness() {
        let mut store = StoreFixture::new().store;
        let err = store
            .create(&NewStudent::new("Copy", "bob@campus.com"))
            .unwrap_err();
        assert!(matches!(err, CampusError::DuplicateEmail(_)));
        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn ids_are_never_reused() {
        let fixture = StoreFixture::empty().with_students(2);
        let mut store = fixture.store;
        store.delete(2).unwrap();
        let created = store.create(&NewStudent::new("Next", "next@x")).unwrap();
        assert_eq!(created.id, 3);
    }

    #[test]
    fn search_orders_by_name() {
        let store = StoreFixture::empty()
            .with_student("Zoe", "zoe@campus.com")
            .with_student("Adam", "adam@campus.com")
            .store;
        let found = store.search("CAMPUS").unwrap();
        assert_eq!(found[0].name, "Adam");
        assert_eq!(found[1].name, "Zoe");
    }
}
