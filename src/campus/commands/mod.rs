use crate::config::{CampusConfig, CONFIG_FILENAME};
use crate::model::Student;
use crate::store::sqlite::DEFAULT_DB_FILE;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod search;
pub mod update;
pub mod view;

const MEDIA_DIR: &str = "media";

/// Where a campus directory keeps its files.
#[derive(Debug, Clone)]
pub struct CampusPaths {
    pub home: PathBuf,
    pub db_file: String,
}

impl CampusPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            db_file: DEFAULT_DB_FILE.to_string(),
        }
    }

    pub fn with_db_file(mut self, db_file: impl Into<String>) -> Self {
        self.db_file = db_file.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.home.join(&self.db_file)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.home.join(MEDIA_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILENAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_students: Vec<Student>,
    pub listed_students: Vec<Student>,
    pub config: Option<CampusConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<Student>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<Student>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_config(mut self, config: CampusConfig) -> Self {
        self.config = Some(config);
        self
    }
}
