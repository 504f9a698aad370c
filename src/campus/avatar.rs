//! # Avatar Selection
//!
//! Two disjoint ways to pick an avatar:
//!
//! - **Default set**: one of [`DEFAULT_AVATARS`], chosen by position.
//! - **Device capture**: an image from the camera or the gallery, obtained
//!   through a [`MediaProvider`]. Both sources require a permission grant. A
//!   refused grant aborts the selection and the previous avatar is kept.
//!
//! The library never talks to a device. UI clients supply a provider; the CLI
//! uses [`FsMediaProvider`], which imports an image file from disk.

use crate::error::{CampusError, Result};
use crate::model::Avatar;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Emoji and background color of each default avatar, in display order.
pub const DEFAULT_AVATARS: [(&str, &str); 8] = [
    ("👤", "#007AFF"),
    ("👩", "#FF69B4"),
    ("👨", "#4CAF50"),
    ("🧑", "#FFA500"),
    ("👧", "#FF6B6B"),
    ("👦", "#4ECDC4"),
    ("👵", "#95A5A6"),
    ("👴", "#9B59B6"),
];

/// The avatar used when a student has none.
pub fn default_avatar() -> Avatar {
    let (emoji, color) = DEFAULT_AVATARS[0];
    Avatar::emoji(emoji, color)
}

/// Default avatar by 1-based position.
pub fn default_by_number(n: usize) -> Result<Avatar> {
    n.checked_sub(1)
        .and_then(|i| DEFAULT_AVATARS.get(i))
        .map(|(emoji, color)| Avatar::emoji(emoji, color))
        .ok_or_else(|| {
            CampusError::Validation(format!(
                "Avatar must be between 1 and {}",
                DEFAULT_AVATARS.len()
            ))
        })
}

/// Monogram built from the first letter of each word of a name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSource {
    Camera,
    Gallery,
}

impl MediaSource {
    pub fn denied_message(&self) -> &'static str {
        match self {
            MediaSource::Camera => "We need access to your camera to take a photo.",
            MediaSource::Gallery => "We need access to your gallery to choose a photo.",
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSource::Camera => write!(f, "camera"),
            MediaSource::Gallery => write!(f, "gallery"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Access to device media.
pub trait MediaProvider {
    /// Ask for access to `source`. May block until the user answers.
    fn request_permission(&mut self, source: MediaSource) -> Permission;

    /// Obtain an image reference. `Ok(None)` means the user cancelled.
    fn acquire(&mut self, source: MediaSource) -> Result<Option<String>>;
}

/// Tracks the avatar being edited in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSelector {
    current: Avatar,
}

impl Default for AvatarSelector {
    fn default() -> Self {
        Self {
            current: default_avatar(),
        }
    }
}

impl AvatarSelector {
    pub fn new(current: Option<Avatar>) -> Self {
        Self {
            current: current.unwrap_or_else(default_avatar),
        }
    }

    pub fn current(&self) -> &Avatar {
        &self.current
    }

    pub fn into_avatar(self) -> Avatar {
        self.current
    }

    pub fn pick_default(&mut self, n: usize) -> Result<&Avatar> {
        self.current = default_by_number(n)?;
        Ok(&self.current)
    }

    /// Capture from the device. Returns `Ok(true)` when the avatar changed.
    pub fn capture<P: MediaProvider>(&mut self, source: MediaSource, provider: &mut P) -> Result<bool> {
        if provider.request_permission(source) == Permission::Denied {
            tracing::warn!(%source, "media permission denied");
            return Err(CampusError::PermissionDenied(source));
        }

        match provider.acquire(source)? {
            Some(reference) => {
                self.current = Avatar::Image(reference);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Imports an image file into the media directory.
///
/// Grants come from configuration. The file to import is set per call with
/// [`FsMediaProvider::with_source_file`]; with no file set, acquisition is
/// treated as cancelled.
pub struct FsMediaProvider {
    media_dir: PathBuf,
    allow_camera: bool,
    allow_gallery: bool,
    source_file: Option<PathBuf>,
}

impl FsMediaProvider {
    pub fn new<P: AsRef<Path>>(media_dir: P, allow_camera: bool, allow_gallery: bool) -> Self {
        Self {
            media_dir: media_dir.as_ref().to_path_buf(),
            allow_camera,
            allow_gallery,
            source_file: None,
        }
    }

    pub fn with_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_file = Some(path.as_ref().to_path_buf());
        self
    }

    fn target_name(source: &Path) -> String {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "img".to_string());
        format!("avatar-{}.{}", Uuid::new_v4(), ext)
    }
}

impl MediaProvider for FsMediaProvider {
    fn request_permission(&mut self, source: MediaSource) -> Permission {
        let granted = match source {
            MediaSource::Camera => self.allow_camera,
            MediaSource::Gallery => self.allow_gallery,
        };
        if granted {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn acquire(&mut self, source: MediaSource) -> Result<Option<String>> {
        let Some(file) = self.source_file.take() else {
            return Ok(None);
        };
        if !file.is_file() {
            return Err(CampusError::Validation(format!(
                "Image not found: {}",
                file.display()
            )));
        }

        fs::create_dir_all(&self.media_dir)?;
        let target = self.media_dir.join(Self::target_name(&file));
        fs::copy(&file, &target)?;
        tracing::debug!(%source, target = %target.display(), "imported avatar image");
        Ok(Some(target.to_string_lossy().into_owned()))
    }
}
