use crate::{Error, Result, CONFIG};
use diesel_derive_newtype::DieselNewType;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::warn;
use validator::{ValidationError, ValidationErrors};

pub const IMAGE_UPLOAD_DIRECTORY: &str = "image/";
pub const VIDEO_UPLOAD_DIRECTORY: &str = "video/";

/// Compared against the lowercased extension.
pub const ALLOWED_VIDEO_EXTENSIONS: [&str; 5] = ["mov", "avi", "mp4", "webm", "mkv"];

/// Path of an uploaded file, relative to the media directory
/// (`image/<name>` or `video/<name>`).
#[derive(DieselNewType, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile(String);

impl UploadedFile {
    pub fn image(file_name: &str) -> Result<UploadedFile> {
        check("image", validate_upload_name(file_name))?;
        Ok(UploadedFile::uploaded(IMAGE_UPLOAD_DIRECTORY, file_name))
    }

    pub fn video(file_name: &str) -> Result<UploadedFile> {
        check("video", validate_video_file(file_name))?;
        Ok(UploadedFile::uploaded(VIDEO_UPLOAD_DIRECTORY, file_name))
    }

    /// For names that already went through the form validators.
    pub(crate) fn uploaded(directory: &str, file_name: &str) -> UploadedFile {
        UploadedFile(format!("{}{}", directory, file_name))
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn extension(&self) -> Option<String> {
        extension(&self.0)
    }

    pub fn is_video(&self) -> bool {
        self.0.starts_with(VIDEO_UPLOAD_DIRECTORY)
    }

    /// Where the file lives on disk.
    pub fn local_path(&self) -> PathBuf {
        Path::new(&CONFIG.media_directory).join(&self.0)
    }
}

fn check(field: &'static str, res: std::result::Result<(), ValidationError>) -> Result<()> {
    res.map_err(|err| {
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        Error::Validation(errors)
    })
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Rejects names that could resolve outside of the upload directory:
/// empty names, `.`, `..` and anything with a path separator.
pub fn validate_upload_name(file_name: &str) -> std::result::Result<(), ValidationError> {
    if !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(&['/', '\\'][..])
    {
        return Ok(());
    }

    warn!("Rejected upload name {:?}", file_name);
    let mut err = ValidationError::new("invalid_file_name");
    err.message = Some(Cow::from(format!(
        "\"{}\" is not a valid file name.",
        file_name
    )));
    err.add_param(Cow::from("file_name"), &file_name);
    Err(err)
}

/// `validate_upload_name`, then `validate_video_extension`.
pub fn validate_video_file(file_name: &str) -> std::result::Result<(), ValidationError> {
    validate_upload_name(file_name)?;
    validate_video_extension(file_name)
}

/// Rejects video files whose extension is not one of `ALLOWED_VIDEO_EXTENSIONS`.
///
/// Files without an extension, including dot-files like `.mp4`, are rejected too.
pub fn validate_video_extension(file_name: &str) -> std::result::Result<(), ValidationError> {
    let ext = extension(file_name).unwrap_or_default();
    if ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(());
    }

    warn!("Rejected video upload {:?}", file_name);
    let allowed = ALLOWED_VIDEO_EXTENSIONS.join(", ");
    let mut err = ValidationError::new("invalid_extension");
    err.message = Some(Cow::from(format!(
        "File extension \"{}\" is not allowed. Allowed extensions are: {}.",
        ext, allowed
    )));
    err.add_param(Cow::from("extension"), &ext);
    err.add_param(Cow::from("allowed_extensions"), &allowed);
    Err(err)
}
