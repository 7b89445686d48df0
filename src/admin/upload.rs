use crate::backend::ObjectStorage;
use crate::error::{Result, ValidationError};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

const MB: u64 = 1024 * 1024;

/// Upload area with its own type and size rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaNamespace {
    Images,
    Videos,
}

impl MediaNamespace {
    /// Folder inside the storage bucket
    pub fn folder(&self) -> &'static str {
        match self {
            MediaNamespace::Images => "property-images",
            MediaNamespace::Videos => "property-videos",
        }
    }

    fn mime_prefix(&self) -> &'static str {
        match self {
            MediaNamespace::Images => "image/",
            MediaNamespace::Videos => "video/",
        }
    }

    pub fn limit_mb(&self) -> u64 {
        match self {
            MediaNamespace::Images => 5,
            MediaNamespace::Videos => 50,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            MediaNamespace::Images => "image",
            MediaNamespace::Videos => "video",
        }
    }

    /// Client-side check run before any upload is attempted
    pub fn validate(&self, file: &UploadFile) -> std::result::Result<(), ValidationError> {
        if !file.content_type.starts_with(self.mime_prefix()) {
            return Err(ValidationError::UnsupportedMediaType {
                file: file.name.clone(),
                expected: match self {
                    MediaNamespace::Images => "an image",
                    MediaNamespace::Videos => "a video",
                },
            });
        }
        if file.bytes.len() as u64 > self.limit_mb() * MB {
            return Err(ValidationError::FileTooLarge {
                file: file.name.clone(),
                limit_mb: self.limit_mb(),
            });
        }
        Ok(())
    }

    /// Unique object path `<folder>/<millis>-<random>.<ext>`
    pub fn object_path(&self, file_name: &str) -> String {
        let ext = file_name.rsplit('.').next().unwrap_or(file_name);
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{}/{}-{}.{}",
            self.folder(),
            Utc::now().timestamp_millis(),
            &random[..7],
            ext
        )
    }
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(name, content_type, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of a multi-file upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Public URLs of the stored files, in input order
    pub uploaded: Vec<String>,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.uploaded.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn summary(&self, namespace: MediaNamespace) -> String {
        format!(
            "{} {}(s) uploaded successfully, {} failed",
            self.succeeded(),
            namespace.noun(),
            self.failed()
        )
    }
}

/// Validate and upload each file independently; one failure never stops the rest
pub async fn upload_batch(
    storage: &dyn ObjectStorage,
    namespace: MediaNamespace,
    files: Vec<UploadFile>,
) -> UploadReport {
    let mut report = UploadReport::default();

    for file in files {
        if let Err(e) = namespace.validate(&file) {
            warn!("Skipping {}: {}", file.name, e);
            report.failures.push(UploadFailure {
                file: file.name,
                reason: e.to_string(),
            });
            continue;
        }

        let path = namespace.object_path(&file.name);
        match storage.upload(&path, &file.content_type, file.bytes).await {
            Ok(()) => {
                info!("Uploaded {} to {}", file.name, path);
                report.uploaded.push(storage.public_url(&path));
            }
            Err(e) => {
                warn!("Upload failed for {}: {}", file.name, e);
                report.failures.push(UploadFailure {
                    file: file.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::io::Write;
    use tempfile::tempdir;

    fn image(name: &str, size: usize) -> UploadFile {
        UploadFile::new(name, "image/jpeg", vec![0; size])
    }

    #[test]
    fn image_rules() {
        let ns = MediaNamespace::Images;
        assert!(ns.validate(&image("a.jpg", 1024)).is_ok());
        assert!(ns.validate(&image("edge.jpg", 5 * 1024 * 1024)).is_ok());
        assert!(matches!(
            ns.validate(&image("big.jpg", 5 * 1024 * 1024 + 1)),
            Err(ValidationError::FileTooLarge { limit_mb: 5, .. })
        ));
        assert!(matches!(
            ns.validate(&UploadFile::new("tour.mp4", "video/mp4", vec![1])),
            Err(ValidationError::UnsupportedMediaType { .. })
        ));
    }

    #[test]
    fn video_rules() {
        let ns = MediaNamespace::Videos;
        assert!(ns
            .validate(&UploadFile::new("tour.mp4", "video/mp4", vec![0; 6 * 1024 * 1024]))
            .is_ok());
        assert!(ns.validate(&image("a.jpg", 10)).is_err());
    }

    #[test]
    fn object_paths_are_unique_and_keep_extension() {
        let ns = MediaNamespace::Videos;
        let a = ns.object_path("walkthrough.final.mp4");
        let b = ns.object_path("walkthrough.final.mp4");
        assert!(a.starts_with("property-videos/"));
        assert!(a.ends_with(".mp4"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn batch_continues_past_failures() {
        let storage = MemoryBackend::new();
        storage.fail_uploads_of("image/gif").await;

        let files = vec![
            image("front.jpg", 100),
            UploadFile::new("notes.txt", "text/plain", vec![1]),
            UploadFile::new("anim.gif", "image/gif", vec![1]),
            image("huge.jpg", 6 * 1024 * 1024),
            image("back.jpg", 100),
        ];

        let report = upload_batch(&storage, MediaNamespace::Images, files).await;
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 3);
        assert_eq!(
            report.failures.iter().map(|f| f.file.as_str()).collect::<Vec<_>>(),
            vec!["notes.txt", "anim.gif", "huge.jpg"]
        );
        assert!(report.uploaded[0].starts_with("memory://properties/property-images/"));
        assert_eq!(storage.stored_paths().await.len(), 2);
        assert_eq!(
            report.summary(MediaNamespace::Images),
            "2 image(s) uploaded successfully, 3 failed"
        );
    }

    #[tokio::test]
    async fn reads_file_and_guesses_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"fake png").unwrap();

        let upload = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(upload.name, "plot.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes, b"fake png");
    }
}
