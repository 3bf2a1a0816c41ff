use std::path::PathBuf;

use crate::resource::ResourceError;
use crate::stylesheet::StyleSheetError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("File name '{file_name}' has no name left after removing its extension")]
    EmptyName { file_name: String },
    #[error("File '{file_name}' has no MIME type")]
    MissingMimeType { file_name: String },
    #[error("Cannot read font format from MIME type '{0}'")]
    UnparseableMime(String),
    #[error("Failed to inject font face: {0}")]
    Injection(#[from] StyleSheetError),
    #[error("Failed to create font resource: {0}")]
    Resource(#[from] ResourceError),
    #[error("Failed to read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
