mod asset_category;
mod audio_artifact;
mod diagnosis;
mod storage_path;
mod uploaded_asset;

pub use asset_category::AssetCategory;
pub use audio_artifact::{AudioArtifact, AudioFormat};
pub use diagnosis::{Confidence, DiagnosisResult};
pub use storage_path::ScratchPath;
pub use uploaded_asset::{UploadedAsset, extension_of};
