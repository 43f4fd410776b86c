//! Request extractors that reject with the uniform error payload.

mod id_path;
mod json;
mod validated_json;

pub use id_path::IdPath;
pub use json::AppJson;
pub use validated_json::ValidatedJson;
