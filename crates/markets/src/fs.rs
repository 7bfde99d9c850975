use anyhow::Result;
use std::path::Path;

/// Reads a `.json` file from `path`.
///
/// ```ignore
/// let ouput: DesiredType = markets::fs::read_json(path).await?;
/// ```
pub async fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = tokio::fs::read(path).await.map_err(|e| {
        log::error!("failed to read {}: {e}", path.display());
        e
    })?;
    let data: T = serde_json::from_slice(&file).map_err(|e| {
        log::error!("failed to deserialize {}: {e}", path.display());
        e
    })?;
    Ok(data)
}
