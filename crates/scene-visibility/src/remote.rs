use crate::error::Result;
use crate::snapshot::Scene;
use async_trait::async_trait;

/// The three remote operations the action needs from the controlled application.
///
/// Implementations own connection handling, request correlation and timeouts.
/// Transport failures are reported as [`crate::Error::RemoteUnavailable`]; a
/// missing scene item as [`crate::Error::SourceNotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStateClient: Send + Sync {
	/// Every scene with its sources, in display order
	async fn list_scenes(&self) -> Result<Vec<Scene>>;

	/// Whether `source` is currently visible in `scene`
	async fn source_visibility(&self, scene: &str, source: &str) -> Result<bool>;

	/// Show or hide `source` in `scene`
	async fn set_source_visibility(&self, scene: &str, source: &str, visible: bool) -> Result<()>;
}
