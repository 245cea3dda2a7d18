use super::target::RedirectTarget;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Replaces the page's navigation target with a deep link.
///
/// Fire-and-forget: success only means the navigation was issued, never that
/// the app received it.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, target: &RedirectTarget) -> Result<()>;
}

pub type NavigatorRef = Arc<dyn Navigator>;
