use crate::domain::params::IncomingParameters;
use crate::domain::ports::NavigatorRef;
use crate::domain::target::{DeepLink, RedirectTarget};
use crate::error::Result;

/// Builds deep-link targets and hands them to the navigator.
#[derive(Clone)]
pub struct RedirectComposer {
    navigator: NavigatorRef,
}

impl RedirectComposer {
    pub fn new(navigator: NavigatorRef) -> Self {
        Self { navigator }
    }

    /// Composes the target for `params` under `link` and navigates to it.
    ///
    /// Returns the target that was issued. Nothing is known about whether the
    /// app picked it up.
    pub async fn redirect<P: IncomingParameters>(
        &self,
        link: &DeepLink,
        params: &P,
    ) -> Result<RedirectTarget> {
        let target = link.compose(params);
        tracing::info!(url = %target, "handing off to app");
        self.navigator.navigate(&target).await?;
        Ok(target)
    }
}
