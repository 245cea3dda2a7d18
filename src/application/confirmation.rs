use super::composer::RedirectComposer;
use crate::domain::params::{IncomingParameters, PaymentDetails};
use crate::domain::state::HandoffState;
use crate::domain::target::{DeepLink, RedirectTarget};
use crate::error::Result;

/// The payment confirmation page.
///
/// Shows what the payment provider sent back and waits for the user to
/// continue. There is no timed sequence: the state is fixed at load time.
pub struct ConfirmationPage {
    details: PaymentDetails,
    valid: bool,
    link: DeepLink,
    composer: RedirectComposer,
}

impl ConfirmationPage {
    pub fn load(details: PaymentDetails, link: DeepLink, composer: RedirectComposer) -> Self {
        let valid = details.is_valid();
        tracing::debug!(valid, "payment confirmation loaded");
        Self {
            details,
            valid,
            link,
            composer,
        }
    }

    pub fn details(&self) -> &PaymentDetails {
        &self.details
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn state(&self) -> HandoffState {
        if self.valid {
            HandoffState::Ready
        } else {
            HandoffState::Pending
        }
    }

    /// Redirects to the app with whatever details were received.
    ///
    /// Not gated on validity: a page without details still hands off, with an
    /// empty query.
    pub async fn continue_to_app(&self) -> Result<RedirectTarget> {
        if !self.valid {
            tracing::debug!("continuing without payment details");
        }
        self.composer.redirect(&self.link, &self.details).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::QueryParams;
    use crate::infrastructure::navigators::RecordingNavigator;
    use std::sync::Arc;

    fn page(pairs: &[(&str, &str)]) -> (ConfirmationPage, RecordingNavigator) {
        let navigator = RecordingNavigator::new();
        let details = PaymentDetails::extract(&pairs.iter().copied().collect::<QueryParams>());
        let page = ConfirmationPage::load(
            details,
            DeepLink::new("vealthx", "app/callback"),
            RedirectComposer::new(Arc::new(navigator.clone())),
        );
        (page, navigator)
    }

    #[test]
    fn test_valid_page_is_ready() {
        let (page, _) = page(&[("transaction_id", "tx_1")]);
        assert!(page.is_valid());
        assert_eq!(page.state(), HandoffState::Ready);
    }

    #[test]
    fn test_page_without_anchor_is_pending() {
        let (page, navigator) = page(&[("plan_name", "Pro")]);
        assert!(!page.is_valid());
        assert_eq!(page.state(), HandoffState::Pending);
        assert!(navigator.targets().is_empty());
    }

    #[tokio::test]
    async fn test_continue_forwards_present_details() {
        let (page, navigator) = page(&[
            ("transaction_id", "tx_1"),
            ("invoice_amount", "49.99"),
            ("plan_name", "Pro"),
        ]);

        let target = page.continue_to_app().await.unwrap();

        assert_eq!(
            target.as_str(),
            "vealthx://app/callback?plan_name=Pro&invoice_amount=49.99&transaction_id=tx_1"
        );
        assert_eq!(navigator.targets(), vec![target]);
        assert_eq!(page.state(), HandoffState::Ready);
    }

    #[tokio::test]
    async fn test_continue_is_not_blocked_when_invalid() {
        let (page, navigator) = page(&[]);

        let target = page.continue_to_app().await.unwrap();

        assert_eq!(target.as_str(), "vealthx://app/callback?");
        assert_eq!(navigator.targets().len(), 1);
    }
}
