//! Text and JSON renderings of page state.

use crate::application::confirmation::ConfirmationPage;
use crate::application::sequencer::AuthHandoff;
use crate::domain::params::{AuthCallback, PaymentDetails};
use crate::domain::state::{HandoffSnapshot, HandoffState};
use crate::domain::target::RedirectTarget;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Payment,
    Auth,
}

/// Machine-readable summary of a page load.
#[derive(Debug, Serialize)]
pub struct PageReport<'a, P: Serialize> {
    pub flow: Flow,
    pub valid: bool,
    #[serde(flatten)]
    pub snapshot: ReportState,
    pub params: &'a P,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<RedirectTarget>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportState {
    pub state: HandoffState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<u32>,
}

impl<'a> PageReport<'a, PaymentDetails> {
    pub fn payment(page: &'a ConfirmationPage, redirects: Vec<RedirectTarget>) -> Self {
        Self {
            flow: Flow::Payment,
            valid: page.is_valid(),
            snapshot: ReportState {
                state: page.state(),
                countdown: None,
            },
            params: page.details(),
            redirects,
        }
    }
}

impl<'a> PageReport<'a, AuthCallback> {
    pub fn auth(handoff: &'a AuthHandoff, redirects: Vec<RedirectTarget>) -> Self {
        let snapshot = handoff.snapshot();
        Self {
            flow: Flow::Auth,
            valid: handoff.is_valid(),
            snapshot: ReportState {
                state: snapshot.state,
                countdown: Some(snapshot.countdown.value()),
            },
            params: handoff.params(),
            redirects,
        }
    }
}

impl<P: Serialize> PageReport<'_, P> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The payment confirmation card.
pub fn payment_text(page: &ConfirmationPage) -> String {
    let details = page.details();
    let mut lines = vec![
        "Payment Successful".to_string(),
        "Thank you for your subscription".to_string(),
        String::new(),
        format!(
            "Amount Paid: {}",
            details
                .invoice_amount
                .as_deref()
                .filter(|amount| !amount.is_empty())
                .unwrap_or("0.00")
        ),
    ];

    let rows = [
        ("Plan Name", &details.plan_name),
        ("Transaction ID", &details.transaction_id),
        ("Recurring", &details.recurring_charges),
        ("Email", &details.email),
    ];
    for (label, value) in rows {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    }

    if !page.is_valid() {
        lines.push(String::new());
        lines.push("Waiting for payment details...".to_string());
    }
    lines.push(String::new());
    lines.push("Continue to App".to_string());
    lines.push("Click above to return to the VealthX app".to_string());
    lines.join("\n")
}

/// Lines shown above the auth countdown.
pub fn auth_header(params: &AuthCallback) -> String {
    let mut lines = vec!["Returning to the VealthX app".to_string()];
    if let Some(error) = params.error.as_deref().filter(|error| !error.is_empty()) {
        lines.push(format!("Authorization error: {error}"));
    }
    lines.join("\n")
}

/// One status line for the current auth handoff snapshot.
pub fn auth_status(snapshot: &HandoffSnapshot) -> String {
    match snapshot.state {
        HandoffState::Redirecting => {
            format!("Redirecting to the app in {}...", snapshot.countdown.value())
        }
        HandoffState::HandedOff => "Opening the app...".to_string(),
        HandoffState::Fallback => {
            "If the app did not open, use the button below.".to_string()
        }
        HandoffState::Pending => "Waiting for authorization details...".to_string(),
        HandoffState::Ready => "Ready to return to the app.".to_string(),
    }
}
