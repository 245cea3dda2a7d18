use serde::Serialize;

/// The query string of a landing page, as ordered `(name, value)` pairs.
///
/// Built once per page load by [`crate::interfaces::query::read_query`] and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Returns the first value recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// A typed record over a fixed set of recognized query fields.
///
/// Absent fields are `None`. A present value keeps its exact bytes, so
/// `?plan_name=` yields `Some("")` rather than `None`.
pub trait IncomingParameters: Send + Sync + 'static {
    /// Recognized field names, in the order they are forwarded to the app.
    const FIELDS: &'static [&'static str];
    /// Fields whose presence alone marks the record as usable.
    const ANCHORS: &'static [&'static str];

    fn extract(query: &QueryParams) -> Self;

    fn get(&self, field: &str) -> Option<&str>;

    /// Present, non-empty fields in [`Self::FIELDS`] order.
    fn present_fields(&self) -> Vec<(&'static str, &str)> {
        Self::FIELDS
            .iter()
            .filter_map(|&field| {
                self.get(field)
                    .filter(|value| !value.is_empty())
                    .map(|value| (field, value))
            })
            .collect()
    }

    /// True iff at least one anchor field holds a non-empty value.
    fn is_valid(&self) -> bool {
        Self::ANCHORS
            .iter()
            .any(|&anchor| self.get(anchor).is_some_and(|value| !value.is_empty()))
    }
}

fn owned(query: &QueryParams, field: &str) -> Option<String> {
    query.get(field).map(str::to_owned)
}

/// Fields carried back from the payment provider's success redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentDetails {
    pub subscription_id: Option<String>,
    pub plan_name: Option<String>,
    pub invoice_amount: Option<String>,
    pub email: Option<String>,
    pub recurring_charges: Option<String>,
    pub transaction_id: Option<String>,
}

impl IncomingParameters for PaymentDetails {
    const FIELDS: &'static [&'static str] = &[
        "subscription_id",
        "plan_name",
        "invoice_amount",
        "email",
        "recurring_charges",
        "transaction_id",
    ];
    const ANCHORS: &'static [&'static str] = &["transaction_id", "subscription_id"];

    fn extract(query: &QueryParams) -> Self {
        Self {
            subscription_id: owned(query, "subscription_id"),
            plan_name: owned(query, "plan_name"),
            invoice_amount: owned(query, "invoice_amount"),
            email: owned(query, "email"),
            recurring_charges: owned(query, "recurring_charges"),
            transaction_id: owned(query, "transaction_id"),
        }
    }

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "subscription_id" => self.subscription_id.as_deref(),
            "plan_name" => self.plan_name.as_deref(),
            "invoice_amount" => self.invoice_amount.as_deref(),
            "email" => self.email.as_deref(),
            "recurring_charges" => self.recurring_charges.as_deref(),
            "transaction_id" => self.transaction_id.as_deref(),
            _ => None,
        }
    }
}

/// Fields carried back from an OAuth-style authorization redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl IncomingParameters for AuthCallback {
    const FIELDS: &'static [&'static str] = &["code", "state", "error"];
    const ANCHORS: &'static [&'static str] = &["code"];

    fn extract(query: &QueryParams) -> Self {
        Self {
            code: owned(query, "code"),
            state: owned(query, "state"),
            error: owned(query, "error"),
        }
    }

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "code" => self.code.as_deref(),
            "state" => self.state.as_deref(),
            "error" => self.error.as_deref(),
            _ => None,
        }
    }
}
