use super::params::IncomingParameters;
use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

/// Which of a flow's deep-link prefixes a redirect uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetVariant {
    Primary,
    Alternate,
}

/// A fixed `<scheme>://<host-and-path>` prefix that the mobile app intercepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    prefix: String,
}

impl DeepLink {
    pub fn new(scheme: &str, host_and_path: &str) -> Self {
        Self {
            prefix: format!(
                "{}://{}",
                scheme.trim_end_matches("://"),
                host_and_path.trim_start_matches('/')
            ),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the redirect target carrying every present field of `params`.
    ///
    /// Values are form-urlencoded and appear in `P::FIELDS` order. Absent and
    /// empty fields are left out entirely, so an empty record still yields
    /// `<prefix>?`.
    pub fn compose<P: IncomingParameters>(&self, params: &P) -> RedirectTarget {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (field, value) in params.present_fields() {
            query.append_pair(field, value);
        }
        RedirectTarget(format!("{}?{}", self.prefix, query.finish()))
    }
}

/// The full deep-link URL handed to the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RedirectTarget> for String {
    fn from(target: RedirectTarget) -> Self {
        target.0
    }
}

/// The prefixes a flow may redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLinks {
    pub primary: DeepLink,
    pub alternate: DeepLink,
}

impl FlowLinks {
    pub fn get(&self, variant: TargetVariant) -> &DeepLink {
        match variant {
            TargetVariant::Primary => &self.primary,
            TargetVariant::Alternate => &self.alternate,
        }
    }
}
