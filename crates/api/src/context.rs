use ironbank_core::Email;

/// Session context for a request (authenticated subject identity).
///
/// Inserted by the session gate and visible to the wrapped handler for the
/// duration of that single request only; never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    subject: Email,
}

impl SessionContext {
    pub fn new(subject: Email) -> Self {
        Self { subject }
    }

    pub fn subject(&self) -> &Email {
        &self.subject
    }
}
