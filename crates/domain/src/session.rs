/// Appliance session token returned by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub sid: String,
    pub csrf: Option<String>,
}

/// Authentication state threaded through collector calls by the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No attempt made yet, or the last session was rejected.
    #[default]
    Unauthenticated,
    /// The appliance needs no credential.
    Anonymous,
    Active(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_established(&self) -> bool {
        !matches!(self, SessionState::Unauthenticated)
    }

    pub fn invalidate(&mut self) {
        *self = SessionState::Unauthenticated;
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::Active(session),
            None => SessionState::Anonymous,
        }
    }
}
