//! Auth gate for authenticated layouts.
//!
//! Fullscreen and dashboard shells only render their children for a
//! signed-in account. The gate is a pure transition over the current
//! session snapshot, re-evaluated on every snapshot change, so a late
//! session restore can still flip a placeholder into content.

use crate::domain::account::Account;

/// Route an unauthenticated visitor is sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// What the session currently knows about the visitor.
#[derive(Debug, Clone, Default)]
pub struct AuthSnapshot {
    /// The signed-in account, once known.
    pub account: Option<Account>,
    /// Whether a login or session restore is still in flight.
    pub is_loading: bool,
}

impl AuthSnapshot {
    /// Snapshot of a session still restoring itself.
    pub fn loading() -> Self {
        Self {
            account: None,
            is_loading: true,
        }
    }

    /// Snapshot of a signed-in session.
    pub fn authenticated(account: Account) -> Self {
        Self {
            account: Some(account),
            is_loading: false,
        }
    }

    /// Snapshot of a visitor with no session.
    pub fn anonymous() -> Self {
        Self {
            account: None,
            is_loading: false,
        }
    }
}

/// What an authenticated layout should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the gated children.
    Render,
    /// Session state is still unknown: show a placeholder, do not
    /// redirect yet.
    Placeholder,
    /// No session: send the visitor to the given route.
    Redirect(&'static str),
}

/// Evaluate the gate for one snapshot.
pub fn evaluate(snapshot: &AuthSnapshot) -> GateOutcome {
    if snapshot.is_loading {
        return GateOutcome::Placeholder;
    }

    match snapshot.account {
        Some(_) => GateOutcome::Render,
        None => GateOutcome::Redirect(LOGIN_ROUTE),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::account::Role;

    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "student@example.com".to_string(),
            display_name: "Student".to_string(),
            role: Role::Student,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_visitor_is_redirected_to_login() {
        assert_eq!(
            evaluate(&AuthSnapshot::anonymous()),
            GateOutcome::Redirect("/login"),
        );
    }

    #[test]
    fn test_loading_session_shows_placeholder_and_does_not_redirect() {
        assert_eq!(evaluate(&AuthSnapshot::loading()), GateOutcome::Placeholder);
    }

    #[test]
    fn test_signed_in_session_renders_children() {
        assert_eq!(
            evaluate(&AuthSnapshot::authenticated(account())),
            GateOutcome::Render,
        );
    }

    #[test]
    fn test_gate_follows_snapshot_transitions() {
        // restore starts -> placeholder; restore fails -> redirect;
        // login succeeds -> render.
        assert_eq!(evaluate(&AuthSnapshot::loading()), GateOutcome::Placeholder);
        assert_eq!(
            evaluate(&AuthSnapshot::anonymous()),
            GateOutcome::Redirect(LOGIN_ROUTE),
        );
        assert_eq!(
            evaluate(&AuthSnapshot::authenticated(account())),
            GateOutcome::Render,
        );
    }
}
