//! Route admission decisions.
//!
//! Two small pure functions decide what a screen may show for the current
//! session snapshot. The view layer evaluates them every frame; nothing
//! here mutates state.

use super::{LoadPhase, SessionSnapshot};

/// Decision for a view that requires a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Identity not determined yet; show the loading placeholder only.
    Loading,
    /// Settled and signed out; send the user to the sign-in entry point
    /// (replacing history, where history exists).
    RedirectToSignIn,
    /// Render the view inside the shared application chrome.
    Render,
}

/// Decision for a view reserved for signed-out users (the auth screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicAdmission {
    Loading,
    /// Settled and signed in; send the user to the default landing view.
    RedirectToDashboard,
    /// Render the view unwrapped.
    Render,
}

pub fn protected_route(snapshot: &SessionSnapshot) -> Admission {
    if snapshot.phase == LoadPhase::Initializing {
        Admission::Loading
    } else if !snapshot.is_signed_in() {
        Admission::RedirectToSignIn
    } else {
        Admission::Render
    }
}

pub fn public_route(snapshot: &SessionSnapshot) -> PublicAdmission {
    if snapshot.phase == LoadPhase::Initializing {
        PublicAdmission::Loading
    } else if snapshot.is_signed_in() {
        PublicAdmission::RedirectToDashboard
    } else {
        PublicAdmission::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;

    fn snapshot(phase: LoadPhase, signed_in: bool) -> SessionSnapshot {
        let mut snap = SessionSnapshot::initial();
        snap.phase = phase;
        if signed_in {
            snap.user = Some(AuthUser {
                id: "u1".into(),
                email: "jane@vetcare.com".into(),
            });
        }
        snap
    }

    #[test]
    fn test_protected_never_renders_while_initializing() {
        // Regardless of the identity value
        assert_eq!(
            protected_route(&snapshot(LoadPhase::Initializing, false)),
            Admission::Loading
        );
        assert_eq!(
            protected_route(&snapshot(LoadPhase::Initializing, true)),
            Admission::Loading
        );
    }

    #[test]
    fn test_protected_redirects_iff_settled_and_signed_out() {
        assert_eq!(
            protected_route(&snapshot(LoadPhase::Settled, false)),
            Admission::RedirectToSignIn
        );
        assert_eq!(
            protected_route(&snapshot(LoadPhase::Settled, true)),
            Admission::Render
        );
    }

    #[test]
    fn test_public_redirects_iff_settled_and_signed_in() {
        assert_eq!(
            public_route(&snapshot(LoadPhase::Settled, true)),
            PublicAdmission::RedirectToDashboard
        );
        assert_eq!(
            public_route(&snapshot(LoadPhase::Settled, false)),
            PublicAdmission::Render
        );
        assert_eq!(
            public_route(&snapshot(LoadPhase::Initializing, false)),
            PublicAdmission::Loading
        );
    }

    #[test]
    fn test_missing_profile_does_not_block_admission() {
        let snap = snapshot(LoadPhase::Settled, true);
        assert!(snap.profile.is_none());
        assert_eq!(protected_route(&snap), Admission::Render);
    }
}
