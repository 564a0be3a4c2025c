//! Launch routing: which screen the app opens on.

use crate::SessionSnapshot;

/// The top-level destinations the launch decision picks between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Session restore hasn't finished; keep showing the splash.
    Splash,
    /// First launch: walk through the intro slides.
    Onboarding,
    /// Onboarding done, nobody logged in.
    Login,
    /// Logged in: the rant feed.
    Feed,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Splash => write!(f, "Splash"),
            Self::Onboarding => write!(f, "Onboarding"),
            Self::Login => write!(f, "Login"),
            Self::Feed => write!(f, "Feed"),
        }
    }
}

/// Picks the first screen from the session and the onboarding flag.
///
/// A logged-in user always goes to the feed, even if the onboarding flag
/// was lost; they've clearly used the app before.
pub fn initial_route(session: &SessionSnapshot, onboarding_complete: bool) -> Route {
    if session.is_loading {
        Route::Splash
    } else if session.is_authenticated() {
        Route::Feed
    } else if !onboarding_complete {
        Route::Onboarding
    } else {
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citizen_protocol::{UserId, UserProfile};

    fn logged_in() -> SessionSnapshot {
        SessionSnapshot {
            token: Some("tok".into()),
            user: Some(UserProfile {
                id: UserId::from("u1"),
                username: "alice".into(),
                email: "a@x.com".into(),
                level: 0,
                points: 0,
            }),
            is_loading: false,
        }
    }

    fn logged_out() -> SessionSnapshot {
        SessionSnapshot {
            token: None,
            user: None,
            is_loading: false,
        }
    }

    #[test]
    fn test_initial_route_while_loading_is_splash() {
        assert_eq!(initial_route(&SessionSnapshot::loading(), true), Route::Splash);
        assert_eq!(initial_route(&SessionSnapshot::loading(), false), Route::Splash);
    }

    #[test]
    fn test_initial_route_logged_in_is_feed() {
        assert_eq!(initial_route(&logged_in(), true), Route::Feed);
        assert_eq!(initial_route(&logged_in(), false), Route::Feed);
    }

    #[test]
    fn test_initial_route_first_launch_is_onboarding() {
        assert_eq!(initial_route(&logged_out(), false), Route::Onboarding);
    }

    #[test]
    fn test_initial_route_returning_logged_out_is_login() {
        assert_eq!(initial_route(&logged_out(), true), Route::Login);
    }

    #[test]
    fn test_route_display() {
        assert_eq!(Route::Feed.to_string(), "Feed");
    }
}
