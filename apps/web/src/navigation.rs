/// The two pages of the site and the header button that toggles between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignUp,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::SignUp => "/signup",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Landing),
            "/signup" => Some(Route::SignUp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAction {
    pub label: &'static str,
    pub target: Route,
}

/// On the landing page the header offers "Sign Up"; everywhere else it
/// offers "Home".
pub fn header_action(current_path: &str) -> HeaderAction {
    match Route::from_path(current_path) {
        Some(Route::Landing) => HeaderAction {
            label: "Sign Up",
            target: Route::SignUp,
        },
        _ => HeaderAction {
            label: "Home",
            target: Route::Landing,
        },
    }
}
