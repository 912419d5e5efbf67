//! Static route table.
//!
//! Path-to-view bindings with a per-route authentication flag. Pure
//! data: guard enforcement belongs to the application shell, not this
//! crate.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One path-to-view binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub view: &'static str,
    /// True for routes the shell should only show to authenticated users.
    pub requires_auth: bool,
}

/// All routes, in display order.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        view: "Home",
        requires_auth: false,
    },
    Route {
        path: "/posts",
        view: "Posts",
        requires_auth: false,
    },
    Route {
        path: "/login",
        view: "Login",
        requires_auth: false,
    },
    Route {
        path: "/register",
        view: "Register",
        requires_auth: false,
    },
    Route {
        path: "/profile",
        view: "Profile",
        requires_auth: true,
    },
    Route {
        path: "/create-post",
        view: "CreatePost",
        requires_auth: true,
    },
];

static ROUTES_BY_PATH: Lazy<HashMap<&'static str, &'static Route>> =
    Lazy::new(|| ROUTES.iter().map(|route| (route.path, route)).collect());

/// Looks up a route by exact path.
pub fn route_for(path: &str) -> Option<&'static Route> {
    ROUTES_BY_PATH.get(path).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_and_create_post_require_auth() {
        assert!(route_for("/profile").unwrap().requires_auth);
        assert!(route_for("/create-post").unwrap().requires_auth);
    }

    #[test]
    fn public_routes_do_not_require_auth() {
        for path in ["/", "/posts", "/login", "/register"] {
            assert!(!route_for(path).unwrap().requires_auth, "{path}");
        }
    }

    #[test]
    fn unknown_paths_have_no_route() {
        assert!(route_for("/admin").is_none());
        assert!(route_for("").is_none());
    }

    #[test]
    fn paths_are_unique() {
        assert_eq!(ROUTES_BY_PATH.len(), ROUTES.len());
    }
}
