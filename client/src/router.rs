//! Route table and auth-gated navigation guard.
//!
//! DESIGN
//! ======
//! Each route is either guarded or open. Entering a guarded route asks the
//! auth service for the current principal again, ignoring the cached auth
//! store. Success lets the view render; any failure replaces the navigation
//! with `/login?redirect=<intended path>`. Open routes never query.
//! Concurrent checks are not de-duplicated.
//!
//! The login page hands `redirect` back to [`safe_redirect_target`], which
//! only honours same-origin absolute paths.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::auth::AuthService;
use crate::util::encode::encode_component;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Requires a valid session at navigation time.
    Guarded,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteView {
    Recipes,
    NewRecipe,
    RecipeDetail,
    EditRecipe,
    MyRecipes,
    Login,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern; `:name` segments match any single non-empty segment.
    pub path: &'static str,
    pub view: RouteView,
    pub access: Access,
}

pub const ROUTES: [RouteDef; 6] = [
    RouteDef { path: "/", view: RouteView::Recipes, access: Access::Guarded },
    RouteDef { path: "/addRecipe", view: RouteView::NewRecipe, access: Access::Guarded },
    RouteDef { path: "/recipe/:id", view: RouteView::RecipeDetail, access: Access::Guarded },
    RouteDef { path: "/recipe/:id/edit", view: RouteView::EditRecipe, access: Access::Guarded },
    RouteDef { path: "/myRecipes", view: RouteView::MyRecipes, access: Access::Guarded },
    RouteDef { path: LOGIN_PATH, view: RouteView::Login, access: Access::Open },
];

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut expected = segments(pattern);
    let mut actual = segments(path);
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some(p), Some(a)) if p.starts_with(':') || p == a => {}
            _ => return false,
        }
    }
}

/// Look up the route for a concrete path. Query and fragment are ignored.
#[must_use]
pub fn route_for(path: &str) -> Option<&'static RouteDef> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find(|route| pattern_matches(route.path, path))
}

/// Login URL that resumes at `intended` after sign-in.
#[must_use]
pub fn login_redirect(intended: &str) -> String {
    format!("{LOGIN_PATH}?redirect={}", encode_component(intended))
}

/// Where to go after login: `raw` when it is a same-origin absolute path,
/// otherwise `/`.
///
/// Browsers strip tabs and newlines while parsing a URL, so any control or
/// whitespace character rejects the target before the `//` check.
#[must_use]
pub fn safe_redirect_target(raw: Option<&str>) -> String {
    match raw {
        Some(target)
            if !target.chars().any(|c| c.is_control() || c.is_whitespace())
                && target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\') =>
        {
            target.to_owned()
        }
        _ => "/".to_owned(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Replace the navigation with this URL.
    Redirect(String),
}

/// Access level the route table assigns to `path`. Paths outside the table
/// are treated as guarded.
#[must_use]
pub fn access_for(path: &str) -> Access {
    route_for(path).map_or(Access::Guarded, |route| route.access)
}

/// Decide whether navigation to `intended` (path plus optional query) may
/// proceed under `access`.
pub async fn check_navigation(intended: &str, access: Access, service: &impl AuthService) -> GuardDecision {
    if access == Access::Open {
        return GuardDecision::Allow;
    }
    match service.current_principal().await {
        Ok(_) => GuardDecision::Allow,
        Err(e) => {
            leptos::logging::log!("navigation to {intended} needs a session: {e}");
            GuardDecision::Redirect(login_redirect(intended))
        }
    }
}

/// Path plus query as the browser shows it.
#[must_use]
pub fn intended_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Renders `children` only after the guard allows the current location.
/// Every use of this component is a guarded route.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let location = use_location();
    let allowed = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        use crate::net::auth::HttpAuthService;

        let navigate = use_navigate();
        Effect::new(move || {
            let intended = intended_path(&location.pathname.get(), &location.search.get());
            allowed.set(false);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match check_navigation(&intended, Access::Guarded, &HttpAuthService).await {
                    GuardDecision::Allow => allowed.set(true),
                    GuardDecision::Redirect(to) => {
                        navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = location;

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <p class="guard-pending">"Checking session..."</p> }
        >
            {children()}
        </Show>
    }
}
