use futures::executor::block_on;
use std::cell::Cell;
use uuid::Uuid;

use super::*;
use crate::net::types::Principal;

struct FakeAuth {
    signed_in: bool,
    calls: Cell<u32>,
}

impl FakeAuth {
    fn new(signed_in: bool) -> Self {
        Self { signed_in, calls: Cell::new(0) }
    }
}

impl AuthService for FakeAuth {
    async fn current_principal(&self) -> Result<Principal, String> {
        self.calls.set(self.calls.get() + 1);
        if self.signed_in {
            Ok(Principal { id: Uuid::nil(), username: "cook".to_owned(), email: "cook@example.com".to_owned() })
        } else {
            Err("current user failed: 401".to_owned())
        }
    }

    async fn sign_out(&self) -> Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// route table
// =============================================================================

#[test]
fn route_for_matches_static_and_param_routes() {
    let id = Uuid::new_v4();
    assert_eq!(route_for("/").map(|r| r.view), Some(RouteView::Recipes));
    assert_eq!(route_for("/addRecipe").map(|r| r.view), Some(RouteView::NewRecipe));
    assert_eq!(route_for(&format!("/recipe/{id}")).map(|r| r.view), Some(RouteView::RecipeDetail));
    assert_eq!(route_for(&format!("/recipe/{id}/edit")).map(|r| r.view), Some(RouteView::EditRecipe));
    assert_eq!(route_for("/myRecipes").map(|r| r.view), Some(RouteView::MyRecipes));
    assert_eq!(route_for("/login").map(|r| r.view), Some(RouteView::Login));
}

#[test]
fn route_for_ignores_query_and_trailing_slash() {
    assert_eq!(route_for("/myRecipes?tab=saved").map(|r| r.view), Some(RouteView::MyRecipes));
    assert_eq!(route_for("/addRecipe/").map(|r| r.view), Some(RouteView::NewRecipe));
    assert_eq!(route_for("/login?redirect=%2F").map(|r| r.access), Some(Access::Open));
}

#[test]
fn route_for_rejects_unknown_paths() {
    assert!(route_for("/recipe").is_none());
    assert!(route_for("/recipe/1/edit/more").is_none());
    assert!(route_for("/unknown").is_none());
}

#[test]
fn unknown_paths_are_guarded() {
    assert_eq!(access_for("/unknown"), Access::Guarded);
    assert_eq!(access_for("/recipe"), Access::Guarded);
    assert_eq!(access_for("/login"), Access::Open);
}

#[test]
fn every_route_but_login_is_guarded() {
    for route in ROUTES {
        let expected = if route.path == LOGIN_PATH { Access::Open } else { Access::Guarded };
        assert_eq!(route.access, expected, "{}", route.path);
    }
}

// =============================================================================
// redirects
// =============================================================================

#[test]
fn login_redirect_encodes_intended_path_with_query() {
    assert_eq!(login_redirect("/myRecipes"), "/login?redirect=%2FmyRecipes");
    assert_eq!(login_redirect("/recipe/7?tab=reviews"), "/login?redirect=%2Frecipe%2F7%3Ftab%3Dreviews");
}

#[test]
fn safe_redirect_target_only_allows_local_paths() {
    assert_eq!(safe_redirect_target(Some("/recipe/1/edit")), "/recipe/1/edit");
    assert_eq!(safe_redirect_target(Some("/myRecipes?x=1")), "/myRecipes?x=1");
    assert_eq!(safe_redirect_target(Some("//evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("https://evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("/\\evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("/\t/evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("/\n/evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("/\r/evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some(" //evil.example.com")), "/");
    assert_eq!(safe_redirect_target(Some("/my recipes")), "/");
    assert_eq!(safe_redirect_target(Some("")), "/");
    assert_eq!(safe_redirect_target(None), "/");
}

#[test]
fn intended_path_joins_search() {
    assert_eq!(intended_path("/myRecipes", ""), "/myRecipes");
    assert_eq!(intended_path("/myRecipes", "?tab=saved"), "/myRecipes?tab=saved");
    assert_eq!(intended_path("/myRecipes", "tab=saved"), "/myRecipes?tab=saved");
}

// =============================================================================
// guard
// =============================================================================

#[test]
fn guarded_route_without_session_redirects_to_login() {
    let service = FakeAuth::new(false);
    for path in ["/", "/addRecipe", "/recipe/abc", "/recipe/abc/edit", "/myRecipes"] {
        let decision = block_on(check_navigation(path, access_for(path), &service));
        assert_eq!(decision, GuardDecision::Redirect(login_redirect(path)), "{path}");
    }
    assert_eq!(service.calls.get(), 5);
}

#[test]
fn guarded_route_with_session_is_allowed() {
    let service = FakeAuth::new(true);
    assert_eq!(block_on(check_navigation("/myRecipes", access_for("/myRecipes"), &service)), GuardDecision::Allow);
    assert_eq!(service.calls.get(), 1);
}

#[test]
fn guard_requeries_on_every_navigation() {
    let service = FakeAuth::new(true);
    block_on(check_navigation("/", access_for("/"), &service));
    block_on(check_navigation("/", access_for("/"), &service));
    assert_eq!(service.calls.get(), 2);
}

#[test]
fn open_routes_do_not_query() {
    let service = FakeAuth::new(false);
    let path = "/login?redirect=%2F";
    assert_eq!(block_on(check_navigation(path, access_for(path), &service)), GuardDecision::Allow);
    assert_eq!(service.calls.get(), 0);
}

#[test]
fn explicit_guarded_access_queries_even_for_unmatched_paths() {
    let service = FakeAuth::new(false);
    let decision = block_on(check_navigation("/recipe", Access::Guarded, &service));
    assert_eq!(decision, GuardDecision::Redirect(login_redirect("/recipe")));
    assert_eq!(service.calls.get(), 1);
}

#[test]
fn redirect_preserves_query_string() {
    let service = FakeAuth::new(false);
    let path = "/myRecipes?tab=saved";
    let decision = block_on(check_navigation(path, access_for(path), &service));
    assert_eq!(decision, GuardDecision::Redirect("/login?redirect=%2FmyRecipes%3Ftab%3Dsaved".to_owned()));
}
