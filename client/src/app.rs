//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::pages::{
    edit_recipe::EditRecipePage, login::LoginPage, my_recipes::MyRecipesPage, new_recipe::NewRecipePage,
    recipe_detail::RecipeDetailPage, recipes::RecipesPage,
};
use crate::router::RequireAuth;
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth store, runs the initial session check in the browser,
/// and declares the route table. Every route except `/login` is wrapped in
/// [`RequireAuth`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::state::auth::check_auth(auth, &crate::net::auth::HttpAuthService).await;
    });

    view! {
        <Title text="Recipes"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireAuth><RecipesPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("addRecipe")
                        view=|| view! { <RequireAuth><NewRecipePage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("recipe"), ParamSegment("id"))
                        view=|| view! { <RequireAuth><RecipeDetailPage/></RequireAuth> }
                    />
                    <Route
                        path=(StaticSegment("recipe"), ParamSegment("id"), StaticSegment("edit"))
                        view=|| view! { <RequireAuth><EditRecipePage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("myRecipes")
                        view=|| view! { <RequireAuth><MyRecipesPage/></RequireAuth> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
