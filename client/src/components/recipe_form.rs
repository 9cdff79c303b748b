//! Shared input fields for creating and editing a recipe.

use leptos::prelude::*;

use crate::util::forms::{COURSES, DIFFICULTIES, RecipeForm};

/// Text input bound to one `RecipeForm` field.
fn text_field(
    form: RwSignal<RecipeForm>,
    label: &'static str,
    get: fn(&RecipeForm) -> &String,
    set: fn(&mut RecipeForm, String),
) -> impl IntoView {
    view! {
        <label class="recipe-form__field">
            <span>{label}</span>
            <input
                type="text"
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </label>
    }
}

/// Select bound to one `RecipeForm` field.
fn select_field(
    form: RwSignal<RecipeForm>,
    label: &'static str,
    options: &'static [&'static str],
    get: fn(&RecipeForm) -> &String,
    set: fn(&mut RecipeForm, String),
) -> impl IntoView {
    view! {
        <label class="recipe-form__field">
            <span>{label}</span>
            <select
                prop:value=move || form.with(|f| get(f).clone())
                on:change=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            >
                <option value="">"Choose..."</option>
                {options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Multiline list input, one entry per line.
fn lines_field(
    form: RwSignal<RecipeForm>,
    label: &'static str,
    get: fn(&RecipeForm) -> &String,
    set: fn(&mut RecipeForm, String),
) -> impl IntoView {
    view! {
        <label class="recipe-form__field recipe-form__field--wide">
            <span>{label} " (one per line)"</span>
            <textarea
                rows="6"
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            ></textarea>
        </label>
    }
}

#[component]
pub fn RecipeFormFields(form: RwSignal<RecipeForm>) -> impl IntoView {
    view! {
        <div class="recipe-form">
            {text_field(form, "Name", |f| &f.name, |f, v| f.name = v)}
            {text_field(form, "Description", |f| &f.description, |f, v| f.description = v)}
            {select_field(form, "Course", &COURSES, |f| &f.course, |f, v| f.course = v)}
            {text_field(form, "Time", |f| &f.time, |f, v| f.time = v)}
            {text_field(form, "Servings", |f| &f.num_servings, |f, v| f.num_servings = v)}
            {select_field(form, "Difficulty", &DIFFICULTIES, |f| &f.difficulty, |f, v| f.difficulty = v)}
            {lines_field(form, "Ingredients", |f| &f.ingredients, |f, v| f.ingredients = v)}
            {lines_field(form, "Instructions", |f| &f.instructions, |f, v| f.instructions = v)}
        </div>
    }
}
