//! Recipe and review form helpers.
//!
//! DESIGN
//! ======
//! Forms hold raw input strings; list fields are edited as one entry per
//! line. Conversion to drafts happens only after [`RecipeForm::validate`]
//! passes, so views never send half-parsed data.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use schema::{Recipe, RecipeDraft};

pub const COURSES: [&str; 6] = ["Breakfast", "Lunch", "Dinner", "Appetizer", "Dessert", "Snack"];
pub const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// Split multiline input into trimmed, non-empty entries.
#[must_use]
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Parse a star rating between 1 and 5.
#[must_use]
pub fn parse_stars(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|stars| (1..=5).contains(stars))
}

/// Editable recipe fields as the user typed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    pub course: String,
    pub time: String,
    pub num_servings: String,
    pub difficulty: String,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeForm {
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            course: recipe.course.clone(),
            time: recipe.time.clone(),
            num_servings: recipe.num_servings.clone(),
            difficulty: recipe.difficulty.clone(),
            ingredients: join_lines(&recipe.ingredients),
            instructions: join_lines(&recipe.instructions),
        }
    }

    /// Check the fields a recipe cannot be saved without.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Give the recipe a name.".to_owned());
        }
        if parse_lines(&self.ingredients).is_empty() {
            return Err("List at least one ingredient.".to_owned());
        }
        if parse_lines(&self.instructions).is_empty() {
            return Err("List at least one instruction.".to_owned());
        }
        Ok(())
    }

    /// Draft for an update: every editable field, trimmed.
    #[must_use]
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: Some(self.name.trim().to_owned()),
            description: Some(self.description.trim().to_owned()),
            course: Some(self.course.trim().to_owned()),
            time: Some(self.time.trim().to_owned()),
            num_servings: Some(self.num_servings.trim().to_owned()),
            difficulty: Some(self.difficulty.trim().to_owned()),
            ingredients: Some(parse_lines(&self.ingredients)),
            instructions: Some(parse_lines(&self.instructions)),
            ..RecipeDraft::default()
        }
    }

    /// Draft for a new recipe. `owner` is the principal id, `created_by`
    /// the name shown as the author.
    #[must_use]
    pub fn to_new_draft(&self, owner: &str, created_by: &str, image_file_names: Vec<String>) -> RecipeDraft {
        RecipeDraft {
            owner: Some(owner.to_owned()),
            created_by: Some(created_by.to_owned()),
            image_file_names: Some(image_file_names),
            ..self.to_draft()
        }
    }
}
