//! Shared record model and access declarations for the recipe app.
//!
//! This crate owns the declarations used by both `server` and `client`:
//! the record types exchanged over the REST API, the data schema with its
//! authorization rules, and the object-storage access policy. It performs
//! no I/O; the server enforces these declarations and the client consumes
//! the record types.

pub mod data;
pub mod records;
pub mod storage;

pub use data::{AccessError, DataSchema, Model, Operation, PrincipalKind};
pub use records::{
    ListFilter, Record, Recipe, RecipeDraft, RecipeFilter, Review, ReviewDraft, ReviewFilter, SavedRecipe, SavedRecipeDraft,
    SavedRecipeFilter, User, UserDraft, UserFilter,
};
pub use storage::{StorageAction, StorageDenied, StoragePolicy, recipe_image_key, validate_object_key};
