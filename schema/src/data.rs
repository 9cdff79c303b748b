//! Data schema declaration: models, fields, relationships, and authorization.
//!
//! DESIGN
//! ======
//! The schema is a static value built once at startup. The server consults
//! [`DataSchema::authorize`] before every CRUD operation; nothing else in the
//! system decides who may touch a record. Rules grant operations to a class
//! of principal and are additive; a request is allowed when any rule on the
//! model grants the operation to the caller's class.
//!
//! `owner` and `createdBy` are ordinary string fields. No rule reads them,
//! so any authenticated principal may mutate any record.

#[cfg(test)]
#[path = "data_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

// =============================================================================
// VOCABULARY
// =============================================================================

/// Declared record types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    User,
    Recipe,
    SavedRecipe,
    Review,
}

impl Model {
    pub const ALL: [Self; 4] = [Self::User, Self::Recipe, Self::SavedRecipe, Self::Review];

    /// Declared model name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Recipe => "Recipe",
            Self::SavedRecipe => "SavedRecipe",
            Self::Review => "Review",
        }
    }

    /// REST collection segment (`/api/{collection}`).
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Recipe => "recipes",
            Self::SavedRecipe => "saved-recipes",
            Self::Review => "reviews",
        }
    }
}

/// CRUD operation on a record. List and get are both `Read`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];
}

/// Class of caller a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// Caller holding a valid session.
    Authenticated,
    /// Caller without a session.
    Guest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Id,
    String,
    StringList,
    Integer,
    /// Foreign key to another model.
    BelongsTo { model: Model },
    /// Inverse side of a `BelongsTo` on `model`, keyed by `foreign_key`.
    HasMany { model: Model, foreign_key: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

// =============================================================================
// AUTHORIZATION RULES
// =============================================================================

/// Grants a set of operations to one class of principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthRule {
    pub principal: PrincipalKind,
    pub operations: Vec<Operation>,
}

impl AuthRule {
    /// Restrict (or widen) the rule to exactly `operations`.
    #[must_use]
    pub fn to(mut self, operations: &[Operation]) -> Self {
        self.operations = operations.to_vec();
        self
    }

    #[must_use]
    pub fn grants(&self, principal: PrincipalKind, operation: Operation) -> bool {
        self.principal == principal && self.operations.contains(&operation)
    }
}

/// Rule constructors, read as `allow::authenticated()`.
pub mod allow {
    use super::{AuthRule, Operation, PrincipalKind};

    /// Every operation for any signed-in principal.
    #[must_use]
    pub fn authenticated() -> AuthRule {
        AuthRule { principal: PrincipalKind::Authenticated, operations: Operation::ALL.to_vec() }
    }

    /// Nothing for guests until narrowed with [`AuthRule::to`].
    #[must_use]
    pub fn guest() -> AuthRule {
        AuthRule { principal: PrincipalKind::Guest, operations: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("{operation:?} on {model:?} requires an authenticated principal")]
    Unauthenticated { model: Model, operation: Operation },
    #[error("{operation:?} on {model:?} is not permitted")]
    Forbidden { model: Model, operation: Operation },
    #[error("model not declared: {0:?}")]
    UndeclaredModel(Model),
}

// =============================================================================
// SCHEMA
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelDef {
    pub model: Model,
    pub fields: Vec<FieldDef>,
    pub rules: Vec<AuthRule>,
}

impl ModelDef {
    #[must_use]
    pub fn new(model: Model) -> Self {
        Self { model, fields: Vec::new(), rules: Vec::new() }
    }

    #[must_use]
    pub fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(FieldDef { name, kind });
        self
    }

    #[must_use]
    pub fn authorization(mut self, rules: Vec<AuthRule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataSchema {
    pub models: Vec<ModelDef>,
}

impl DataSchema {
    /// The recipe app schema: four models, each open to any authenticated
    /// principal for every operation and closed to guests.
    #[must_use]
    pub fn recipe_app() -> Self {
        use FieldKind as F;

        let user = ModelDef::new(Model::User)
            .field("id", F::Id)
            .field("username", F::String)
            .field("email", F::String)
            .field("savedRecipes", F::HasMany { model: Model::SavedRecipe, foreign_key: "userId" })
            .authorization(vec![allow::authenticated()]);

        let recipe = ModelDef::new(Model::Recipe)
            .field("id", F::Id)
            .field("createdBy", F::String)
            .field("name", F::String)
            .field("description", F::String)
            .field("course", F::String)
            .field("time", F::String)
            .field("numServings", F::String)
            .field("difficulty", F::String)
            .field("ingredients", F::StringList)
            .field("instructions", F::StringList)
            .field("owner", F::String)
            .field("imageFileNames", F::StringList)
            .field("averageRating", F::Integer)
            .field("numReviews", F::Integer)
            .field("reviews", F::HasMany { model: Model::Review, foreign_key: "recipeId" })
            .authorization(vec![allow::authenticated()]);

        let saved_recipe = ModelDef::new(Model::SavedRecipe)
            .field("id", F::Id)
            .field("userId", F::BelongsTo { model: Model::User })
            .field("recipeId", F::BelongsTo { model: Model::Recipe })
            .authorization(vec![allow::authenticated()]);

        let review = ModelDef::new(Model::Review)
            .field("id", F::Id)
            .field("reviewStars", F::Integer)
            .field("reviewText", F::String)
            .field("recipeId", F::BelongsTo { model: Model::Recipe })
            .field("createdBy", F::String)
            .field("owner", F::String)
            .authorization(vec![allow::authenticated()]);

        Self { models: vec![user, recipe, saved_recipe, review] }
    }

    #[must_use]
    pub fn model(&self, model: Model) -> Option<&ModelDef> {
        self.models.iter().find(|def| def.model == model)
    }

    /// Decide whether `principal` may perform `operation` on `model`.
    ///
    /// # Errors
    ///
    /// [`AccessError::Unauthenticated`] when a guest is refused (signing in
    /// might help), [`AccessError::Forbidden`] when an authenticated
    /// principal is refused, [`AccessError::UndeclaredModel`] when the model
    /// is missing from the schema.
    pub fn authorize(&self, model: Model, principal: PrincipalKind, operation: Operation) -> Result<(), AccessError> {
        let def = self.model(model).ok_or(AccessError::UndeclaredModel(model))?;
        if def.rules.iter().any(|rule| rule.grants(principal, operation)) {
            return Ok(());
        }
        match principal {
            PrincipalKind::Guest => Err(AccessError::Unauthenticated { model, operation }),
            PrincipalKind::Authenticated => Err(AccessError::Forbidden { model, operation }),
        }
    }
}
