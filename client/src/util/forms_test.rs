use super::*;

fn filled_form() -> RecipeForm {
    RecipeForm {
        name: " Pancakes ".to_owned(),
        description: "Fluffy".to_owned(),
        course: "Breakfast".to_owned(),
        time: "20 min".to_owned(),
        num_servings: "4".to_owned(),
        difficulty: "Easy".to_owned(),
        ingredients: "flour\n\n  milk \neggs".to_owned(),
        instructions: "mix\ncook".to_owned(),
    }
}

#[test]
fn parse_lines_trims_and_drops_blank_lines() {
    assert_eq!(parse_lines("  a \n\n b\r\n  \n"), vec!["a", "b"]);
    assert!(parse_lines("").is_empty());
}

#[test]
fn join_lines_round_trips_clean_lists() {
    let lines = vec!["one".to_owned(), "two".to_owned()];
    assert_eq!(parse_lines(&join_lines(&lines)), lines);
}

#[test]
fn parse_stars_accepts_one_through_five() {
    assert_eq!(parse_stars("1"), Some(1));
    assert_eq!(parse_stars(" 5 "), Some(5));
    assert_eq!(parse_stars("0"), None);
    assert_eq!(parse_stars("6"), None);
    assert_eq!(parse_stars("four"), None);
}

#[test]
fn validate_requires_name_ingredients_and_instructions() {
    assert!(filled_form().validate().is_ok());

    let mut form = filled_form();
    form.name = "   ".to_owned();
    assert_eq!(form.validate(), Err("Give the recipe a name.".to_owned()));

    let mut form = filled_form();
    form.ingredients = "\n \n".to_owned();
    assert_eq!(form.validate(), Err("List at least one ingredient.".to_owned()));

    let mut form = filled_form();
    form.instructions = String::new();
    assert_eq!(form.validate(), Err("List at least one instruction.".to_owned()));
}

#[test]
fn to_draft_trims_and_splits_lists() {
    let draft = filled_form().to_draft();
    assert_eq!(draft.name.as_deref(), Some("Pancakes"));
    assert_eq!(draft.ingredients, Some(vec!["flour".to_owned(), "milk".to_owned(), "eggs".to_owned()]));
    assert_eq!(draft.instructions, Some(vec!["mix".to_owned(), "cook".to_owned()]));
    assert_eq!(draft.owner, None);
    assert_eq!(draft.average_rating, None);
}

#[test]
fn to_new_draft_sets_owner_and_images() {
    let owner = uuid::Uuid::from_u128(7).to_string();
    let draft = filled_form().to_new_draft(&owner, "cook", vec!["recipe-manager/x-a.jpg".to_owned()]);
    assert_eq!(draft.owner.as_deref(), Some(owner.as_str()));
    assert_eq!(draft.created_by.as_deref(), Some("cook"));
    assert_eq!(draft.image_file_names, Some(vec!["recipe-manager/x-a.jpg".to_owned()]));
    assert_eq!(draft.name.as_deref(), Some("Pancakes"));
}

#[test]
fn from_recipe_prefills_every_field() {
    let recipe = Recipe {
        id: uuid::Uuid::nil(),
        created_by: "me".to_owned(),
        name: "Soup".to_owned(),
        description: "Hot".to_owned(),
        course: "Dinner".to_owned(),
        time: "1h".to_owned(),
        num_servings: "2".to_owned(),
        difficulty: "Medium".to_owned(),
        ingredients: vec!["water".to_owned(), "salt".to_owned()],
        instructions: vec!["boil".to_owned()],
        owner: "me".to_owned(),
        image_file_names: Vec::new(),
        average_rating: None,
        num_reviews: None,
        created_at: 0,
        updated_at: 0,
    };
    let form = RecipeForm::from_recipe(&recipe);
    assert_eq!(form.name, "Soup");
    assert_eq!(form.ingredients, "water\nsalt");
    assert_eq!(form.instructions, "boil");
    assert!(form.validate().is_ok());
}
