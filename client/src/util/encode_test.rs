use super::*;

#[test]
fn unreserved_characters_pass_through() {
    assert_eq!(encode_component("Az09-_.~"), "Az09-_.~");
}

#[test]
fn reserved_characters_are_escaped() {
    assert_eq!(encode_component("/recipe/1?tab=reviews"), "%2Frecipe%2F1%3Ftab%3Dreviews");
    assert_eq!(encode_component("a b&c"), "a%20b%26c");
}

#[test]
fn multibyte_characters_escape_each_byte() {
    assert_eq!(encode_component("é"), "%C3%A9");
}

#[test]
fn encode_path_keeps_separators() {
    assert_eq!(encode_path("recipe-manager/my pie.jpg"), "recipe-manager/my%20pie.jpg");
}
