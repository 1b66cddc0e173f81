// Markup-Attribute Context Classifier Tests
//
// Offsets are derived with `find` so the fixtures stay readable. The span
// check is inclusive at both ends of the attribute value.

use crate::context::is_in_markup_context;

#[test]
fn test_offset_inside_class_value() {
    let text = r#"<div class="foo bar">hello</div>"#;
    let value_start = text.find("foo bar").unwrap();

    assert!(is_in_markup_context(text, value_start));
    assert!(is_in_markup_context(text, value_start + 3));
    // Inclusive end: the position right after the last value byte counts.
    assert!(is_in_markup_context(text, value_start + "foo bar".len()));
}

#[test]
fn test_offset_outside_the_attribute_value() {
    let text = r#"<div class="foo bar">hello</div>"#;

    // Tag name
    assert!(!is_in_markup_context(text, 1));
    // Element text content
    assert!(!is_in_markup_context(text, text.find("hello").unwrap()));
    // Past the end of the document
    assert!(!is_in_markup_context(text, text.len() + 10));
}

#[test]
fn test_classname_attribute_matches() {
    let text = r#"<button classname="btn-primary">Go</button>"#;
    let inside = text.find("btn-primary").unwrap() + 2;

    assert!(is_in_markup_context(text, inside));
}

#[test]
fn test_other_attributes_do_not_match() {
    let text = r#"<div id="foo" data-role="bar">x</div>"#;

    assert!(!is_in_markup_context(text, text.find("foo").unwrap()));
    assert!(!is_in_markup_context(text, text.find("bar").unwrap()));
}

#[test]
fn test_repeated_value_resolves_to_the_class_occurrence() {
    // The id holds the same literal text as the class; only the class
    // attribute's occurrence is a match.
    let text = r#"<div id="foo" class="foo">x</div>"#;
    let id_foo = text.find("foo").unwrap();
    let class_foo = text.rfind("foo").unwrap();

    assert!(!is_in_markup_context(text, id_foo));
    assert!(is_in_markup_context(text, class_foo + 1));
}

#[test]
fn test_empty_class_value_matches_between_quotes() {
    let text = r#"<div class="">x</div>"#;
    let between_quotes = text.find(r#""""#).unwrap() + 1;

    assert!(is_in_markup_context(text, between_quotes));
}

#[test]
fn test_attribute_name_is_case_insensitive() {
    let text = r#"<DIV CLASS="shout">x</DIV>"#;
    let inside = text.find("shout").unwrap() + 2;

    assert!(is_in_markup_context(text, inside));
}

#[test]
fn test_plain_text_never_matches() {
    let text = "just some prose with class words in it";
    assert!(!is_in_markup_context(text, 5));
    assert!(!is_in_markup_context(text, text.find("class").unwrap()));
}

#[test]
fn test_multiple_tags_each_get_their_own_span() {
    let text = r#"<div class="alpha"><span class="beta">x</span></div>"#;

    assert!(is_in_markup_context(text, text.find("alpha").unwrap() + 1));
    assert!(is_in_markup_context(text, text.find("beta").unwrap() + 1));
    assert!(!is_in_markup_context(text, text.find("span").unwrap()));
}
