use cardkit_core::ElementKind;
use cardkit_designer::{
    bind, Condition, DataSource, Document, Element, Mapping, MappingOperator, Row, Template,
};

fn text_element(id: &str, content: &str) -> Element {
    let mut el = Element::new(ElementKind::Text, 0.0, 0.0);
    el.id = Some(id.to_string());
    el.set_primary_content(content);
    el
}

fn template_with(mappings: Vec<(&str, Mapping)>) -> Template {
    let mut doc = Document::default();
    doc.add_element(text_element("title", "Default Title"));
    let mut img = Element::new(ElementKind::Image, 0.0, 120.0);
    img.id = Some("art".to_string());
    doc.add_element(img);

    let mut template = Template::new("test", doc);
    let mut source = DataSource::csv("cards.csv");
    for (id, mapping) in mappings {
        source.mappings.insert(id.to_string(), mapping);
    }
    template.data_source = Some(source);
    template
}

#[test]
fn test_direct_mapping_copies_cell() {
    let template = template_with(vec![(
        "title",
        Mapping::Direct {
            column: "Name".into(),
        },
    )]);
    let row = Row::from_pairs([("Name", "Fire Drake")]);

    let bound = bind(&template, &row);
    assert_eq!(bound.elements[0].primary_content(), Some("Fire Drake"));
}

#[test]
fn test_direct_mapping_skips_missing_and_null() {
    let template = template_with(vec![(
        "title",
        Mapping::Direct {
            column: "Name".into(),
        },
    )]);

    // Column absent entirely.
    let bound = bind(&template, &Row::from_pairs([("Other", "x")]));
    assert_eq!(bound.elements[0].primary_content(), Some("Default Title"));

    // Column present but the cell is empty.
    let bound = bind(&template, &Row::from_pairs([("Name", "")]));
    assert_eq!(bound.elements[0].primary_content(), Some("Default Title"));
}

#[test]
fn test_binding_never_mutates_template() {
    let template = template_with(vec![(
        "title",
        Mapping::Direct {
            column: "Name".into(),
        },
    )]);
    let before = template.document.clone();

    let _ = bind(&template, &Row::from_pairs([("Name", "Changed")]));
    assert_eq!(template.document, before);
}

#[test]
fn test_bound_documents_do_not_alias() {
    let template = template_with(vec![(
        "title",
        Mapping::Direct {
            column: "Name".into(),
        },
    )]);

    let mut first = bind(&template, &Row::from_pairs([("Name", "One")]));
    let second = bind(&template, &Row::from_pairs([("Name", "Two")]));

    first.elements[0].set_primary_content("mutated");
    assert_eq!(second.elements[0].primary_content(), Some("Two"));
}

#[test]
fn test_conditional_first_match_wins() {
    let conditions = vec![
        Condition {
            column: "x".into(),
            operator: MappingOperator::Equals,
            value: "A".into(),
            result: "Alpha".into(),
        },
        Condition {
            column: "x".into(),
            operator: MappingOperator::Equals,
            value: "A".into(),
            result: "Beta".into(),
        },
    ];
    let template = template_with(vec![("title", Mapping::Conditional { conditions })]);

    let bound = bind(&template, &Row::from_pairs([("x", "A")]));
    assert_eq!(bound.elements[0].primary_content(), Some("Alpha"));
}

#[test]
fn test_conditional_no_match_keeps_template_value() {
    let conditions = vec![Condition {
        column: "x".into(),
        operator: MappingOperator::Equals,
        value: "A".into(),
        result: "Alpha".into(),
    }];
    let template = template_with(vec![("title", Mapping::Conditional { conditions })]);

    let bound = bind(&template, &Row::from_pairs([("x", "Z")]));
    assert_eq!(bound.elements[0].primary_content(), Some("Default Title"));
}

#[test]
fn test_macro_substitution_into_image_path() {
    let template = template_with(vec![(
        "art",
        Mapping::Macro {
            expression: "assets/${Set}/${Name}.png".into(),
        },
    )]);

    let bound = bind(
        &template,
        &Row::from_pairs([("Set", "core"), ("Name", "drake")]),
    );
    assert_eq!(
        bound.elements[1].primary_content(),
        Some("assets/core/drake.png")
    );
}

#[test]
fn test_macro_example_from_mapping_docs() {
    let template = template_with(vec![(
        "title",
        Mapping::Macro {
            expression: "Hello ${name}, age ${age}".into(),
        },
    )]);
    let bound = bind(
        &template,
        &Row::from_pairs([("name", "Ann"), ("age", "30")]),
    );
    assert_eq!(
        bound.elements[0].primary_content(),
        Some("Hello Ann, age 30")
    );
}

#[test]
fn test_unknown_mapping_target_is_skipped() {
    let template = template_with(vec![(
        "ghost",
        Mapping::Direct {
            column: "Name".into(),
        },
    )]);
    let bound = bind(&template, &Row::from_pairs([("Name", "x")]));
    assert_eq!(bound.elements[0].primary_content(), Some("Default Title"));
}

#[test]
fn test_template_without_data_source_binds_to_clone() {
    let mut doc = Document::default();
    doc.add_element(text_element("title", "Static"));
    let template = Template::new("static", doc);

    let bound = bind(&template, &Row::from_pairs([("Name", "x")]));
    assert_eq!(bound, template.document);
}
