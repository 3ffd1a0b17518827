use cardkit_core::{ElementKind, Unit};
use cardkit_designer::{
    DataSource, Document, Element, Mapping, Template, TemplateStore,
};

fn sample_template(name: &str) -> Template {
    let mut doc = Document::new(63.0, 88.0, Unit::Mm, 300);
    doc.background_color = "#FAFAFA".to_string();
    let mut title = Element::new(ElementKind::Text, 20.0, 20.0);
    title.id = Some("title".to_string());
    doc.add_element(title);
    doc.add_element(Element::new(ElementKind::Shape, 0.0, 0.0));

    let mut template = Template::new(name, doc);
    template.description = "A poker-sized card".to_string();
    template.category = "cards".to_string();
    let mut source = DataSource::csv("cards.csv");
    source.mappings.insert(
        "title".to_string(),
        Mapping::Direct {
            column: "Name".to_string(),
        },
    );
    template.data_source = Some(source);
    template
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.json");

    let mut template = sample_template("Hero");
    template.save(&path).unwrap();
    let loaded = Template::load(&path).unwrap();

    assert_eq!(loaded.name, "Hero");
    assert_eq!(loaded.document, template.document);
    assert_eq!(loaded.data_source, template.data_source);
    assert_eq!(loaded.category, "cards");
    assert!(!loaded.created_at.is_empty());
}

#[test]
fn test_file_shape_keeps_wire_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.json");
    sample_template("Wire").save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["type"], "card");
    assert_eq!(raw["dimensions"]["unit"], "mm");
    assert_eq!(raw["dimensions"]["dpi"], 300);
    assert_eq!(raw["dataSource"]["type"], "csv");
    assert_eq!(raw["dataSource"]["mappings"]["title"]["type"], "direct");
    assert_eq!(raw["metadata"]["name"], "Wire");
    assert_eq!(raw["elements"][0]["type"], "text");
}

#[test]
fn test_load_missing_file_is_hard_error() {
    let err = Template::load("/no/such/template.json").unwrap_err();
    assert!(err.is_data_error());
}

#[test]
fn test_ensure_element_ids_fills_gaps_only() {
    let mut template = sample_template("Ids");
    template.ensure_element_ids();

    assert_eq!(template.document.elements[0].id.as_deref(), Some("title"));
    let generated = template.document.elements[1].id.clone().unwrap();
    assert!(!generated.is_empty());

    // Idempotent: a second pass changes nothing.
    let before = template.document.clone();
    template.ensure_element_ids();
    assert_eq!(template.document, before);
}

#[test]
fn test_store_save_list_load_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = TemplateStore::open(dir.path()).unwrap();

    let mut a = sample_template("Alpha Card");
    let mut b = sample_template("Beta Card");
    b.category = "tokens".to_string();
    store.save(&mut a).unwrap();
    store.save(&mut b).unwrap();

    let all = store.list(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Alpha Card");
    assert_eq!(all[0].id, "alpha-card");

    let tokens = store.list(Some("tokens")).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].name, "Beta Card");

    let loaded = store.load("Alpha Card").unwrap();
    assert_eq!(loaded.name, "Alpha Card");

    assert!(store.delete("Alpha Card").unwrap());
    assert!(!store.delete("Alpha Card").unwrap());
    assert_eq!(store.list(None).unwrap().len(), 1);
}

#[test]
fn test_store_load_unknown_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = TemplateStore::open(dir.path()).unwrap();
    assert!(store.load("nope").unwrap_err().is_data_error());
}
