//! Tests for MenuService definition loading and projections

use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use menudeco::application::services::{sample_menu, MenuService, OutputFormat, RenderOptions};
use menudeco::application::ApplicationError;
use menudeco::domain::MenuDefinition;

const MENU_TOML: &str = r#"
label = "Menu"

[[children]]
label = "A"

[[children]]
label = "B"

[[children.children]]
label = "B.1"

[[children.children]]
label = "B.2"
"#;

const MENU_JSON: &str = r#"{
  "label": "Menu",
  "children": [
    { "label": "A" },
    { "label": "B", "children": [ { "label": "B.1" }, { "label": "B.2" } ] }
  ]
}"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write menu file");
    path
}

#[fixture]
fn service() -> MenuService {
    MenuService::default()
}

#[rstest]
fn given_toml_and_json_when_loading_then_same_definition(service: MenuService) {
    let temp = TempDir::new().unwrap();
    let toml_path = write_file(&temp, "menu.toml", MENU_TOML);
    let json_path = write_file(&temp, "menu.json", MENU_JSON);

    let from_toml = service.load_definition(&toml_path).unwrap();
    let from_json = service.load_definition(&json_path).unwrap();

    assert_eq!(from_toml, from_json);
    assert_eq!(
        from_toml,
        MenuDefinition::composite(
            "Menu",
            vec![
                MenuDefinition::leaf("A"),
                MenuDefinition::composite(
                    "B",
                    vec![MenuDefinition::leaf("B.1"), MenuDefinition::leaf("B.2")]
                ),
            ]
        )
    );
}

#[rstest]
#[case(OutputFormat::Html, "<ul><li>A</li><li>B<ul><li>B.1</li><li>B.2</li></ul></li></ul>")]
#[case(OutputFormat::Tree, "Menu\n├── A\n└── B\n    ├── B.1\n    └── B.2\n")]
fn given_menu_file_when_rendering_then_projection(
    service: MenuService,
    #[case] format: OutputFormat,
    #[case] expected: &str,
) {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "menu.toml", MENU_TOML);

    assert_eq!(service.render_file(&path, format).unwrap(), expected);
}

#[rstest]
fn given_compact_json_option_when_rendering_then_label_children_objects() {
    let service = MenuService::new(RenderOptions {
        pretty_json: false,
        ..Default::default()
    });
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "menu.json", MENU_JSON);

    let json = service.render_file(&path, OutputFormat::Json).unwrap();

    assert_eq!(
        json,
        r#"{"label":"Menu","children":[{"label":"A","children":[]},{"label":"B","children":[{"label":"B.1","children":[]},{"label":"B.2","children":[]}]}]}"#
    );
}

#[rstest]
fn given_unknown_extension_when_loading_then_unsupported_format(service: MenuService) {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "menu.yaml", "label: x");

    assert!(matches!(
        service.load_definition(&path),
        Err(ApplicationError::UnsupportedFormat(_))
    ));
}

#[rstest]
fn given_missing_label_when_loading_then_definition_error(service: MenuService) {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "menu.json", r#"{ "children": [] }"#);

    let err = service.load_definition(&path).unwrap_err();
    assert!(matches!(err, ApplicationError::Definition { .. }));
    assert!(err.to_string().contains("menu.json"));
}

#[rstest]
fn given_missing_file_when_loading_then_definition_error(service: MenuService) {
    let temp = TempDir::new().unwrap();

    assert!(matches!(
        service.load_definition(&temp.path().join("absent.toml")),
        Err(ApplicationError::Definition { .. })
    ));
}

#[rstest]
fn given_sample_menu_when_rendering_then_every_leaf_once(service: MenuService) {
    let output = service.render_definition(&sample_menu()).unwrap();

    assert_eq!(
        output.leaf_labels(),
        vec![
            "Element 1",
            "Element 2",
            "Element 3.1",
            "Element 3.2",
            "Element 4",
            "Element 5.1",
            "Element 5.2",
            "Element 5.3",
        ]
    );
}
