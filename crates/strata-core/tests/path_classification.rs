use std::path::Path;

use strata_core::prelude::*;
use strata_core::source::{classify_as_content, classify_as_folder, classify_as_root};

#[test]
fn classification_precedence_short_circuits() {
    let catalog = TypeCatalog::builtin();
    let report = catalog.type_by_id("report").unwrap();

    // A root match never falls through to folder classification even
    // though the filename also ends with the definition suffix.
    let path = Path::new("pkg/reports/Sales/Monthly.report-definition.xml");
    let root = classify_as_root(path, report).unwrap();
    assert_eq!(root.full_name, "Monthly");
    let combined = classify(path, report).unwrap();
    assert_eq!(combined, root);
}

#[test]
fn folder_definition_identifies_the_container() {
    let catalog = TypeCatalog::builtin();
    let folder = catalog.type_by_id("reportfolder").unwrap();

    let def = classify(Path::new("pkg/reports/Sales-definition.xml"), folder).unwrap();
    assert_eq!(def.full_name, "Sales");
    assert_eq!(def.suffix, None);
}

#[test]
fn shared_suffix_does_not_classify_for_a_strict_type_elsewhere() {
    // Two types sharing a suffix: the strict one refuses files outside its
    // conventional directory, leaving them to the other type.
    let catalog = TypeCatalog::from_parts(vec![
        TypeDefinition {
            suffix: Some("page".to_string()),
            strict_directory_name: true,
            ..TypeDefinition::new("sitepage", "SitePage", "sitePages")
        },
        TypeDefinition {
            suffix: Some("page".to_string()),
            ..TypeDefinition::new("page", "Page", "pages")
        },
    ])
    .unwrap();

    let strict = catalog.type_by_id("sitepage").unwrap();
    let loose = catalog.type_by_id("page").unwrap();
    let path = Path::new("pkg/pages/Home.page-definition.xml");

    assert!(classify_as_root(path, strict).is_none());
    assert!(classify_as_root(path, loose).is_some());
}

#[test]
fn content_only_depth_rule_rejects_foreign_paths() {
    let catalog = TypeCatalog::builtin();
    let model = catalog.type_by_id("territorymodel").unwrap();
    let rule = catalog.type_by_id("territoryrule").unwrap();

    // A rule file under the model's tree is not model content: the model's
    // directory sits at the wrong depth for it.
    let rule_path = Path::new("pkg/territories/Europe/rules/Coastal.territoryRule");
    assert!(classify_as_content(rule_path, model).is_none());
    assert!(classify_as_content(rule_path, rule).is_some());
}

#[test]
fn folder_classification_requires_directory_context() {
    let catalog = TypeCatalog::builtin();
    let folder = catalog.type_by_id("reportfolder").unwrap();

    assert!(classify_as_folder(Path::new("Sales-definition.xml"), folder).is_none());
    assert!(classify_as_folder(Path::new("reports/Sales-definition.xml"), folder).is_some());
}
