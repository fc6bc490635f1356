//! Route tree discovery against real TypeScript sources

use crate::common::TestProject;
use crate::fixtures::{handlers, non_handlers};

#[test]
fn test_record_example_tree() {
    let project = TestProject::new();
    project
        .write_handler("record/getAllRecords.ts", handlers::GET_ALL_RECORDS)
        .write_handler("record/getRecord.ts", handlers::GET_RECORD);

    let tree = project.route_tree();
    assert_eq!(tree.endpoint_count(), 2);
    assert_eq!(tree.children.len(), 1);

    let record = &tree.children[0];
    assert_eq!(record.name.as_deref(), Some("record"));

    let get_all = record
        .endpoints
        .iter()
        .find(|e| e.function_name == "getAllRecords")
        .unwrap();
    assert!(get_all.body.is_none());
    assert_eq!(get_all.returns.name, "GetAllRecordsResponse");
    assert_eq!(
        get_all.returns.declaration,
        "export type GetAllRecordsResponse = Record[];"
    );

    let get_record = record
        .endpoints
        .iter()
        .find(|e| e.function_name == "getRecord")
        .unwrap();
    assert_eq!(get_record.path_segments, vec!["record"]);
    assert_eq!(get_record.source_file_name, "getRecord.ts");
    let body = get_record.body.as_ref().unwrap();
    assert_eq!(body.name, "GetRecordRequest");
    assert!(body.declaration.starts_with("export interface GetRecordRequest {"));
}

#[test]
fn test_byte_order_mark_is_tolerated() {
    let project = TestProject::new();
    project.write_handler(
        "record/getRecord.ts",
        &format!("\u{feff}{}", handlers::GET_RECORD),
    );

    let tree = project.route_tree();
    assert_eq!(tree.endpoint_count(), 1);
    let endpoint = &tree.children[0].endpoints[0];
    assert_eq!(endpoint.function_name, "getRecord");
    let body = endpoint.body.as_ref().unwrap();
    assert!(body.declaration.starts_with("export interface GetRecordRequest {"));
}

#[test]
fn test_non_qualifying_modules_produce_no_endpoints() {
    let project = TestProject::new();
    project
        .write_handler("anonymous.ts", non_handlers::ANONYMOUS_DEFAULT)
        .write_handler("arrow.ts", non_handlers::ARROW_DEFAULT)
        .write_handler("sync.ts", non_handlers::NON_GENERIC_RETURN)
        .write_handler("missing.ts", non_handlers::UNRESOLVED_PARAMETER)
        .write_handler("helpers.ts", non_handlers::HELPER_MODULE);

    let tree = project.route_tree();
    assert!(tree.is_empty());
}

#[test]
fn test_syntax_error_does_not_stop_the_walk() {
    let project = TestProject::new();
    project
        .write_handler("broken.ts", non_handlers::SYNTAX_ERROR)
        .write_handler("getRecord.ts", handlers::GET_RECORD);

    let tree = project.route_tree();
    assert_eq!(tree.endpoints.len(), 1);
    assert_eq!(tree.endpoints[0].function_name, "getRecord");
}

#[test]
fn test_structural_types_get_synthesized_aliases() {
    let project = TestProject::new();
    project.write_handler("countItems.ts", handlers::STRUCTURAL_TYPES);

    let tree = project.route_tree();
    let endpoint = &tree.endpoints[0];
    let body = endpoint.body.as_ref().unwrap();
    assert_eq!(body.name, "CountItemsBody");
    assert_eq!(
        body.declaration,
        "export type CountItemsBody = { tags: string[] };"
    );
    assert_eq!(endpoint.returns.name, "CountItemsResponse");
    assert_eq!(
        endpoint.returns.declaration,
        "export type CountItemsResponse = number;"
    );
}

#[test]
fn test_default_export_by_name() {
    let project = TestProject::new();
    project.write_handler("ping.ts", handlers::EXPORTED_BY_NAME);

    let tree = project.route_tree();
    let endpoint = &tree.endpoints[0];
    assert_eq!(endpoint.function_name, "ping");
    assert_eq!(
        endpoint.body.as_ref().unwrap().declaration,
        "interface PingRequest { message: string }"
    );
}

#[test]
fn test_types_imported_from_relative_module() {
    let project = TestProject::new();
    project
        .write_handler("shared.ts", handlers::SHARED_TYPES)
        .write_handler("users/findUser.ts", handlers::IMPORTS_SHARED_TYPES);

    let tree = project.route_tree();
    assert_eq!(tree.endpoint_count(), 1);

    let endpoint = &tree.children[0].endpoints[0];
    let body = endpoint.body.as_ref().unwrap();
    assert_eq!(body.name, "Query");
    assert_eq!(body.declaration, "export type Query = { id: string };");
    assert_eq!(endpoint.returns.name, "User");
    assert!(endpoint.returns.declaration.contains("interface User {"));
}

#[test]
fn test_declaration_files_are_ignored() {
    let project = TestProject::new();
    project
        .write_handler("getRecord.d.ts", handlers::GET_RECORD)
        .write_handler("README.md", "# handlers");

    assert!(project.route_tree().is_empty());
}
