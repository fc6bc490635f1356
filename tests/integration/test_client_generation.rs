//! Client document generation from real handler trees

use crate::common::TestProject;
use crate::fixtures::handlers;
use crate::{assert_generated_contains, assert_generated_not_contains};
use rpc_typegen::generators::RenderOptions;

fn record_project() -> TestProject {
    let project = TestProject::new();
    project
        .write_handler("record/getAllRecords.ts", handlers::GET_ALL_RECORDS)
        .write_handler("record/getRecord.ts", handlers::GET_RECORD);
    project
}

#[test]
fn test_record_namespace_and_methods() {
    let (client, _) = record_project().render(RenderOptions::default());

    assert_generated_contains!(client, "export namespace types {");
    assert_generated_contains!(client, "\texport namespace record {");
    assert_generated_contains!(
        client,
        "\t\texport type GetAllRecordsResponse = Record[];"
    );
    assert_generated_contains!(client, "export default class RpcClient {");
    assert_generated_contains!(client, "\trecord = {");
    assert_generated_contains!(
        client,
        "getAllRecords: async (): Promise<types.record.GetAllRecordsResponse> =>"
    );
    assert_generated_contains!(
        client,
        "getRecord: async (body: types.record.GetRecordRequest): Promise<types.record.GetRecordResponse> =>"
    );
    assert_generated_contains!(client, "('/record/getRecord', body),");
    assert_generated_not_contains!(client, "/* {{");
}

#[test]
fn test_prefix_appears_in_client_paths() {
    let project = TestProject::new();
    project.write_handler("users/getUser.ts", handlers::GET_USER);

    let (client, _) = project.render(RenderOptions {
        endpoint_path_prefix: "/api/".to_string(),
        ..RenderOptions::default()
    });
    assert_generated_contains!(client, "('/api/users/getUser', body)");
}

#[test]
fn test_shared_type_name_is_suffixed_at_every_site() {
    let project = TestProject::new();
    project
        .write_handler("customers/list.ts", handlers::LIST_USERS)
        .write_handler("orders/list.ts", handlers::LIST_ORDERS);

    let (client, _) = project.render(RenderOptions::default());

    // Enumeration order decides which directory carries the suffixes
    let customers_first = client.find("namespace customers").unwrap()
        < client.find("namespace orders").unwrap();
    let (second_ns, second_user) = if customers_first {
        ("orders", "{ id: string; orders: number }")
    } else {
        ("customers", "{ id: string }")
    };

    assert_generated_contains!(client, "export type ListRequest = { page: number };");
    assert_generated_contains!(client, "export type ListRequest_2 = { page: number };");
    assert_generated_contains!(client, &format!("export type User_2 = {};", second_user));
    assert_generated_contains!(
        client,
        &format!(
            "async (body: types.{ns}.ListRequest_2): Promise<types.{ns}.User_2>",
            ns = second_ns
        )
    );
    assert_generated_not_contains!(client, "User_3");
}

#[test]
fn test_custom_client_name_and_indent() {
    let (client, _) = record_project().render(RenderOptions {
        client_name: "RecordsApi".to_string(),
        indent: "  ".to_string(),
        ..RenderOptions::default()
    });
    assert_generated_contains!(client, "export default class RecordsApi {");
    assert_generated_contains!(client, "  export namespace record {");
    assert_generated_contains!(client, "\t    this.call<");
}

#[test]
fn test_synthesized_aliases_are_declared() {
    let project = TestProject::new();
    project.write_handler("countItems.ts", handlers::STRUCTURAL_TYPES);

    let (client, _) = project.render(RenderOptions::default());
    assert_generated_contains!(client, "\texport type CountItemsBody = { tags: string[] };");
    assert_generated_contains!(
        client,
        "\tcountItems = async (body: types.CountItemsBody): Promise<types.CountItemsResponse> =>"
    );
}
