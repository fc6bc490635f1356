//! Router document generation from real handler trees

use crate::common::TestProject;
use crate::fixtures::handlers;
use crate::{assert_generated_contains, assert_generated_not_contains};
use rpc_typegen::generators::{RenderOptions, RouteStyle};

#[test]
fn test_record_routes_and_imports() {
    let project = TestProject::new();
    project
        .write_handler("record/getAllRecords.ts", handlers::GET_ALL_RECORDS)
        .write_handler("record/getRecord.ts", handlers::GET_RECORD);

    let (_, server) = project.render(RenderOptions::default());

    assert_generated_contains!(
        server,
        "import getAllRecords from '../api/record/getAllRecords.ts';"
    );
    assert_generated_contains!(server, "import getRecord from '../api/record/getRecord.ts';");
    assert_generated_contains!(server, "\t'POST /record/getAllRecords': getAllRecords,\n");
    assert_generated_contains!(server, "\t'POST /record/getRecord': getRecord,\n");
    assert_generated_not_contains!(server, "/* {{");
}

#[test]
fn test_prefixed_route() {
    let project = TestProject::new();
    project.write_handler("users/getUser.ts", handlers::GET_USER);

    let (_, server) = project.render(RenderOptions {
        endpoint_path_prefix: "/api/".to_string(),
        ..RenderOptions::default()
    });
    assert_generated_contains!(server, "'POST /api/users/getUser': getUser,");
}

#[test]
fn test_duplicate_handler_names_across_directories() {
    let project = TestProject::new();
    project
        .write_handler("customers/list.ts", handlers::LIST_USERS)
        .write_handler("orders/list.ts", handlers::LIST_ORDERS);

    let (_, server) = project.render(RenderOptions::default());
    assert_generated_contains!(server, "import list from '../api/");
    assert_generated_contains!(server, "import list_2 from '../api/");
    assert_generated_contains!(server, ": list,");
    assert_generated_contains!(server, ": list_2,");
}

#[test]
fn test_generated_server_error_responses() {
    let project = TestProject::new();
    project.write_handler("getUser.ts", handlers::GET_USER);

    let (_, server) = project.render(RenderOptions::default());
    assert_generated_contains!(server, "res.setHeader('Content-Type', 'application/json');");
    assert_generated_contains!(server, "routes[`${req.method} ${req.url}`]");
    assert_generated_contains!(server, "res.statusCode = 404;");
    assert_generated_contains!(server, "JSON.stringify({ message: 'Not found' })");
    assert_generated_contains!(server, "JSON.stringify({ message: 'Bad request' })");
    assert_generated_contains!(server, "JSON.stringify({ message: 'Internal Server Error' })");
}

#[test]
fn test_register_style_with_custom_template() {
    let project = TestProject::new();
    project.write_handler("users/getUser.ts", handlers::GET_USER);
    let template = "import express from 'express';\n/* {{imports}} */\n\nconst app = express();\n/* {{routes}} */\n\nexport default app;\n";

    let tree = project.route_tree();
    let renderer = rpc_typegen::generators::Renderer::new(RenderOptions {
        route_style: RouteStyle::Register,
        emit_header: false,
        ..RenderOptions::default()
    })
    .unwrap();
    let server = renderer.render_server(&tree, template).unwrap();

    assert_eq!(
        server,
        "import express from 'express';\nimport getUser from '../api/users/getUser.ts';\n\nconst app = express();\napp.post('/users/getUser', getUser);\n\nexport default app;\n"
    );
}
