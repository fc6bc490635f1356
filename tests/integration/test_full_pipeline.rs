//! End-to-end runs of the generation pipeline against a scratch project

use crate::common::TestProject;
use crate::fixtures::{handlers, non_handlers};
use crate::{assert_generated_contains, assert_generated_not_contains};
use rpc_typegen::interface::{generate_with_logger, write_init_config};
use rpc_typegen::{Error, GenerateConfig, Logger};
use std::fs;

fn shop_project() -> TestProject {
    let project = TestProject::new();
    project
        .write_handler("record/getAllRecords.ts", handlers::GET_ALL_RECORDS)
        .write_handler("record/getRecord.ts", handlers::GET_RECORD)
        .write_handler("users/getUser.ts", handlers::GET_USER)
        .write_handler("helpers.ts", non_handlers::HELPER_MODULE);
    project
}

#[test]
fn test_generates_client_and_router() {
    let project = shop_project();
    let summary = generate_with_logger(&project.config(), Logger::quiet()).unwrap();

    assert_eq!(summary.endpoint_count, 3);
    assert_eq!(summary.generated_files.len(), 2);
    assert!(!summary.bundled);

    let client = project.read_file("web/client/RpcClient.ts");
    let router = project.read_file("server/rpcRouter.ts");

    assert!(client.starts_with("// Generated by rpc-typegen v"));
    assert_generated_contains!(client, "export namespace users {");
    assert_generated_contains!(client, "\tusers = {");
    assert_generated_contains!(router, "import getUser from '../api/users/getUser.ts';");
    assert_generated_contains!(router, "'POST /users/getUser': getUser,");
    assert_generated_not_contains!(router, "helpers");
}

#[test]
fn test_rerun_is_byte_identical() {
    let project = shop_project();
    let config = project.config();

    generate_with_logger(&config, Logger::quiet()).unwrap();
    let first_client = fs::read(project.root().join("web/client/RpcClient.ts")).unwrap();
    let first_router = fs::read(project.root().join("server/rpcRouter.ts")).unwrap();

    generate_with_logger(&config, Logger::quiet()).unwrap();
    assert_eq!(
        fs::read(project.root().join("web/client/RpcClient.ts")).unwrap(),
        first_client
    );
    assert_eq!(
        fs::read(project.root().join("server/rpcRouter.ts")).unwrap(),
        first_router
    );
}

#[test]
fn test_missing_entry_directory_is_fatal() {
    let project = TestProject::new();
    let config = GenerateConfig {
        entry_dir: project.path_string("does-not-exist"),
        ..project.config()
    };

    let result = generate_with_logger(&config, Logger::quiet());
    assert!(matches!(result, Err(Error::InvalidEntryDir(_))));
    assert!(!project.file_exists("server/rpcRouter.ts"));
}

#[test]
fn test_template_without_required_marker_is_fatal() {
    let project = shop_project();
    project.write_file("templates/server.ts", "/* {{imports}} */\nexport {};\n");
    let config = GenerateConfig {
        server_template: Some(project.path_string("templates/server.ts")),
        ..project.config()
    };

    match generate_with_logger(&config, Logger::quiet()) {
        Err(Error::MissingMarker { marker, .. }) => assert_eq!(marker, "routes"),
        other => panic!("expected missing marker error, got {:?}", other),
    }
}

#[test]
fn test_custom_client_template() {
    let project = shop_project();
    project.write_file(
        "templates/client.ts",
        "/* {{types}} */\nexport const client = {\n  /* {{functions}} */\n};\n",
    );
    let config = GenerateConfig {
        client_template: Some(project.path_string("templates/client.ts")),
        emit_header: Some(false),
        ..project.config()
    };

    generate_with_logger(&config, Logger::quiet()).unwrap();
    let client = project.read_file("web/client/RpcClient.ts");
    assert!(client.starts_with("export namespace types {"));
    assert_generated_contains!(client, "export const client = {\n  ");
    assert_generated_contains!(client, "\n  record = {\n");
    assert_generated_contains!(client, "\n  users = {\n");
}

#[test]
fn test_parameterless_handlers_can_be_disabled() {
    let project = shop_project();
    let config = GenerateConfig {
        allow_parameterless: Some(false),
        ..project.config()
    };

    let summary = generate_with_logger(&config, Logger::quiet()).unwrap();
    assert_eq!(summary.endpoint_count, 2);
    assert_generated_not_contains!(project.read_file("server/rpcRouter.ts"), "getAllRecords");
}

#[test]
fn test_exclude_patterns() {
    let project = shop_project();
    let config = GenerateConfig {
        exclude_patterns: Some(vec!["^users".to_string()]),
        ..project.config()
    };

    let summary = generate_with_logger(&config, Logger::quiet()).unwrap();
    assert_eq!(summary.endpoint_count, 2);
    assert_generated_not_contains!(project.read_file("web/client/RpcClient.ts"), "getUser");
}

#[cfg(unix)]
#[test]
fn test_bundling_runs_after_writing() {
    let project = shop_project();
    let config = GenerateConfig {
        bundle: Some(rpc_typegen::interface::BundleConfig {
            out_dir: project.path_string("dist"),
            esbuild: "true".to_string(),
        }),
        ..project.config()
    };

    let summary = generate_with_logger(&config, Logger::quiet()).unwrap();
    assert!(summary.bundled);
}

#[test]
fn test_init_writes_config_once() {
    let project = TestProject::new();
    let output = project.root().join("rpc-typegen.json");
    let config = project.config();

    write_init_config(&config, &output, false).unwrap();
    let loaded = GenerateConfig::from_file(&output).unwrap();
    assert_eq!(loaded.entry_dir, config.entry_dir);

    assert!(write_init_config(&config, &output, false).is_err());
    assert!(write_init_config(&config, &output, true).is_ok());
}

#[test]
fn test_init_into_package_json() {
    let project = TestProject::new();
    project.write_file("package.json", r#"{"name": "shop", "private": true}"#);
    let manifest = project.root().join("package.json");

    write_init_config(&project.config(), &manifest, false).unwrap();
    let config = GenerateConfig::from_package_json(&manifest).unwrap().unwrap();
    assert_eq!(config.entry_dir, project.path_string("api"));
    assert!(write_init_config(&project.config(), &manifest, false).is_err());
}
