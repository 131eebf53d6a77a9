use std::fs;
use std::path::{Path, PathBuf};

use ifacegen_build::{GenerateError, GenerationStatus, InterfaceConfig, emit, extract, generate_interface};
use tempfile::TempDir;

const FOO_BAR_HEADER: &str = "\
#ifndef _FOO_H_
#define _FOO_H_

int Hidden(void);

#ifdef BUILD_PLUGIN
int Foo(int a, int b);
void Bar(void);
#endif

#endif
";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn write_source(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("foo.h");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn generates_foo_bar_interface() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("foo_api.h");

    let report = generate_interface(&source, &output).run().unwrap();
    assert_eq!(report.status, GenerationStatus::Written);
    assert_eq!(report.interface_name, "foo_api");
    assert_eq!(report.signatures.len(), 2);

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("#ifndef _FOO_API_H_\n#define _FOO_API_H_\n"));
    assert!(code.contains("    FUNC_FOO,\n    FUNC_BAR,\n    NUM_FUNCS\n};"));
    assert!(!code.contains("HIDDEN"));

    let foo = code.find("\"Foo\"").unwrap();
    let bar = code.find("\"Bar\"").unwrap();
    assert!(foo < bar);

    assert!(code.contains("typedef int (*FPTR_FOO) (int a, int b);\n"));
    assert!(code.contains("typedef void (*FPTR_BAR) (void);\n"));
    assert!(code.ends_with("#endif\n"));
}

#[test]
fn second_run_is_byte_identical_and_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("foo_api.h");

    generate_interface(&source, &output).run().unwrap();
    let first = fs::read(&output).unwrap();

    let report = generate_interface(&source, &output).run().unwrap();
    assert_eq!(report.status, GenerationStatus::Unchanged);
    assert_eq!(fs::read(&output).unwrap(), first);
}

#[test]
fn check_mode_reports_stale_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("foo_api.h");

    let report = generate_interface(&source, &output).check_only(true).run().unwrap();
    assert_eq!(report.status, GenerationStatus::Stale);
    assert!(!output.exists());

    generate_interface(&source, &output).run().unwrap();
    let report = generate_interface(&source, &output).check_only(true).run().unwrap();
    assert_eq!(report.status, GenerationStatus::Unchanged);

    fs::write(&source, FOO_BAR_HEADER.replace("void Bar(void);", "void Bar(int flags);")).unwrap();
    let report = generate_interface(&source, &output).check_only(true).run().unwrap();
    assert_eq!(report.status, GenerationStatus::Stale);
}

#[test]
fn source_without_marker_still_generates() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, "int Foo(int a);\n");
    let output = temp_dir.path().join("empty.h");

    let report = generate_interface(&source, &output).run().unwrap();
    assert!(report.signatures.is_empty());

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.contains("enum {\n    NUM_FUNCS\n};"));
    assert!(code.contains("((char const *[]) { })"));
    assert!(!code.contains("typedef"));
}

#[test]
fn unparseable_declarations_are_dropped_not_fatal() {
    let signatures = extract(&fixture("priority_queue.h"), &InterfaceConfig::default()).unwrap();
    let names: Vec<&str> = signatures.iter().map(|s| s.name()).collect();

    assert_eq!(
        names,
        vec!["init", "deinit", "insert", "delete", "top", "size", "set_compare", "set_destroy"]
    );
    assert_eq!(signatures[2].parameters(), "void*");
    assert_eq!(signatures[6].parameters(), "int(*)(const void*, const void*)");
}

#[test]
fn missing_source_is_source_unreadable() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.h");

    let err = generate_interface(temp_dir.path().join("missing.h"), &output).run().unwrap_err();
    assert!(matches!(err, GenerateError::SourceUnreadable { .. }));
    assert!(!output.exists());
}

#[test]
fn destination_in_missing_directory_is_unwritable() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("no_such_dir").join("foo_api.h");

    let err = generate_interface(&source, &output).run().unwrap_err();
    assert!(matches!(err, GenerateError::DestinationUnwritable { .. }));

    let signatures = extract(&source, &InterfaceConfig::default()).unwrap();
    let err = emit(&signatures, &output, &InterfaceConfig::default()).unwrap_err();
    assert!(matches!(err, GenerateError::DestinationUnwritable { .. }));
}

#[test]
fn emit_overwrites_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("foo_api.h");
    fs::write(&output, "stale contents").unwrap();

    let signatures = extract(&source, &InterfaceConfig::default()).unwrap();
    emit(&signatures, &output, &InterfaceConfig::default()).unwrap();

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("#ifndef _FOO_API_H_"));
    assert!(!code.contains("stale"));
}

#[test]
fn custom_config_changes_prefixes() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_source(&temp_dir, FOO_BAR_HEADER);
    let output = temp_dir.path().join("foo_api.h");
    let config = InterfaceConfig {
        index_prefix: "IDX".to_string(),
        count_sentinel: "IDX_COUNT".to_string(),
        pointer_prefix: "PFN".to_string(),
        name_table_ident: "kNames".to_string(),
        ..Default::default()
    };

    generate_interface(&source, &output).config(config).run().unwrap();

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.contains("    IDX_FOO,\n    IDX_BAR,\n    IDX_COUNT\n"));
    assert!(code.contains("#define kNames ((char const *[]) { \"Foo\", \\\n"));
    assert!(code.contains("typedef int (*PFN_FOO) (int a, int b);"));
}
