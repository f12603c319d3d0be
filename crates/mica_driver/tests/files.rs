mod common;

use common::{demo_path, int, print_int, var};
use mica_ast::{program_to_json, ASTBlock};
use mica_config::{DumpKind, MicaConfig, MicaProjectConfig};
use mica_driver::{check_file, run_file, DriverError};
use tempfile::TempDir;

fn write_program(
  dir: &TempDir,
  name: &str,
  program: &ASTBlock,
) -> String {
  let path = dir.path().join(name);
  std::fs::write(&path, program_to_json(program)).unwrap();
  path.display().to_string()
}

#[test]
fn checks_a_program_written_as_json() {
  let dir = TempDir::new().unwrap();
  let path = write_program(&dir, "ok.json", &ASTBlock::new(vec![var("int", "x", Some(int(1))), print_int(int(2))]));

  assert!(check_file(&MicaConfig::silent(), &path).is_ok());
}

#[test]
fn check_only_does_not_run() {
  let dir = TempDir::new().unwrap();
  let path = write_program(&dir, "ok.json", &ASTBlock::new(vec![var("int", "x", Some(int(1)))]));

  let mut config = MicaConfig::silent();
  config.run_config.check_only = true;

  assert_eq!(run_file(&config, &path).unwrap(), mica_backend::GenericValue::Unit);
}

#[test]
fn dumps_go_to_the_dump_directory() {
  let dir = TempDir::new().unwrap();
  let dump_dir = dir.path().join("dumps");
  let path = write_program(&dir, "dumped.json", &ASTBlock::new(vec![var("int", "x", Some(int(5)))]));

  let mut config = MicaConfig::silent();
  config.run_config.dump = vec![DumpKind::Ast, DumpKind::Ir];
  config.run_config.dump_dir = Some(dump_dir.display().to_string());

  check_file(&config, &path).unwrap();

  let ir = std::fs::read_to_string(dump_dir.join("dump-ir.txt")).unwrap();
  assert!(ir.starts_with("=== IR: dumped ===\n"));
  assert!(ir.contains("store %0, 5"));

  let ast = std::fs::read_to_string(dump_dir.join("dump-ast.txt")).unwrap();
  assert!(ast.contains("int x = 5;"));
}

#[test]
fn project_name_names_the_module() {
  let dir = TempDir::new().unwrap();
  let dump_dir = dir.path().join("dumps");
  let path = write_program(&dir, "main.json", &ASTBlock::new(vec![var("int", "x", Some(int(5)))]));

  let mut config = MicaConfig::silent();
  config.apply_project(MicaProjectConfig::from_toml_str("mica.toml", "name = \"calculator\"\n").unwrap());
  config.run_config.dump = vec![DumpKind::Ir];
  config.run_config.dump_dir = Some(dump_dir.display().to_string());

  check_file(&config, &path).unwrap();

  let ir = std::fs::read_to_string(dump_dir.join("dump-ir.txt")).unwrap();
  assert!(ir.starts_with("=== IR: calculator ===\n"));
}

#[test]
fn missing_file_is_a_read_error() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("absent.json").display().to_string();

  assert!(matches!(
    check_file(&MicaConfig::silent(), &path),
    Err(DriverError::Read { .. })
  ));
}

#[test]
fn malformed_tree_is_a_parse_error() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("bad.json");
  std::fs::write(&path, r#"{ "statements": [ { "Loop": {} } ] }"#).unwrap();

  let err = check_file(&MicaConfig::silent(), &path.display().to_string()).unwrap_err();
  assert!(matches!(err, DriverError::Parse { .. }));
  assert!(!err.is_fatal());
}

#[test]
fn demos_compile() {
  for demo in ["arithmetic.json", "functions.json", "errors.json"] {
    assert!(check_file(&MicaConfig::silent(), &demo_path(demo)).is_ok(), "{} failed", demo);
  }
}

#[test]
fn demo_project_file_parses() {
  let text = std::fs::read_to_string(demo_path("mica.toml")).unwrap();
  let project = MicaProjectConfig::from_toml_str("mica.toml", &text).unwrap();

  assert_eq!(project.entry.as_deref(), Some("functions.json"));
}
