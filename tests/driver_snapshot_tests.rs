//! Snapshot tests for generated drivers
//!
//! Each test scans fixture sources (labelled with short relative paths so the driver header is
//! stable) and snapshots the rendered driver text.
//!
//! Run with: `cargo test --test driver_snapshot_tests`
//! Review changes: `cargo insta review`

use std::fs;
use std::path::Path;

use fruitrun::backend::render;
use fruitrun::{HarnessConfig, QuoteStyle, SuiteModel};
use fruitrun_syntax::{TestModule, parser};

/// Scan a fixture, recording it under `fixtures/<name>`
fn scan_fixture(name: &str) -> TestModule {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    let source = fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    parser::parse(Path::new(&format!("fixtures/{name}")), &source).expect("fixture should scan")
}

fn driver_for(names: &[&str], config: &HarnessConfig) -> String {
    let suite = SuiteModel::from_modules(names.iter().map(|name| scan_fixture(name)).collect());
    render(&suite, config).into_string()
}

#[test]
fn test_single_module_driver() {
    let text = driver_for(&["vector_test.f90"], &HarnessConfig::default());
    insta::assert_snapshot!(text, @r#"
program tests

  ! Driver program for FRUIT unit tests in:
  ! fixtures/vector_test.f90

  ! Generated by fruitrun.

  use fruit
  use vector_test

  call init_fruit
  call setup

  call run_test_case(test_vector_add,"adds two vectors component-wise")
  call run_test_case(test_vector_norm,"norm of a 3-4 vector is 5")
  call run_test_case(Test_Dot_Product,"Test_Dot_Product")

  call teardown
  call fruit_summary
  call fruit_finalize

end program tests
"#);
}

#[test]
fn test_multi_module_driver() {
    let text = driver_for(&["stack_test.f90", "empty_test.f90"], &HarnessConfig::default());
    insta::assert_snapshot!(text, @r#"
program tests

  ! Driver program for FRUIT unit tests in:
  ! fixtures/stack_test.f90
  ! fixtures/empty_test.f90

  ! Generated by fruitrun.

  use fruit
  use stack_test
  use empty_test

  call init_fruit
  call setup

  ! fixtures/stack_test.f90:
  call run_test_case(test_push_pop,"push then pop returns the same value")
  call run_test_case(test_empty_stack,"a new stack is ""empty""")

  ! fixtures/empty_test.f90:

  call fruit_summary
  call fruit_finalize

end program tests
"#);
}

#[test]
fn test_custom_config_driver() {
    let config = HarnessConfig::new()
        .with_program_name("stack_driver")
        .with_indent_width(4)
        .with_quote_style(QuoteStyle::Verbatim)
        .with_tool_name("make check");
    let text = driver_for(&["stack_test.f90"], &config);
    insta::assert_snapshot!(text, @r#"
program stack_driver

    ! Driver program for FRUIT unit tests in:
    ! fixtures/stack_test.f90

    ! Generated by make check.

    use fruit
    use stack_test

    call init_fruit

    call run_test_case(test_push_pop,"push then pop returns the same value")
    call run_test_case(test_empty_stack,"a new stack is "empty"")

    call fruit_summary
    call fruit_finalize

end program stack_driver
"#);
}
