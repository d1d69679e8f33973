//! End-to-end invocation tests
//!
//! Runs whole command lines through `run_with` and checks the exit status
//! and what reached the kernel.

mod common;

use common::*;
use evmtest_modload::{run_with, FAILURE_EXIT_CODE};
use nix::errno::Errno;

#[test]
fn test_nonexistent_file_as_root() {
    let kernel = MockKernel::root();
    let code = run_with(["modloader", "-p", "/no/such/file", "-o"], &kernel);

    assert_eq!(code, FAILURE_EXIT_CODE);
    assert_eq!(kernel.kernel_calls(), 0);
}

#[test]
fn test_conflicting_flags() {
    let fixture = ModuleFixture::new(32).unwrap();
    let kernel = MockKernel::root();
    let code = run_with(["modloader", "-p", fixture.path_str(), "-o", "-n"], &kernel);

    assert_ne!(code, 0);
    assert_eq!(kernel.opens.get(), 0);
}

#[test]
fn test_usage_errors_never_open() {
    let fixture = ModuleFixture::new(32).unwrap();
    let path = fixture.path_str();
    let kernel = MockKernel::root();

    let invocations: Vec<Vec<&str>> = vec![
        vec!["modloader"],
        vec!["modloader", "-o"],
        vec!["modloader", "--new"],
        vec!["modloader", "-p", path],
        vec!["modloader", "-on", "-p", path],
        vec!["modloader", "--old", "--new", "--path", path],
        vec!["modloader", "-p", "", "-o"],
        vec!["modloader", "-o", "-p"],
    ];
    for args in invocations {
        assert_ne!(run_with(args.clone(), &kernel), 0, "{:?}", args);
    }
    assert_eq!(kernel.opens.get(), 0);
    assert_eq!(kernel.kernel_calls(), 0);
}

#[test]
fn test_unprivileged_valid_arguments() {
    let fixture = ModuleFixture::new(32).unwrap();
    let kernel = MockKernel::unprivileged();
    let code = run_with(["modloader", "-p", fixture.path_str(), "-n"], &kernel);

    assert_ne!(code, 0);
    assert_eq!(kernel.opens.get(), 0);
}

#[test]
fn test_valid_legacy_load() {
    let fixture = ModuleFixture::new(4096).unwrap();
    let kernel = MockKernel::root();
    let code = run_with(["modloader", "-p", fixture.path_str(), "-o"], &kernel);

    assert_eq!(code, 0);
    let calls = kernel.init_calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].image, fixture.contents);
    assert_eq!(calls[0].params, "evmtest_load_type=init_module");
}

#[test]
fn test_valid_modern_load_with_unknown_options() {
    let fixture = ModuleFixture::new(4096).unwrap();
    let kernel = MockKernel::root();
    let code = run_with(
        ["modloader", "-v", "--force", "extra", "-n", "--path", fixture.path_str()],
        &kernel,
    );

    assert_eq!(code, 0);
    assert_eq!(kernel.finit_calls.borrow().len(), 1);
    assert_eq!(
        kernel.finit_calls.borrow()[0].params,
        "evmtest_load_type=finit_module"
    );
}

#[test]
fn test_kernel_rejection_exit_status() {
    let fixture = ModuleFixture::new(64).unwrap();
    let kernel = MockKernel::rejecting(Errno::EKEYREJECTED);
    let code = run_with(["modloader", "--path", fixture.path_str(), "--old"], &kernel);

    assert_eq!(code, FAILURE_EXIT_CODE);
    assert_eq!(kernel.init_calls.borrow().len(), 1);
}
