//! Load a kernel module with init_module or finit_module
//!
//! Usage:
//!   modloader -p <pathname> <-o | -n>
//!
//! Must run as root. Exits 0 when the kernel accepted the module.

use std::process::ExitCode;

use evmtest_modload::utils::init_logging_from_config;
use evmtest_modload::{run_with, LinuxKernelApi, LoaderConfig, FAILURE_EXIT_CODE};

fn main() -> ExitCode {
    let config = match LoaderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[!] {:#}", e);
            return ExitCode::from(FAILURE_EXIT_CODE);
        }
    };
    init_logging_from_config(Some(&config.logging));

    ExitCode::from(run_with(std::env::args_os(), LinuxKernelApi::new()))
}
