//! Command-line surface of `modloader`
//!
//! ```text
//! modloader -p <path> (-o | -n)
//! ```

pub mod getopt;

use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

use crate::module::{KernelApi, LoadError, LoadMode, LoadRequest, ModuleLoader};
use getopt::GetoptNormalizer;

/// Raw command-line options, before validation
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = "modloader",
    override_usage = "modloader <-p pathname> <-o | -n>",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Args {
    /// pathname of kernel module
    #[arg(short = 'p', long = "path", value_name = "PATHNAME")]
    pub path: Option<PathBuf>,

    /// old syscall (INIT_MODULE)
    #[arg(short = 'o', long = "old")]
    pub old: bool,

    /// new syscall (FINIT_MODULE)
    #[arg(short = 'n', long = "new")]
    pub new: bool,
}

impl Args {
    /// Parse an argument vector, ignoring anything unrecognized
    pub fn parse_permissive<I, T>(args: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let normalized = GetoptNormalizer::from_command(&Self::command()).normalize(args);
        debug!("Normalized arguments: {:?}", normalized);
        Self::try_parse_from(normalized).map_err(|e| LoadError::Usage(e.to_string()))
    }

    /// Check mode exclusivity and path presence
    pub fn into_request(self) -> Result<LoadRequest, LoadError> {
        let mode = match (self.old, self.new) {
            (true, false) => LoadMode::Legacy,
            (false, true) => LoadMode::Modern,
            (true, true) => {
                return Err(LoadError::Usage(
                    "--old and --new are mutually exclusive".to_string(),
                ))
            }
            (false, false) => {
                return Err(LoadError::Usage(
                    "one of --old or --new is required".to_string(),
                ))
            }
        };
        let path = self
            .path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| LoadError::Usage("--path is required".to_string()))?;
        Ok(LoadRequest { path, mode })
    }
}

/// Usage text listing the three options
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Parse arguments into a validated request
pub fn parse_request<I, T>(args: I) -> Result<LoadRequest, LoadError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::parse_permissive(args)?.into_request()
}

/// Run one invocation against `kernel` and return the process exit status
pub fn run_with<I, T, K>(args: I, kernel: K) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    K: KernelApi,
{
    let request = match parse_request(args) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("[!] {}", e);
            println!("{}", usage());
            return e.exit_code();
        }
    };

    match ModuleLoader::new(kernel).load(&request) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("[!] {}", e);
            e.exit_code()
        }
    }
}
