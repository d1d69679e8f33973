//! getopt_long compatible argument normalization
//!
//! The loader accepts the same command lines a C `getopt_long` program
//! would: clustered short flags (`-on`), attached values (`-p/tmp/m.ko`),
//! `--long=value`, unambiguous long prefixes (`--pa`), and it ignores
//! anything it does not recognize instead of failing. clap is strict about
//! all of these, so tokens are rewritten into canonical clap syntax first,
//! using the option table clap itself was built from.

use clap::Command;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use tracing::debug;

/// One named option taken from a clap [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionSpec {
    short: Option<char>,
    long: Option<String>,
    takes_value: bool,
}

impl OptionSpec {
    fn flag(&self) -> OsString {
        match (&self.long, self.short) {
            (Some(long), _) => OsString::from(format!("--{}", long)),
            (None, Some(short)) => OsString::from(format!("-{}", short)),
            (None, None) => OsString::new(),
        }
    }

    fn with_value(&self, value: &OsStr) -> Vec<OsString> {
        match &self.long {
            Some(long) => {
                let mut arg = OsString::from(format!("--{}=", long));
                arg.push(value);
                vec![arg]
            }
            None => vec![self.flag(), value.to_os_string()],
        }
    }
}

/// Rewrites raw arguments into a form clap parses without errors
#[derive(Debug, Clone)]
pub struct GetoptNormalizer {
    options: Vec<OptionSpec>,
}

impl GetoptNormalizer {
    /// Build the option table from a clap command's named arguments
    pub fn from_command(cmd: &Command) -> Self {
        let options = cmd
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .map(|arg| OptionSpec {
                short: arg.get_short(),
                long: arg.get_long().map(str::to_string),
                takes_value: arg.get_action().takes_values(),
            })
            .collect();
        Self { options }
    }

    fn find_short(&self, c: char) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.short == Some(c))
    }

    /// Exact match, or the single option whose long name starts with `name`
    fn find_long(&self, name: &str) -> Option<&OptionSpec> {
        if name.is_empty() {
            return None;
        }
        if let Some(exact) = self
            .options
            .iter()
            .find(|o| o.long.as_deref() == Some(name))
        {
            return Some(exact);
        }
        let mut candidates = self
            .options
            .iter()
            .filter(|o| o.long.as_deref().is_some_and(|l| l.starts_with(name)));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Normalize a full argument vector, program name first
    ///
    /// Unknown options, stray operands, options missing their value and
    /// everything after `--` are dropped.
    pub fn normalize<I, T>(&self, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut out = Vec::new();
        match args.next() {
            Some(bin) => out.push(bin),
            None => return out,
        }

        while let Some(token) = args.next() {
            let bytes = token.as_bytes();

            if bytes == b"--" {
                let rest = args.by_ref().count();
                if rest > 0 {
                    debug!("Ignoring {} operand(s) after --", rest);
                }
                break;
            }

            if let Some(body) = bytes.strip_prefix(b"--") {
                let (name, inline) = match body.iter().position(|&b| b == b'=') {
                    Some(eq) => (&body[..eq], Some(OsStr::from_bytes(&body[eq + 1..]))),
                    None => (body, None),
                };
                let spec = std::str::from_utf8(name)
                    .ok()
                    .and_then(|name| self.find_long(name));
                match spec {
                    Some(spec) if spec.takes_value => {
                        let value = match inline {
                            Some(value) => value.to_os_string(),
                            None => match args.next() {
                                Some(value) => value,
                                None => {
                                    debug!("Ignoring {:?}: missing value", token);
                                    continue;
                                }
                            },
                        };
                        out.extend(spec.with_value(&value));
                    }
                    Some(spec) => {
                        if inline.is_some() {
                            debug!("Ignoring {:?}: option takes no value", token);
                            continue;
                        }
                        out.push(spec.flag());
                    }
                    None => debug!("Ignoring unrecognized option {:?}", token),
                }
                continue;
            }

            if bytes.len() > 1 && bytes[0] == b'-' {
                let mut i = 1;
                while i < bytes.len() {
                    let c = bytes[i] as char;
                    match self.find_short(c).filter(|_| bytes[i].is_ascii()) {
                        Some(spec) if spec.takes_value => {
                            let attached = &bytes[i + 1..];
                            if !attached.is_empty() {
                                out.extend(spec.with_value(OsStr::from_bytes(attached)));
                            } else if let Some(value) = args.next() {
                                out.extend(spec.with_value(&value));
                            } else {
                                debug!("Ignoring -{}: missing value", c);
                            }
                            break;
                        }
                        Some(spec) => out.push(spec.flag()),
                        None => debug!("Ignoring unrecognized option -{}", c),
                    }
                    i += 1;
                }
                continue;
            }

            debug!("Ignoring operand {:?}", token);
        }

        out
    }
}
