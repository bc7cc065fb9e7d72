//! Hook invoker that runs hook chains through an external interpreter
//!
//! The interpreter receives the chain as arguments, base layer first, and a
//! JSON payload on stdin:
//!
//! ```json
//! { "method": "execute", "parent": { "name": "tk-multi-demo", ... }, "args": { ... } }
//! ```
//!
//! Whatever it prints on stdout is the hook's return value: JSON when it
//! parses, a plain string otherwise, null when empty.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use serde_json::{Value, json};
use tracing::debug;

use super::{HookCall, HookInvoker};
use crate::error::{ConfigurationError, Result};

/// Runs hooks with `<interpreter> [extra args] <chain...>`
#[derive(Debug, Clone)]
pub struct ScriptHookInvoker {
    interpreter: String,
    extra_args: Vec<String>,
}

impl ScriptHookInvoker {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed between the interpreter and the hook chain
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl HookInvoker for ScriptHookInvoker {
    fn execute(&self, call: &HookCall<'_>) -> Result<Value> {
        let target = call
            .most_specific()
            .ok_or_else(|| ConfigurationError::HookExecution {
                path: "<empty chain>".to_string(),
                reason: "no hook files to execute".to_string(),
            })?
            .display()
            .to_string();

        for path in call.chain {
            if !path.is_file() {
                return Err(ConfigurationError::HookExecution {
                    path: path.display().to_string(),
                    reason: "hook file does not exist".to_string(),
                });
            }
        }

        let payload = json!({
            "method": call.method_name(),
            "parent": call.parent.to_json(),
            "args": call.args,
        });

        debug!(
            "Running {} {} on {} hook layer(s), most specific {}",
            self.interpreter,
            call.method_name(),
            call.chain.len(),
            target
        );

        let mut child = Command::new(&self.interpreter)
            .args(&self.extra_args)
            .args(call.chain)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConfigurationError::HookExecution {
                path: target.clone(),
                reason: format!("failed to start {}: {e}", self.interpreter),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // Hooks that ignore their arguments may exit before reading stdin
            match stdin.write_all(payload.to_string().as_bytes()) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                    drop(stdin);
                    reap(&mut child);
                    return Err(ConfigurationError::HookExecution {
                        path: target,
                        reason: format!("failed to send arguments: {e}"),
                    });
                }
                _ => {}
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ConfigurationError::HookExecution {
                path: target.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                message => message.to_string(),
            };
            return Err(ConfigurationError::HookExecution {
                path: target,
                reason,
            });
        }

        Ok(parse_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Kill `child` and wait for it so it does not linger as a zombie
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Could not kill hook process {}: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        debug!("Could not wait for hook process {}: {}", child.id(), e);
    }
}

fn parse_output(stdout: &str) -> Value {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}
