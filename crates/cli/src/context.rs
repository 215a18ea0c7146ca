use std::path::PathBuf;

use litlint::Settings;

use crate::args::{Args, ParseError, parse_env};
use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct Context {
    pub args: Args,
    pub env: EnvContext,
    pub settings: Settings,
}

#[derive(Debug, Clone)]
pub struct EnvContext {
    pub cwd: PathBuf,
}

#[derive(Debug, Clone)]
pub enum ContextError {
    Parse(Vec<ParseError>),
}

impl EnvContext {
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { cwd }
    }
}

impl Context {
    /// Parse argv, load settings from the working directory, and apply
    /// CLI overrides on top.
    pub fn from_env(registry: &Registry) -> Result<Self, ContextError> {
        let parsed = parse_env(registry);
        if !parsed.errors.is_empty() {
            return Err(ContextError::Parse(parsed.errors));
        }

        let env = EnvContext::load();
        let mut settings = Settings::load(&env.cwd);
        if let Some(base_class) = parsed.args.params.get("--base-class") {
            settings.base_class = base_class.clone();
        }
        if let Some(member) = parsed.args.params.get("--properties-member") {
            settings.properties_member = member.clone();
        }

        Ok(Self {
            args: parsed.args,
            env,
            settings,
        })
    }
}
