//! One-stop entry point: a registry plus the context its methods run in.

use std::path::Path;

use tracing::debug;

use crate::parser::parse_literal;
use crate::runner::ds::error::ErrorType;
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::AugmentConfig;
use crate::runner::plugin::registry::{BuiltInRegistry, RegistryError};
use crate::runner::plugin::types::EvalContext;

pub struct Augment {
    registry: BuiltInRegistry,
    ctx: EvalContext,
}

impl Augment {
    /// Host built-ins plus the default extension set.
    pub fn new() -> Self {
        Self::with_config(AugmentConfig::default())
    }

    pub fn with_config(config: AugmentConfig) -> Self {
        let registry = BuiltInRegistry::with_core_for(&config);
        debug!(
            revision = config.revision.as_str(),
            installed = registry.installed().len(),
            skipped = registry.skipped().len(),
            "registry ready"
        );
        Augment {
            registry,
            ctx: EvalContext::with_config(config),
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, RegistryError> {
        Ok(Self::with_config(AugmentConfig::load(path)?))
    }

    pub fn registry(&self) -> &BuiltInRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BuiltInRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.ctx.config
    }

    /// `this.method(...args)`
    pub fn call(&mut self, this: Value, method: &str, args: Vec<Value>) -> Result<Value, ErrorType> {
        self.registry.call_method(&mut self.ctx, this, method, args)
    }

    /// Like [`call`](Self::call), with the receiver and arguments given as literals.
    pub fn call_literals(
        &mut self,
        this: &str,
        method: &str,
        args: &[String],
    ) -> Result<Value, ErrorType> {
        let this = parse_literal(this)?;
        let args = args
            .iter()
            .map(|a| parse_literal(a))
            .collect::<Result<Vec<_>, _>>()?;
        self.call(this, method, args)
    }
}

impl Default for Augment {
    fn default() -> Self {
        Self::new()
    }
}
