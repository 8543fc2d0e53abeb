//! Per-module synthesis configuration.

use std::sync::Arc;

use sharp_symbols::{CompilationContext, EmbeddableAttributes, EmitOptions, ModuleEmitContext};

/// How synthesized declarations of one module are named and attributed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SynthesisConfig {
    pub module_name: String,
    /// Module version id. Only net modules put it into the name of
    /// `<PrivateImplementationDetails>`, since they get merged into an
    /// assembly with other modules.
    pub module_version_id: Option<String>,
    pub is_net_module: bool,
    /// Nullable annotation byte most members of the module share.
    pub nullable_context: Option<u8>,
    /// Emit `[module: NullablePublicOnly]`.
    pub emit_nullable_public_only: bool,
    /// Edit-and-continue generation (0 for the initial compilation).
    pub generation: u32,
    /// Attributes missing from the references that the module defines itself.
    pub needs_embedded: EmbeddableAttributes,
    pub ref_safety_rules_version: Option<i32>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let defaults = EmitOptions::default();
        SynthesisConfig {
            module_name: defaults.module_name,
            module_version_id: defaults.module_version_id,
            is_net_module: defaults.is_net_module,
            nullable_context: defaults.nullable_context,
            emit_nullable_public_only: defaults.emit_nullable_public_only,
            generation: defaults.generation,
            needs_embedded: defaults.needs_embedded,
            ref_safety_rules_version: defaults.ref_safety_rules_version,
        }
    }
}

impl SynthesisConfig {
    /// Default configuration for the module `module_name`.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        SynthesisConfig {
            module_name: module_name.into(),
            ..Default::default()
        }
    }

    /// Configuration of a net module with the given version id.
    #[must_use]
    pub fn net_module(
        module_name: impl Into<String>,
        module_version_id: impl Into<String>,
    ) -> Self {
        SynthesisConfig {
            module_name: module_name.into(),
            module_version_id: Some(module_version_id.into()),
            is_net_module: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_module_version_id(mut self, module_version_id: impl Into<String>) -> Self {
        self.module_version_id = Some(module_version_id.into());
        self
    }

    #[must_use]
    pub fn with_nullable_context(mut self, flag: u8) -> Self {
        self.nullable_context = Some(flag);
        self
    }

    #[must_use]
    pub fn with_nullable_public_only(mut self, emit: bool) -> Self {
        self.emit_nullable_public_only = emit;
        self
    }

    /// Set the edit-and-continue generation.
    #[must_use]
    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    /// Add `attributes` to the set the module embeds.
    #[must_use]
    pub fn embedding(mut self, attributes: EmbeddableAttributes) -> Self {
        self.needs_embedded |= attributes;
        self
    }

    #[must_use]
    pub fn with_ref_safety_rules(mut self, version: i32) -> Self {
        self.ref_safety_rules_version = Some(version);
        self
    }

    /// The options the emission context is built with.
    pub fn emit_options(&self) -> EmitOptions {
        self.clone().into()
    }

    /// Build the emission context of this module over `compilation`.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.module_name))]
    pub fn build(&self, compilation: Arc<dyn CompilationContext>) -> ModuleEmitContext {
        tracing::debug!(
            assembly = compilation.assembly_name(),
            embedded = ?self.needs_embedded,
            "creating module emit context"
        );
        ModuleEmitContext::new(compilation, self.emit_options())
    }
}

impl From<SynthesisConfig> for EmitOptions {
    fn from(config: SynthesisConfig) -> Self {
        EmitOptions {
            module_name: config.module_name,
            module_version_id: config.module_version_id,
            is_net_module: config.is_net_module,
            nullable_context: config.nullable_context,
            emit_nullable_public_only: config.emit_nullable_public_only,
            generation: config.generation,
            needs_embedded: config.needs_embedded,
            ref_safety_rules_version: config.ref_safety_rules_version,
        }
    }
}

#[cfg(test)]
mod tests;
