//! Registry of GPU functions the runtime is known to export, replacing the
//! runtime-only string lookup with a table that can be checked at startup.
//! Catalog loading validates every descriptor against this registry so that a
//! misnamed effect or a wrong argument count is a configuration error rather
//! than a mid-frame linkage failure.
//!
//! Types:
//!
//! - `ShaderLibrary` maps function identifiers to their declared positional
//!   arity, which is the entire signature surface the runtime checks.
//! - `LibraryError` covers the single real failure class in the system:
//!   an invocation that does not match any exported function.
//!
//! Functions:
//!
//! - `ShaderLibrary::built_in` registers every function the shipped catalogs
//!   reference.
//! - `ShaderLibrary::check` verifies a built `ShaderInvocation` by name and
//!   arity before it is handed to the runtime.
use std::collections::BTreeMap;

use crate::invocation::ShaderInvocation;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("no GPU function named '{0}' is exported by the runtime")]
    UnknownFunction(String),
    #[error("function '{function}' takes {expected} argument(s), invocation supplies {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
}

/// Table of exported GPU functions keyed by identifier, each with the
/// positional argument count its signature declares.
#[derive(Debug, Clone, Default)]
pub struct ShaderLibrary {
    functions: BTreeMap<String, usize>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every function referenced by `ShaderCatalog::built_in`.
    pub fn built_in() -> Self {
        let mut library = Self::new();
        // Simple color/distortion transforms.
        library.register("checkerboard", 2);
        library.register("emboss", 1);
        library.register("gradientFill", 0);
        library.register("infrared", 0);
        library.register("interlace", 3);
        library.register("invertAlpha", 1);
        library.register("passthrough", 0);
        library.register("recolor", 1);
        // Time-driven transforms.
        library.register("animatedGradientFill", 2);
        library.register("circleWave", 8);
        library.register("rainbowNoise", 1);
        library.register("relativeWave", 5);
        library.register("shimmer", 5);
        library.register("water", 5);
        library.register("wave", 4);
        library.register("whiteNoise", 1);
        // Touch-driven transforms.
        library.register("bubble", 3);
        library.register("colorPlanes", 1);
        library.register("simpleLoupe", 4);
        library.register("warpingLoupe", 4);
        // Generative shaders.
        library.register("lightGrid", 6);
        library.register("sinebow", 2);
        // Transitions.
        library.register("circleTransition", 2);
        library.register("circleWaveTransition", 3);
        library.register("crosswarpLTRTransition", 2);
        library.register("crosswarpRTLTransition", 2);
        library.register("diamondTransition", 2);
        library.register("diamondWaveTransition", 3);
        library.register("genieTransition", 2);
        library.register("pixellate", 4);
        library.register("radialTransition", 2);
        library.register("swirl", 3);
        library.register("windTransition", 3);
        // Separable variable blur, invoked once per pass direction.
        library.register("variableBlur", 5);
        library
    }

    pub fn register(&mut self, name: impl Into<String>, arity: usize) {
        self.functions.insert(name.into(), arity);
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Iterates registered functions in identifier order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.functions
            .iter()
            .map(|(name, arity)| (name.as_str(), *arity))
    }

    /// Verifies that an invocation targets a known function with the arity
    /// its signature declares.
    pub fn check(&self, invocation: &ShaderInvocation) -> Result<(), LibraryError> {
        let expected = self
            .arity(&invocation.function)
            .ok_or_else(|| LibraryError::UnknownFunction(invocation.function.clone()))?;
        let found = invocation.arity();
        if expected != found {
            return Err(LibraryError::ArityMismatch {
                function: invocation.function.clone(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_invocation() {
        let library = ShaderLibrary::built_in();
        let invocation = ShaderInvocation::new("checkerboard")
            .color([1.0, 0.0, 0.0, 1.0])
            .float(4.0);
        assert_eq!(library.check(&invocation), Ok(()));
    }

    #[test]
    fn rejects_unknown_function() {
        let library = ShaderLibrary::built_in();
        let invocation = ShaderInvocation::new("gradientFil");
        assert_eq!(
            library.check(&invocation),
            Err(LibraryError::UnknownFunction("gradientFil".into()))
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let library = ShaderLibrary::built_in();
        let invocation = ShaderInvocation::new("emboss");
        assert_eq!(
            library.check(&invocation),
            Err(LibraryError::ArityMismatch {
                function: "emboss".into(),
                expected: 1,
                found: 0,
            })
        );
    }
}
