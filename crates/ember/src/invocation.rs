//! The wire format between the catalog and the GPU runtime: a function
//! identifier plus an ordered, positional argument list. Arguments are tagged
//! values because the runtime resolves functions by name and binds parameters
//! strictly by position, so order is part of the contract.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque handle for a mask texture registered with the host runtime.
///
/// Handles are process-unique and never persisted; the runtime owns the
/// mapping from handle to texture memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskRef(u64);

impl MaskRef {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MaskRef(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// A single positional shader argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ShaderArg {
    Float(f32),
    Float2([f32; 2]),
    Color([f32; 4]),
    Mask(MaskRef),
}

impl fmt::Display for ShaderArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderArg::Float(value) => write!(f, "{value}"),
            ShaderArg::Float2([x, y]) => write!(f, "({x}, {y})"),
            ShaderArg::Color([r, g, b, a]) => write!(f, "rgba({r}, {g}, {b}, {a})"),
            ShaderArg::Mask(mask) => write!(f, "mask#{}", mask.id()),
        }
    }
}

/// A ready-to-execute shader call: function identifier plus positional args.
///
/// This is the only artifact that crosses into the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderInvocation {
    pub function: String,
    pub args: Vec<ShaderArg>,
}

impl ShaderInvocation {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Vec::new(),
        }
    }

    pub fn float(mut self, value: f32) -> Self {
        self.args.push(ShaderArg::Float(value));
        self
    }

    pub fn float2(mut self, value: [f32; 2]) -> Self {
        self.args.push(ShaderArg::Float2(value));
        self
    }

    pub fn color(mut self, value: [f32; 4]) -> Self {
        self.args.push(ShaderArg::Color(value));
        self
    }

    pub fn mask(mut self, mask: MaskRef) -> Self {
        self.args.push(ShaderArg::Mask(mask));
        self
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for ShaderInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_positional_arguments_in_order() {
        let invocation = ShaderInvocation::new("interlace")
            .float(2.0)
            .color([1.0, 0.0, 0.0, 1.0])
            .float(1.0);
        assert_eq!(invocation.arity(), 3);
        assert_eq!(invocation.args[0], ShaderArg::Float(2.0));
        assert_eq!(invocation.args[2], ShaderArg::Float(1.0));
    }

    #[test]
    fn display_is_call_shaped() {
        let invocation = ShaderInvocation::new("wave").float(1.5).float2([3.0, 4.0]);
        assert_eq!(invocation.to_string(), "wave(1.5, (3, 4))");
    }

    #[test]
    fn mask_refs_are_unique() {
        assert_ne!(MaskRef::next(), MaskRef::next());
    }
}
