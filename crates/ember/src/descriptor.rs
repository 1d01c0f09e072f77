//! Static descriptions of the shipped shader effects, one value type per
//! category. A descriptor pairs a display name with the optional inputs the
//! effect accepts, and turns live UI state into a `ShaderInvocation` either
//! through the naming convention and a category-specific argument order, or
//! through a custom builder for functions whose parameter list does not fit
//! the convention. Exactly one of the two paths is used per invocation.
//!
//! Descriptors are immutable and created once at startup; identity lives in
//! an explicit `DescriptorId` field because the builder closures block
//! derived equality.
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::blur::MaskShape;
use crate::invocation::ShaderInvocation;
use crate::name::function_name;

/// Process-unique descriptor identity, used only for equality and hashing in
/// selection lists. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorId(u64);

impl DescriptorId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        DescriptorId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which host-framework modifier an effect is applied through. The sized
/// variants receive the view size as their leading argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Color,
    Distortion,
    SizedColor,
    SizedDistortion,
}

impl EffectKind {
    pub fn needs_size(self) -> bool {
        matches!(self, EffectKind::SizedColor | EffectKind::SizedDistortion)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Color => f.write_str("color"),
            EffectKind::Distortion => f.write_str("distortion"),
            EffectKind::SizedColor => f.write_str("sized-color"),
            EffectKind::SizedDistortion => f.write_str("sized-distortion"),
        }
    }
}

type SimpleBuilder = Arc<dyn Fn([f32; 2], [f32; 4], f32) -> ShaderInvocation + Send + Sync>;
type TimeBuilder = Arc<dyn Fn(f32, [f32; 2]) -> ShaderInvocation + Send + Sync>;
type TouchBuilder = Arc<dyn Fn([f32; 2], [f32; 2], f32) -> ShaderInvocation + Send + Sync>;

/// A transform that adjusts its input without time or touch data, e.g.
/// recoloring.
#[derive(Clone)]
pub struct SimpleShader {
    pub id: DescriptorId,
    pub name: String,
    pub kind: EffectKind,
    pub uses_replacement_color: bool,
    pub value_range: Option<RangeInclusive<f32>>,
    builder: Option<SimpleBuilder>,
}

impl SimpleShader {
    pub fn new(
        name: impl Into<String>,
        kind: EffectKind,
        uses_replacement_color: bool,
        value_range: Option<RangeInclusive<f32>>,
    ) -> Self {
        Self {
            id: DescriptorId::next(),
            name: name.into(),
            kind,
            uses_replacement_color,
            value_range,
            builder: None,
        }
    }

    pub fn with_builder(
        mut self,
        builder: impl Fn([f32; 2], [f32; 4], f32) -> ShaderInvocation + Send + Sync + 'static,
    ) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    pub fn function_name(&self) -> String {
        function_name(&self.name)
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    /// Builds the invocation for the current control state. The convention
    /// path appends the replacement color and then the slider value, each
    /// only when the descriptor declares it.
    pub fn invocation(&self, size: [f32; 2], color: [f32; 4], value: f32) -> ShaderInvocation {
        if let Some(builder) = &self.builder {
            return builder(size, color, value);
        }
        let mut invocation = ShaderInvocation::new(self.function_name());
        if self.uses_replacement_color {
            invocation = invocation.color(color);
        }
        if self.value_range.is_some() {
            invocation = invocation.float(value);
        }
        invocation
    }
}

/// A transform that accepts a time input so its effect changes every frame.
#[derive(Clone)]
pub struct TimeShader {
    pub id: DescriptorId,
    pub name: String,
    pub kind: EffectKind,
    builder: Option<TimeBuilder>,
}

impl TimeShader {
    pub fn new(name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            id: DescriptorId::next(),
            name: name.into(),
            kind,
            builder: None,
        }
    }

    pub fn with_builder(
        mut self,
        builder: impl Fn(f32, [f32; 2]) -> ShaderInvocation + Send + Sync + 'static,
    ) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    pub fn function_name(&self) -> String {
        function_name(&self.name)
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    /// Builds the invocation for the elapsed time. Sized kinds lead with the
    /// view size, everything else gets the bare time scalar.
    pub fn invocation(&self, elapsed_time: f32, size: [f32; 2]) -> ShaderInvocation {
        if let Some(builder) = &self.builder {
            return builder(elapsed_time, size);
        }
        let invocation = ShaderInvocation::new(self.function_name());
        if self.kind.needs_size() {
            invocation.float2(size).float(elapsed_time)
        } else {
            invocation.float(elapsed_time)
        }
    }
}

/// A transform driven by the user's pointer location.
#[derive(Clone)]
pub struct TouchShader {
    pub id: DescriptorId,
    pub name: String,
    pub uses_size: bool,
    pub value_range: Option<RangeInclusive<f32>>,
    builder: Option<TouchBuilder>,
}

impl TouchShader {
    pub fn new(
        name: impl Into<String>,
        uses_size: bool,
        value_range: Option<RangeInclusive<f32>>,
    ) -> Self {
        Self {
            id: DescriptorId::next(),
            name: name.into(),
            uses_size,
            value_range,
            builder: None,
        }
    }

    pub fn with_builder(
        mut self,
        builder: impl Fn([f32; 2], [f32; 2], f32) -> ShaderInvocation + Send + Sync + 'static,
    ) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    pub fn function_name(&self) -> String {
        function_name(&self.name)
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    /// Builds the invocation for the current pointer state.
    ///
    /// The size-aware convention intentionally mirrors the positional
    /// contract of the shipped shaders: with a value range it emits
    /// (size, touch), without one it emits (size, touch, value). All three
    /// shipped size-aware touch shaders use custom builders, so the
    /// convention arm is only reached by descriptors added later.
    pub fn invocation(&self, size: [f32; 2], touch: [f32; 2], value: f32) -> ShaderInvocation {
        if let Some(builder) = &self.builder {
            return builder(size, touch, value);
        }
        let invocation = ShaderInvocation::new(self.function_name());
        if self.uses_size {
            if self.value_range.is_some() {
                invocation.float2(size).float2(touch)
            } else {
                invocation.float2(size).float2(touch).float(value)
            }
        } else if self.value_range.is_some() {
            invocation.float2(touch).float(value)
        } else {
            invocation.float2(touch)
        }
    }
}

/// A shader that generates its output from scratch rather than transforming
/// existing content.
#[derive(Clone)]
pub struct GenerativeShader {
    pub id: DescriptorId,
    pub name: String,
    builder: Option<TimeBuilder>,
}

impl GenerativeShader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DescriptorId::next(),
            name: name.into(),
            builder: None,
        }
    }

    pub fn with_builder(
        mut self,
        builder: impl Fn(f32, [f32; 2]) -> ShaderInvocation + Send + Sync + 'static,
    ) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    pub fn function_name(&self) -> String {
        function_name(&self.name)
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    pub fn invocation(&self, elapsed_time: f32, size: [f32; 2]) -> ShaderInvocation {
        if let Some(builder) = &self.builder {
            return builder(elapsed_time, size);
        }
        ShaderInvocation::new(self.function_name())
            .float2(size)
            .float(elapsed_time)
    }
}

/// How a blur effect draws the mask fed to the variable blur shader.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskKind {
    /// A vertical linear gradient between two proportional offsets.
    Gradient,
    /// A parametric shape inset from the view bounds and edge-feathered.
    Shape(MaskShape),
}

/// An effect built on the variable blur shader, distinguished by the mask it
/// draws.
#[derive(Debug, Clone)]
pub struct BlurEffect {
    pub id: DescriptorId,
    pub name: String,
    pub mask: MaskKind,
}

impl BlurEffect {
    pub fn new(name: impl Into<String>, mask: MaskKind) -> Self {
        Self {
            id: DescriptorId::next(),
            name: name.into(),
            mask,
        }
    }
}

macro_rules! identity_equality {
    ($type:ty) => {
        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $type {}

        impl std::hash::Hash for $type {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

identity_equality!(SimpleShader);
identity_equality!(TimeShader);
identity_equality!(TouchShader);
identity_equality!(GenerativeShader);
identity_equality!(BlurEffect);

macro_rules! builder_debug {
    ($type:ty, $label:literal) => {
        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct($label)
                    .field("id", &self.id)
                    .field("name", &self.name)
                    .field("custom_builder", &self.builder.is_some())
                    .finish()
            }
        }
    };
}

builder_debug!(SimpleShader, "SimpleShader");
builder_debug!(TimeShader, "TimeShader");
builder_debug!(TouchShader, "TouchShader");
builder_debug!(GenerativeShader, "GenerativeShader");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::ShaderArg;

    #[test]
    fn equality_tracks_identity_not_contents() {
        let a = SimpleShader::new("Recolor", EffectKind::Color, true, None);
        let b = SimpleShader::new("Recolor", EffectKind::Color, true, None);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn simple_convention_orders_color_before_value() {
        let shader = SimpleShader::new("Checkerboard", EffectKind::Color, true, Some(1.0..=20.0));
        let invocation = shader.invocation([100.0, 100.0], [0.0, 0.0, 1.0, 1.0], 4.0);
        assert_eq!(invocation.function, "checkerboard");
        assert_eq!(
            invocation.args,
            vec![ShaderArg::Color([0.0, 0.0, 1.0, 1.0]), ShaderArg::Float(4.0)]
        );
    }

    #[test]
    fn simple_convention_omits_undeclared_inputs() {
        let shader = SimpleShader::new("Gradient Fill", EffectKind::Color, false, None);
        let invocation = shader.invocation([100.0, 100.0], [1.0, 1.0, 1.0, 1.0], 0.5);
        assert_eq!(invocation.function, "gradientFill");
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn time_convention_prepends_size_for_sized_kinds() {
        let sized = TimeShader::new("Animated Gradient Fill", EffectKind::SizedColor);
        let invocation = sized.invocation(2.5, [320.0, 240.0]);
        assert_eq!(
            invocation.args,
            vec![ShaderArg::Float2([320.0, 240.0]), ShaderArg::Float(2.5)]
        );

        let flat = TimeShader::new("White Noise", EffectKind::Color);
        assert_eq!(flat.invocation(2.5, [320.0, 240.0]).args, vec![ShaderArg::Float(2.5)]);
    }

    #[test]
    fn touch_convention_matches_positional_contract() {
        let ranged = TouchShader::new("Ripple", true, Some(0.0..=1.0));
        assert_eq!(
            ranged.invocation([10.0, 10.0], [5.0, 5.0], 0.5).args,
            vec![ShaderArg::Float2([10.0, 10.0]), ShaderArg::Float2([5.0, 5.0])]
        );

        let unranged = TouchShader::new("Ripple", true, None);
        assert_eq!(
            unranged.invocation([10.0, 10.0], [5.0, 5.0], 0.5).args,
            vec![
                ShaderArg::Float2([10.0, 10.0]),
                ShaderArg::Float2([5.0, 5.0]),
                ShaderArg::Float(0.5)
            ]
        );
    }

    #[test]
    fn custom_builder_is_referentially_pure() {
        let shader = TimeShader::new("Wave", EffectKind::Distortion).with_builder(|time, _| {
            ShaderInvocation::new("wave")
                .float(time)
                .float(5.0)
                .float(10.0)
                .float(5.0)
        });
        let first = shader.invocation(1.25, [0.0, 0.0]);
        let second = shader.invocation(1.25, [0.0, 0.0]);
        assert_eq!(first, second);
    }
}
