//! The built-in effect catalog: static, read-only tables of descriptors
//! grouped by category, created once at startup and only read afterwards.
//! `validate` cross-checks every entry against a `ShaderLibrary`, returning
//! human-readable issues so callers can surface misconfigurations before the
//! first frame instead of panicking mid-render.
use tracing::{debug, warn};

use crate::blur::MaskShape;
use crate::descriptor::{
    BlurEffect, EffectKind, GenerativeShader, MaskKind, SimpleShader, TimeShader, TouchShader,
};
use crate::invocation::ShaderInvocation;
use crate::library::ShaderLibrary;
use crate::name::function_name;
use crate::transition::ShaderTransition;

/// Every effect the sandbox can preview, grouped by category.
#[derive(Debug, Clone)]
pub struct ShaderCatalog {
    pub simple: Vec<SimpleShader>,
    pub time: Vec<TimeShader>,
    pub touch: Vec<TouchShader>,
    pub generative: Vec<GenerativeShader>,
    pub transitions: Vec<ShaderTransition>,
    pub blur: Vec<BlurEffect>,
}

/// A borrowed view of one catalog entry, for name-based lookup.
#[derive(Debug, Clone, Copy)]
pub enum CatalogEntry<'a> {
    Simple(&'a SimpleShader),
    Time(&'a TimeShader),
    Touch(&'a TouchShader),
    Generative(&'a GenerativeShader),
    Transition(&'a ShaderTransition),
    Blur(&'a BlurEffect),
}

impl<'a> CatalogEntry<'a> {
    pub fn display_name(&self) -> &'a str {
        match self {
            CatalogEntry::Simple(shader) => &shader.name,
            CatalogEntry::Time(shader) => &shader.name,
            CatalogEntry::Touch(shader) => &shader.name,
            CatalogEntry::Generative(shader) => &shader.name,
            CatalogEntry::Transition(transition) => &transition.name,
            CatalogEntry::Blur(effect) => &effect.name,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            CatalogEntry::Simple(_) => "simple",
            CatalogEntry::Time(_) => "time",
            CatalogEntry::Touch(_) => "touch",
            CatalogEntry::Generative(_) => "generative",
            CatalogEntry::Transition(_) => "transition",
            CatalogEntry::Blur(_) => "blur",
        }
    }
}

impl ShaderCatalog {
    /// Builds the full demo set.
    pub fn built_in() -> Self {
        let catalog = Self {
            simple: simple_shaders(),
            time: time_shaders(),
            touch: touch_shaders(),
            generative: generative_shaders(),
            transitions: transition_shaders(),
            blur: blur_effects(),
        };
        debug!(effects = catalog.len(), "built shader catalog");
        catalog
    }

    pub fn len(&self) -> usize {
        self.simple.len()
            + self.time.len()
            + self.touch.len()
            + self.generative.len()
            + self.transitions.len()
            + self.blur.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.simple
            .iter()
            .map(CatalogEntry::Simple)
            .chain(self.time.iter().map(CatalogEntry::Time))
            .chain(self.touch.iter().map(CatalogEntry::Touch))
            .chain(self.generative.iter().map(CatalogEntry::Generative))
            .chain(self.transitions.iter().map(CatalogEntry::Transition))
            .chain(self.blur.iter().map(CatalogEntry::Blur))
    }

    /// Case-insensitive lookup by display name, falling back to the resolved
    /// function identifier so `preview gradientFill` also works.
    pub fn find(&self, name: &str) -> Option<CatalogEntry<'_>> {
        let needle = name.to_lowercase();
        self.entries()
            .find(|entry| {
                entry.display_name().to_lowercase() == needle
                    || function_name(entry.display_name()).to_lowercase() == needle
            })
    }

    /// Checks every descriptor against the library using representative
    /// inputs, collecting issues rather than failing fast so all problems
    /// surface at once.
    pub fn validate(&self, library: &ShaderLibrary) -> Vec<String> {
        let size = [400.0, 400.0];
        let mut issues = Vec::new();
        let mut check = |label: &str, invocation: &ShaderInvocation| {
            if let Err(err) = library.check(invocation) {
                issues.push(format!("{label}: {err}"));
            }
        };

        for shader in &self.simple {
            check(
                &format!("simple '{}'", shader.name),
                &shader.invocation(size, [1.0, 1.0, 1.0, 1.0], midpoint(shader.value_range.clone())),
            );
        }
        for shader in &self.time {
            check(
                &format!("time '{}'", shader.name),
                &shader.invocation(1.0, size),
            );
        }
        for shader in &self.touch {
            check(
                &format!("touch '{}'", shader.name),
                &shader.invocation(size, [200.0, 200.0], midpoint(shader.value_range.clone())),
            );
        }
        for shader in &self.generative {
            check(
                &format!("generative '{}'", shader.name),
                &shader.invocation(1.0, size),
            );
        }
        for transition in &self.transitions {
            for (direction, phase) in [
                ("insertion", &transition.insertion),
                ("removal", &transition.removal),
            ] {
                // IdentityScale phases have nothing to check.
                if let Some(invocation) = phase.invocation_at(0.5, size) {
                    check(
                        &format!("transition '{}' {direction}", transition.name),
                        &invocation,
                    );
                }
            }
        }
        for effect in &self.blur {
            let passes = crate::blur::variable_blur_passes(
                size,
                10.0,
                15,
                false,
                crate::invocation::MaskRef::next(),
            );
            for invocation in &passes {
                check(&format!("blur '{}'", effect.name), invocation);
            }
        }
        for issue in &issues {
            warn!(%issue, "catalog entry failed validation");
        }
        issues
    }
}

fn midpoint(range: Option<std::ops::RangeInclusive<f32>>) -> f32 {
    range
        .map(|range| (range.start() + range.end()) / 2.0)
        .unwrap_or(0.0)
}

fn simple_shaders() -> Vec<SimpleShader> {
    vec![
        SimpleShader::new("Checkerboard", EffectKind::Color, true, Some(1.0..=20.0)),
        SimpleShader::new("Emboss", EffectKind::SizedDistortion, false, Some(0.0..=20.0)),
        SimpleShader::new("Gradient Fill", EffectKind::Color, false, None),
        SimpleShader::new("Infrared", EffectKind::Color, false, None),
        SimpleShader::new("Interlace", EffectKind::Color, true, Some(1.0..=5.0)).with_builder(
            |_size, color, value| {
                ShaderInvocation::new("interlace")
                    .float(value)
                    .color(color)
                    .float(1.0)
            },
        ),
        SimpleShader::new("Invert Alpha", EffectKind::Color, true, None),
        SimpleShader::new("Passthrough", EffectKind::Color, false, None),
        SimpleShader::new("Recolor", EffectKind::Color, true, None),
    ]
}

fn time_shaders() -> Vec<TimeShader> {
    vec![
        TimeShader::new("Animated Gradient Fill", EffectKind::SizedColor),
        // This shader takes far more options than the sandbox UI exposes,
        // so sensible values are injected here and only time and size stay
        // live.
        TimeShader::new("Circle Wave", EffectKind::SizedColor).with_builder(|time, size| {
            ShaderInvocation::new("circleWave")
                .float2(size)
                .float(time)
                .float(0.5)
                .float(1.0)
                .float(2.0)
                .float(100.0)
                .float2([0.5, 0.5])
                .color([0.0, 1.0, 0.0, 1.0])
        }),
        TimeShader::new("Rainbow Noise", EffectKind::Color),
        TimeShader::new("Relative Wave", EffectKind::SizedDistortion).with_builder(|time, size| {
            ShaderInvocation::new("relativeWave")
                .float2(size)
                .float(time)
                .float(5.0)
                .float(20.0)
                .float(5.0)
        }),
        TimeShader::new("Shimmer", EffectKind::SizedColor).with_builder(|time, size| {
            ShaderInvocation::new("shimmer")
                .float2(size)
                .float(time)
                .float(3.0)
                .float(0.3)
                .float(0.9)
        }),
        TimeShader::new("Water", EffectKind::SizedDistortion).with_builder(|time, size| {
            ShaderInvocation::new("water")
                .float2(size)
                .float(time)
                .float(3.0)
                .float(3.0)
                .float(10.0)
        }),
        TimeShader::new("Wave", EffectKind::Distortion).with_builder(|time, _size| {
            ShaderInvocation::new("wave")
                .float(time)
                .float(5.0)
                .float(10.0)
                .float(5.0)
        }),
        TimeShader::new("White Noise", EffectKind::Color),
    ]
}

fn touch_shaders() -> Vec<TouchShader> {
    vec![
        TouchShader::new("Color Planes", false, None),
        TouchShader::new("Simple Loupe", true, Some(0.001..=0.1)).with_builder(
            |size, touch, value| {
                ShaderInvocation::new("simpleLoupe")
                    .float2(size)
                    .float2(touch)
                    .float(value)
                    .float(2.0)
            },
        ),
        TouchShader::new("Warping Loupe", true, Some(0.001..=0.1)).with_builder(
            |size, touch, value| {
                ShaderInvocation::new("warpingLoupe")
                    .float2(size)
                    .float2(touch)
                    .float(value)
                    .float(2.0)
            },
        ),
        TouchShader::new("Bubble", true, Some(10.0..=100.0)).with_builder(|size, touch, value| {
            ShaderInvocation::new("bubble")
                .float2(size)
                .float2(touch)
                .float(value)
        }),
    ]
}

fn generative_shaders() -> Vec<GenerativeShader> {
    vec![
        GenerativeShader::new("Light Grid").with_builder(|time, size| {
            ShaderInvocation::new("lightGrid")
                .float2(size)
                .float(time)
                .float(8.0)
                .float(3.0)
                .float(1.0)
                .float(3.0)
        }),
        GenerativeShader::new("Sinebow"),
    ]
}

fn transition_shaders() -> Vec<ShaderTransition> {
    vec![
        ShaderTransition::circles("Circle", 20.0),
        ShaderTransition::circle_wave("Circle Wave", 20.0),
        ShaderTransition::crosswarp_ltr("Crosswarp (→)"),
        ShaderTransition::crosswarp_rtl("Crosswarp (←)"),
        ShaderTransition::diamonds("Diamond", 20.0),
        ShaderTransition::diamond_wave("Diamond Wave", 20.0),
        ShaderTransition::genie("Genie"),
        ShaderTransition::pixellate("Pixellate", 20.0, 60.0),
        ShaderTransition::radial("Radial"),
        ShaderTransition::swirl("Swirl", 0.5),
        ShaderTransition::wind("Wind", 0.1),
    ]
}

fn blur_effects() -> Vec<BlurEffect> {
    vec![
        BlurEffect::new("Progressive Blur", MaskKind::Gradient),
        BlurEffect::new("Vignette", MaskKind::Shape(MaskShape::Ellipse)),
        BlurEffect::new(
            "Rounded Rectangle Mask",
            MaskKind::Shape(MaskShape::RoundedRect {
                corner_radius: 25.0,
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_passes_validation() {
        let catalog = ShaderCatalog::built_in();
        let library = ShaderLibrary::built_in();
        let issues = catalog.validate(&library);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn catalog_has_every_category_populated() {
        let catalog = ShaderCatalog::built_in();
        assert_eq!(catalog.simple.len(), 8);
        assert_eq!(catalog.time.len(), 8);
        assert_eq!(catalog.touch.len(), 4);
        assert_eq!(catalog.generative.len(), 2);
        assert_eq!(catalog.transitions.len(), 11);
        assert_eq!(catalog.blur.len(), 3);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn find_matches_display_and_function_names() {
        let catalog = ShaderCatalog::built_in();
        assert!(matches!(
            catalog.find("Gradient Fill"),
            Some(CatalogEntry::Simple(_))
        ));
        assert!(matches!(
            catalog.find("gradientfill"),
            Some(CatalogEntry::Simple(_))
        ));
        assert!(matches!(
            catalog.find("Crosswarp (→)"),
            Some(CatalogEntry::Transition(_))
        ));
        assert!(catalog.find("Nonexistent").is_none());
    }

    #[test]
    fn validation_reports_unknown_functions() {
        let mut catalog = ShaderCatalog::built_in();
        catalog
            .simple
            .push(SimpleShader::new("Mystery Meat", EffectKind::Color, false, None));
        let issues = catalog.validate(&ShaderLibrary::built_in());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("mysteryMeat"));
    }
}
