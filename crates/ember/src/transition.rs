//! Pairs of (insertion, removal) animation phases built around a single
//! named transition function and a progress scalar. Most transitions run the
//! same function in both directions with the progress reversed; asymmetric
//! wipes delegate the removal to a mirror-named function. The host requires
//! both directions to be present, so one-way transitions use a deliberate
//! no-op removal: a scale by the smallest representable factor above one.
use crate::invocation::{ShaderArg, ShaderInvocation};

/// Scale factor of the no-op removal phase. Visually identity, but distinct
/// from 1.0 so the host treats it as a real animation.
pub const IDENTITY_SCALE_FACTOR: f32 = 1.0 + f32::EPSILON;

/// One direction of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionPhase {
    /// Drives a transition function from `active_progress` (view absent) to
    /// `identity_progress` (view fully present). `extras` are appended after
    /// the progress argument; `sized` phases lead with the view size.
    Shader {
        function: String,
        active_progress: f32,
        identity_progress: f32,
        sized: bool,
        extras: Vec<ShaderArg>,
    },
    /// The documented no-op: scale by `IDENTITY_SCALE_FACTOR`.
    IdentityScale,
}

impl TransitionPhase {
    fn shader(
        function: impl Into<String>,
        active_progress: f32,
        identity_progress: f32,
        sized: bool,
        extras: Vec<ShaderArg>,
    ) -> Self {
        TransitionPhase::Shader {
            function: function.into(),
            active_progress,
            identity_progress,
            sized,
            extras,
        }
    }

    /// Shader progress when the view is at presence fraction `t` in [0, 1]
    /// (0 = fully absent, 1 = fully present).
    pub fn progress_at(&self, t: f32) -> Option<f32> {
        match self {
            TransitionPhase::Shader {
                active_progress,
                identity_progress,
                ..
            } => {
                let t = t.clamp(0.0, 1.0);
                Some(active_progress + (identity_progress - active_progress) * t)
            }
            TransitionPhase::IdentityScale => None,
        }
    }

    /// Builds the invocation for presence fraction `t`, or `None` for the
    /// no-op phase (the host applies the scale itself).
    pub fn invocation_at(&self, t: f32, size: [f32; 2]) -> Option<ShaderInvocation> {
        match self {
            TransitionPhase::Shader {
                function,
                sized,
                extras,
                ..
            } => {
                let progress = self.progress_at(t)?;
                let mut invocation = ShaderInvocation::new(function.clone());
                if *sized {
                    invocation = invocation.float2(size);
                }
                invocation = invocation.float(progress);
                invocation.args.extend(extras.iter().cloned());
                Some(invocation)
            }
            TransitionPhase::IdentityScale => None,
        }
    }
}

/// A named, ready-to-apply transition with both directions populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderTransition {
    pub name: String,
    pub insertion: TransitionPhase,
    pub removal: TransitionPhase,
}

impl ShaderTransition {
    fn new(name: impl Into<String>, insertion: TransitionPhase, removal: TransitionPhase) -> Self {
        Self {
            name: name.into(),
            insertion,
            removal,
        }
    }

    /// Circles grow up simultaneously across the view to reveal the new
    /// content. Removal is the no-op scale.
    pub fn circles(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            TransitionPhase::shader(
                "circleTransition",
                0.0,
                1.0,
                false,
                vec![ShaderArg::Float(size)],
            ),
            TransitionPhase::IdentityScale,
        )
    }

    /// Circles grow up in a wave moving out from the top-left edge.
    pub fn circle_wave(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            TransitionPhase::shader(
                "circleWaveTransition",
                0.0,
                1.0,
                true,
                vec![ShaderArg::Float(size)],
            ),
            TransitionPhase::IdentityScale,
        )
    }

    /// Diamonds grow up simultaneously across the view.
    pub fn diamonds(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            TransitionPhase::shader(
                "diamondTransition",
                0.0,
                1.0,
                false,
                vec![ShaderArg::Float(size)],
            ),
            TransitionPhase::IdentityScale,
        )
    }

    /// Diamonds grow up in a wave moving out from the top-left edge.
    pub fn diamond_wave(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            TransitionPhase::shader(
                "diamondWaveTransition",
                0.0,
                1.0,
                true,
                vec![ShaderArg::Float(size)],
            ),
            TransitionPhase::IdentityScale,
        )
    }

    /// Stretches the view from one edge to the other while fading, running
    /// left to right; removal mirrors with the right-to-left function.
    pub fn crosswarp_ltr(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TransitionPhase::shader("crosswarpLTRTransition", 1.0, 0.0, true, Vec::new()),
            TransitionPhase::shader("crosswarpRTLTransition", 1.0, 0.0, true, Vec::new()),
        )
    }

    /// The right-to-left counterpart of `crosswarp_ltr`.
    pub fn crosswarp_rtl(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TransitionPhase::shader("crosswarpRTLTransition", 1.0, 0.0, true, Vec::new()),
            TransitionPhase::shader("crosswarpLTRTransition", 1.0, 0.0, true, Vec::new()),
        )
    }

    /// Both views pixellate in noticeable steps, cross-fading in the middle.
    pub fn pixellate(name: impl Into<String>, squares: f32, steps: f32) -> Self {
        let phase = || {
            TransitionPhase::shader(
                "pixellate",
                1.0,
                0.0,
                true,
                vec![ShaderArg::Float(squares), ShaderArg::Float(steps)],
            )
        };
        Self::new(name, phase(), phase())
    }

    /// Views are sucked in and out of the top-right corner.
    pub fn genie(name: impl Into<String>) -> Self {
        let phase = || TransitionPhase::shader("genieTransition", 1.0, 0.0, true, Vec::new());
        Self::new(name, phase(), phase())
    }

    /// Old-school radial wipe starting from straight up.
    pub fn radial(name: impl Into<String>) -> Self {
        Self::new(
            name,
            TransitionPhase::shader("radialTransition", 1.0, 0.0, true, Vec::new()),
            TransitionPhase::IdentityScale,
        )
    }

    /// Twists both views from the center, untwisting to complete.
    pub fn swirl(name: impl Into<String>, radius: f32) -> Self {
        let phase = || {
            TransitionPhase::shader("swirl", 1.0, 0.0, true, vec![ShaderArg::Float(radius)])
        };
        Self::new(name, phase(), phase())
    }

    /// Pixels blow away in horizontal streaks from the right edge.
    pub fn wind(name: impl Into<String>, size: f32) -> Self {
        Self::new(
            name,
            TransitionPhase::shader(
                "windTransition",
                1.0,
                0.0,
                true,
                vec![ShaderArg::Float(size)],
            ),
            TransitionPhase::IdentityScale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_in() -> Vec<ShaderTransition> {
        crate::catalog::ShaderCatalog::built_in().transitions
    }

    #[test]
    fn shader_phases_have_complementary_endpoints() {
        for transition in built_in() {
            for phase in [&transition.insertion, &transition.removal] {
                if let TransitionPhase::Shader {
                    active_progress,
                    identity_progress,
                    function,
                    ..
                } = phase
                {
                    assert!(
                        (active_progress + identity_progress - 1.0).abs() < f32::EPSILON,
                        "{} endpoints are not complements in '{}'",
                        function,
                        transition.name
                    );
                }
            }
        }
    }

    #[test]
    fn every_transition_has_a_removal_direction() {
        for transition in built_in() {
            match &transition.removal {
                TransitionPhase::Shader { .. } | TransitionPhase::IdentityScale => {}
            }
        }
    }

    #[test]
    fn circles_progress_follows_presence() {
        let transition = ShaderTransition::circles("Circle", 20.0);
        assert_eq!(transition.insertion.progress_at(0.0), Some(0.0));
        assert_eq!(transition.insertion.progress_at(1.0), Some(1.0));
        assert_eq!(transition.removal.progress_at(0.5), None);
    }

    #[test]
    fn crosswarp_reverses_progress_and_mirrors_function() {
        let transition = ShaderTransition::crosswarp_ltr("Crosswarp (→)");
        assert_eq!(transition.insertion.progress_at(0.0), Some(1.0));
        assert_eq!(transition.insertion.progress_at(1.0), Some(0.0));

        let removal = transition.removal.invocation_at(0.0, [100.0, 100.0]).unwrap();
        assert_eq!(removal.function, "crosswarpRTLTransition");
    }

    #[test]
    fn sized_phases_lead_with_the_view_size() {
        let transition = ShaderTransition::pixellate("Pixellate", 20.0, 60.0);
        let invocation = transition
            .insertion
            .invocation_at(0.25, [640.0, 480.0])
            .unwrap();
        assert_eq!(invocation.args[0], ShaderArg::Float2([640.0, 480.0]));
        assert_eq!(invocation.args[1], ShaderArg::Float(0.75));
        assert_eq!(invocation.args[2], ShaderArg::Float(20.0));
        assert_eq!(invocation.args[3], ShaderArg::Float(60.0));
    }

    #[test]
    fn identity_scale_emits_no_invocation() {
        let transition = ShaderTransition::wind("Wind", 0.1);
        assert_eq!(transition.removal.invocation_at(0.5, [10.0, 10.0]), None);
        assert!(IDENTITY_SCALE_FACTOR > 1.0);
    }
}
