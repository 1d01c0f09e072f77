pub mod blur;
pub mod catalog;
pub mod descriptor;
pub mod invocation;
pub mod library;
pub mod name;
pub mod transition;

pub use blur::{
    gradient_mask, gradient_opacity, shape_mask, variable_blur_passes, MaskError, MaskImage,
    MaskShape,
};
pub use catalog::{CatalogEntry, ShaderCatalog};
pub use descriptor::{
    BlurEffect, DescriptorId, EffectKind, GenerativeShader, MaskKind, SimpleShader, TimeShader,
    TouchShader,
};
pub use invocation::{MaskRef, ShaderArg, ShaderInvocation};
pub use library::{LibraryError, ShaderLibrary};
pub use name::function_name;
pub use transition::{ShaderTransition, TransitionPhase, IDENTITY_SCALE_FACTOR};
