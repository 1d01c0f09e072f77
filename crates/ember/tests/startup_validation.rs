//! End-to-end check of the startup path the sandbox runs before showing
//! anything: build the catalog, build the library, and make sure every
//! effect the catalog can emit is accepted.

use ember::{ShaderCatalog, ShaderLibrary};

#[test]
fn every_built_in_effect_resolves_and_type_checks() {
    let catalog = ShaderCatalog::built_in();
    let library = ShaderLibrary::built_in();
    assert!(catalog.validate(&library).is_empty());
}

#[test]
fn convention_names_resolve_against_the_library() {
    let catalog = ShaderCatalog::built_in();
    let library = ShaderLibrary::built_in();
    for shader in catalog.simple.iter().filter(|shader| !shader.has_builder()) {
        assert!(
            library.contains(&shader.function_name()),
            "'{}' resolves to an unexported function",
            shader.name
        );
    }
    for shader in catalog.time.iter().filter(|shader| !shader.has_builder()) {
        assert!(library.contains(&shader.function_name()));
    }
}

#[test]
fn frame_loop_rebuilds_identical_invocations_for_identical_inputs() {
    let catalog = ShaderCatalog::built_in();
    let size = [400.0, 400.0];
    for shader in &catalog.time {
        assert_eq!(shader.invocation(0.5, size), shader.invocation(0.5, size));
    }
    for shader in &catalog.touch {
        assert_eq!(
            shader.invocation(size, [128.0, 64.0], 0.05),
            shader.invocation(size, [128.0, 64.0], 0.05)
        );
    }
}
