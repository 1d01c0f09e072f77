use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ember::{
    gradient_mask, shape_mask, variable_blur_passes, CatalogEntry, MaskImage, MaskKind, MaskRef,
    MaskShape, ShaderCatalog, ShaderInvocation, ShaderLibrary, TransitionPhase,
    IDENTITY_SCALE_FACTOR,
};

use crate::cli::{
    ListArgs, MaskArgs, MaskKindArg, PrefsAction, PrefsCommand, PreviewArgs, ShowArgs,
    TransitionArgs,
};
use crate::prefs::{self, SandboxPrefs};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the catalog and library and refuses to continue if any entry fails
/// validation; a misnamed effect is a build mistake, not something to limp
/// past at preview time.
fn load_validated() -> Result<(ShaderCatalog, ShaderLibrary)> {
    let catalog = ShaderCatalog::built_in();
    let library = ShaderLibrary::built_in();
    let issues = catalog.validate(&library);
    if !issues.is_empty() {
        bail!("shader catalog failed validation: {issues:?}");
    }
    Ok((catalog, library))
}

fn load_prefs() -> SandboxPrefs {
    match prefs::default_path().and_then(|path| SandboxPrefs::load_or_default(&path)) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(error = %err, "failed to load preferences, using defaults");
            SandboxPrefs::default()
        }
    }
}

#[derive(Serialize)]
struct ListRecord<'a> {
    category: &'static str,
    name: &'a str,
    function: String,
    custom_builder: bool,
}

fn entry_record<'a>(entry: &CatalogEntry<'a>) -> ListRecord<'a> {
    let (function, custom_builder) = match entry {
        CatalogEntry::Simple(shader) => (shader.function_name(), shader.has_builder()),
        CatalogEntry::Time(shader) => (shader.function_name(), shader.has_builder()),
        CatalogEntry::Touch(shader) => (shader.function_name(), shader.has_builder()),
        CatalogEntry::Generative(shader) => (shader.function_name(), shader.has_builder()),
        CatalogEntry::Transition(transition) => match &transition.insertion {
            TransitionPhase::Shader { function, .. } => (function.clone(), false),
            TransitionPhase::IdentityScale => ("scale".to_string(), false),
        },
        CatalogEntry::Blur(_) => ("variableBlur".to_string(), false),
    };
    ListRecord {
        category: entry.category(),
        name: entry.display_name(),
        function,
        custom_builder,
    }
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let (catalog, _library) = load_validated()?;
    if args.json {
        let records: Vec<ListRecord<'_>> = catalog
            .entries()
            .map(|entry| entry_record(&entry))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{} effects available:", catalog.len());
    for entry in catalog.entries() {
        let record = entry_record(&entry);
        let marker = if record.custom_builder { "custom" } else { "" };
        println!(
            "  {:<11} {:<26} {:<24} {marker}",
            record.category, record.name, record.function
        );
    }
    Ok(())
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let (catalog, _library) = load_validated()?;
    let entry = find_entry(&catalog, &args.name)?;
    println!("{} ({})", entry.display_name(), entry.category());
    match entry {
        CatalogEntry::Simple(shader) => {
            println!("  function:          {}", shader.function_name());
            println!("  effect kind:       {}", shader.kind);
            println!("  replacement color: {}", shader.uses_replacement_color);
            match &shader.value_range {
                Some(range) => println!("  value range:       {}..={}", range.start(), range.end()),
                None => println!("  value range:       none"),
            }
            println!("  custom builder:    {}", shader.has_builder());
        }
        CatalogEntry::Time(shader) => {
            println!("  function:          {}", shader.function_name());
            println!("  effect kind:       {}", shader.kind);
            println!("  custom builder:    {}", shader.has_builder());
        }
        CatalogEntry::Touch(shader) => {
            println!("  function:          {}", shader.function_name());
            println!("  size aware:        {}", shader.uses_size);
            match &shader.value_range {
                Some(range) => println!("  value range:       {}..={}", range.start(), range.end()),
                None => println!("  value range:       none"),
            }
            println!("  custom builder:    {}", shader.has_builder());
        }
        CatalogEntry::Generative(shader) => {
            println!("  function:          {}", shader.function_name());
            println!("  custom builder:    {}", shader.has_builder());
        }
        CatalogEntry::Transition(transition) => {
            describe_phase("insertion", &transition.insertion);
            describe_phase("removal", &transition.removal);
        }
        CatalogEntry::Blur(effect) => {
            let mask = match &effect.mask {
                MaskKind::Gradient => "vertical gradient".to_string(),
                MaskKind::Shape(MaskShape::Ellipse) => "ellipse".to_string(),
                MaskKind::Shape(MaskShape::RoundedRect { corner_radius }) => {
                    format!("rounded rectangle (radius {corner_radius})")
                }
            };
            println!("  function:          variableBlur (two passes)");
            println!("  mask:              {mask}");
        }
    }
    Ok(())
}

fn describe_phase(direction: &str, phase: &TransitionPhase) {
    match phase {
        TransitionPhase::Shader {
            function,
            active_progress,
            identity_progress,
            sized,
            extras,
        } => {
            println!(
                "  {direction:<9} {function} progress {active_progress}->{identity_progress}, sized: {sized}, extra args: {}",
                extras.len()
            );
        }
        TransitionPhase::IdentityScale => {
            println!("  {direction:<9} identity scale ({IDENTITY_SCALE_FACTOR})");
        }
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u32,
    time: f32,
    invocation: &'a ShaderInvocation,
}

fn emit_frame(frame: u32, time: f32, invocation: &ShaderInvocation, json: bool) -> Result<()> {
    if json {
        let record = FrameRecord {
            frame,
            time,
            invocation,
        };
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("[{frame:>3}] t={time:7.3}s  {invocation}");
    }
    Ok(())
}

pub fn run_preview(args: PreviewArgs) -> Result<()> {
    let (catalog, library) = load_validated()?;
    let prefs = load_prefs();
    let entry = find_entry(&catalog, &args.name)?;

    let (width, height) = args
        .size
        .or(prefs.size.map(|[w, h]| (w, h)))
        .unwrap_or((400, 400));
    let size = [width as f32, height as f32];
    let fps = args.fps.or(prefs.fps).unwrap_or(60.0);
    if fps <= 0.0 {
        bail!("fps must be positive");
    }
    let frames = args.frames.max(1);
    let dt = 1.0 / fps;
    info!(
        effect = entry.display_name(),
        frames, fps, "previewing effect"
    );

    match entry {
        CatalogEntry::Simple(shader) => {
            let value = args.value.unwrap_or_else(|| midpoint(&shader.value_range));
            let invocation = shader.invocation(size, args.color, value);
            library.check(&invocation)?;
            emit_frame(0, 0.0, &invocation, args.json)?;
        }
        CatalogEntry::Time(shader) => {
            for frame in 0..frames {
                let time = frame as f32 * dt;
                let invocation = shader.invocation(time, size);
                library.check(&invocation)?;
                emit_frame(frame, time, &invocation, args.json)?;
            }
        }
        CatalogEntry::Generative(shader) => {
            for frame in 0..frames {
                let time = frame as f32 * dt;
                let invocation = shader.invocation(time, size);
                library.check(&invocation)?;
                emit_frame(frame, time, &invocation, args.json)?;
            }
        }
        CatalogEntry::Touch(shader) => {
            let value = args.value.unwrap_or_else(|| midpoint(&shader.value_range));
            for frame in 0..frames {
                let time = frame as f32 * dt;
                // Without an explicit pointer, sweep a drag across the view.
                let touch = args.touch.unwrap_or_else(|| {
                    let progress = if frames > 1 {
                        frame as f32 / (frames - 1) as f32
                    } else {
                        0.5
                    };
                    [size[0] * progress, size[1] / 2.0]
                });
                let invocation = shader.invocation(size, touch, value);
                library.check(&invocation)?;
                emit_frame(frame, time, &invocation, args.json)?;
            }
        }
        CatalogEntry::Transition(_) => {
            bail!(
                "'{}' is a transition; use `embersand transition` to preview it",
                args.name
            );
        }
        CatalogEntry::Blur(_) => {
            bail!(
                "'{}' is a blur effect; use `embersand mask` to preview it",
                args.name
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TransitionStep {
    step: u32,
    presence: f32,
    insertion: Option<ShaderInvocation>,
    removal: Option<ShaderInvocation>,
}

pub fn run_transition(args: TransitionArgs) -> Result<()> {
    let (catalog, library) = load_validated()?;
    let entry = find_entry(&catalog, &args.name)?;
    let CatalogEntry::Transition(transition) = entry else {
        bail!("'{}' is not a transition; see `embersand list`", args.name);
    };

    let (width, height) = args.size.unwrap_or((400, 400));
    let size = [width as f32, height as f32];
    let steps = args.steps.max(1);

    for step in 0..=steps {
        let presence = step as f32 / steps as f32;
        // The incoming view fades in while the outgoing one fades out.
        let insertion = transition.insertion.invocation_at(presence, size);
        let removal = transition.removal.invocation_at(1.0 - presence, size);
        for invocation in insertion.iter().chain(removal.iter()) {
            library.check(invocation)?;
        }

        if args.json {
            let record = TransitionStep {
                step,
                presence,
                insertion,
                removal,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            let describe = |invocation: &Option<ShaderInvocation>| match invocation {
                Some(invocation) => invocation.to_string(),
                None => format!("scale({IDENTITY_SCALE_FACTOR})"),
            };
            println!(
                "step {step:>2} presence={presence:.2}  in: {:<48} out: {}",
                describe(&insertion),
                describe(&removal)
            );
        }
    }
    Ok(())
}

pub fn run_mask(args: MaskArgs) -> Result<()> {
    let (_catalog, library) = load_validated()?;
    let (width, height) = args.size;

    let mask = match args.kind {
        MaskKindArg::Gradient => gradient_mask(width, height, args.start, args.end)?,
        MaskKindArg::Vignette => shape_mask(
            width,
            height,
            &MaskShape::Ellipse,
            args.inset,
            args.feather,
            args.invert,
        )?,
        MaskKindArg::Rounded => shape_mask(
            width,
            height,
            &MaskShape::RoundedRect {
                corner_radius: args.corner_radius,
            },
            args.inset,
            args.feather,
            args.invert,
        )?,
    };

    write_mask_png(&mask, &args.out)?;
    println!(
        "wrote {}x{} mask to {}",
        mask.width(),
        mask.height(),
        args.out.display()
    );

    let mask_ref = MaskRef::next();
    let passes = variable_blur_passes(
        [width as f32, height as f32],
        args.radius,
        args.max_samples,
        args.vertical_first,
        mask_ref,
    );
    for (index, invocation) in passes.iter().enumerate() {
        library.check(invocation)?;
        println!("pass {}: {invocation}", index + 1);
    }
    Ok(())
}

fn write_mask_png(mask: &MaskImage, path: &std::path::Path) -> Result<()> {
    let image = image::GrayImage::from_raw(mask.width(), mask.height(), mask.to_luma_bytes())
        .ok_or_else(|| anyhow!("mask buffer does not match its dimensions"))?;
    image
        .save(path)
        .with_context(|| format!("failed to write mask to {}", path.display()))?;
    Ok(())
}

pub fn run_prefs(command: PrefsCommand) -> Result<()> {
    let path = match command.file {
        Some(path) => path,
        None => prefs::default_path()?,
    };
    match command.action {
        PrefsAction::Show => {
            let prefs = SandboxPrefs::load_or_default(&path)?;
            println!("preferences file: {}", path.display());
            println!("  preview: {:?}", prefs.preview);
            match prefs.fps {
                Some(fps) => println!("  fps:     {fps}"),
                None => println!("  fps:     (default)"),
            }
            match prefs.size {
                Some([width, height]) => println!("  size:    {width}x{height}"),
                None => println!("  size:    (default)"),
            }
        }
        PrefsAction::Set(set) => {
            let mut prefs = SandboxPrefs::load_or_default(&path)?;
            if let Some(preview) = set.preview {
                prefs.preview = preview;
            }
            if let Some(fps) = set.fps {
                prefs.fps = Some(fps);
            }
            if let Some((width, height)) = set.size {
                prefs.size = Some([width, height]);
            }
            prefs.persist(&path)?;
            println!("updated {}", path.display());
        }
    }
    Ok(())
}

fn midpoint(range: &Option<std::ops::RangeInclusive<f32>>) -> f32 {
    range
        .as_ref()
        .map(|range| (range.start() + range.end()) / 2.0)
        .unwrap_or(0.0)
}

fn find_entry<'a>(catalog: &'a ShaderCatalog, name: &str) -> Result<CatalogEntry<'a>> {
    catalog.find(name).ok_or_else(|| {
        anyhow!("no effect named '{name}' in the catalog; `embersand list` shows what's available")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_load_succeeds_for_built_ins() {
        assert!(load_validated().is_ok());
    }

    #[test]
    fn midpoint_handles_missing_ranges() {
        assert_eq!(midpoint(&None), 0.0);
        assert_eq!(midpoint(&Some(1.0..=5.0)), 3.0);
    }
}
