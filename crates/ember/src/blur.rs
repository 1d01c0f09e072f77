//! Generates the opacity masks consumed by the separable variable blur
//! shader, and builds the two blur pass invocations around them. The blur
//! itself runs on the GPU; this module only produces the mask texture data
//! (a per-pixel opacity in [0, 1]) and the positional argument lists.
//!
//! The blur is split into a horizontal and a vertical pass to bound the
//! per-pixel sample cost. Pass order is caller-chosen because hard mask
//! edges can smear along the axis of the first pass.
use crate::invocation::{MaskRef, ShaderInvocation};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MaskError {
    #[error("mask dimensions must be non-zero")]
    EmptyMask,
    #[error("shape inset {0} is outside 0.0..=0.5")]
    InsetOutOfRange(f32),
    #[error("feather radius {0} must be finite and non-negative")]
    InvalidFeather(f32),
}

/// Parametric shapes the shape mask can draw.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskShape {
    Ellipse,
    RoundedRect { corner_radius: f32 },
}

/// A grayscale opacity mask, row-major, one f32 in [0, 1] per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl MaskImage {
    fn filled(width: u32, height: u32) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::EmptyMask);
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn opacity_at(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Quantizes the mask to 8-bit grayscale, suitable for PNG export or
    /// upload as a single-channel texture.
    pub fn to_luma_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|opacity| (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

/// Opacity of the vertical gradient mask at proportional offset `t` in
/// [0, 1]: fully opaque at `start`, fully transparent at `end`, linear in
/// between. A reversed pair (start > end) produces the inverted ramp, and a
/// coincident pair degenerates to a hard step at that offset.
pub fn gradient_opacity(start: f32, end: f32, t: f32) -> f32 {
    if (end - start).abs() <= f32::EPSILON {
        return if t < start { 1.0 } else { 0.0 };
    }
    ((end - t) / (end - start)).clamp(0.0, 1.0)
}

/// Renders the progressive blur mask: a vertical linear gradient from
/// opaque at `height * start` to transparent at `height * end`. Pixels are
/// sampled at their centers.
pub fn gradient_mask(width: u32, height: u32, start: f32, end: f32) -> Result<MaskImage, MaskError> {
    let mut mask = MaskImage::filled(width, height)?;
    for y in 0..height {
        let t = (y as f32 + 0.5) / height as f32;
        let opacity = gradient_opacity(start, end, t);
        let row = y as usize * width as usize;
        mask.data[row..row + width as usize].fill(opacity);
    }
    Ok(mask)
}

/// Renders a shape mask: `shape` inset proportionally from the bounds by
/// `inset` (0 = the full view, 0.5 = collapsed to the center), filled at
/// full opacity and edge-feathered by a separable box blur of `feather`
/// pixels. `invert` blurs outside the shape instead of inside it.
pub fn shape_mask(
    width: u32,
    height: u32,
    shape: &MaskShape,
    inset: f32,
    feather: f32,
    invert: bool,
) -> Result<MaskImage, MaskError> {
    if !(0.0..=0.5).contains(&inset) {
        return Err(MaskError::InsetOutOfRange(inset));
    }
    if !feather.is_finite() || feather < 0.0 {
        return Err(MaskError::InvalidFeather(feather));
    }
    let mut mask = MaskImage::filled(width, height)?;

    let inset_x = width as f32 * inset;
    let inset_y = height as f32 * inset;
    let rect = [
        inset_x,
        inset_y,
        width as f32 - inset_x * 2.0,
        height as f32 - inset_y * 2.0,
    ];

    for y in 0..height {
        for x in 0..width {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let inside = shape_contains(shape, rect, px, py);
            let opacity = if inside != invert { 1.0 } else { 0.0 };
            mask.data[y as usize * width as usize + x as usize] = opacity;
        }
    }

    let radius = feather.round() as usize;
    if radius > 0 {
        box_blur_horizontal(&mut mask, radius);
        box_blur_vertical(&mut mask, radius);
    }
    Ok(mask)
}

fn shape_contains(shape: &MaskShape, rect: [f32; 4], px: f32, py: f32) -> bool {
    let [rx, ry, rw, rh] = rect;
    if rw <= 0.0 || rh <= 0.0 {
        return false;
    }
    match shape {
        MaskShape::Ellipse => {
            let cx = rx + rw / 2.0;
            let cy = ry + rh / 2.0;
            let nx = (px - cx) / (rw / 2.0);
            let ny = (py - cy) / (rh / 2.0);
            nx * nx + ny * ny <= 1.0
        }
        MaskShape::RoundedRect { corner_radius } => {
            let radius = corner_radius.clamp(0.0, rw.min(rh) / 2.0);
            let cx = rx + rw / 2.0;
            let cy = ry + rh / 2.0;
            // Signed-distance containment: offset past the shrunk half
            // extents must stay within the corner radius.
            let qx = ((px - cx).abs() - (rw / 2.0 - radius)).max(0.0);
            let qy = ((py - cy).abs() - (rh / 2.0 - radius)).max(0.0);
            if px < rx || px > rx + rw || py < ry || py > ry + rh {
                return false;
            }
            qx * qx + qy * qy <= radius * radius
        }
    }
}

fn box_blur_horizontal(mask: &mut MaskImage, radius: usize) {
    let width = mask.width as usize;
    let height = mask.height as usize;
    let mut blurred = vec![0.0; mask.data.len()];
    for y in 0..height {
        let row = &mask.data[y * width..(y + 1) * width];
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(width - 1);
            let sum: f32 = row[lo..=hi].iter().sum();
            blurred[y * width + x] = sum / (hi - lo + 1) as f32;
        }
    }
    mask.data = blurred;
}

fn box_blur_vertical(mask: &mut MaskImage, radius: usize) {
    let width = mask.width as usize;
    let height = mask.height as usize;
    let mut blurred = vec![0.0; mask.data.len()];
    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            let mut sum = 0.0;
            for row in lo..=hi {
                sum += mask.data[row * width + x];
            }
            blurred[y * width + x] = sum / (hi - lo + 1) as f32;
        }
    }
    mask.data = blurred;
}

/// Builds the two separable blur passes around a registered mask. Each pass
/// supplies (size, radius, max sample count, mask, direction flag); the
/// direction flag is 1 for the vertical pass, and `vertical_first` decides
/// which direction runs first.
pub fn variable_blur_passes(
    size: [f32; 2],
    radius: f32,
    max_samples: u32,
    vertical_first: bool,
    mask: MaskRef,
) -> [ShaderInvocation; 2] {
    let pass = |vertical: bool| {
        ShaderInvocation::new("variableBlur")
            .float2(size)
            .float(radius)
            .float(max_samples as f32)
            .mask(mask)
            .float(if vertical { 1.0 } else { 0.0 })
    };
    [pass(vertical_first), pass(!vertical_first)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_contract_endpoints() {
        assert_eq!(gradient_opacity(0.0, 1.0, 0.0), 1.0);
        assert_eq!(gradient_opacity(0.0, 1.0, 1.0), 0.0);
        assert!((gradient_opacity(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gradient_mask_fades_top_to_bottom() {
        let mask = gradient_mask(400, 400, 0.0, 1.0).unwrap();
        assert!(mask.opacity_at(0, 0) > 0.99);
        assert!(mask.opacity_at(399, 399) < 0.01);
        assert!(mask.opacity_at(0, 100) > mask.opacity_at(0, 300));
    }

    #[test]
    fn reversed_gradient_inverts_the_ramp() {
        assert_eq!(gradient_opacity(1.0, 0.0, 0.0), 0.0);
        assert_eq!(gradient_opacity(1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn coincident_offsets_degenerate_to_a_step() {
        assert_eq!(gradient_opacity(0.5, 0.5, 0.25), 1.0);
        assert_eq!(gradient_opacity(0.5, 0.5, 0.75), 0.0);
    }

    #[test]
    fn rejects_empty_masks() {
        assert_eq!(gradient_mask(0, 400, 0.0, 1.0), Err(MaskError::EmptyMask));
        assert_eq!(
            shape_mask(400, 0, &MaskShape::Ellipse, 0.25, 0.0, false),
            Err(MaskError::EmptyMask)
        );
    }

    #[test]
    fn ellipse_mask_covers_center_not_corners() {
        let mask = shape_mask(100, 100, &MaskShape::Ellipse, 0.1, 0.0, false).unwrap();
        assert_eq!(mask.opacity_at(50, 50), 1.0);
        assert_eq!(mask.opacity_at(0, 0), 0.0);
    }

    #[test]
    fn inverted_mask_flips_coverage() {
        let mask = shape_mask(100, 100, &MaskShape::Ellipse, 0.1, 0.0, true).unwrap();
        assert_eq!(mask.opacity_at(50, 50), 0.0);
        assert_eq!(mask.opacity_at(0, 0), 1.0);
    }

    #[test]
    fn feather_softens_the_edge() {
        let hard = shape_mask(100, 100, &MaskShape::Ellipse, 0.25, 0.0, false).unwrap();
        let soft = shape_mask(100, 100, &MaskShape::Ellipse, 0.25, 6.0, false).unwrap();
        // Just outside the hard edge the feathered mask is partially opaque.
        let x = 50;
        let edge = (0..100)
            .rev()
            .find(|y| hard.opacity_at(x, *y) > 0.0)
            .unwrap();
        let outside = soft.opacity_at(x, edge + 3);
        assert!(outside > 0.0 && outside < 1.0);
    }

    #[test]
    fn rounded_rect_excludes_sharp_corners() {
        let shape = MaskShape::RoundedRect {
            corner_radius: 25.0,
        };
        let mask = shape_mask(200, 200, &shape, 0.0, 0.0, false).unwrap();
        assert_eq!(mask.opacity_at(100, 100), 1.0);
        assert_eq!(mask.opacity_at(1, 1), 0.0);
        assert_eq!(mask.opacity_at(100, 1), 1.0);
    }

    #[test]
    fn rejects_bad_shape_parameters() {
        assert_eq!(
            shape_mask(10, 10, &MaskShape::Ellipse, 0.6, 0.0, false),
            Err(MaskError::InsetOutOfRange(0.6))
        );
        assert!(matches!(
            shape_mask(10, 10, &MaskShape::Ellipse, 0.25, f32::NAN, false),
            Err(MaskError::InvalidFeather(_))
        ));
    }

    #[test]
    fn blur_passes_alternate_direction() {
        let mask = MaskRef::next();
        let [first, second] = variable_blur_passes([400.0, 300.0], 10.0, 15, false, mask);
        assert_eq!(first.args[4], crate::invocation::ShaderArg::Float(0.0));
        assert_eq!(second.args[4], crate::invocation::ShaderArg::Float(1.0));

        let [first, _] = variable_blur_passes([400.0, 300.0], 10.0, 15, true, mask);
        assert_eq!(first.args[4], crate::invocation::ShaderArg::Float(1.0));
    }
}
