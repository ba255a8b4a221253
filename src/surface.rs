use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

/// How newly stroked pixels combine with what is already on the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// New pixels are painted over existing content
    #[default]
    SourceOver,
    /// New pixels remove existing content, revealing the backdrop
    DestinationOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Drawing-context state applied to every stroked segment.
///
/// A freshly (re)sized surface starts from `ContextSettings::default()`, so the
/// owner has to reapply its settings after each resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSettings {
    pub stroke_color: Color32,
    pub composite: CompositeMode,
    pub line_width: f32,
    pub line_join: LineJoin,
    pub line_cap: LineCap,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            composite: CompositeMode::SourceOver,
            line_width: 1.0,
            line_join: LineJoin::Miter,
            line_cap: LineCap::Butt,
        }
    }
}

/// Immediate-mode raster surface with a minimal 2D path API.
///
/// Segments added with `line_to` are only rasterized by `stroke`, and each
/// segment is rasterized once, with the settings in effect at that call.
pub struct Surface {
    raster: RgbaImage,
    settings: ContextSettings,
    current_point: Option<Pos2>,
    pending: Vec<(Pos2, Pos2)>,
    version: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("settings", &self.settings)
            .field("pending", &self.pending.len())
            .field("version", &self.version)
            .finish()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: RgbaImage::new(width, height),
            settings: ContextSettings::default(),
            current_point: None,
            pending: Vec::new(),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Bumped whenever the raster content changes
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reallocates the raster to match a container's layout box.
    ///
    /// Fractional sizes are truncated, negative or non-finite ones become zero.
    /// The raster is always cleared and the context settings reset, even when
    /// the size does not change.
    pub fn resize(&mut self, container: Vec2) {
        let width = layout_to_pixels(container.x);
        let height = layout_to_pixels(container.y);
        self.raster = RgbaImage::new(width, height);
        self.settings = ContextSettings::default();
        self.current_point = None;
        self.pending.clear();
        self.version += 1;
        log::info!("Surface resized to {}x{}", width, height);
    }

    /// Wipes the whole raster to transparent, leaving the settings alone
    pub fn clear(&mut self) {
        self.raster.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        self.version += 1;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.raster.get_pixel(x, y))
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.settings.stroke_color = color;
    }

    pub fn set_composite(&mut self, composite: CompositeMode) {
        self.settings.composite = composite;
    }

    /// Ignores non-positive or non-finite widths, like a canvas context does
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.settings.line_width = width;
        }
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.settings.line_join = join;
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.settings.line_cap = cap;
    }

    /// Starts a new path, dropping any segments that were never stroked
    pub fn begin_path(&mut self) {
        self.current_point = None;
        self.pending.clear();
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.current_point = Some(point);
    }

    /// Adds a segment from the current point; without one it acts as `move_to`
    pub fn line_to(&mut self, point: Pos2) {
        if let Some(from) = self.current_point {
            self.pending.push((from, point));
        }
        self.current_point = Some(point);
    }

    /// Rasterizes the segments added since the last `stroke`
    pub fn stroke(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let segments = std::mem::take(&mut self.pending);
        for (from, to) in segments {
            self.rasterize_segment(from, to);
        }
        self.version += 1;
    }

    fn rasterize_segment(&mut self, from: Pos2, to: Pos2) {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return;
        }

        let radius = self.settings.line_width / 2.0;
        let (a, b) = match self.settings.line_cap {
            LineCap::Square => extend_segment(from, to, radius),
            LineCap::Butt | LineCap::Round => (from, to),
        };
        let round = self.settings.line_cap == LineCap::Round;

        // One pixel of slack for the anti-aliased edge
        let reach = radius + 1.0;
        let min_x = (a.x.min(b.x) - reach).floor().max(0.0) as u32;
        let min_y = (a.y.min(b.y) - reach).floor().max(0.0) as u32;
        let max_x = ((a.x.max(b.x) + reach).ceil().max(0.0) as u32).min(width);
        let max_y = ((a.y.max(b.y) + reach).ceil().max(0.0) as u32).min(height);

        let source = self.settings.stroke_color.to_srgba_unmultiplied();
        let composite = self.settings.composite;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(distance) = segment_distance(center, a, b, round) else {
                    continue;
                };
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = self.raster.get_pixel_mut(x, y);
                *pixel = composite_pixel(*pixel, source, coverage, composite);
            }
        }
    }
}

fn layout_to_pixels(length: f32) -> u32 {
    if length.is_finite() && length > 0.0 {
        length as u32
    } else {
        0
    }
}

fn extend_segment(from: Pos2, to: Pos2, by: f32) -> (Pos2, Pos2) {
    let direction = (to - from).normalized();
    if !direction.x.is_finite() || direction == Vec2::ZERO {
        return (from, to);
    }
    (from - direction * by, to + direction * by)
}

/// Distance from `p` to the segment `a..b`.
///
/// With `round` the distance to the end points counts (round caps); otherwise
/// points projecting outside the segment are not covered at all.
fn segment_distance(p: Pos2, a: Pos2, b: Pos2, round: bool) -> Option<f32> {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return round.then(|| p.distance(a));
    }
    let t = (p - a).dot(ab) / length_sq;
    if !round && !(0.0..=1.0).contains(&t) {
        return None;
    }
    let closest = a + ab * t.clamp(0.0, 1.0);
    Some(p.distance(closest))
}

fn composite_pixel(
    dest: Rgba<u8>,
    source: [u8; 4],
    coverage: f32,
    mode: CompositeMode,
) -> Rgba<u8> {
    let src_alpha = source[3] as f32 / 255.0 * coverage;
    let dest_alpha = dest[3] as f32 / 255.0;

    match mode {
        CompositeMode::SourceOver => {
            let out_alpha = src_alpha + dest_alpha * (1.0 - src_alpha);
            if out_alpha <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let mut out = [0u8; 4];
            for channel in 0..3 {
                let src = source[channel] as f32;
                let dst = dest[channel] as f32;
                let value = (src * src_alpha + dst * dest_alpha * (1.0 - src_alpha)) / out_alpha;
                out[channel] = value.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_alpha * 255.0).round() as u8;
            Rgba(out)
        }
        CompositeMode::DestinationOut => {
            let out_alpha = ((dest_alpha * (1.0 - src_alpha)) * 255.0).round() as u8;
            if out_alpha == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([dest[0], dest[1], dest[2], out_alpha])
            }
        }
    }
}
