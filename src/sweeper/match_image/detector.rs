//! Multi-scale template detection
//!
//! Scores are zero-mean normalized cross-correlation: the template and each
//! scene window have their means removed before correlating, so the surface
//! lies in [-1, 1] and is insensitive to uniform brightness shifts. Window
//! sums and squared sums come from `imageproc` integral images, so only the
//! cross term costs more than O(1) per placement.

use super::{
    bbox::{BoundingBox, Detection},
    config::MatchConfig,
    suppress::suppress_detections,
    template::TemplateSet,
};
use image::{GrayImage, ImageBuffer, Luma, RgbaImage, imageops::FilterType};
use imageproc::integral_image::{integral_image, integral_squared_image};

/// Correlation response surface, one score per template placement
pub type ScoreMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Find every placement of `template` in `scene` scoring at least
/// `score_threshold`, once per scale factor.
///
/// Candidates from all scales land in one flat list; overlapping hits are left
/// for the suppressor. Scales whose resized template would be empty or larger
/// than the scene contribute nothing.
pub fn detect(
    scene: &GrayImage,
    template: &GrayImage,
    scales: &[f32],
    score_threshold: f32,
) -> Vec<Detection> {
    let mut detections = Vec::new();

    for &scale in scales {
        let Some(scaled) = scale_template(template, scale) else {
            log::trace!("Skipping scale {scale:.2}: template collapses to nothing");
            continue;
        };

        if scaled.width() > scene.width() || scaled.height() > scene.height() {
            log::trace!(
                "Skipping scale {scale:.2}: template {}x{} larger than scene {}x{}",
                scaled.width(),
                scaled.height(),
                scene.width(),
                scene.height()
            );
            continue;
        }

        let surface = correlation_surface(scene, &scaled);
        for (x, y, pixel) in surface.enumerate_pixels() {
            let score = pixel[0];
            if score < score_threshold {
                continue;
            }
            if let Some(bbox) =
                BoundingBox::from_origin(x as i32, y as i32, scaled.width(), scaled.height())
            {
                detections.push(Detection::new(bbox, score, scale));
            }
        }
    }

    detections
}

/// Resize `template` by `scale`, truncating the new size like an integer cast.
fn scale_template(template: &GrayImage, scale: f32) -> Option<GrayImage> {
    if scale.is_nan() || scale <= 0.0 {
        return None;
    }
    let width = (template.width() as f32 * scale) as u32;
    let height = (template.height() as f32 * scale) as u32;
    if width == 0 || height == 0 {
        return None;
    }

    if (width, height) == template.dimensions() {
        Some(template.clone())
    } else {
        Some(image::imageops::resize(
            template,
            width,
            height,
            FilterType::Triangle,
        ))
    }
}

/// Zero-mean normalized cross-correlation of `template` over `scene`.
///
/// The output has one entry per placement, `(W - w + 1) x (H - h + 1)`.
/// Placements where either the template or the window is perfectly flat have
/// no defined correlation and score 0. A template that does not fit yields
/// an empty surface.
///
/// Every sum is accumulated in integers, so the covariance
/// `n * sum(T * I) - sum(T) * sum(I)` is exact even for low-contrast assets
/// sitting on a bright background.
pub fn correlation_surface(scene: &GrayImage, template: &GrayImage) -> ScoreMap {
    let (tw, th) = template.dimensions();
    let out_w = (scene.width() + 1).saturating_sub(tw);
    let out_h = (scene.height() + 1).saturating_sub(th);
    if tw == 0 || th == 0 || out_w == 0 || out_h == 0 {
        return ScoreMap::new(0, 0);
    }
    let mut surface = ScoreMap::new(out_w, out_h);

    let n = (tw as u64) * (th as u64);
    let (t_sum, t_sq_sum) = template.pixels().fold((0u64, 0u64), |(s, sq), p| {
        let v = p[0] as u64;
        (s + v, sq + v * v)
    });
    // n * sum((T - mean)^2)
    let t_spread = spread(n, t_sum, t_sq_sum);
    if t_spread == 0 {
        return surface;
    }

    let sums = integral_image::<_, u64>(scene);
    let squares = integral_squared_image::<_, u64>(scene);

    let scene_raw = scene.as_raw();
    let template_raw = template.as_raw();
    let stride = scene.width() as usize;
    let (tw, th) = (tw as usize, th as usize);

    for y in 0..out_h {
        for x in 0..out_w {
            let w_sum = window_sum(&sums, x, y, tw as u32, th as u32);
            let w_sq_sum = window_sum(&squares, x, y, tw as u32, th as u32);
            let w_spread = spread(n, w_sum, w_sq_sum);
            if w_spread == 0 {
                continue;
            }

            let mut cross = 0u64;
            for row in 0..th {
                let offset = (y as usize + row) * stride + x as usize;
                let scene_row = &scene_raw[offset..offset + tw];
                let template_row = &template_raw[row * tw..(row + 1) * tw];
                cross += scene_row
                    .iter()
                    .zip(template_row)
                    .map(|(&s, &t)| s as u64 * t as u64)
                    .sum::<u64>();
            }

            let covariance =
                (n as i128) * (cross as i128) - (t_sum as i128) * (w_sum as i128);
            let score = covariance as f64 / ((t_spread as f64) * (w_spread as f64)).sqrt();
            surface.put_pixel(x, y, Luma([score.clamp(-1.0, 1.0) as f32]));
        }
    }

    surface
}

/// `n * sum(v^2) - sum(v)^2`, which is `n^2` times the variance
fn spread(n: u64, sum: u64, sq_sum: u64) -> u128 {
    (n as u128) * (sq_sum as u128) - (sum as u128) * (sum as u128)
}

/// Sum over the `w x h` window at `(x, y)` from an integral image whose first
/// row and column are zero.
fn window_sum(integral: &ImageBuffer<Luma<u64>, Vec<u64>>, x: u32, y: u32, w: u32, h: u32) -> u64 {
    let at = |px: u32, py: u32| integral.get_pixel(px, py)[0];
    at(x + w, y + h) + at(x, y) - at(x, y + h) - at(x + w, y)
}

/// Drop scores, keeping only the boxes
pub fn boxes(detections: &[Detection]) -> Vec<BoundingBox> {
    detections.iter().map(|d| d.bbox).collect()
}

/// Suppressed detections for one target template
#[derive(Debug, Clone)]
pub struct TargetHits {
    pub template: String,
    pub detections: Vec<Detection>,
}

/// Everything one frame yielded: hazard boxes plus per-target hits, all in
/// frame-local coordinates and already suppressed.
#[derive(Debug, Clone, Default)]
pub struct FrameScan {
    pub hazards: Vec<BoundingBox>,
    pub targets: Vec<TargetHits>,
}

impl FrameScan {
    pub fn target_count(&self) -> usize {
        self.targets.iter().map(|t| t.detections.len()).sum()
    }
}

/// Run the hazard template and then every target template over one frame.
pub fn analyze_frame(frame: &RgbaImage, templates: &TemplateSet, config: &MatchConfig) -> FrameScan {
    let start_time = std::time::Instant::now();
    let scene = image::imageops::grayscale(frame);

    let find = |template: &GrayImage| {
        let candidates = detect(
            &scene,
            template,
            &config.scale_factors,
            config.score_threshold,
        );
        let candidate_count = candidates.len();
        let kept = suppress_detections(
            &candidates,
            config.overlap_threshold,
            config.suppression_order,
        );
        (candidate_count, kept)
    };

    let (hazard_candidates, hazard_hits) = find(&templates.hazard.image);
    let hazards = boxes(&hazard_hits);
    if hazard_candidates > 0 {
        log::debug!(
            "  🧨 '{}': {} candidates -> {} hazards",
            templates.hazard.name,
            hazard_candidates,
            hazards.len()
        );
    }

    let targets = templates
        .targets
        .iter()
        .map(|template| {
            let (candidate_count, detections) = find(&template.image);
            if candidate_count > 0 {
                log::debug!(
                    "  🎯 '{}': {} candidates -> {} detections",
                    template.name,
                    candidate_count,
                    detections.len()
                );
            }
            TargetHits {
                template: template.name.clone(),
                detections,
            }
        })
        .collect();

    log::trace!(
        "Frame {}x{} analyzed in {}ms",
        frame.width(),
        frame.height(),
        start_time.elapsed().as_millis()
    );

    FrameScan { hazards, targets }
}
