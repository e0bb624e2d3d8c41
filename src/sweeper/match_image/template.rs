//! Template loading and the shared, read-only template set

use crate::sweeper::error::{TemplateError, TemplateResult};
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grayscale reference pattern
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub image: GrayImage,
}

impl Template {
    /// Wrap an already decoded image, converting it to grayscale
    pub fn from_image(name: impl Into<String>, image: &DynamicImage) -> TemplateResult<Self> {
        Self::from_gray(name, image.to_luma8())
    }

    pub fn from_gray(name: impl Into<String>, image: GrayImage) -> TemplateResult<Self> {
        let name = name.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(TemplateError::Empty { name });
        }
        Ok(Self { name, image })
    }

    /// Decode a template from disk. The file stem becomes the template name.
    pub fn load(path: &Path) -> TemplateResult<Self> {
        let image = image::open(path).map_err(|source| TemplateError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_image(name, &image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Where the hazard and target assets live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePaths {
    pub hazard: PathBuf,
    pub targets: Vec<PathBuf>,
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            hazard: PathBuf::from("bomb.png"),
            targets: vec![PathBuf::from("coins.png"), PathBuf::from("ice.png")],
        }
    }
}

/// One hazard template plus the ordered targets to click.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub hazard: Template,
    pub targets: Vec<Template>,
}

impl TemplateSet {
    pub fn new(hazard: Template, targets: Vec<Template>) -> TemplateResult<Self> {
        if targets.is_empty() {
            return Err(TemplateError::NoTargets);
        }
        Ok(Self { hazard, targets })
    }

    /// Decode every configured asset, failing on the first that cannot be read.
    pub fn load(paths: &TemplatePaths) -> TemplateResult<Self> {
        let hazard = Template::load(&paths.hazard)?;
        log::info!(
            "🧨 Hazard template '{}' ({}x{})",
            hazard.name,
            hazard.width(),
            hazard.height()
        );

        let targets = paths
            .targets
            .iter()
            .map(|path| {
                let template = Template::load(path)?;
                log::info!(
                    "🎯 Target template '{}' ({}x{})",
                    template.name,
                    template.width(),
                    template.height()
                );
                Ok(template)
            })
            .collect::<TemplateResult<Vec<_>>>()?;

        Self::new(hazard, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| image::Luma([(x * 7 + y * 13) as u8]))
    }

    #[test]
    fn test_empty_template_rejected() {
        let err = Template::from_gray("empty", GrayImage::new(0, 4)).unwrap_err();
        assert!(matches!(err, TemplateError::Empty { .. }));
    }

    #[test]
    fn test_template_set_requires_targets() {
        let hazard = Template::from_gray("bomb", gray(4, 4)).unwrap();
        let err = TemplateSet::new(hazard, Vec::new()).unwrap_err();
        assert!(matches!(err, TemplateError::NoTargets));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let paths = TemplatePaths {
            hazard: PathBuf::from("definitely/not/here/bomb.png"),
            targets: vec![PathBuf::from("coins.png")],
        };
        let err = TemplateSet::load(&paths).unwrap_err();
        match err {
            TemplateError::Decode { path, .. } => {
                assert_eq!(path, PathBuf::from("definitely/not/here/bomb.png"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_round_trip_from_disk() {
        let dir = std::env::temp_dir().join(format!("sweeper-templates-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let hazard_path = dir.join("bomb.png");
        let coin_path = dir.join("coins.png");
        gray(6, 5).save(&hazard_path).unwrap();
        gray(3, 4).save(&coin_path).unwrap();

        let set = TemplateSet::load(&TemplatePaths {
            hazard: hazard_path,
            targets: vec![coin_path],
        })
        .unwrap();

        assert_eq!(set.hazard.name, "bomb");
        assert_eq!((set.hazard.width(), set.hazard.height()), (6, 5));
        assert_eq!(set.targets[0].name, "coins");
        assert_eq!(set.targets.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
