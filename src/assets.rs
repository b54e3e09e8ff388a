//! Logo asset generation.
//!
//! One master PNG is exported as an ICO and an ICNS, copied into the macOS
//! bundle and the Linux AppDir, and resized into the hicolor icon theme of
//! both the AppDir and the desktop resources tree.

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use icns::{IconFamily, IconType, PixelFormat};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};

use crate::constants::{ICON_SIZES, ICO_SIZE, MACOS_BUNDLE_ICON};
use crate::error::{Error, Result};

/// ICNS entries as (type, pixel edge).
const ICNS_ICONS: [(IconType, u32); 2] = [
    (IconType::RGBA32_256x256, 256),
    (IconType::RGBA32_256x256_2x, 512),
];

/// Platform whose bundle receives icon copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
}

impl Platform {
    /// Glob relative to the resources directory.
    pub fn bundle_glob(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos/*.app",
            Platform::Linux => "linux/*.AppDir",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

/// Pipeline steps, used to report how far a run progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStep {
    LoadMaster,
    ExportIco,
    ExportIcns,
    CopyBundleIcon,
    CopyAppDirIcon,
    ResizeIcons,
}

impl fmt::Display for AssetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetStep::LoadMaster => "load master image",
            AssetStep::ExportIco => "export ico",
            AssetStep::ExportIcns => "export icns",
            AssetStep::CopyBundleIcon => "copy macOS bundle icon",
            AssetStep::CopyAppDirIcon => "copy AppDir icon",
            AssetStep::ResizeIcons => "resize themed icons",
        };
        write!(f, "{name}")
    }
}

/// Result of globbing for a bundle directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleMatch {
    NotFound,
    Unique(PathBuf),
    Ambiguous(Vec<PathBuf>),
}

/// Finds the bundle directories matching `pattern`.
///
/// Only directories count; a file that happens to match is ignored.
pub fn discover_bundle(pattern: &str) -> Result<BundleMatch> {
    let mut matches = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(path, e.into_error())
        })?;
        if path.is_dir() {
            matches.push(path);
        }
    }

    Ok(match matches.len() {
        0 => BundleMatch::NotFound,
        1 => BundleMatch::Unique(matches.remove(0)),
        _ => BundleMatch::Ambiguous(matches),
    })
}

/// Root-relative locations used by the pipeline.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    pub logo: PathBuf,
    pub resources_dir: PathBuf,
}

impl AssetLayout {
    pub fn ico_path(&self) -> PathBuf {
        self.logo.with_extension("ico")
    }

    pub fn icns_path(&self) -> PathBuf {
        self.logo.with_extension("icns")
    }

    /// hicolor theme root inside the desktop resources tree.
    pub fn desktop_icon_theme(&self) -> PathBuf {
        self.resources_dir.join("linux").join("desktop").join("icons").join("hicolor")
    }
}

/// Files written by a pipeline run, in write order.
#[derive(Debug, Default)]
pub struct AssetReport {
    pub written: Vec<PathBuf>,
}

/// Conventional `{size}x{size}/apps/{binary}.png` path below a theme root.
pub fn themed_icon_path(theme_root: &Path, size: u32, binary_name: &str) -> PathBuf {
    theme_root
        .join(format!("{size}x{size}"))
        .join("apps")
        .join(format!("{binary_name}.png"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    fs::copy(source, dest).map(|_| ()).map_err(|e| Error::io(dest, e))
}

fn save_image(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, format)
        .map_err(|source| Error::ImageError { path: path.to_path_buf(), source })
}

fn square(image: &DynamicImage, size: u32) -> DynamicImage {
    image.resize_exact(size, size, FilterType::CatmullRom)
}

fn write_icns(master: &DynamicImage, path: &Path) -> Result<()> {
    let mut family = IconFamily::new();
    for (icon_type, size) in ICNS_ICONS {
        let rgba = square(master, size).to_rgba8();
        let icon = icns::Image::from_data(PixelFormat::RGBA, size, size, rgba.into_raw())
            .map_err(|e| Error::io(path, e))?;
        family
            .add_icon_with_type(&icon, icon_type)
            .map_err(|e| Error::io(path, e))?;
    }
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    family.write(BufWriter::new(file)).map_err(|e| Error::io(path, e))
}

fn run_step<T>(step: AssetStep, f: impl FnOnce() -> Result<T>) -> Result<T> {
    info!("Asset step: {}", step);
    f().map_err(|e| Error::AssetStepError { step, source: Box::new(e) })
}

/// Regenerates all platform icons from the master logo.
pub struct AssetPipeline<'a> {
    root: &'a Path,
    layout: &'a AssetLayout,
}

impl<'a> AssetPipeline<'a> {
    pub fn new(root: &'a Path, layout: &'a AssetLayout) -> Self {
        Self { root, layout }
    }

    /// Discovers the single bundle for `platform` below the resources dir.
    ///
    /// # Errors
    /// * `Error::AmbiguousBundleMatch` unless exactly one directory matches
    pub fn bundle(&self, platform: Platform) -> Result<PathBuf> {
        let resources = self.root.join(&self.layout.resources_dir);
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&resources.to_string_lossy()),
            platform.bundle_glob()
        );
        debug!("Discovering {} bundle with '{}'", platform, pattern);
        match discover_bundle(&pattern)? {
            BundleMatch::Unique(path) => Ok(path),
            BundleMatch::NotFound => Err(Error::AmbiguousBundleMatch {
                platform,
                pattern,
                matches: Vec::new(),
            }),
            BundleMatch::Ambiguous(matches) => Err(Error::AmbiguousBundleMatch {
                platform,
                pattern,
                matches,
            }),
        }
    }

    /// Runs every step. Both bundles are discovered before the first write,
    /// so a discovery failure leaves the tree untouched.
    pub fn run(&self, binary_name: &str) -> Result<AssetReport> {
        let logo = self.root.join(&self.layout.logo);
        let master = run_step(AssetStep::LoadMaster, || {
            image::open(&logo)
                .map(|image| DynamicImage::ImageRgba8(image.to_rgba8()))
                .map_err(|source| Error::ImageError { path: logo.clone(), source })
        })?;

        let app_bundle = self.bundle(Platform::MacOs)?;
        let app_dir = self.bundle(Platform::Linux)?;

        let mut report = AssetReport::default();

        let ico = self.root.join(self.layout.ico_path());
        run_step(AssetStep::ExportIco, || {
            save_image(&square(&master, ICO_SIZE), &ico, ImageFormat::Ico)
        })?;
        report.written.push(ico);

        let icns = self.root.join(self.layout.icns_path());
        run_step(AssetStep::ExportIcns, || write_icns(&master, &icns))?;
        report.written.push(icns.clone());

        let bundle_icon = app_bundle.join(MACOS_BUNDLE_ICON);
        run_step(AssetStep::CopyBundleIcon, || copy_file(&icns, &bundle_icon))?;
        report.written.push(bundle_icon);

        let app_dir_icon = app_dir.join(format!("{binary_name}.png"));
        run_step(AssetStep::CopyAppDirIcon, || copy_file(&logo, &app_dir_icon))?;
        report.written.push(app_dir_icon);

        let themes = [
            app_dir.join("usr").join("share").join("icons").join("hicolor"),
            self.root.join(self.layout.desktop_icon_theme()),
        ];
        run_step(AssetStep::ResizeIcons, || {
            for size in ICON_SIZES {
                let resized = square(&master, size);
                for theme in &themes {
                    let target = themed_icon_path(theme, size, binary_name);
                    save_image(&resized, &target, ImageFormat::Png)?;
                    debug!("Wrote {}", target.display());
                    report.written.push(target);
                }
            }
            Ok(())
        })?;

        info!("Asset pipeline complete: {} file(s) written", report.written.len());
        Ok(report)
    }
}
