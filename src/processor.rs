//! Orchestration of the template passes.
//! Runs content rewriting, renaming and asset generation in order over one
//! root, using the settings resolved once at startup.

use globset::GlobSet;
use log::info;
use std::fmt;
use std::path::Path;

use crate::assets::{AssetLayout, AssetPipeline, AssetReport};
use crate::cli::Action;
use crate::config::{load_external_values, Settings};
use crate::error::{Error, Result};
use crate::ignore::{build_denylist, ExclusionSet};
use crate::renamer::{rename_tree, RenameReport};
use crate::rewriter::{rewrite_tree, RewriteReport};
use crate::variables::VariableMap;
use crate::walker::TreeWalker;

/// What a run did, pass by pass. Passes that did not run stay `None`.
#[derive(Debug, Default)]
pub struct Outcome {
    pub rewrite: Option<RewriteReport>,
    pub rename: Option<RenameReport>,
    pub assets: Option<AssetReport>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(rewrite) = &self.rewrite {
            parts.push(format!("{} file(s) rewritten", rewrite.rewritten));
        }
        if let Some(rename) = &self.rename {
            parts.push(format!("{} path(s) renamed", rename.renamed.len()));
        }
        if let Some(assets) = &self.assets {
            parts.push(format!("{} asset(s) written", assets.written.len()));
        }
        if parts.is_empty() {
            write!(f, "nothing to do")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Runs the passes over one root.
pub struct Processor<'a> {
    root: &'a Path,
    exclusions: ExclusionSet,
    denylist: GlobSet,
    layout: AssetLayout,
}

impl<'a> Processor<'a> {
    pub fn new(root: &'a Path, settings: &Settings) -> Result<Self> {
        Ok(Self {
            root,
            exclusions: ExclusionSet::from_root(root, settings.skip_dirs.as_slice()),
            denylist: build_denylist(&settings.ignore)?,
            layout: settings.asset_layout(),
        })
    }

    /// A fresh walker; exclusions are evaluated again on every walk.
    pub fn walker(&self) -> TreeWalker<'_> {
        TreeWalker::new(self.root, &self.exclusions, &self.denylist)
    }

    pub fn rewrite_contents(&self, variables: &VariableMap) -> Result<RewriteReport> {
        info!("Rewriting file contents under {}", self.root.display());
        rewrite_tree(&self.walker(), variables)
    }

    /// Renames every matching path.
    ///
    /// # Errors
    /// * `Error::RenameFailed` after all renames were attempted, if any failed
    pub fn rename_paths(&self, variables: &VariableMap) -> Result<RenameReport> {
        info!("Renaming paths under {}", self.root.display());
        let report = rename_tree(&self.walker(), variables)?;
        if !report.is_success() {
            return Err(Error::RenameFailed { count: report.failures.len() });
        }
        Ok(report)
    }

    pub fn update_logo(&self, binary_name: &str) -> Result<AssetReport> {
        info!("Regenerating logo assets for '{}'", binary_name);
        AssetPipeline::new(self.root, &self.layout).run(binary_name)
    }

    /// Content pass, then rename pass, then asset pipeline. Contents are
    /// rewritten first because renaming changes the paths the walk relies on.
    pub fn instantiate(&self, variables: &VariableMap, binary_name: &str) -> Result<Outcome> {
        let rewrite = self.rewrite_contents(variables)?;
        let rename = self.rename_paths(variables)?;
        let assets = self.update_logo(binary_name)?;
        Ok(Outcome { rewrite: Some(rewrite), rename: Some(rename), assets: Some(assets) })
    }
}

/// Resolves everything `action` needs, then runs it.
///
/// All configuration is resolved before the first write, so a missing value
/// aborts the run with the tree untouched.
pub fn execute(action: Action, root: &Path) -> Result<Outcome> {
    let settings = Settings::load(root)?;
    let external = load_external_values(root, &settings)?;
    let processor = Processor::new(root, &settings)?;

    match action {
        Action::Init => {
            let variables = VariableMap::resolve(&external)?;
            let binary_name = external.binary_name()?;
            processor.instantiate(&variables, &binary_name)
        }
        Action::UpdateLogo => {
            let binary_name = external.binary_name()?;
            let assets = processor.update_logo(&binary_name)?;
            Ok(Outcome { assets: Some(assets), ..Outcome::default() })
        }
        Action::UpdateDescription => {
            let variables = VariableMap::description_only(&external)?;
            let rewrite = processor.rewrite_contents(&variables)?;
            Ok(Outcome { rewrite: Some(rewrite), ..Outcome::default() })
        }
    }
}
