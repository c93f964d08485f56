//! Depth-first restore of a backup tree
//!
//! Every `pump_*` function pushes its own object first and only then
//! descends, so a child is never created before its parent.

use gspump_fs::scan::{list_subdirectories, non_sld_style_files, sld_files, template_files};
use gspump_fs::{BackupDir, BackupPath};
use gspump_rest::{Pusher, RestClient};
use tracing::{debug, warn};

use crate::node::ConfigNode;
use crate::report::PumpReport;
use crate::{Error, Result, routes};

/// Options for a restore run
#[derive(Debug, Clone, Default)]
pub struct PumpOptions {
    /// On a structural error, skip the affected workspace, datastore or
    /// feature type and continue with its next sibling instead of aborting.
    pub keep_going: bool,
}

/// Restores a backup tree through a [`Pusher`].
pub struct Pump<C> {
    pusher: Pusher<C>,
    options: PumpOptions,
}

impl<C: RestClient> Pump<C> {
    pub fn new(pusher: Pusher<C>, options: PumpOptions) -> Self {
        Self { pusher, options }
    }

    pub fn pusher(&self) -> &Pusher<C> {
        &self.pusher
    }

    /// Restore everything below `input_root`.
    ///
    /// # Errors
    ///
    /// Returns the first structural error unless `keep_going` is set.
    pub fn pump_all(&self, input_root: &BackupPath) -> Result<PumpReport> {
        debug!("beginning full pump from {} to {}", input_root, self.pusher.admin_url());
        let mut report = PumpReport::new();

        self.pump_styles(None, input_root, &mut report)?;
        self.pump_workspaces(input_root, &mut report)?;

        // Global templates live next to the workspace directories.
        let workspaces_dir = input_root.dir(BackupDir::Workspaces);
        self.pump_templates(routes::TEMPLATES, &workspaces_dir, &mut report)?;

        Ok(report)
    }

    /// Push the styles in `input_dir/styles`, globally or into `workspace`.
    ///
    /// Non-SLD files go first so that style descriptors exist before their
    /// SLD bodies are uploaded into them.
    pub fn pump_styles(
        &self,
        workspace: Option<&str>,
        input_dir: &BackupPath,
        report: &mut PumpReport,
    ) -> Result<()> {
        let target_url = match workspace {
            Some(ws) => routes::workspace_styles(ws),
            None => routes::STYLES.to_string(),
        };
        let styles_dir = input_dir.dir(BackupDir::Styles);
        debug!("beginning styles pump from {} to {}", styles_dir, target_url);

        for file in non_sld_style_files(&styles_dir) {
            debug!("style: {} in {}", file, styles_dir);
            self.push(&ConfigNode::style(target_url.clone(), &styles_dir, &file), report)?;
        }
        for file in sld_files(&styles_dir) {
            debug!("sld: {} in {}", file, styles_dir);
            self.push(&ConfigNode::style(target_url.clone(), &styles_dir, &file), report)?;
        }
        Ok(())
    }

    /// Push every `*.ftl` directly inside `input_dir` to `target_url`.
    pub fn pump_templates(
        &self,
        target_url: &str,
        input_dir: &BackupPath,
        report: &mut PumpReport,
    ) -> Result<()> {
        debug!("beginning template pump from {} to {}", input_dir, target_url);
        for file in template_files(input_dir) {
            debug!("template: {} in {}", file, input_dir);
            self.push(&ConfigNode::template(target_url.to_string(), input_dir, &file), report)?;
        }
        Ok(())
    }

    /// Push every workspace under `input_root/workspaces`.
    pub fn pump_workspaces(&self, input_root: &BackupPath, report: &mut PumpReport) -> Result<()> {
        let workspaces_dir = input_root.dir(BackupDir::Workspaces);
        debug!("beginning workspaces pump from {}", workspaces_dir);

        for ws in list_subdirectories(&workspaces_dir) {
            let dir = workspaces_dir.join(&ws);
            self.isolate(&dir, report, |report| self.pump_workspace(&ws, &dir, report))?;
        }
        Ok(())
    }

    /// Push one workspace and everything it owns.
    pub fn pump_workspace(&self, ws: &str, dir: &BackupPath, report: &mut PumpReport) -> Result<()> {
        debug!("beginning workspace {} pump from {}", ws, dir);

        self.push_descriptor(&ConfigNode::workspace(ws, dir), report)?;
        self.push_descriptor(&ConfigNode::namespace(ws, dir), report)?;

        let datastores_dir = dir.dir(BackupDir::Datastores);
        for ds in list_subdirectories(&datastores_dir) {
            let ds_dir = datastores_dir.join(&ds);
            self.isolate(&ds_dir, report, |report| {
                self.pump_datastore(&ds, ws, &ds_dir, report)
            })?;
        }

        self.pump_templates(&routes::workspace_templates(ws), dir, report)?;
        self.pump_styles(Some(ws), dir, report)
    }

    /// Push one datastore, its feature types and its templates.
    pub fn pump_datastore(
        &self,
        ds: &str,
        ws: &str,
        dir: &BackupPath,
        report: &mut PumpReport,
    ) -> Result<()> {
        debug!("beginning datastore {} pump to workspace {} from {}", ds, ws, dir);

        self.push_descriptor(&ConfigNode::datastore(ds, ws, dir), report)?;

        let featuretypes_dir = dir.dir(BackupDir::FeatureTypes);
        for ft in list_subdirectories(&featuretypes_dir) {
            let ft_dir = featuretypes_dir.join(&ft);
            self.isolate(&ft_dir, report, |report| {
                self.pump_featuretype(&ft, ds, ws, &ft_dir, report)
            })?;
        }

        self.pump_templates(&routes::datastore_templates(ws, ds), dir, report)
    }

    /// Push one feature type, its layer and its templates.
    pub fn pump_featuretype(
        &self,
        ft: &str,
        ds: &str,
        ws: &str,
        dir: &BackupPath,
        report: &mut PumpReport,
    ) -> Result<()> {
        debug!(
            "beginning featuretype {} pump into datastore {} in workspace {} from {}",
            ft, ds, ws, dir
        );

        self.push_descriptor(&ConfigNode::featuretype(ft, ds, ws, dir), report)?;
        self.push_descriptor(&ConfigNode::layer(ft, dir), report)?;

        self.pump_templates(&routes::featuretype_templates(ws, ds, ft), dir, report)
    }

    fn push_descriptor(&self, node: &ConfigNode, report: &mut PumpReport) -> Result<()> {
        let path = node.source_path();
        if !path.is_file() {
            return Err(Error::MissingDescriptor {
                kind: node.kind,
                path: path.to_string(),
            });
        }
        self.push(node, report)
    }

    fn push(&self, node: &ConfigNode, report: &mut PumpReport) -> Result<()> {
        let outcome = self.pusher.push(&node.to_request())?;
        report.record(
            node.kind,
            format!("{}/{}", node.relative_url, node.object_name),
            outcome,
        );
        Ok(())
    }

    /// Run a subtree walk, absorbing its error in keep-going mode.
    fn isolate(
        &self,
        dir: &BackupPath,
        report: &mut PumpReport,
        walk: impl FnOnce(&mut PumpReport) -> Result<()>,
    ) -> Result<()> {
        match walk(report) {
            Err(e) if self.options.keep_going => {
                warn!("Skipping {} after error: {}", dir, e);
                report.skip(dir.as_str(), e);
                Ok(())
            }
            other => other,
        }
    }
}
