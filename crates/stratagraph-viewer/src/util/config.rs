use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub dataset_path: String,
    /// Fixed layout seed; random per run when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub autoplay: bool,

    pub layer_spacing: f32,
    pub node_radius: f32,
    pub placement_extent: f32,
    pub min_distance: f32,
    pub max_attempts: usize,

    pub base_opacity: f32,
    pub dimmed_opacity: f32,
    pub select_activates_layer: bool,

    pub particles_per_connection: usize,
    pub particle_speed: f32,

    pub orbit_time_scale: f64,
    pub orbit_angular_speed: f64,
    pub resume_delay_ms: u64,

    pub field_of_view_deg: f32,
    pub bloom: bool,
    pub pick_radius_px: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            dataset_path: "data/data.json".to_string(),
            seed: None,
            autoplay: true,
            layer_spacing: 10.0,
            node_radius: 0.25,
            placement_extent: 15.0,
            min_distance: 2.0,
            max_attempts: 100,
            base_opacity: 0.2,
            dimmed_opacity: 0.02,
            select_activates_layer: true,
            particles_per_connection: 10,
            particle_speed: 0.05,
            orbit_time_scale: 0.1,
            orbit_angular_speed: 0.5,
            resume_delay_ms: 0,
            field_of_view_deg: 65.0,
            bloom: true,
            pick_radius_px: 14.0,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "stratagraph")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        bevy::log::warn!("ignoring invalid config {}: {err}", path.display());
        ViewerConfig::default()
    })
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

/// Command-line overrides: `[DATASET] [--seed N] [--paused] [--save-config]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerArgs {
    pub dataset: Option<PathBuf>,
    pub seed: Option<u64>,
    pub paused: bool,
    pub save_config: bool,
}

impl ViewerArgs {
    pub fn apply(&self, cfg: &mut ViewerConfig) {
        if let Some(path) = &self.dataset {
            cfg.dataset_path = path.display().to_string();
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.paused {
            cfg.autoplay = false;
        }
    }
}

pub fn parse_args() -> anyhow::Result<ViewerArgs> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> anyhow::Result<ViewerArgs>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = ViewerArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--seed" {
            let Some(value) = args.next() else {
                anyhow::bail!("--seed expects a number");
            };
            let value = value.to_string_lossy();
            let seed = value
                .parse::<u64>()
                .with_context(|| format!("invalid seed: {value}"))?;
            out.seed = Some(seed);
        } else if arg == "--paused" {
            out.paused = true;
        } else if arg == "--save-config" {
            out.save_config = true;
        } else if arg.to_string_lossy().starts_with("--") {
            anyhow::bail!("unknown argument: {:?}", arg);
        } else if out.dataset.is_none() {
            out.dataset = Some(PathBuf::from(arg));
        } else {
            anyhow::bail!("unexpected extra dataset path: {:?}", arg);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> anyhow::Result<ViewerArgs> {
        parse_args_from(list.iter().map(OsString::from))
    }

    #[test]
    fn viewer_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("viewer.toml");
        let cfg = ViewerConfig {
            seed: Some(99),
            bloom: false,
            ..ViewerConfig::default()
        };

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ViewerConfig = toml::from_str("layer_spacing = 4.0\nautoplay = false\n").expect("parse");
        assert_eq!(cfg.layer_spacing, 4.0);
        assert!(!cfg.autoplay);
        assert_eq!(cfg.max_attempts, 100);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn invalid_config_falls_back_to_default() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "layer_spacing = \"wide\"").expect("write");
        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
        assert_eq!(
            load_or_default_from_path(&dir.path().join("missing.toml")),
            ViewerConfig::default()
        );
    }

    #[test]
    fn parses_dataset_seed_and_flags() {
        let parsed = args(&["graph.json", "--seed", "12", "--paused"]).expect("parse");
        assert_eq!(parsed.dataset, Some(PathBuf::from("graph.json")));
        assert_eq!(parsed.seed, Some(12));
        assert!(parsed.paused);

        let mut cfg = ViewerConfig::default();
        parsed.apply(&mut cfg);
        assert_eq!(cfg.dataset_path, "graph.json");
        assert_eq!(cfg.seed, Some(12));
        assert!(!cfg.autoplay);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "soon"]).is_err());
        assert!(args(&["--fast"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }
}
