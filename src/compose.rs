//! Compose manifest data model.
//!
//! Only the subset of the compose specification the converter maps to quadlet
//! options is modeled; unknown keys are ignored. Maps use [`IndexMap`] so
//! services, networks, and volumes keep the manifest's order, which in turn
//! fixes the order files are generated in.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::quadlet::Command;

/// A decoded compose manifest.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Compose {
    #[serde(default)]
    pub services: IndexMap<String, Service>,

    /// Values are [`None`] for bare `name:` entries with a null body.
    #[serde(default)]
    pub networks: IndexMap<String, Option<Network>>,

    /// Values are [`None`] for bare `name:` entries with a null body.
    #[serde(default)]
    pub volumes: IndexMap<String, Option<Volume>>,
}

/// One compose service definition.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Service {
    #[serde(default)]
    pub image: Option<String>,

    /// Defaults to the service key when unset.
    #[serde(default)]
    pub container_name: Option<String>,

    /// `host:container[/proto]` port specs.
    #[serde(default)]
    pub ports: Vec<String>,

    /// Mount specs, named volumes or host paths.
    #[serde(default)]
    pub volumes: Vec<String>,

    /// `KEY=VALUE` entries.
    #[serde(default)]
    pub environment: Vec<String>,

    #[serde(default)]
    pub env_file: Vec<String>,

    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub networks: Vec<String>,

    /// `always`, `unless-stopped`, `on-failure`, `no`, or empty.
    #[serde(default)]
    pub restart: String,

    #[serde(default)]
    pub command: Option<Command>,

    #[serde(default)]
    pub working_dir: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub labels: IndexMap<String, String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Network {
    #[serde(default)]
    pub driver: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Volume {
    #[serde(default)]
    pub driver: Option<String>,
}
