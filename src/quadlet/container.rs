use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::Deserialize;

use super::LaunchPolicy;

/// A `.container` quadlet file: `[Unit]`, `[Container]`, `[Service]`, and
/// `[Install]` sections.
///
/// `name` is the unit name the file is keyed by; it is also the fallback for
/// `ContainerName=` and the dependency target other units refer to.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub container_name: Option<String>,
    pub publish_port: Vec<String>,
    pub volume: Vec<String>,
    pub environment: Vec<String>,
    pub environment_file: Vec<String>,
    pub network: Vec<String>,
    pub working_dir: Option<String>,
    pub user: Option<String>,
    pub exec: Option<Command>,
    pub label: IndexMap<String, String>,
    pub depends_on: Vec<String>,
    pub restart: RestartPolicy,
    pub launch: LaunchPolicy,
}

impl Display for Container {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "[Unit]")?;
        writeln!(f, "Description={} container", self.name)?;

        if self.launch.network_online {
            writeln!(f, "Wants=network-online.target")?;
            writeln!(f, "After=network-online.target")?;
            writeln!(f, "RequiresMountsFor=%t/containers")?;
        }

        if !self.depends_on.is_empty() {
            let services = self
                .depends_on
                .iter()
                .map(|dependency| format!("{dependency}.service"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "After={services}")?;
            writeln!(f, "Requires={services}")?;
        }

        writeln!(f)?;
        writeln!(f, "[Container]")?;

        if !self.image.is_empty() {
            writeln!(f, "Image={}", self.image)?;
        }

        let container_name = self.container_name.as_deref().unwrap_or(&self.name);
        writeln!(f, "ContainerName={container_name}")?;

        for port in &self.publish_port {
            writeln!(f, "PublishPort={port}")?;
        }

        for volume in &self.volume {
            writeln!(f, "Volume={volume}")?;
        }

        for environment in &self.environment {
            writeln!(f, "Environment={environment}")?;
        }

        for file in &self.environment_file {
            writeln!(f, "EnvironmentFile={file}")?;
        }

        for network in &self.network {
            writeln!(f, "Network={network}.network")?;
        }

        if let Some(working_dir) = &self.working_dir {
            writeln!(f, "WorkingDir={working_dir}")?;
        }

        if let Some(user) = &self.user {
            writeln!(f, "User={user}")?;
        }

        if let Some(exec) = self.exec.as_ref().filter(|exec| !exec.is_empty()) {
            writeln!(f, "Exec={exec}")?;
        }

        // Sorted so the output does not depend on the source map order.
        let mut labels: Vec<_> = self.label.iter().collect();
        labels.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (key, value) in labels {
            writeln!(f, "Label={key}={value}")?;
        }

        if self.launch.auto_update {
            writeln!(f, "AutoUpdate=registry")?;
            writeln!(f, "Pull=newer")?;
        }

        writeln!(f)?;
        writeln!(f, "[Service]")?;
        writeln!(f, "Restart={}", self.restart)?;

        if let Some(timeout) = self.launch.start_timeout {
            writeln!(f, "TimeoutStartSec={timeout}")?;
        }

        writeln!(f)?;
        writeln!(f, "[Install]")?;
        writeln!(f, "WantedBy=multi-user.target default.target")
    }
}

/// A container command, either a single shell-style string or explicit argv
/// tokens.
///
/// Compose allows both forms for `command`; the distinction is resolved once
/// at decode time and kept until rendering.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Command {
    Literal(String),
    Tokens(Vec<String>),
}

impl Command {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal(command) => command.is_empty(),
            Self::Tokens(tokens) => tokens.is_empty(),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Literal(command) => f.write_str(command),
            Self::Tokens(tokens) => f.write_str(&tokens.join(" ")),
        }
    }
}

/// Systemd restart policy for the `[Service]` section.
///
/// Compose `unless-stopped` collapses to `always`: systemd has no equivalent
/// of "restart unless the user stopped it".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    #[default]
    No,
}

impl RestartPolicy {
    /// Normalize a compose `restart` value. Empty and unrecognized values
    /// map to [`No`](Self::No).
    pub fn from_compose(restart: &str) -> Self {
        match restart {
            "always" | "unless-stopped" => Self::Always,
            "on-failure" => Self::OnFailure,
            _ => Self::No,
        }
    }
}

impl Display for RestartPolicy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let policy = match self {
            Self::Always => "always",
            Self::OnFailure => "on-failure",
            Self::No => "no",
        };
        f.write_str(policy)
    }
}
