//! Quadlet unit-file model and rendering.
//!
//! Both input pipelines converge on a [`File`] holding one [`Resource`].
//! Rendering is pure: the [`Display`] impls produce the complete unit-file
//! text and never touch the filesystem.

mod container;
mod network;
mod volume;

use std::fmt::{self, Display, Formatter};

pub use self::{
    container::{Command, Container, RestartPolicy},
    network::Network,
    volume::Volume,
};

/// A quadlet unit file: a name plus the resource it declares.
///
/// The file on disk is `<name>.<extension>` where the extension depends on
/// the resource kind.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: String,
    pub resource: Resource,
}

impl File {
    /// File extension for the resource kind.
    pub fn extension(&self) -> &'static str {
        match self.resource {
            Resource::Container(_) => "container",
            Resource::Network(_) => "network",
            Resource::Volume(_) => "volume",
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.resource.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Container(Box<Container>),
    Network(Network),
    Volume(Volume),
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Container(container) => container.fmt(f),
            Self::Network(network) => network.fmt(f),
            Self::Volume(volume) => volume.fmt(f),
        }
    }
}

impl From<Container> for File {
    fn from(value: Container) -> Self {
        Self {
            name: value.name.clone(),
            resource: Resource::Container(Box::new(value)),
        }
    }
}

impl From<Network> for File {
    fn from(value: Network) -> Self {
        Self {
            name: value.name.clone(),
            resource: Resource::Network(value),
        }
    }
}

impl From<Volume> for File {
    fn from(value: Volume) -> Self {
        Self {
            name: value.name.clone(),
            resource: Resource::Volume(value),
        }
    }
}

/// Default behavior applied to a generated container unit absent explicit
/// input from the source.
///
/// The two pipelines carry different intents: a compose service derives its
/// behavior from explicit manifest fields, while an ad-hoc `podman run`
/// launch gets opinionated defaults so the unit is directly runnable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchPolicy {
    /// Order the unit after `network-online.target` and require the podman
    /// runtime directory to be mounted.
    pub network_online: bool,
    /// Emit `AutoUpdate=registry` and `Pull=newer`.
    pub auto_update: bool,
    /// Emit `TimeoutStartSec=` with the given number of seconds.
    pub start_timeout: Option<u32>,
}

impl LaunchPolicy {
    /// Policy for units generated from a compose service.
    pub const fn compose() -> Self {
        Self {
            network_online: false,
            auto_update: false,
            start_timeout: None,
        }
    }

    /// Policy for units generated from a `podman run` command.
    pub const fn standalone() -> Self {
        Self {
            network_online: true,
            auto_update: true,
            start_timeout: Some(900),
        }
    }
}

impl Default for LaunchPolicy {
    fn default() -> Self {
        Self::compose()
    }
}
