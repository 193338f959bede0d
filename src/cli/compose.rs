//! Reading a compose file and mapping it to Quadlet files.

use std::{fs::File, path::Path};

use color_eyre::{Help, eyre::WrapErr};
use indexmap::IndexMap;

use crate::{
    compose::{Compose, Network, Service, Volume},
    quadlet::{self, LaunchPolicy, RestartPolicy},
};

/// Deserialize a [`Compose`] manifest from the file at `path`.
///
/// # Errors
///
/// Returns an error if the file could not be opened or is not a valid compose
/// file. Both are fatal: nothing has been written yet.
pub fn from_file(path: &Path) -> color_eyre::Result<Compose> {
    let compose_file = File::open(path)
        .wrap_err_with(|| format!("could not open compose file `{}`", path.display()))
        .suggestion("make sure the file exists and you have permission to read it")?;

    serde_yaml::from_reader(compose_file)
        .wrap_err_with(|| format!("file `{}` is not a valid compose file", path.display()))
}

/// Map compose networks to `.network` Quadlet files, in manifest order.
pub fn network_files(
    networks: IndexMap<String, Option<Network>>,
) -> impl Iterator<Item = quadlet::File> {
    networks.into_iter().map(|(name, network)| {
        let driver = network
            .unwrap_or_default()
            .driver
            .filter(|driver| !driver.is_empty());
        quadlet::Network { name, driver }.into()
    })
}

/// Map compose volumes to `.volume` Quadlet files, in manifest order.
pub fn volume_files(
    volumes: IndexMap<String, Option<Volume>>,
) -> impl Iterator<Item = quadlet::File> {
    volumes.into_iter().map(|(name, volume)| {
        let driver = volume
            .unwrap_or_default()
            .driver
            .filter(|driver| !driver.is_empty());
        quadlet::Volume { name, driver }.into()
    })
}

/// Map compose services to `.container` Quadlet files, in manifest order.
pub fn service_files(services: IndexMap<String, Service>) -> impl Iterator<Item = quadlet::File> {
    services
        .into_iter()
        .map(|(name, service)| service_into_container(name, service).into())
}

/// Map one compose service to the shared container render model, with the
/// compose launch policy: behavior comes from explicit manifest fields only.
fn service_into_container(name: String, service: Service) -> quadlet::Container {
    let Service {
        image,
        container_name,
        ports,
        volumes,
        environment,
        env_file,
        depends_on,
        networks,
        restart,
        command,
        working_dir,
        user,
        labels,
    } = service;

    quadlet::Container {
        image: image.unwrap_or_default(),
        container_name,
        publish_port: ports,
        volume: volumes,
        environment,
        environment_file: env_file,
        network: networks,
        working_dir,
        user,
        exec: command,
        label: labels,
        depends_on,
        restart: RestartPolicy::from_compose(&restart),
        launch: LaunchPolicy::compose(),
        name,
    }
}
