//! Generate [podman](https://podman.io/)
//! [quadlet](https://docs.podman.io/en/latest/markdown/podman-systemd.unit.5.html)
//! files from a compose file or a `podman run` command.
//!
//! # Usage
//!
//! ```shell
//! $ quadlet-convert docker-compose.yml ./quadlet
//! $ quadlet-convert --cmd 'podman run -d --name web -p 8080:80 nginx'
//! ```
//!
//! Run `quadlet-convert --help` for more information.

use clap::Parser;

mod cli;
mod compose;
mod podman;
mod quadlet;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    cli::Cli::parse().run()
}
