mod compose;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser};
use color_eyre::{Help, eyre::WrapErr};

use crate::{compose::Compose, podman, quadlet};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about)]
pub struct Cli {
    /// Convert a single `podman run` command instead of a compose file
    ///
    /// E.g. `quadlet-convert --cmd 'podman run -d --name web -p 8080:80 nginx'`
    /// generates `web.container`.
    #[arg(long, value_name = "COMMAND")]
    cmd: Option<String>,

    /// Directory the `.container` file is written to when using `--cmd`
    #[arg(long, value_name = "DIR", default_value = ".", requires = "cmd")]
    output: PathBuf,

    /// Compose file to convert
    ///
    /// A `.container` file is generated for each service, a `.network` file
    /// for each network, and a `.volume` file for each volume.
    #[arg(value_name = "COMPOSE_FILE", conflicts_with = "cmd")]
    compose_file: Option<PathBuf>,

    /// Directory the generated Quadlet files are written to
    ///
    /// Created if it does not exist.
    #[arg(value_name = "OUTPUT_DIR", default_value = "./quadlet")]
    output_dir: PathBuf,
}

impl Cli {
    pub fn run(self) -> color_eyre::Result<()> {
        if let Some(command) = &self.cmd {
            convert_command(command, &self.output)
        } else if let Some(compose_file) = &self.compose_file {
            convert_compose(compose_file, &self.output_dir)
        } else {
            Self::command()
                .print_help()
                .wrap_err("could not print usage")
        }
    }
}

/// Convert a `podman run` command into a single `.container` file.
fn convert_command(command: &str, output: &Path) -> color_eyre::Result<()> {
    let config = podman::parse_command(command)
        .wrap_err("error parsing podman command")
        .suggestion("the command must include an image, e.g. `podman run nginx`")?;

    write_file(&config.into_quadlet(), output)
}

/// Convert a compose file into one Quadlet file per network, volume, and
/// service.
///
/// A write failure for a network or volume file is reported as a warning and
/// conversion continues; services are the primary deliverable, so a write
/// failure there aborts.
fn convert_compose(path: &Path, output_dir: &Path) -> color_eyre::Result<()> {
    let Compose {
        services,
        networks,
        volumes,
    } = compose::from_file(path)?;

    fs::create_dir_all(output_dir)
        .wrap_err_with(|| {
            format!(
                "could not create output directory `{}`",
                output_dir.display()
            )
        })
        .suggestion("make sure you have write permissions for the output directory's parent")?;

    for file in compose::network_files(networks).chain(compose::volume_files(volumes)) {
        if let Err(error) = write_file(&file, output_dir) {
            eprintln!("Warning: {error:#}");
        }
    }

    for file in compose::service_files(services) {
        write_file(&file, output_dir)?;
    }

    println!(
        "Conversion complete! Quadlet files were created in `{}`.",
        output_dir.display()
    );
    println!();
    println!("To start the containers:");
    println!("1. Copy the .container, .network, and .volume files to ~/.config/containers/systemd/");
    println!("2. Run: systemctl --user daemon-reload");
    println!("3. Start services with: systemctl --user start <service-name>");

    Ok(())
}

/// Render `file` and write it to `directory` as `<name>.<extension>`.
fn write_file(file: &quadlet::File, directory: &Path) -> color_eyre::Result<()> {
    let path = directory.join(format!("{}.{}", file.name, file.extension()));

    let mut out = fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create file `{}`", path.display()))
        .suggestion(
            "make sure the output directory exists \
                and you have write permissions for it",
        )?;

    write!(out, "{file}")
        .wrap_err_with(|| format!("failed to write to file `{}`", path.display()))?;
    println!("Wrote to file: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
