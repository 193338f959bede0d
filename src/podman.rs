//! Parsing of `podman run` command strings.
//!
//! A raw command string is first [tokenized](tokenize()) with shell-like
//! quoting rules, then [parsed](parse()) into a [`QuadletConfig`] which can be
//! converted into a [`quadlet::File`](crate::quadlet::File).

use std::iter::Peekable;

use indexmap::IndexMap;
use thiserror::Error;

use crate::quadlet::{self, Command, Container, LaunchPolicy, RestartPolicy};

/// Error returned by [`parse()`] when the command has no image token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no image found in command")]
pub struct MissingImageError;

/// Structured form of a `podman run` command.
///
/// Shares semantics with the corresponding subset of a compose service.
/// The command line has no syntax for dependencies, env files, labels, or a
/// restart policy; restart is fixed by [`LaunchPolicy::standalone()`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QuadletConfig {
    pub image: String,
    pub container_name: Option<String>,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub environment: Vec<String>,
    pub command: Vec<String>,
    pub network: Option<String>,
    pub user: Option<String>,
    pub working_dir: Option<String>,
}

impl QuadletConfig {
    /// Name used for the generated unit file, `container` if the command did
    /// not set `--name`.
    pub fn name(&self) -> &str {
        self.container_name.as_deref().unwrap_or("container")
    }

    /// Convert into a [`quadlet::File`] with the standalone launch policy.
    pub fn into_quadlet(self) -> quadlet::File {
        let name = self.name().to_owned();

        let Self {
            image,
            container_name,
            ports,
            volumes,
            environment,
            command,
            network,
            user,
            working_dir,
        } = self;

        // "default" is podman's implicit network, not a named one; a
        // `Network=default.network` line would point at a nonexistent unit.
        let network = network.filter(|network| network != "default");

        Container {
            name,
            image,
            container_name,
            publish_port: ports,
            volume: volumes,
            environment,
            environment_file: Vec::new(),
            network: network.into_iter().collect(),
            working_dir,
            user,
            exec: (!command.is_empty()).then_some(Command::Tokens(command)),
            label: IndexMap::new(),
            depends_on: Vec::new(),
            restart: RestartPolicy::Always,
            launch: LaunchPolicy::standalone(),
        }
        .into()
    }
}

/// Split a raw command string into tokens like a shell would.
///
/// Tokens are separated by unquoted whitespace. Single- and double-quoted
/// spans keep their whitespace; a quote character of the other kind inside an
/// open quote is a literal. The quote characters themselves are stripped.
/// An unterminated quote is tolerated: the remainder becomes the final token.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for character in raw.chars() {
        match quote {
            None => match character {
                '"' | '\'' => quote = Some(character),
                character if character.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                character => current.push(character),
            },
            Some(open) if character == open => quote = None,
            Some(_) => current.push(character),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Parse tokens of a `podman run` command into a [`QuadletConfig`].
///
/// A leading `podman run` token pair is stripped if present. Recognized
/// options accept both the space-separated (`-p 8080:80`) and `=`-joined
/// (`--publish=8080:80`) forms. Repeatable options (`-p`, `-v`, `-e`)
/// accumulate; single-value options (`--name`, `--network`, `-u`, `-w`)
/// overwrite, so the last occurrence wins.
///
/// Unrecognized flags are skipped along with their following token, unless
/// that token also starts with `-`. This is best-effort: an unknown flag
/// whose value starts with `-` is misread as two flags.
///
/// The first token not consumed as an option or value is the image; every
/// token after it is opaque command argv, preserved verbatim.
///
/// # Errors
///
/// Returns [`MissingImageError`] if no image token was found.
pub fn parse(mut tokens: Vec<String>) -> Result<QuadletConfig, MissingImageError> {
    if tokens.first().is_some_and(|token| token == "podman")
        && tokens.get(1).is_some_and(|token| token == "run")
    {
        tokens.drain(..2);
    }

    let mut config = QuadletConfig::default();
    let mut tokens = tokens.into_iter().peekable();

    while let Some(arg) = tokens.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg.as_str(), None),
        };

        match flag {
            // systemd keeps the service in the foreground itself
            "-d" | "--detach" => {}
            "--name" => {
                if let Some(name) = value(inline, &mut tokens) {
                    config.container_name = Some(name);
                }
            }
            "-p" | "--publish" => {
                if let Some(port) = value(inline, &mut tokens) {
                    config.ports.push(port);
                }
            }
            "-v" | "--volume" => {
                if let Some(volume) = value(inline, &mut tokens) {
                    config.volumes.push(volume);
                }
            }
            "-e" | "--env" => {
                if let Some(env) = value(inline, &mut tokens) {
                    config.environment.push(env);
                }
            }
            "--network" => {
                if let Some(network) = value(inline, &mut tokens) {
                    config.network = Some(network);
                }
            }
            "-u" | "--user" => {
                if let Some(user) = value(inline, &mut tokens) {
                    config.user = Some(user);
                }
            }
            "-w" | "--workdir" => {
                if let Some(working_dir) = value(inline, &mut tokens) {
                    config.working_dir = Some(working_dir);
                }
            }
            _ if arg.starts_with('-') => {
                // Unknown options either stand alone or take exactly one
                // value; a following token not starting with '-' is assumed
                // to be that value.
                if tokens.peek().is_some_and(|next| !next.starts_with('-')) {
                    tokens.next();
                }
            }
            _ => {
                config.image = arg;
                config.command.extend(tokens.by_ref());
            }
        }
    }

    if config.image.is_empty() {
        return Err(MissingImageError);
    }

    Ok(config)
}

/// Tokenize and parse a raw `podman run` command string.
///
/// # Errors
///
/// Returns [`MissingImageError`] if no image token was found.
pub fn parse_command(raw: &str) -> Result<QuadletConfig, MissingImageError> {
    parse(tokenize(raw))
}

/// The `=`-joined value if the option had one, otherwise the next token.
fn value(
    inline: Option<&str>,
    tokens: &mut Peekable<impl Iterator<Item = String>>,
) -> Option<String> {
    match inline {
        Some(value) => Some(value.to_owned()),
        None => tokens.next(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn to_tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|&arg| arg.to_owned()).collect()
    }

    #[test]
    fn tokenize_single_quotes() {
        assert_eq!(tokenize("a 'b c' d"), ["a", "b c", "d"]);
    }

    #[test]
    fn tokenize_quote_of_other_kind_is_literal() {
        assert_eq!(tokenize(r#"echo "it's fine""#), ["echo", "it's fine"]);
    }

    #[test]
    fn tokenize_joined_quote_keeps_token_whole() {
        assert_eq!(tokenize(r#"--name="my app""#), ["--name=my app"]);
    }

    #[test]
    fn tokenize_unterminated_quote_emits_trailing_token() {
        assert_eq!(tokenize("a 'b"), ["a", "b"]);
    }

    #[test]
    fn tokenize_collapses_separators() {
        assert_eq!(tokenize("  a \t b  "), ["a", "b"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn parse_strips_podman_run_prefix() {
        let config = parse_command("podman run nginx").unwrap();
        assert_eq!(config.image, "nginx");
        assert!(config.command.is_empty());
    }

    #[test]
    fn parse_equals_and_space_forms_are_equivalent() {
        let spaced = parse_command("podman run -p 8080:80 --name web nginx").unwrap();
        let joined = parse_command("podman run -p=8080:80 --name=web nginx").unwrap();
        let long = parse_command("podman run --publish=8080:80 --name web nginx").unwrap();
        assert_eq!(spaced, joined);
        assert_eq!(spaced, long);
    }

    #[test]
    fn parse_repeatable_options_accumulate() {
        let config = parse_command("podman run -p 80:80 -p 443:443 -e A=1 -e B=2 nginx").unwrap();
        assert_eq!(config.ports, ["80:80", "443:443"]);
        assert_eq!(config.environment, ["A=1", "B=2"]);
    }

    #[test]
    fn parse_singular_options_last_wins() {
        let config = parse_command("podman run --network a --network b -u x -u y nginx").unwrap();
        assert_eq!(config.network.as_deref(), Some("b"));
        assert_eq!(config.user.as_deref(), Some("y"));
    }

    #[test]
    fn parse_missing_image() {
        assert_eq!(
            parse(to_tokens(&["podman", "run", "-d"])),
            Err(MissingImageError)
        );
    }

    #[test]
    fn parse_detach_is_discarded() {
        let config = parse_command("podman run -d --detach nginx").unwrap();
        assert_eq!(config, parse_command("podman run nginx").unwrap());
    }

    #[test]
    fn parse_unknown_flag_skips_one_value() {
        let config = parse_command("podman run --memory 512m nginx").unwrap();
        assert_eq!(config.image, "nginx");

        let config = parse_command("podman run --rm --name web nginx").unwrap();
        assert_eq!(config.container_name.as_deref(), Some("web"));
        assert_eq!(config.image, "nginx");
    }

    #[test]
    fn parse_stops_option_recognition_after_image() {
        let config = parse_command("podman run nginx -p 80:80 --name x").unwrap();
        assert_eq!(config.image, "nginx");
        assert_eq!(config.command, ["-p", "80:80", "--name", "x"]);
        assert!(config.ports.is_empty());
        assert!(config.container_name.is_none());
    }

    #[test]
    fn parse_quoted_values() {
        let config = parse_command("podman run -e MESSAGE='hello world' nginx").unwrap();
        assert_eq!(config.environment, ["MESSAGE=hello world"]);
    }

    #[test]
    fn parse_trailing_option_without_value() {
        // The dangling option is dropped, leaving no image at all.
        assert_eq!(parse(to_tokens(&["-p"])), Err(MissingImageError));
    }

    #[test]
    fn name_falls_back_to_container() {
        let config = parse_command("podman run nginx").unwrap();
        assert_eq!(config.name(), "container");

        let config = parse_command("podman run --name web nginx").unwrap();
        assert_eq!(config.name(), "web");
    }

    #[test]
    fn into_quadlet_end_to_end() {
        let file = parse_command(
            "podman run -d --name web -p 8080:80 -v /data:/app/data -e FOO=bar nginx",
        )
        .unwrap()
        .into_quadlet();

        assert_eq!(file.name, "web");
        assert_eq!(file.extension(), "container");
        assert_eq!(
            file.to_string(),
            "[Unit]\n\
             Description=web container\n\
             Wants=network-online.target\n\
             After=network-online.target\n\
             RequiresMountsFor=%t/containers\n\
             \n\
             [Container]\n\
             Image=nginx\n\
             ContainerName=web\n\
             PublishPort=8080:80\n\
             Volume=/data:/app/data\n\
             Environment=FOO=bar\n\
             AutoUpdate=registry\n\
             Pull=newer\n\
             \n\
             [Service]\n\
             Restart=always\n\
             TimeoutStartSec=900\n\
             \n\
             [Install]\n\
             WantedBy=multi-user.target default.target\n"
        );
    }

    #[test]
    fn into_quadlet_command_tokens_follow_image() {
        let file = parse_command("podman run alpine echo 'hello world'")
            .unwrap()
            .into_quadlet();
        let unit = file.to_string();
        assert_eq!(file.name, "container");
        assert!(unit.contains("Exec=echo hello world\n"));
    }

    #[test]
    fn into_quadlet_drops_default_network() {
        let file = parse_command("podman run --network default nginx")
            .unwrap()
            .into_quadlet();
        assert!(!file.to_string().contains("Network="));
    }
}
