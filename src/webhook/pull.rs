use tokio::process::Command;

/// Fire-and-forget update action; implementations must not block the caller.
/// A failed run is logged, never retried.
pub trait UpdateAction: Send + Sync {
    fn trigger(&self);
}

#[derive(thiserror::Error, Debug)]
#[error("repository locator rejected: {0}")]
pub struct InvalidLocator(String);

/// Pulls the configured remote with a fixed argv, never through a shell.
pub struct GitPull {
    remote: String,
}

impl GitPull {
    /// The locator is allow-list checked once here; a value that fails
    /// validation never reaches the command line.
    pub fn new(remote: impl Into<String>) -> Result<Self, InvalidLocator> {
        let remote = remote.into();
        validate_locator(&remote)?;
        Ok(Self { remote })
    }
}

impl UpdateAction for GitPull {
    fn trigger(&self) {
        let remote = self.remote.clone();
        tokio::spawn(async move {
            let output = Command::new("git").arg("pull").arg(&remote).output().await;
            match output {
                Ok(out) if out.status.success() => {
                    tracing::info!(remote = %remote, "git pull finished");
                }
                Ok(out) => {
                    tracing::error!(
                        remote = %remote,
                        status = %out.status,
                        stderr = %String::from_utf8_lossy(&out.stderr),
                        "git pull failed"
                    );
                }
                Err(err) => {
                    tracing::error!(remote = %remote, %err, "could not spawn git pull");
                }
            }
        });
    }
}

/// Accepts `https://` URLs and `git@host:path` remotes built from URL-safe
/// characters. Anything else is refused: the locator comes from deployment
/// configuration but still must not be able to smuggle extra arguments or
/// shell syntax into the pull command.
fn validate_locator(remote: &str) -> Result<(), InvalidLocator> {
    if remote.is_empty() || remote.len() > 512 {
        return Err(InvalidLocator(remote.into()));
    }
    if !remote.starts_with("https://") && !remote.starts_with("git@") {
        return Err(InvalidLocator(remote.into()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '~' | '/' | ':' | '@');
    if !remote.chars().all(allowed) {
        return Err(InvalidLocator(remote.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_remote() {
        assert!(validate_locator("https://github.com/example/notes-app.git").is_ok());
    }

    #[test]
    fn accepts_ssh_remote() {
        assert!(validate_locator("git@github.com:example/notes-app.git").is_ok());
    }

    #[test]
    fn rejects_shell_metacharacters() {
        assert!(validate_locator("https://github.com/x.git; rm -rf /").is_err());
        assert!(validate_locator("https://github.com/x.git && curl evil").is_err());
        assert!(validate_locator("https://github.com/x.git$(id)").is_err());
    }

    #[test]
    fn rejects_option_injection() {
        assert!(validate_locator("--upload-pack=/bin/sh").is_err());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(validate_locator("http://github.com/example/notes-app.git").is_err());
        assert!(validate_locator("file:///etc/passwd").is_err());
    }

    #[test]
    fn rejects_empty_locator() {
        assert!(validate_locator("").is_err());
    }
}
