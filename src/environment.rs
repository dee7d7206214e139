/// Switching the current page between mirrored AEM environments
use crate::config::{Environment, NavConfig};
use crate::error::NavError;
use crate::rewriter::origin_of;
use url::{Position, Url};

/// Detect the environment the URL belongs to
pub fn detect_environment<'c>(config: &'c NavConfig, url: &Url) -> Result<&'c Environment, NavError> {
    let host = url.host_str().unwrap_or_default();
    config
        .environments
        .iter()
        .find(|env| env.matches_host(host))
        .ok_or(NavError::EnvironmentNotDetected)
}

/// Find the instance key whose base URL is the current origin
///
/// An exact origin match wins; otherwise the first instance whose host
/// appears in the origin is taken.
pub fn detect_instance<'e>(env: &'e Environment, origin: &str) -> Result<&'e str, NavError> {
    let exact = env
        .instances
        .iter()
        .find(|(_, base)| base.trim_end_matches('/') == origin);

    let by_host = || {
        env.instances.iter().find(|(_, base)| {
            Url::parse(base)
                .ok()
                .and_then(|base| base.host_str().map(|h| origin.contains(h)))
                .unwrap_or(false)
        })
    };

    exact
        .or_else(by_host)
        .map(|(key, _)| key.as_str())
        .ok_or(NavError::InstanceNotDetected)
}

/// Rewrite `url` onto the same instance of the next environment
///
/// Environments form a ring in configuration order, so two environments
/// simply swap. Path, query and fragment are kept verbatim.
pub fn switch_environment(config: &NavConfig, url: &Url) -> Result<String, NavError> {
    let current = detect_environment(config, url)?;
    let origin = origin_of(url);
    let instance = detect_instance(current, &origin)?;
    let next = next_environment(config, current)?;

    let base = next
        .instances
        .get(instance)
        .ok_or(NavError::InstanceNotDetected)?;

    let destination = format!("{}{}", base.trim_end_matches('/'), &url[Position::BeforePath..]);
    log::info!(
        "Switching {} → {} on instance {}: {}",
        current.name, next.name, instance, destination
    );
    Ok(destination)
}

fn next_environment<'c>(config: &'c NavConfig, current: &Environment) -> Result<&'c Environment, NavError> {
    let envs = &config.environments;
    let idx = envs
        .iter()
        .position(|env| env.name == current.name)
        .ok_or(NavError::EnvironmentNotDetected)?;
    if envs.len() < 2 {
        return Err(NavError::NoOtherEnvironment(current.name.clone()));
    }
    Ok(&envs[(idx + 1) % envs.len()])
}
