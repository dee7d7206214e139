/// Command dispatch: keyboard shortcut / popup command ids to navigation

use crate::config::NavConfig;
use crate::environment::switch_environment;
use crate::error::NavError;
use crate::rewriter::{parse_url, PageInspector, Rewriter, Target};
use crate::storage::Settings;
use std::str::FromStr;

/// Commands registered with the browser, one per core operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GoToSites,
    GoToDam,
    GoToXf,
    GoToForms,
    GoToPageProperties,
    ViewAsPublished,
    GoToEditor,
    ToggleUi,
    SwitchEnvironment,
}

/// What a command does once dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Navigate(Target),
    ToggleUi,
    SwitchEnvironment,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::GoToSites,
        Command::GoToDam,
        Command::GoToXf,
        Command::GoToForms,
        Command::GoToPageProperties,
        Command::ViewAsPublished,
        Command::GoToEditor,
        Command::ToggleUi,
        Command::SwitchEnvironment,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Command::GoToSites => "go-to-sites",
            Command::GoToDam => "go-to-dam",
            Command::GoToXf => "go-to-xf",
            Command::GoToForms => "go-to-forms",
            Command::GoToPageProperties => "go-to-page-properties",
            Command::ViewAsPublished => "view-as-published",
            Command::GoToEditor => "go-to-editor",
            Command::ToggleUi => "toggle-ui",
            Command::SwitchEnvironment => "switch-environment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::GoToSites => "Sites",
            Command::GoToDam => "Assets",
            Command::GoToXf => "Experience Fragments",
            Command::GoToForms => "Forms",
            Command::GoToPageProperties => "Page Properties",
            Command::ViewAsPublished => "View as Published",
            Command::GoToEditor => "Editor",
            Command::ToggleUi => "Toggle Classic/Touch UI",
            Command::SwitchEnvironment => "Switch Environment",
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Command::GoToSites => Operation::Navigate(Target::Sites),
            Command::GoToDam => Operation::Navigate(Target::Dam),
            Command::GoToXf => Operation::Navigate(Target::Xf),
            Command::GoToForms => Operation::Navigate(Target::Forms),
            Command::GoToPageProperties => Operation::Navigate(Target::Props),
            Command::ViewAsPublished => Operation::Navigate(Target::Published),
            Command::GoToEditor => Operation::Navigate(Target::Editor),
            Command::ToggleUi => Operation::ToggleUi,
            Command::SwitchEnvironment => Operation::SwitchEnvironment,
        }
    }
}

impl FromStr for Command {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| NavError::UnknownCommand(s.to_string()))
    }
}

/// Entry point for all commands, holding the immutable configuration
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: NavConfig,
}

impl Navigator {
    pub fn new(config: NavConfig) -> Navigator {
        Navigator { config }
    }

    /// Navigator for the config override kept in storage, if any
    pub fn from_stored_config(json: Option<&str>) -> Result<Navigator, NavError> {
        match json.filter(|j| !j.trim().is_empty()) {
            Some(json) => Ok(Navigator::new(NavConfig::from_json(json)?)),
            None => Ok(Navigator::default()),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Commands only act on known AEM hosts while the extension is enabled
    pub fn should_handle(&self, settings: &Settings, url: &str) -> bool {
        settings.is_enabled() && self.config.is_known_url(url)
    }

    /// Run one command against the current tab URL
    ///
    /// Returns the URL to open, or `None` when the page inspection for the
    /// forms command was lost.
    pub async fn run<I: PageInspector>(
        &self,
        command: Command,
        current_url: &str,
        inspector: &I,
    ) -> Result<Option<String>, NavError> {
        let url = parse_url(current_url)?;
        let rewriter = Rewriter::new(&self.config.routes);

        let destination = match command.operation() {
            Operation::Navigate(target) => rewriter.navigate(target, &url, inspector).await?,
            Operation::ToggleUi => Some(rewriter.toggle_ui(&url)?),
            Operation::SwitchEnvironment => Some(switch_environment(&self.config, &url)?),
        };

        match &destination {
            Some(to) => log::info!("{} → {}", command.id(), to),
            None => log::debug!("{} produced no destination", command.id()),
        }
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::InspectionLost;
    use std::future::Future;
    use std::task::{Context, Poll, Waker};

    const QA: &str = "https://author-astellas-qa-65.adobecqms.net";

    struct NoForm;

    impl PageInspector for NoForm {
        async fn form_repository_path(&self) -> Result<Option<String>, InspectionLost> {
            Ok(None)
        }
    }

    fn run(command: &str, url: &str) -> Result<Option<String>, NavError> {
        let navigator = Navigator::default();
        let command: Command = command.parse()?;
        let mut future = std::pin::pin!(navigator.run(command, url, &NoForm));
        match future.as_mut().poll(&mut Context::from_waker(Waker::noop())) {
            Poll::Ready(output) => output,
            Poll::Pending => panic!("command should finish immediately"),
        }
    }

    #[test]
    fn test_command_ids_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.id().parse::<Command>().unwrap(), command);
        }
        assert!(matches!(
            "go-nowhere".parse::<Command>(),
            Err(NavError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_every_target_has_a_command() {
        let targets: Vec<Target> = Command::ALL
            .iter()
            .filter_map(|c| match c.operation() {
                Operation::Navigate(target) => Some(target),
                _ => None,
            })
            .collect();
        assert_eq!(targets.len(), 7);
    }

    #[test]
    fn test_from_stored_config() {
        assert_eq!(
            Navigator::from_stored_config(None).unwrap().config(),
            &NavConfig::default()
        );
        assert_eq!(
            Navigator::from_stored_config(Some("  ")).unwrap().config(),
            &NavConfig::default()
        );

        let mut custom = NavConfig::default();
        custom.environments.reverse();
        let json = serde_json::to_string(&custom).unwrap();
        assert_eq!(Navigator::from_stored_config(Some(&json)).unwrap().config(), &custom);

        assert!(matches!(
            Navigator::from_stored_config(Some("{not json")),
            Err(NavError::Config(_))
        ));
    }

    #[test]
    fn test_should_handle() {
        let navigator = Navigator::default();
        let page = format!("{}/sites.html/content", QA);
        assert!(navigator.should_handle(&Settings::new(), &page));
        assert!(!navigator.should_handle(&Settings::from_stored(Some(false)), &page));
        assert!(!navigator.should_handle(&Settings::new(), "https://www.google.com/"));
    }

    #[test]
    fn test_run_go_to_sites() {
        assert_eq!(
            run("go-to-sites", &format!("{}/editor.html/content/acme/en/home", QA)).unwrap(),
            Some(format!("{}/sites.html/content/acme/en", QA))
        );
    }

    #[test]
    fn test_run_go_to_forms_landing() {
        assert_eq!(
            run("go-to-forms", &format!("{}/sites.html/content/acme", QA)).unwrap(),
            Some(format!("{}/aem/forms.html/content/dam/formsanddocuments", QA))
        );
    }

    #[test]
    fn test_run_toggle_and_switch() {
        assert_eq!(
            run("toggle-ui", &format!("{}/siteadmin#/content/acme/en/home.html", QA)).unwrap(),
            Some(format!("{}/sites.html/content/acme/en/home", QA))
        );
        assert_eq!(
            run("switch-environment", &format!("{}/sites.html/content/acme?q=1", QA)).unwrap(),
            Some("https://author-astellas-prod-65.adobecqms.net/sites.html/content/acme?q=1".to_string())
        );
    }

    #[test]
    fn test_run_surfaces_errors() {
        assert!(matches!(
            run("go-to-sites", &format!("{}/foo/bar", QA)),
            Err(NavError::NoContentPath)
        ));
        assert!(matches!(
            run("go-to-dam", &format!("{}/content/forms/af/acme/intake", QA)),
            Err(NavError::UnsupportedFromForms)
        ));
        assert!(matches!(
            run("go-to-sites", "not a url"),
            Err(NavError::InvalidUrl { .. })
        ));
    }
}
