/// Static navigation configuration: console routes and AEM environments
use crate::error::NavError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route templates for the touch UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchRoutes {
    pub xf: String,
    pub dam: String,
    pub sites: String,
    pub editor: String,
    pub props: String,
    pub forms: String,
}

/// Route templates for the classic UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicRoutes {
    pub xf: String,
    pub dam: String,
    pub sites: String,
    pub editor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    pub touch: TouchRoutes,
    pub classic: ClassicRoutes,
}

/// A deployment tier such as qa or prod
///
/// `instances` maps an instance key to the base URL of that instance. The
/// same key in two environments means "the same instance, other tier".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub patterns: Vec<String>,
    pub instances: BTreeMap<String, String>,
}

impl Environment {
    pub fn matches_host(&self, host: &str) -> bool {
        self.patterns.iter().any(|p| host.contains(p.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    pub routes: RouteTable,
    pub environments: Vec<Environment>,
}

impl NavConfig {
    /// Parse a config document, e.g. an override saved in extension storage
    pub fn from_json(json: &str) -> Result<NavConfig, NavError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a URL belongs to any configured deployment
    pub fn is_known_url(&self, url: &str) -> bool {
        self.environments
            .iter()
            .flat_map(|env| env.patterns.iter())
            .any(|p| url.contains(p.as_str()))
    }
}

fn instances(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, url)| (key.to_string(), url.to_string()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable {
            touch: TouchRoutes {
                xf: "/aem/experience-fragments.html".to_string(),
                dam: "/assets.html".to_string(),
                sites: "/sites.html".to_string(),
                editor: "/editor.html".to_string(),
                props: "/mnt/overlay/wcm/core/content/sites/properties.html".to_string(),
                forms: "/aem/forms.html/content/dam/formsanddocuments".to_string(),
            },
            classic: ClassicRoutes {
                xf: "/siteadmin#/content/experience-fragments".to_string(),
                dam: "/damadmin#/content/dam".to_string(),
                sites: "/siteadmin#/content".to_string(),
                editor: "?wcmmode=classic".to_string(),
            },
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            routes: RouteTable::default(),
            environments: vec![
                Environment {
                    name: "qa".to_string(),
                    patterns: strings(&[
                        "author-astellas-qa-65.adobecqms.net",
                        "author1apnortheast1-b80.qa.astellas.adobecqms.net",
                        "18.180.111.160",
                    ]),
                    instances: instances(&[
                        ("65", "https://author-astellas-qa-65.adobecqms.net"),
                        ("b80", "https://author1apnortheast1-b80.qa.astellas.adobecqms.net"),
                        ("ip", "https://18.180.111.160"),
                    ]),
                },
                Environment {
                    name: "prod".to_string(),
                    patterns: strings(&[
                        "author-astellas-prod-65.adobecqms.net",
                        "author1useast1-b80.prod-65.astellas.adobecqms.net",
                        "54.243.158.24",
                    ]),
                    instances: instances(&[
                        ("65", "https://author-astellas-prod-65.adobecqms.net"),
                        ("b80", "https://author1useast1-b80.prod-65.astellas.adobecqms.net"),
                        ("ip", "https://54.243.158.24"),
                    ]),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'c>(config: &'c NavConfig, name: &str) -> &'c Environment {
        config.environments.iter().find(|e| e.name == name).unwrap()
    }

    #[test]
    fn test_default_environments() {
        let config = NavConfig::default();
        let names: Vec<&str> = config.environments.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["qa", "prod"]);

        // Every instance key has a counterpart in the other tier
        let qa = env(&config, "qa");
        let prod = env(&config, "prod");
        assert_eq!(
            qa.instances.keys().collect::<Vec<_>>(),
            prod.instances.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_matches_host() {
        let config = NavConfig::default();
        let qa = env(&config, "qa");
        assert!(qa.matches_host("author-astellas-qa-65.adobecqms.net"));
        assert!(qa.matches_host("18.180.111.160"));
        assert!(!qa.matches_host("author-astellas-prod-65.adobecqms.net"));
    }

    #[test]
    fn test_is_known_url() {
        let config = NavConfig::default();
        assert!(config.is_known_url("https://54.243.158.24/sites.html/content"));
        assert!(!config.is_known_url("https://www.google.com/"));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::to_string(&NavConfig::default()).unwrap();
        let parsed = NavConfig::from_json(&json).unwrap();
        assert_eq!(parsed, NavConfig::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = NavConfig::from_json("{\"routes\": 3}").unwrap_err();
        assert!(matches!(err, NavError::Config(_)));
    }
}
