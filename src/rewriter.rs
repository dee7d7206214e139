/// URL rewriting between AEM consoles, editor and published views
use crate::config::RouteTable;
use crate::content_path::{
    extract_content_path, insert_forms_segment, is_forms_path, parent_path, project_path,
    strip_editor_chrome, strip_html_suffix,
};
use crate::error::NavError;
use url::Url;

const CONTENT_ROOT: &str = "/content";
const DAM_ROOT: &str = "/content/dam";
const XF_ROOT: &str = "/content/experience-fragments";

/// Where a navigation command wants to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Sites,
    Dam,
    Xf,
    Editor,
    Props,
    Published,
    Forms,
}

/// Outcome of the synchronous part of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Ready(String),
    /// The destination depends on the form shown in the page
    NeedsFormPath { origin: String },
}

/// The page went away before the inspection answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionLost;

/// One-shot lookup of the form repository path in the current page
#[allow(async_fn_in_trait)]
pub trait PageInspector {
    /// `Ok(None)` when the page has no form container
    async fn form_repository_path(&self) -> Result<Option<String>, InspectionLost>;
}

pub fn parse_url(url: &str) -> Result<Url, NavError> {
    Url::parse(url).map_err(|source| NavError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

pub struct Rewriter<'a> {
    routes: &'a RouteTable,
}

impl<'a> Rewriter<'a> {
    pub fn new(routes: &'a RouteTable) -> Rewriter<'a> {
        Rewriter { routes }
    }

    /// Compute the destination for `target`, or ask for the form repository path
    pub fn route(&self, target: Target, url: &Url) -> Result<Route, NavError> {
        let origin = origin_of(url);

        let destination = match target {
            Target::Forms => return Ok(Route::NeedsFormPath { origin }),
            Target::Published => {
                let page = page_path(url);
                if is_forms_path(&page) {
                    return Err(NavError::NotApplicable);
                }
                format!("{}{}?wcmmode=disabled", origin, page)
            }
            Target::Props => {
                let page = page_path(url);
                format!("{}{}?item={}", origin, self.routes.touch.props, strip_html_suffix(&page))
            }
            Target::Sites | Target::Dam | Target::Xf | Target::Editor => {
                self.from_content_path(target, &origin, url)?
            }
        };

        log::debug!("{:?} from {} → {}", target, url, destination);
        Ok(Route::Ready(destination))
    }

    fn from_content_path(&self, target: Target, origin: &str, url: &Url) -> Result<String, NavError> {
        let touch = &self.routes.touch;
        let content = extract_content_path(url).ok_or(NavError::NoContentPath)?;
        let forms = is_forms_path(&content);

        if forms && target != Target::Editor {
            return Err(NavError::UnsupportedFromForms);
        }

        let parent = parent_path(&content);
        let project = project_path(parent);

        Ok(match target {
            Target::Sites => format!("{}{}{}", origin, touch.sites, parent),
            Target::Dam => format!("{}{}/content/dam/{}", origin, touch.dam, project),
            Target::Xf => format!(
                "{}{}/content/experience-fragments/{}/site",
                origin, touch.xf, project
            ),
            _ if forms => format!("{}{}{}", origin, touch.editor, insert_forms_segment(&content)),
            _ => format!("{}{}{}", origin, touch.editor, content),
        })
    }

    /// Forms console, or the editor for the form the page reported
    pub fn forms_destination(&self, origin: &str, repository_path: Option<&str>) -> String {
        let touch = &self.routes.touch;
        match repository_path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}{}{}", origin, touch.editor, path),
            None => format!("{}{}", origin, touch.forms),
        }
    }

    /// Full navigation, awaiting the page inspector once for the forms target
    ///
    /// `Ok(None)` means the inspection was lost and there is nowhere to go.
    pub async fn navigate<I: PageInspector>(
        &self,
        target: Target,
        url: &Url,
        inspector: &I,
    ) -> Result<Option<String>, NavError> {
        match self.route(target, url)? {
            Route::Ready(destination) => Ok(Some(destination)),
            Route::NeedsFormPath { origin } => match inspector.form_repository_path().await {
                Ok(repository_path) => {
                    Ok(Some(self.forms_destination(&origin, repository_path.as_deref())))
                }
                Err(InspectionLost) => {
                    log::debug!("Form inspection lost for {}", url);
                    Ok(None)
                }
            },
        }
    }

    /// Switch between the classic and touch flavour of the current view
    pub fn toggle_ui(&self, url: &Url) -> Result<String, NavError> {
        let origin = origin_of(url);
        let path = url.path();
        let touch = &self.routes.touch;
        let classic = &self.routes.classic;

        let siteadmin = path.starts_with("/siteadmin");
        if siteadmin || path.starts_with("/damadmin") {
            let content = url
                .fragment()
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .or_else(|| extract_content_path(url))
                .unwrap_or_else(|| "/".to_string());
            let content = strip_html_suffix(&content);

            let route = if !siteadmin {
                &touch.dam
            } else if content.starts_with(XF_ROOT) {
                &touch.xf
            } else {
                &touch.sites
            };
            return Ok(format!("{}{}{}", origin, route, content));
        }

        let content = extract_content_path(url);
        let content_no_html = strip_html_suffix(content.as_deref().unwrap_or_default());

        if path.starts_with(touch.sites.as_str()) {
            Ok(format!("{}{}{}", origin, classic.sites, strip_root(content_no_html, CONTENT_ROOT)))
        } else if path.starts_with(touch.dam.as_str()) {
            Ok(format!("{}{}{}", origin, classic.dam, strip_root(content_no_html, DAM_ROOT)))
        } else if path.starts_with(touch.xf.as_str()) {
            Ok(format!("{}{}{}", origin, classic.xf, strip_root(content_no_html, XF_ROOT)))
        } else if path.starts_with(touch.editor.as_str()) {
            let content = content.ok_or(NavError::NoContentPath)?;
            Ok(format!("{}{}{}", origin, content, classic.editor))
        } else {
            Err(NavError::UnsupportedView)
        }
    }
}

/// Bare page path for published and properties views
///
/// The extracted content path when there is one, else the raw path without
/// editor chrome.
fn page_path(url: &Url) -> String {
    let page = extract_content_path(url)
        .unwrap_or_else(|| strip_editor_chrome(url.path()).to_string());
    strip_editor_chrome(&page).to_string()
}

fn strip_root<'p>(path: &'p str, root: &str) -> &'p str {
    path.strip_prefix(root).unwrap_or(path)
}

impl std::str::FromStr for Target {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sites" => Ok(Target::Sites),
            "dam" => Ok(Target::Dam),
            "xf" => Ok(Target::Xf),
            "editor" => Ok(Target::Editor),
            "props" => Ok(Target::Props),
            "published" => Ok(Target::Published),
            "forms" => Ok(Target::Forms),
            other => Err(NavError::UnknownCommand(other.to_string())),
        }
    }
}
