/// Popup UI for AEM Swift Nav

use crate::operations::{Command, Navigator};
use crate::storage::{Settings, CONFIG_KEY, ENABLED_KEY};
use crate::ui::components::{CommandButton, EnableToggle};
use patternfly_yew::prelude::*;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const LOGIN_PATH: &str = "/libs/granite/core/content/login.html";

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getCommandShortcuts() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn triggerCommand(command: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openUrl(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openShortcutsPage() -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
struct LoginLink {
    label: String,
    url: String,
}

fn login_links(navigator: &Navigator) -> Vec<LoginLink> {
    navigator
        .config()
        .environments
        .iter()
        .flat_map(|env| {
            env.instances.iter().map(move |(key, base)| LoginLink {
                label: format!("{} · {}", env.name, key),
                url: format!("{}{}", base.trim_end_matches('/'), LOGIN_PATH),
            })
        })
        .collect()
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(Settings::new);
    let shortcuts = use_state(HashMap::<String, String>::new);
    let error = use_state(|| None::<String>);
    let links = use_state(|| login_links(&Navigator::default()));

    // Load settings, config override and shortcuts on mount
    {
        let settings = settings.clone();
        let shortcuts = shortcuts.clone();
        let links = links.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(value) = getStorage(ENABLED_KEY).await {
                    settings.set(Settings::from_stored(value.as_bool()));
                }
                if let Ok(value) = getStorage(CONFIG_KEY).await {
                    match Navigator::from_stored_config(value.as_string().as_deref()) {
                        Ok(navigator) => links.set(login_links(&navigator)),
                        Err(e) => error.set(Some(e.user_message())),
                    }
                }
                if let Ok(shortcuts_js) = getCommandShortcuts().await {
                    match serde_wasm_bindgen::from_value::<HashMap<String, String>>(shortcuts_js) {
                        Ok(map) => shortcuts.set(map),
                        Err(e) => log::warn!("Failed to parse shortcuts: {:?}", e),
                    }
                }
            });
            || ()
        });
    }

    let on_toggle = {
        let settings = settings.clone();
        let error = error.clone();
        Callback::from(move |enabled: bool| {
            let mut next = *settings;
            next.set_enabled(enabled);
            settings.set(next);

            let error = error.clone();
            spawn_local(async move {
                if let Err(e) = setStorage(ENABLED_KEY, JsValue::from_bool(enabled)).await {
                    error.set(Some(format!("Failed to save: {:?}", e)));
                }
            });
        })
    };

    let on_command = {
        let settings = settings.clone();
        let error = error.clone();
        Callback::from(move |command: Command| {
            if !settings.is_enabled() {
                return;
            }
            let error = error.clone();
            spawn_local(async move {
                if let Err(e) = triggerCommand(command.id()).await {
                    error.set(Some(format!("{} failed: {:?}", command.label(), e)));
                }
            });
        })
    };

    let on_login = {
        let settings = settings.clone();
        let error = error.clone();
        move |url: String| {
            let settings = settings.clone();
            let error = error.clone();
            Callback::from(move |_: MouseEvent| {
                if !settings.is_enabled() {
                    return;
                }
                let url = url.clone();
                let error = error.clone();
                spawn_local(async move {
                    if let Err(e) = openUrl(&url).await {
                        error.set(Some(format!("Failed to open {}: {:?}", url, e)));
                    }
                });
            })
        }
    };

    let on_shortcuts = {
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let error = error.clone();
            spawn_local(async move {
                if let Err(e) = openShortcutsPage().await {
                    error.set(Some(format!("Failed to open shortcuts: {:?}", e)));
                }
            });
        })
    };

    let disabled = !settings.is_enabled();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"AEM Swift Nav"}</h1>

            <EnableToggle enabled={settings.is_enabled()} onchange={on_toggle} />

            if let Some(err) = (*error).clone() {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err}
                </Alert>
            }

            <div class="flex-column-gap">
                {for Command::ALL.iter().map(|command| html! {
                    <CommandButton
                        command={*command}
                        shortcut={shortcuts.get(command.id()).cloned()}
                        disabled={disabled}
                        onclick={on_command.clone()}
                    />
                })}
            </div>

            <h2 class="section-title">{"Login"}</h2>
            <div class="flex-column-gap">
                {for links.iter().map(|link| html! {
                    <Button onclick={on_login(link.url.clone())} disabled={disabled} variant={ButtonVariant::Link}>
                        {&link.label}
                    </Button>
                })}
            </div>

            <Button onclick={on_shortcuts} variant={ButtonVariant::Tertiary} block={true}>
                {"Edit shortcuts"}
            </Button>
        </div>
    }
}
