/// Reusable UI components

use crate::operations::Command;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CommandButtonProps {
    pub command: Command,
    #[prop_or_default]
    pub shortcut: Option<String>,
    #[prop_or(false)]
    pub disabled: bool,
    pub onclick: Callback<Command>,
}

/// A command button with its keyboard shortcut on the right
#[function_component(CommandButton)]
pub fn command_button(props: &CommandButtonProps) -> Html {
    let onclick = {
        let command = props.command;
        props.onclick.reform(move |_: MouseEvent| command)
    };

    html! {
        <Button onclick={onclick} disabled={props.disabled} variant={ButtonVariant::Secondary} block={true}>
            <span class="command-label">{props.command.label()}</span>
            <span class="command-shortcut">
                {props.shortcut.clone().unwrap_or_default()}
            </span>
        </Button>
    }
}

#[derive(Properties, PartialEq)]
pub struct EnableToggleProps {
    pub enabled: bool,
    pub onchange: Callback<bool>,
}

#[function_component(EnableToggle)]
pub fn enable_toggle(props: &EnableToggleProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        e.target_dyn_into::<web_sys::HtmlInputElement>()
            .map(|input| input.checked())
            .unwrap_or(false)
    });

    html! {
        <label class="pf-v5-c-switch enable-toggle">
            <input
                class="pf-v5-c-switch__input"
                type="checkbox"
                checked={props.enabled}
                onchange={onchange}
            />
            <span class="pf-v5-c-switch__toggle"></span>
            <span class="pf-v5-c-switch__label">
                {if props.enabled { "Enabled" } else { "Disabled" }}
            </span>
        </label>
    }
}
