use yew::prelude::*;

use crate::format::format_inr;

pub const INPUT_CLASS: &str = "w-full px-4 py-2 bg-white border border-slate-300 rounded-lg text-slate-800 focus:outline-none focus:ring-2 focus:ring-[#10a37f]";
pub const PRIMARY_BUTTON: &str = "bg-[#10a37f] text-white px-4 py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-50";
pub const SECONDARY_BUTTON: &str = "bg-slate-100 text-slate-700 px-4 py-2 rounded-lg font-semibold hover:bg-slate-200 transition-colors";

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-slate-200">
                <h1 class="text-2xl font-bold text-[#0a5c46]">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn loading_block(text: &'static str) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-16 text-slate-500 gap-3">
            <div class="w-8 h-8 border-4 border-[#10a37f] border-t-transparent rounded-full animate-spin"></div>
            <p>{ text }</p>
        </div>
    }
}

pub fn empty_state(icon: &'static str, title: &'static str, hint: &'static str) -> Html {
    html! {
        <div class="text-center py-12 text-slate-500">
            <div class="text-4xl mb-2">{ icon }</div>
            <h3 class="font-bold text-slate-700">{ title }</h3>
            <p class="text-sm">{ hint }</p>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatTone {
    Income,
    Expense,
    Neutral,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub icon: &'static str,
    pub amount: f64,
    pub tone: StatTone,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let value_class = match props.tone {
        StatTone::Income => "text-[#10a37f]",
        StatTone::Expense => "text-[#dc3545]",
        StatTone::Neutral => "text-slate-800",
    };

    html! {
        <div class="bg-white p-6 rounded-[10px] shadow-sm border border-slate-200">
            <div class="flex items-center gap-2 mb-2">
                <span class="text-xl">{ props.icon }</span>
                <span class="text-slate-500 text-[11px] font-bold tracking-widest uppercase">{ props.title }</span>
            </div>
            <h3 class={classes!("text-2xl", "font-bold", "tracking-tight", value_class)}>{ format_inr(props.amount) }</h3>
        </div>
    }
}

/// Reads the value of the input, select or textarea an event came from.
pub fn input_value(e: &Event) -> String {
    use wasm_bindgen::JsCast;

    let target = match e.target() {
        Some(target) => target,
        None => return String::new(),
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// Keeps a text field in a `use_state` handle.
pub fn bind(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| handle.set(input_value(&e)))
}

pub fn bind_change(handle: &UseStateHandle<String>) -> Callback<Event> {
    let handle = handle.clone();
    Callback::from(move |e: Event| handle.set(input_value(&e)))
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
