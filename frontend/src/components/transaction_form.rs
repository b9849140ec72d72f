use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::shared::{input_value, page_shell, INPUT_CLASS, PRIMARY_BUTTON};
use crate::error::{ApiError, GENERIC_FAILURE};
use crate::format::current_time_string;
use crate::forms::TransactionDraft;
use crate::hooks::{use_api, use_session};
use crate::models::{Category, Id, TransactionMode};
use crate::notify::use_toaster;
use crate::routes::{use_navigator, Route};

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    /// Set when editing an existing transaction.
    #[prop_or_default]
    pub edit_id: Option<Id>,
}

#[function_component(TransactionFormPage)]
pub fn transaction_form_page(props: &TransactionFormProps) -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let edit_id = props.edit_id;
    let draft = {
        let navigator = navigator.clone();
        use_state(move || {
            let existing = navigator.as_ref().and_then(|navigator| {
                navigator
                    .location()
                    .transaction()
                    .filter(|transaction| Some(transaction.id) == edit_id)
                    .map(TransactionDraft::from_transaction)
            });
            match (edit_id, existing) {
                (_, Some(draft)) => draft,
                (Some(id), None) => {
                    log::warn!("editing transaction {} without its details", id);
                    TransactionDraft::default()
                }
                (None, None) => TransactionDraft::new(current_time_string()),
            }
        })
    };
    let categories = use_state(Vec::<Category>::new);
    let categories_loading = use_state(|| true);
    let saving = use_state(|| false);

    {
        let api = api.clone();
        let categories = categories.clone();
        let categories_loading = categories_loading.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.get_categories(None).await {
                        Ok(list) => categories.set(list),
                        Err(err) => toaster.failure(&err, "Failed to fetch categories"),
                    }
                    categories_loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let edit = |apply: fn(&mut TransactionDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            apply(&mut next, input_value(&e));
            draft.set(next);
        })
    };
    let on_amount = edit(|d, v| d.amount = v);
    let on_category = edit(|d, v| d.category_id = v);
    let on_time = edit(|d, v| d.time = v);
    let on_description = edit(|d, v| d.description = v);

    let set_mode = |mode: TransactionMode| {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*draft).clone();
            next.mode = mode;
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let saving = saving.clone();
        let user_id = session.state.user.as_ref().map(|user| user.id);
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let api = api.clone();
            let toaster = toaster.clone();
            let navigator = navigator.clone();
            let saving = saving.clone();
            let draft = (*draft).clone();

            saving.set(true);
            spawn_local(async move {
                let result = match edit_id {
                    Some(id) => match draft.to_update() {
                        Ok(update) => api.update_transaction(id, &update).await,
                        Err(err) => Err(err),
                    },
                    None => match user_id {
                        Some(user_id) => match draft.to_new(user_id) {
                            Ok(transaction) => api.create_transaction(&transaction).await,
                            Err(err) => Err(err),
                        },
                        None => Err(ApiError::validation("Sign in again to add transactions")),
                    },
                };
                match result {
                    Ok(reply) => {
                        toaster.success(reply.message.unwrap_or_else(|| "Saved".to_string()));
                        if let Some(navigator) = &navigator {
                            navigator.push(Route::Transactions);
                        }
                    }
                    Err(err) => toaster.failure(&err, GENERIC_FAILURE),
                }
                saving.set(false);
            });
        })
    };

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.back();
            }
        })
    };

    let editing = edit_id.is_some();
    let mode_button = |mode: TransactionMode, label: &'static str| {
        let active = draft.mode == mode;
        let class = match (active, mode) {
            (true, TransactionMode::Credit) => "flex-1 py-2 rounded-lg font-semibold bg-[#10a37f] text-white",
            (true, TransactionMode::Debit) => "flex-1 py-2 rounded-lg font-semibold bg-[#dc3545] text-white",
            (false, _) => "flex-1 py-2 rounded-lg font-semibold bg-slate-100 text-slate-600",
        };
        html! { <button type="button" class={class} onclick={set_mode(mode)}>{ label }</button> }
    };

    page_shell(
        if editing { "Edit Transaction" } else { "Add Transaction" },
        html! { <button class="text-sm text-[#10a37f] font-semibold" onclick={on_back}>{"← Back"}</button> },
        html! {
            <form class="bg-white rounded-2xl border border-slate-200 p-6 space-y-4 max-w-xl" onsubmit={on_submit}>
                <div class="flex gap-2">
                    { mode_button(TransactionMode::Credit, "Income") }
                    { mode_button(TransactionMode::Debit, "Expense") }
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Amount"}</label>
                    <input type="number" min="0" step="any" class={INPUT_CLASS} placeholder="Enter amount"
                        value={draft.amount.clone()} onchange={on_amount} />
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Category"}</label>
                    <select class={INPUT_CLASS} onchange={on_category} disabled={*categories_loading || editing}>
                        <option value="" selected={draft.category_id.is_empty()}>
                            { if *categories_loading { "Loading categories..." } else { "Select category" } }
                        </option>
                        { for categories.iter().map(|category| {
                            let value = category.id.to_string();
                            let selected = draft.category_id == value;
                            html! { <option value={value} {selected}>{ category.name.clone() }</option> }
                        }) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Time"}</label>
                    <input type="text" class={INPUT_CLASS} placeholder="hh:mm AM"
                        value={draft.time.clone()} onchange={on_time} />
                </div>
                <div class="space-y-1">
                    <label class="text-sm font-medium text-slate-700">{"Description"}</label>
                    <textarea class={INPUT_CLASS} rows="3" placeholder="What was it for?"
                        value={draft.description.clone()} onchange={on_description}></textarea>
                </div>
                <button type="submit" class={format!("{} w-full", PRIMARY_BUTTON)} disabled={*saving}>
                    { match (*saving, editing) {
                        (true, _) => "Saving...",
                        (false, true) => "Update Transaction",
                        (false, false) => "Add Transaction",
                    } }
                </button>
            </form>
        },
    )
}
