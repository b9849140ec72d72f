use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::shared::{
    bind_change, confirm, empty_state, loading_block, page_shell, StatCard, StatTone,
    INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON,
};
use crate::error::GENERIC_FAILURE;
use crate::format::{format_date, format_inr};
use crate::hooks::{use_api, use_session};
use crate::models::{Transaction, TransactionMode, TransactionQuery};
use crate::notify::use_toaster;
use crate::routes::{use_navigator, NavState, Route};
use crate::summary::Summary;

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let user_id = session.state.user.as_ref().map(|user| user.id);

    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let mode = use_state(String::new);
    let start_date = use_state(String::new);
    let end_date = use_state(String::new);
    // Filters in effect, plus a counter bumped to refetch with the same filters.
    let applied = use_state(|| (TransactionQuery::default(), 0u32));

    {
        let api = api.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |(user_id, (query, _)): &(Option<i64>, (TransactionQuery, u32))| {
                if let Some(user_id) = *user_id {
                    let query = TransactionQuery {
                        user_id,
                        ..query.clone()
                    };
                    loading.set(true);
                    spawn_local(async move {
                        match api.get_transactions(&query).await {
                            Ok(list) => transactions.set(list),
                            Err(err) => toaster.failure(&err, "Failed to fetch transactions"),
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            (user_id, (*applied).clone()),
        );
    }

    let on_apply = {
        let mode = mode.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let applied = applied.clone();
        Callback::from(move |_: MouseEvent| {
            let query = TransactionQuery {
                mode: TransactionMode::parse(&mode),
                start_date: (*start_date).clone(),
                end_date: (*end_date).clone(),
                ..TransactionQuery::default()
            };
            applied.set((query, applied.1 + 1));
        })
    };

    let on_clear = {
        let mode = mode.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let applied = applied.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(String::new());
            start_date.set(String::new());
            end_date.set(String::new());
            applied.set((TransactionQuery::default(), applied.1 + 1));
        })
    };

    let on_delete = {
        let api = api.clone();
        let toaster = toaster.clone();
        let applied = applied.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this transaction?") {
                return;
            }
            let api = api.clone();
            let toaster = toaster.clone();
            let applied = applied.clone();
            spawn_local(async move {
                match api.delete_transaction(id).await {
                    Ok(reply) => {
                        toaster.success(reply.message.unwrap_or_else(|| "Deleted".to_string()));
                        applied.set((applied.0.clone(), applied.1 + 1));
                    }
                    Err(err) => toaster.failure(&err, GENERIC_FAILURE),
                }
            });
        })
    };

    let on_edit = {
        let navigator = navigator.clone();
        Callback::from(move |transaction: Transaction| {
            if let Some(navigator) = &navigator {
                navigator.push_with_state(
                    Route::EditTransaction(transaction.id),
                    NavState::EditTransaction(transaction),
                );
            }
        })
    };

    let to_add = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(Route::AddTransaction);
            }
        })
    };

    if *loading {
        return loading_block("Loading transactions...");
    }

    let summary = Summary::of(&transactions);

    let filters = html! {
        <div class="bg-white rounded-2xl border border-slate-200 p-4 grid grid-cols-1 md:grid-cols-4 gap-4 items-end">
            <div class="space-y-1">
                <label class="text-sm font-medium text-slate-700">{"Transaction Type"}</label>
                <select class={INPUT_CLASS} onchange={bind_change(&mode)}>
                    <option value="" selected={mode.is_empty()}>{"All Types"}</option>
                    <option value="CREDIT" selected={*mode == "CREDIT"}>{"Income (Credit)"}</option>
                    <option value="DEBIT" selected={*mode == "DEBIT"}>{"Expense (Debit)"}</option>
                </select>
            </div>
            <div class="space-y-1">
                <label class="text-sm font-medium text-slate-700">{"From Date"}</label>
                <input type="date" class={INPUT_CLASS} value={(*start_date).clone()} onchange={bind_change(&start_date)} />
            </div>
            <div class="space-y-1">
                <label class="text-sm font-medium text-slate-700">{"To Date"}</label>
                <input type="date" class={INPUT_CLASS} value={(*end_date).clone()} onchange={bind_change(&end_date)} />
            </div>
            <div class="flex gap-2">
                <button class={PRIMARY_BUTTON} onclick={on_apply}>{"Apply Filters"}</button>
                <button class={SECONDARY_BUTTON} onclick={on_clear}>{"Clear"}</button>
            </div>
        </div>
    };

    let list = if transactions.is_empty() {
        html! {
            <div class="bg-white rounded-2xl border border-slate-200">
                { empty_state("📊", "No transactions found", "Start tracking your income and expenses") }
                <div class="text-center pb-8">
                    <button class={PRIMARY_BUTTON} onclick={to_add.clone()}>{"➕ Add Transaction"}</button>
                </div>
            </div>
        }
    } else {
        html! {
            <div class="space-y-3">
                { for transactions.iter().map(|transaction| {
                    let credit = transaction.mode == TransactionMode::Credit;
                    let amount_class = if credit { "text-[#10a37f]" } else { "text-[#dc3545]" };
                    let edit = {
                        let on_edit = on_edit.clone();
                        let transaction = transaction.clone();
                        Callback::from(move |_: MouseEvent| on_edit.emit(transaction.clone()))
                    };
                    let delete = {
                        let on_delete = on_delete.clone();
                        let id = transaction.id;
                        Callback::from(move |_: MouseEvent| on_delete.emit(id))
                    };
                    html! {
                        <div key={transaction.id} class="bg-white rounded-xl border border-slate-200 p-4 flex items-center justify-between">
                            <div class="flex items-center gap-4 min-w-0">
                                <div class={classes!("w-10", "h-10", "rounded-full", "flex", "items-center", "justify-center", "font-bold", "bg-slate-100", amount_class)}>
                                    { if credit { "↓" } else { "↑" } }
                                </div>
                                <div class="min-w-0">
                                    <h3 class="font-semibold text-slate-800">{ transaction.category_label() }</h3>
                                    <div class="flex flex-wrap gap-3 text-xs text-slate-500">
                                        <span>{ format!("📅 {}", format_date(transaction.date.as_deref().unwrap_or_default())) }</span>
                                        <span>{ format!("🕐 {}", transaction.time.as_deref().unwrap_or_default()) }</span>
                                        if let Some(description) = transaction.description.as_ref().filter(|d| !d.is_empty()) {
                                            <span>{ format!("📝 {}", description) }</span>
                                        }
                                    </div>
                                </div>
                            </div>
                            <div class="flex items-center gap-4 shrink-0">
                                <div class={classes!("font-bold", amount_class)}>
                                    { format!("{}{}", transaction.mode.sign(), format_inr(transaction.amount)) }
                                </div>
                                <button title="Edit" onclick={edit}>{"✏️"}</button>
                                <button title="Delete" onclick={delete}>{"🗑️"}</button>
                            </div>
                        </div>
                    }
                }) }
            </div>
        }
    };

    page_shell(
        "Transactions",
        html! { <button class={PRIMARY_BUTTON} onclick={to_add}>{"➕ Add Transaction"}</button> },
        html! {
            <>
                { filters }
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <StatCard title="Total Income" icon="💰" amount={summary.income} tone={StatTone::Income} />
                    <StatCard title="Total Expense" icon="💸" amount={summary.expense} tone={StatTone::Expense} />
                    <div class="bg-white p-6 rounded-[10px] shadow-sm border border-slate-200">
                        <span class="text-slate-500 text-[11px] font-bold tracking-widest uppercase">{"Transactions"}</span>
                        <h3 class="text-2xl font-bold text-slate-800">{ summary.count }</h3>
                    </div>
                </div>
                { list }
            </>
        },
    )
}
