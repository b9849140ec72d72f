use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::shared::{empty_state, loading_block, StatCard, StatTone};
use crate::category_art::{dashboard_art, prefetch_files, CategoryArt};
use crate::format::{current_hour, format_inr, greeting, today_long, truncate_text};
use crate::hooks::{use_api, use_config, use_session};
use crate::image_cache::{fetch_object_url, ImageCache, ObjectUrlReleaser, ReleaseUrl};
use crate::models::{Transaction, TransactionMode, TransactionQuery};
use crate::notify::use_toaster;
use crate::routes::{use_navigator, Route};
use crate::summary::Summary;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let session = use_session();
    let api = use_api();
    let config = use_config();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let cache: Rc<RefCell<ImageCache>> = use_mut_ref(|| {
        ImageCache::new(config.image_cache_capacity, ObjectUrlReleaser)
    });
    let cached = use_force_update();

    let user_id = session.state.user.as_ref().map(|user| user.id);

    {
        let api = api.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |user_id: &Option<i64>| {
                if let Some(user_id) = *user_id {
                    loading.set(true);
                    spawn_local(async move {
                        match api.get_transactions(&TransactionQuery::today(user_id)).await {
                            Ok(list) => transactions.set(list),
                            Err(err) => toaster.failure(&err, "Failed to fetch transactions"),
                        }
                        loading.set(false);
                    });
                } else {
                    loading.set(false);
                }
                || ()
            },
            user_id,
        );
    }

    {
        let api = api.clone();
        let cache = cache.clone();
        use_effect_with_deps(
            move |list: &Vec<Transaction>| {
                let cancelled = Rc::new(Cell::new(false));
                let files = prefetch_files(list);
                if !files.is_empty() {
                    let cancelled = cancelled.clone();
                    spawn_local(async move {
                        for file in files {
                            if cancelled.get() {
                                break;
                            }
                            if cache.borrow().contains(file) {
                                continue;
                            }
                            let Some(source) = api.image_url(file) else {
                                continue;
                            };
                            match fetch_object_url(&source).await {
                                Ok(url) if cancelled.get() => ObjectUrlReleaser.release(&url),
                                Ok(url) => {
                                    cache.borrow_mut().insert(file, url);
                                    cached.force_update();
                                }
                                Err(err) => log::debug!("prefetch of {} skipped: {}", file, err),
                            }
                        }
                    });
                }
                move || cancelled.set(true)
            },
            (*transactions).clone(),
        );
    }

    let summary = Summary::of(&transactions);
    let name = session
        .state
        .user
        .as_ref()
        .map(|user| user.display_name().to_string())
        .unwrap_or_else(|| "User".to_string());

    let view_all = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(Route::Transactions);
            }
        })
    };

    if *loading {
        return loading_block("Loading dashboard...");
    }

    let art = |transaction: &Transaction| -> Html {
        match dashboard_art(transaction) {
            CategoryArt::Image(file) => {
                let src = cache
                    .borrow_mut()
                    .get(file)
                    .map(str::to_string)
                    .or_else(|| api.image_url(file))
                    .unwrap_or_default();
                html! { <img src={src} alt={file} class="w-8 h-8 object-contain" /> }
            }
            CategoryArt::PersonLogo(path) => {
                html! { <img src={path} alt="person" class="w-8 h-8 object-contain" /> }
            }
            CategoryArt::Emoji(emoji) => html! { <span class="text-xl">{ emoji }</span> },
        }
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-6">
            <div class="rounded-2xl bg-gradient-to-r from-[#0a5c46] to-[#10a37f] text-white p-6">
                <p class="text-white/80">{ format!("{}, welcome back,", greeting(current_hour())) }</p>
                <h1 class="text-3xl font-black">{ format!("{} 👋", name) }</h1>
                <p class="text-white/80 mt-1">{ today_long() }</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard title="Total Income" icon="💰" amount={summary.income} tone={StatTone::Income} />
                <StatCard title="Total Expense" icon="💸" amount={summary.expense} tone={StatTone::Expense} />
                <StatCard title="Balance" icon="🏦" amount={summary.balance()} tone={StatTone::Neutral} />
            </div>

            <div class="bg-white rounded-2xl border border-slate-200 shadow-sm">
                <div class="flex items-center justify-between px-6 py-4 border-b border-slate-200">
                    <h2 class="text-lg font-bold text-slate-800">{"Today's Transactions"}</h2>
                    <button class="text-sm font-semibold text-[#10a37f]" onclick={view_all}>{"View All →"}</button>
                </div>
                if transactions.is_empty() {
                    { empty_state("📭", "No transactions today", "Start tracking your expenses!") }
                } else {
                    <div class="divide-y divide-slate-100">
                        { for transactions.iter().map(|transaction| {
                            let credit = transaction.mode == TransactionMode::Credit;
                            let amount_class = if credit { "text-[#10a37f]" } else { "text-[#dc3545]" };
                            html! {
                                <div key={transaction.id} class="flex items-center justify-between px-6 py-4">
                                    <div class="flex items-center gap-4 min-w-0">
                                        <div class={classes!("w-12", "h-12", "rounded-full", "flex", "items-center", "justify-center", "bg-slate-100", transaction.mode.css_class())}>
                                            { art(transaction) }
                                        </div>
                                        <div class="min-w-0">
                                            <h4 class="font-semibold text-slate-800">{ transaction.category_label() }</h4>
                                            <p class="text-sm text-slate-500 truncate" title={transaction.description.clone().unwrap_or_default()}>
                                                { transaction.description.as_deref().map(|d| truncate_text(d, 50)).unwrap_or_else(|| "No description".to_string()) }
                                            </p>
                                        </div>
                                    </div>
                                    <div class="text-right shrink-0">
                                        <div class={classes!("font-bold", amount_class)}>
                                            { format!("{}{}", transaction.mode.sign(), format_inr(transaction.amount)) }
                                        </div>
                                        <div class="text-xs text-slate-400">
                                            { transaction.time.clone().or_else(|| transaction.date.clone()).unwrap_or_default() }
                                        </div>
                                    </div>
                                </div>
                            }
                        }) }
                    </div>
                }
            </div>
        </div>
    }
}
