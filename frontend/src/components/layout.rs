use yew::prelude::*;

use crate::auth_flow::AuthFlow;
use crate::hooks::{use_api, use_session};
use crate::routes::{use_navigator, Route};

struct NavItem {
    label: &'static str,
    route: Route,
    icon: &'static str,
}

fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem {
            label: "Dashboard",
            route: Route::Dashboard,
            icon: "📊",
        },
        NavItem {
            label: "Transactions",
            route: Route::Transactions,
            icon: "💸",
        },
        NavItem {
            label: "Add Transaction",
            route: Route::AddTransaction,
            icon: "➕",
        },
        NavItem {
            label: "Categories",
            route: Route::Categories,
            icon: "📁",
        },
        NavItem {
            label: "Profile",
            route: Route::Profile,
            icon: "👤",
        },
    ]
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active: Route,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();
    let sidebar_open = use_state(|| false);

    let go = {
        let navigator = navigator.clone();
        let sidebar_open = sidebar_open.clone();
        move |route: Route| {
            let navigator = navigator.clone();
            let sidebar_open = sidebar_open.clone();
            Callback::from(move |_: MouseEvent| {
                sidebar_open.set(false);
                if let Some(navigator) = &navigator {
                    navigator.push(route.clone());
                }
            })
        }
    };

    let on_logout = {
        let api = api.clone();
        let store = session.store.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let outcome = AuthFlow::new(&*api, &*store).sign_out();
            log::info!("signed out; now {:?}", outcome.stage);
            if let Some(navigator) = &navigator {
                navigator.push_location(outcome.next);
            }
        })
    };

    let toggle_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_: MouseEvent| sidebar_open.set(!*sidebar_open))
    };

    let user = session.state.user.as_ref();
    let name = user
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "User".to_string());
    let avatar = user
        .map(|u| u.avatar_url(api.image_base_url()))
        .unwrap_or_else(|| crate::models::generated_avatar_url(None));
    let logo = format!("{}logo.png", api.image_base_url());

    let sidebar_class = if *sidebar_open {
        "fixed md:static inset-y-0 left-0 z-40 w-[220px] bg-[#e8f5f0] p-4 flex flex-col"
    } else {
        "hidden md:flex w-[220px] bg-[#e8f5f0] p-4 flex-col"
    };

    html! {
        <div class="flex h-screen bg-slate-50">
            if *sidebar_open {
                <div class="fixed inset-0 bg-black/30 z-30 md:hidden" onclick={toggle_sidebar.clone()}></div>
            }
            <aside class={sidebar_class}>
                <div class="flex items-center gap-3 px-2 mb-8">
                    <img src={logo} alt="MoneyBank" class="w-10 h-10 rounded-full object-cover" />
                    <span class="text-[#0a5c46] text-2xl font-black tracking-tight">{"MoneyBank"}</span>
                </div>

                <nav class="flex-1 space-y-2">
                    { for nav_items().into_iter().map(|item| {
                        let class_name = if item.route == props.active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium bg-[#10a37f] text-white w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium text-slate-600 hover:bg-white w-full"
                        };
                        html! {
                            <button type="button" class={class_name} onclick={go(item.route.clone())}>
                                <span class="shrink-0">{ item.icon }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white transition-colors text-[13px] font-medium text-slate-600">
                        <span>{"🚪"}</span>
                        <span>{"Logout"}</span>
                    </button>
                </div>
            </aside>

            <div class="flex-1 flex flex-col overflow-hidden">
                <header class="bg-white border-b border-slate-200 h-16 flex items-center justify-between px-6">
                    <div class="flex items-center gap-3">
                        <button class="md:hidden p-2" aria-label="Menu" onclick={toggle_sidebar}>
                            <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#0a5c46" stroke-width="2">
                                <path d="M3 12h18M3 6h18M3 18h18" />
                            </svg>
                        </button>
                        <h1 class="text-lg font-bold text-[#0a5c46]">{"MoneyBank"}</h1>
                    </div>
                    <button class="flex items-center gap-2" onclick={go(Route::Profile)}>
                        <img src={avatar} alt="Profile" class="w-9 h-9 rounded-full object-cover" />
                        <span class="text-sm font-semibold text-slate-700">{ name }</span>
                    </button>
                </header>
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}
