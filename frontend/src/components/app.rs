use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use super::categories::CategoriesPage;
use super::dashboard::DashboardPage;
use super::layout::Layout;
use super::login::LoginPage;
use super::otp::OtpPage;
use super::profile::ProfilePage;
use super::register::RegisterPage;
use super::transaction_form::TransactionFormPage;
use super::transactions::TransactionsPage;
use crate::guard::Protected;
use crate::hooks::use_config;
use crate::notify::{use_toaster_state, ToastHost, Toaster};
use crate::routes::{Location, Navigator, Route};
use crate::session::SessionContext;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_config();
    let session = use_memo(|_| SessionContext::restore(), ());
    let location = use_state(Location::current);
    let navigator = Navigator::new(location.clone());
    let toaster = use_toaster_state(config.toast_timeout_ms);

    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = Closure::<dyn Fn(web_sys::Event)>::new(move |_: web_sys::Event| {
                    navigator.sync_from_address_bar()
                });
                if let Some(window) = &window {
                    if let Err(err) = window.add_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    ) {
                        log::warn!("could not listen for popstate: {:?}", err);
                    }
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "popstate",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                    drop(listener);
                }
            },
            (),
        );
    }

    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |route: &Route| {
                if *route == Route::NotFound {
                    log::info!("unknown path; back to sign-in");
                    navigator.replace(Route::Login);
                }
                || ()
            },
            location.route.clone(),
        );
    }

    let route = location.route.clone();
    let page = match &route {
        Route::Login | Route::NotFound => html! { <LoginPage /> },
        Route::Otp => html! { <OtpPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Transactions => html! { <TransactionsPage /> },
        Route::AddTransaction => html! { <TransactionFormPage /> },
        Route::EditTransaction(id) => html! { <TransactionFormPage edit_id={Some(*id)} /> },
        Route::Categories => html! { <CategoriesPage /> },
        Route::Profile => html! { <ProfilePage /> },
    };
    let content = if route.is_protected() {
        html! {
            <Protected>
                <Layout active={route.clone()}>{ page }</Layout>
            </Protected>
        }
    } else {
        page
    };

    html! {
        <ContextProvider<SessionContext> context={(*session).clone()}>
            <ContextProvider<Navigator> context={navigator}>
                <ContextProvider<Toaster> context={toaster}>
                    <ToastHost />
                    { content }
                </ContextProvider<Toaster>>
            </ContextProvider<Navigator>>
        </ContextProvider<SessionContext>>
    }
}
