use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::shared::{bind, INPUT_CLASS};
use crate::auth_flow::{AuthEvent, AuthFlow, AuthStage};
use crate::error::GENERIC_FAILURE;
use crate::hooks::{use_api, use_session};
use crate::notify::use_toaster;
use crate::routes::{use_navigator, Route};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let stage = {
        let restored = AuthStage::of(&session.state);
        use_state(move || restored)
    };

    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |restored: &AuthStage| {
                if *restored == AuthStage::Authenticated {
                    if let Some(navigator) = navigator {
                        navigator.push(Route::Dashboard);
                    }
                }
                || ()
            },
            AuthStage::of(&session.state),
        );
    }

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let stage = stage.clone();
        let store = session.store.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let submitted = stage.next(AuthEvent::SubmitCredentials);
            if *stage == submitted {
                return;
            }
            stage.set(submitted);

            let email = (*email).clone();
            let password = (*password).clone();
            let api = api.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            let toaster = toaster.clone();
            let stage = stage.clone();
            spawn_local(async move {
                match AuthFlow::new(&*api, &*store)
                    .submit_credentials(&email, &password)
                    .await
                {
                    Ok(outcome) => {
                        if let Some(message) = outcome.message {
                            toaster.success(message);
                        }
                        stage.set(outcome.stage);
                        if let Some(navigator) = &navigator {
                            navigator.push_location(outcome.next);
                        }
                    }
                    Err(err) => {
                        toaster.failure(&err, GENERIC_FAILURE);
                        stage.set(submitted.next(AuthEvent::CredentialsRejected));
                    }
                }
            });
        })
    };

    let to_register = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(Route::Register);
            }
        })
    };

    let busy = *stage == AuthStage::CredentialsSubmitted;

    html! {
        <div class="min-h-screen flex bg-[#e8f5f0]">
            <div class="hidden md:flex flex-1 flex-col items-center justify-center bg-[#0a5c46] text-white p-12">
                <h1 class="text-4xl font-black tracking-tight">{"MoneyBank"}</h1>
                <p class="mt-3 text-white/80">{"Your trusted partner for smart financial management"}</p>
            </div>
            <div class="flex-1 flex items-center justify-center p-6">
                <div class="w-full max-w-md bg-white border border-slate-200 rounded-2xl shadow-lg p-8">
                    <div class="text-center mb-6">
                        <h2 class="text-2xl font-bold text-slate-800">{"Welcome Back!"}</h2>
                        <p class="text-sm text-slate-500 mt-2">{"Sign in to manage your finances"}</p>
                    </div>

                    <form class="space-y-4" onsubmit={on_submit}>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-slate-700">{"Email"}</label>
                            <input type="text" class={INPUT_CLASS} placeholder="Enter your email"
                                value={(*email).clone()} oninput={bind(&email)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-slate-700">{"Password"}</label>
                            <input type="password" class={INPUT_CLASS} placeholder="Enter your password"
                                value={(*password).clone()} oninput={bind(&password)} />
                        </div>
                        <button type="submit" class="w-full bg-[#10a37f] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity" disabled={busy}>
                            { if busy { "Logging in..." } else { "Login" } }
                        </button>
                    </form>

                    <p class="mt-6 text-center text-sm text-slate-500">
                        {"Don't have an account?"}
                        <button class="ml-2 text-[#10a37f] font-semibold" onclick={to_register}>{"Register"}</button>
                    </p>
                </div>
            </div>
        </div>
    }
}
