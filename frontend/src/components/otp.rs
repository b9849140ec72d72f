use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::shared::input_value;
use crate::auth_flow::{accept_otp_digit, AuthEvent, AuthFlow, AuthStage, OTP_LENGTH};
use crate::error::ApiError;
use crate::hooks::{use_api, use_session};
use crate::notify::use_toaster;
use crate::routes::{use_navigator, Route};

fn focus(node: &NodeRef) {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        let _ = input.focus();
    }
}

#[function_component(OtpPage)]
pub fn otp_page() -> Html {
    let session = use_session();
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toaster();

    let digits = use_state(|| vec![String::new(); OTP_LENGTH]);
    let loading = use_state(|| false);
    let boxes = use_memo(|_| (0..OTP_LENGTH).map(|_| NodeRef::default()).collect::<Vec<_>>(), ());

    let email = navigator
        .as_ref()
        .and_then(|navigator| navigator.location().otp_email().map(str::to_string));

    let on_verify = {
        let digits = digits.clone();
        let loading = loading.clone();
        let store = session.store.clone();
        let navigator = navigator.clone();
        let toaster = toaster.clone();
        Callback::from(move |_: MouseEvent| {
            if *loading {
                return;
            }
            let code = digits.concat();
            let email = email.clone();
            let api = api.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            let toaster = toaster.clone();
            let loading = loading.clone();

            loading.set(true);
            spawn_local(async move {
                let result = AuthFlow::new(&*api, &*store)
                    .verify_otp(&code, email.as_deref())
                    .await;
                match result {
                    Ok(outcome) => {
                        if outcome.stage != AuthStage::Authenticated {
                            log::warn!(
                                "code accepted but still {:?}; sign-in will be asked again",
                                outcome.stage
                            );
                        }
                        if let Some(message) = outcome.message {
                            toaster.success(message);
                        }
                        if let Some(navigator) = &navigator {
                            navigator.push_location(outcome.next);
                        }
                    }
                    Err(err @ ApiError::Validation(_)) => toaster.failure(&err, "Enter 4 digit OTP"),
                    Err(err @ ApiError::Rejected { .. }) => {
                        let stage = AuthStage::OtpPending.next(AuthEvent::OtpRejected);
                        log::info!("code refused; still {:?}", stage);
                        toaster.failure(&err, "Invalid OTP");
                    }
                    Err(err) => {
                        log::warn!("OTP verification failed: {}", err);
                        toaster.error("Failed to verify");
                    }
                }
                loading.set(false);
            });
        })
    };

    let stage = AuthStage::of(&session.state);
    let to_login = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(Route::Login);
            }
        })
    };

    let on_resend = {
        let toaster = toaster.clone();
        Callback::from(move |_: MouseEvent| toaster.info("Resend OTP feature coming soon"))
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#e8f5f0] p-6">
            <div class="w-full max-w-sm bg-white rounded-2xl shadow-lg p-8 text-center">
                <h2 class="text-2xl font-bold text-slate-800">{"Verify OTP"}</h2>
                <p class="text-sm text-slate-500 mt-2">{"Enter the 4-digit code sent to your email"}</p>
                if stage == AuthStage::Anonymous {
                    <p class="text-xs text-amber-600 mt-2">
                        {"No sign-in in progress."}
                        <button class="ml-1 font-semibold underline" onclick={to_login}>{"Sign in first"}</button>
                    </p>
                }

                <div class="flex justify-center gap-3 my-6">
                    { for digits.iter().enumerate().map(|(index, digit)| {
                        let oninput = {
                            let digits = digits.clone();
                            let boxes = boxes.clone();
                            Callback::from(move |e: InputEvent| {
                                let Some(value) = accept_otp_digit(&input_value(&e)) else {
                                    digits.set((*digits).clone());
                                    return;
                                };
                                let filled = !value.is_empty();
                                let mut next = (*digits).clone();
                                next[index] = value;
                                digits.set(next);
                                if filled && index + 1 < OTP_LENGTH {
                                    focus(&boxes[index + 1]);
                                }
                            })
                        };
                        let onkeydown = {
                            let digits = digits.clone();
                            let boxes = boxes.clone();
                            Callback::from(move |e: KeyboardEvent| {
                                if e.key() == "Backspace" && digits[index].is_empty() && index > 0 {
                                    focus(&boxes[index - 1]);
                                }
                            })
                        };
                        html! {
                            <input
                                ref={boxes[index].clone()}
                                class="w-12 h-14 text-center text-2xl font-bold border-2 border-slate-300 rounded-lg focus:border-[#10a37f] focus:outline-none"
                                inputmode="numeric"
                                maxlength="1"
                                value={digit.clone()}
                                {oninput}
                                {onkeydown}
                            />
                        }
                    }) }
                </div>

                <button class="w-full bg-[#10a37f] text-white py-2 rounded-lg font-semibold disabled:opacity-50" onclick={on_verify} disabled={*loading}>
                    { if *loading { "Verifying..." } else { "Verify OTP" } }
                </button>
                <button class="mt-4 text-sm text-[#10a37f] font-semibold" onclick={on_resend}>{"Resend OTP"}</button>
            </div>
        </div>
    }
}
