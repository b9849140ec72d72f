use yew::prelude::*;

use crate::auth_flow::{AuthEvent, AuthStage};
use crate::hooks::use_session;
use crate::routes::{use_navigator, Route};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect { to: Route, replace: bool },
}

/// Synchronous gate for the protected views; token validity is not checked
/// here, a stale token surfaces when a request fails.
pub fn evaluate(stage: AuthStage) -> GuardDecision {
    match stage {
        AuthStage::Authenticated => GuardDecision::Render,
        _ => GuardDecision::Redirect {
            to: Route::Login,
            replace: true,
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedProps {
    pub children: Children,
}

#[function_component(Protected)]
pub fn protected(props: &ProtectedProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let stage = AuthStage::of(&session.state);
    let decision = evaluate(stage);

    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |(decision, stage): &(GuardDecision, AuthStage)| {
                if let (GuardDecision::Redirect { to, replace }, Some(navigator)) =
                    (decision, navigator)
                {
                    log::info!(
                        "{:?} -> {:?}; redirecting to {}",
                        stage,
                        stage.next(AuthEvent::GuardRejected),
                        to.path()
                    );
                    if *replace {
                        navigator.replace(to.clone());
                    } else {
                        navigator.push(to.clone());
                    }
                }
                || ()
            },
            (decision.clone(), stage),
        );
    }

    match decision {
        GuardDecision::Render => html! { <>{ for props.children.iter() }</> },
        GuardDecision::Redirect { .. } => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_only_when_authenticated() {
        assert_eq!(evaluate(AuthStage::Authenticated), GuardDecision::Render);
        for stage in [
            AuthStage::Anonymous,
            AuthStage::CredentialsSubmitted,
            AuthStage::OtpPending,
        ] {
            assert_eq!(
                evaluate(stage),
                GuardDecision::Redirect {
                    to: Route::Login,
                    replace: true
                },
                "{stage:?}"
            );
        }
    }

    #[test]
    fn half_finished_sign_in_is_not_enough() {
        let session = Session {
            user: None,
            token: Some("T1".into()),
            is_authenticated: false,
        };
        assert_eq!(AuthStage::of(&session), AuthStage::OtpPending);
        assert!(matches!(
            evaluate(AuthStage::of(&session)),
            GuardDecision::Redirect { .. }
        ));
    }
}
