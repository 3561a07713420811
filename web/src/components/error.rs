use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(
    #[prop(optional, into)] message: Option<String>,
    /// Shows a retry button when set.
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error-view">
            <MessageBar intent=MessageBarIntent::Error>
                {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
            </MessageBar>
            {on_retry.map(|retry| view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| retry.run(())>
                    "Try again"
                </Button>
            })}
        </div>
    }
}
