use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <h2>"Page Not Found"</h2>
            <p>"The page you're looking for doesn't exist or may have been moved."</p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| navigate("/hall", Default::default())
            >
                "Go to Hall"
            </Button>
        </div>
    }
}
