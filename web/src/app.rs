use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::state::AppState;
use crate::views::{ConfirmPaymentPage, HallPage, NotFoundPage, TransferPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = AppState::new();
    provide_context(state);

    // Browser storage only exists after hydration.
    Effect::new(move |_| state.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/hall-web.css"/>
        <Title text="Hall Booking"/>

        <ConfigProvider>
            <Router>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=HallPage/>
                        <Route path=StaticSegment("hall") view=HallPage/>
                        <Route path=StaticSegment("transfer") view=TransferPage/>
                        <Route path=StaticSegment("confirm-payment") view=ConfirmPaymentPage/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
