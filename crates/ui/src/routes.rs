use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{ReadingTestView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ReadingTestView)] Test {},
        #[route("/result", ResultView)] Report {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "IELTS Academic Reading" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
