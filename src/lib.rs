//! Chart orchestration for a conversational meeting-analytics client.
//!
//! Given a classified intent and a query result set, the crate picks the
//! charts worth drawing ([`selector`]), derives their view structures
//! ([`hierarchy`], [`collaboration`], [`series`]), renders them as Leptos
//! components ([`components`]) and tracks every native chart it creates
//! ([`registry`]) along with its interaction state ([`interaction`]) for the
//! lifetime of a conversation ([`session`]).

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod browser;
pub mod collaboration;
pub mod components;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod intent;
pub mod interaction;
pub mod model;
pub mod registry;
pub mod selector;
pub mod series;
pub mod session;

mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the conversation page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Meeting Insights" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
