//! Collaboration network card: filter controls around a force graph.

use std::sync::Arc;

use leptos::prelude::*;

use crate::collaboration::{build_network, departments};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::session::SessionHandle;
use crate::interaction::Gesture;
use crate::model::{Meeting, PersonNode, Relationship, Strength};

struct NetworkSource {
	people: Vec<PersonNode>,
	relationships: Vec<Relationship>,
	meetings: Vec<Meeting>,
}

#[component]
pub fn CollaborationNetwork(
	title: &'static str,
	people: Vec<PersonNode>,
	relationships: Vec<Relationship>,
	meetings: Vec<Meeting>,
) -> impl IntoView {
	let session = SessionHandle::expect();
	let Some(component) = session.mount_collaboration(title, &people) else {
		return ().into_any();
	};
	on_cleanup(move || session.unmount(component));

	let thresholds = session
		.with(|s| s.config().strength.clone())
		.unwrap_or_default();
	let department_options = departments(&people);
	let source = Arc::new(NetworkSource {
		people,
		relationships,
		meetings,
	});

	let data = Signal::derive(move || {
		let filter = session.network_filter(component);
		build_network(
			&source.people,
			&source.relationships,
			&source.meetings,
			&filter,
			&thresholds,
		)
	});

	let on_node_click = Callback::new(move |person: String| {
		session.dispatch(Gesture::NodeClick { component, person });
	});

	let on_department = move |ev: web_sys::Event| {
		session.dispatch(Gesture::FilterDepartment {
			component,
			department: Some(event_target_value(&ev)),
		});
	};
	let on_strength = move |ev: web_sys::Event| {
		session.dispatch(Gesture::FilterFrequency {
			component,
			min_strength: Strength::parse(&event_target_value(&ev)),
		});
	};

	view! {
		<section class="visualization collaboration-network" id=component.to_string()>
			<header class="visualization-header">
				<h3>{title}</h3>
				<div class="visualization-actions">
					<select
						on:change=on_department
						prop:value=move || {
							session.network_filter(component).department.unwrap_or_default()
						}
					>
						<option value="">"All departments"</option>
						{department_options
							.into_iter()
							.map(|dept| {
								let label = dept.clone();
								view! { <option value=dept>{label}</option> }
							})
							.collect_view()}
					</select>
					<select
						on:change=on_strength
						prop:value=move || {
							session
								.network_filter(component)
								.min_strength
								.map(Strength::key)
								.unwrap_or("")
						}
					>
						<option value="">"Any frequency"</option>
						<option value="medium">"Medium and up"</option>
						<option value="strong">"Strong only"</option>
					</select>
					<button on:click=move |_| {
						session.dispatch(Gesture::Reset { component });
					}>"Reset"</button>
					<button on:click=move |_| {
						session.dispatch(Gesture::Export { component });
					}>"Export"</button>
				</div>
			</header>
			<div class="network-canvas">
				<ForceGraphCanvas data=data on_node_click=on_node_click />
			</div>
		</section>
	}
	.into_any()
}
