//! Organization chart rendered as nested markup.
//!
//! The forest is built once per render by [`crate::hierarchy::build_forest`];
//! this module only maps it to views. Disclosure state lives in the session's
//! interaction controller so toggles, bulk expand/collapse and exports all go
//! through the same gesture path.

use leptos::prelude::*;

use crate::components::session::SessionHandle;
use crate::hierarchy::HierarchyNode;
use crate::interaction::{ComponentId, Gesture};
use crate::model::PersonNode;

/// Tooltip for a node already drawn elsewhere; other nodes get no `title`.
fn revisit_hint(node: &HierarchyNode) -> Option<&'static str> {
	node.revisit.then_some("Already shown elsewhere in this chart")
}

fn node_view(node: &HierarchyNode, component: ComponentId, session: SessionHandle) -> AnyView {
	let person = &node.person;
	let id = person.id.clone();
	let name = person.display_name().to_string();
	let title = person.display_title().to_string();
	let department = person.department.clone().unwrap_or_default();
	let avatar = person.avatar();
	let meetings = person.meeting_count;
	let revisit = node.revisit;
	let hint = revisit_hint(node);

	let click_id = id.clone();
	let on_select = move |_| {
		session.dispatch(Gesture::NodeClick {
			component,
			person: click_id.clone(),
		});
	};

	let card = view! {
		<div
			class="org-node"
			class:manager=person.is_manager
			class:revisit=revisit
			on:click=on_select
			title=hint
		>
			<span class="org-avatar">{avatar}</span>
			<span class="org-name">{name}</span>
			<span class="org-title">{title}</span>
			<span class="org-department">{department}</span>
			<span class="org-meetings">{format!("{meetings} meetings")}</span>
		</div>
	};

	if !node.is_expandable() {
		return view! { <li class="org-leaf">{card}</li> }.into_any();
	}

	let toggle_id = id.clone();
	let on_toggle = move |ev: web_sys::MouseEvent| {
		ev.stop_propagation();
		session.dispatch(Gesture::Toggle {
			component,
			node: toggle_id.clone(),
		});
	};
	let (indicator_id, children_id) = (id.clone(), id);
	let children = node
		.children
		.iter()
		.map(|child| node_view(child, component, session))
		.collect_view();

	view! {
		<li class="org-branch">
			<button class="org-toggle" on:click=on_toggle>
				{move || session.disclosure(component, &indicator_id).indicator()}
			</button>
			{card}
			<ul
				class="org-children"
				style=move || {
					if session.disclosure(component, &children_id).is_visible() {
						"display: block;"
					} else {
						"display: none;"
					}
				}
			>
				{children}
			</ul>
		</li>
	}
	.into_any()
}

/// Interactive reporting tree for `people`.
#[component]
pub fn OrgChart(title: &'static str, people: Vec<PersonNode>) -> impl IntoView {
	let session = SessionHandle::expect();
	let Some((component, forest)) = session.mount_organization(title, &people) else {
		return ().into_any();
	};
	on_cleanup(move || session.unmount(component));

	let detached = forest.detached.len();
	let roots = forest
		.roots
		.iter()
		.map(|root| node_view(root, component, session))
		.collect_view();

	view! {
		<section class="visualization org-chart" id=component.to_string()>
			<header class="visualization-header">
				<h3>{title}</h3>
				<div class="visualization-actions">
					<button on:click=move |_| {
						session.dispatch(Gesture::ExpandAll { component });
					}>"Expand all"</button>
					<button on:click=move |_| {
						session.dispatch(Gesture::CollapseAll { component });
					}>"Collapse all"</button>
					<button on:click=move |_| {
						session.dispatch(Gesture::Export { component });
					}>"Export"</button>
				</div>
			</header>
			<ul class="org-tree">{roots}</ul>
			{(detached > 0)
				.then(|| {
					view! {
						<p class="org-detached">
							{format!("{detached} people could not be placed under a manager.")}
						</p>
					}
				})}
		</section>
	}
	.into_any()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hierarchy::build_forest;

	fn person(id: &str, manager: Option<&str>) -> PersonNode {
		PersonNode {
			id: id.to_string(),
			manager_id: manager.map(str::to_string),
			..Default::default()
		}
	}

	#[test]
	fn only_revisits_carry_a_hint() {
		let forest = build_forest(&[person("a", None), person("b", Some("a")), person("b", Some("a"))]);
		let root = &forest.roots[0];
		assert_eq!(revisit_hint(root), None);
		assert_eq!(revisit_hint(&root.children[0]), None);
		assert_eq!(
			revisit_hint(&root.children[1]),
			Some("Already shown elsewhere in this chart")
		);
	}
}
