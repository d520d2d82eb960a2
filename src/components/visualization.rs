//! Turns the selector's descriptors into chart components.

use leptos::prelude::*;

use crate::components::bar_chart::BarChart;
use crate::components::network::CollaborationNetwork;
use crate::components::org_chart::OrgChart;
use crate::components::session::SessionHandle;
use crate::interaction::Gesture;
use crate::model::{Meeting, PersonNode, Relationship, ResultSet};
use crate::selector::{DescriptorData, VisualizationDescriptor, VisualizationKind};
use crate::series::{Bar, department_bars, timeline_bars, topic_bars};

/// Owned copy of what a descriptor needs, so rendering does not borrow the session.
enum Plan {
	Organization {
		title: &'static str,
		people: Vec<PersonNode>,
	},
	Collaboration {
		title: &'static str,
		people: Vec<PersonNode>,
		relationships: Vec<Relationship>,
		meetings: Vec<Meeting>,
	},
	Bars {
		kind: VisualizationKind,
		title: &'static str,
		bars: Vec<Bar>,
	},
}

impl Plan {
	fn from_descriptor(descriptor: VisualizationDescriptor<'_>) -> Self {
		let VisualizationDescriptor { kind, title, data } = descriptor;
		match data {
			DescriptorData::People(people) => Self::Organization {
				title,
				people: people.to_vec(),
			},
			DescriptorData::Network {
				people,
				relationships,
				meetings,
			} => Self::Collaboration {
				title,
				people: people.to_vec(),
				relationships: relationships.to_vec(),
				meetings: meetings.to_vec(),
			},
			DescriptorData::Timeline { meetings, timeline } => Self::Bars {
				kind,
				title,
				bars: timeline_bars(meetings, timeline),
			},
			DescriptorData::Departments(departments) => Self::Bars {
				kind,
				title,
				bars: department_bars(departments),
			},
			DescriptorData::Topics(topics) => Self::Bars {
				kind,
				title,
				bars: topic_bars(topics),
			},
		}
	}

	fn into_view(self) -> AnyView {
		match self {
			Self::Organization { title, people } => view! { <OrgChart title=title people=people /> }.into_any(),
			Self::Collaboration {
				title,
				people,
				relationships,
				meetings,
			} => view! { <CollaborationNetwork title=title people=people relationships=relationships meetings=meetings /> }.into_any(),
			Self::Bars { kind, title, bars } => view! { <ChartCard kind=kind title=title bars=bars /> }.into_any(),
		}
	}
}

/// Header, export action and canvas for a bar-style chart.
#[component]
fn ChartCard(kind: VisualizationKind, title: &'static str, bars: Vec<Bar>) -> impl IntoView {
	let session = SessionHandle::expect();
	let Some(component) = session.mount_chart(kind, title) else {
		return ().into_any();
	};
	on_cleanup(move || session.unmount(component));

	view! {
		<section class=format!("visualization {}-chart", kind.key()) id=component.to_string()>
			<header class="visualization-header">
				<h3>{title}</h3>
				<div class="visualization-actions">
					<button on:click=move |_| {
						session.dispatch(Gesture::Export { component });
					}>"Export"</button>
				</div>
			</header>
			<BarChart kind=kind bars=bars />
		</section>
	}
	.into_any()
}

/// All charts selected for one answer in the conversation.
#[component]
pub fn Visualizations(intent: String, result: ResultSet) -> impl IntoView {
	let session = SessionHandle::expect();
	let plans: Vec<Plan> = session
		.with(|s| {
			s.select(&intent, &result)
				.into_iter()
				.map(Plan::from_descriptor)
				.collect()
		})
		.unwrap_or_default();

	view! {
		<div class="visualizations" data-intent=intent>
			{plans.into_iter().map(Plan::into_view).collect_view()}
		</div>
	}
}
