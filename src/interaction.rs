//! Routes user gestures to the component that produced them.
//!
//! Each rendered visualization attaches itself and gets a [`ComponentId`];
//! gestures carry that id, so collapsing one organization chart or filtering
//! one network never reaches another. Gestures for detached or unknown
//! components are dropped.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info, warn};

use crate::collaboration::NetworkFilter;
use crate::error::ChartResult;
use crate::hierarchy::Forest;
use crate::model::{PersonNode, Strength};
use crate::selector::VisualizationKind;

/// Outbound channel to the chat surface.
pub trait Conversation {
	/// Submit `query` as if the user had typed it. Fire and forget.
	fn send_message(&self, query: String);
}

impl<F: Fn(String)> Conversation for F {
	fn send_message(&self, query: String) {
		self(query)
	}
}

/// What an exporter is asked to save.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRequest {
	pub component: ComponentId,
	pub kind: VisualizationKind,
	pub title: String,
	/// Serialized data for markup-only charts; canvas charts export pixels.
	pub snapshot: Option<String>,
}

/// Saves a chart outside the page.
pub trait Exporter {
	fn export(&self, request: &ExportRequest) -> ChartResult<()>;
}

/// Identifier of one rendered visualization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "viz-{}", self.0)
	}
}

/// Subtree visibility of an expandable hierarchy node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disclosure {
	#[default]
	Visible,
	Hidden,
}

impl Disclosure {
	pub fn toggled(self) -> Self {
		match self {
			Self::Visible => Self::Hidden,
			Self::Hidden => Self::Visible,
		}
	}

	pub fn is_visible(self) -> bool {
		self == Self::Visible
	}

	/// Disclosure triangle pointing down when open, right when closed.
	pub fn indicator(self) -> &'static str {
		match self {
			Self::Visible => "▼",
			Self::Hidden => "▶",
		}
	}
}

/// A user gesture, scoped to the component it came from.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
	Toggle { component: ComponentId, node: String },
	ExpandAll { component: ComponentId },
	CollapseAll { component: ComponentId },
	Export { component: ComponentId },
	FilterDepartment { component: ComponentId, department: Option<String> },
	FilterFrequency { component: ComponentId, min_strength: Option<Strength> },
	Reset { component: ComponentId },
	NodeClick { component: ComponentId, person: String },
}

impl Gesture {
	pub fn component(&self) -> ComponentId {
		match self {
			Self::Toggle { component, .. }
			| Self::ExpandAll { component }
			| Self::CollapseAll { component }
			| Self::Export { component }
			| Self::FilterDepartment { component, .. }
			| Self::FilterFrequency { component, .. }
			| Self::Reset { component }
			| Self::NodeClick { component, .. } => *component,
		}
	}
}

/// Result of routing a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
	/// Component state changed; the view should re-render.
	Changed,
	/// Handed to a collaborator; no local state changed.
	Forwarded,
	/// Valid gesture that left state as it was.
	Unchanged,
	/// No such component, or the gesture does not apply to it.
	Ignored,
}

#[derive(Debug)]
struct OrgView {
	disclosure: HashMap<String, Disclosure>,
	snapshot: Option<String>,
}

#[derive(Debug, Default)]
struct NetworkView {
	filter: NetworkFilter,
}

#[derive(Debug)]
enum ComponentView {
	Organization(OrgView),
	Collaboration(NetworkView),
	Chart,
}

#[derive(Debug)]
struct Component {
	kind: VisualizationKind,
	title: String,
	/// Person id to display name, for node-click queries.
	labels: HashMap<String, String>,
	view: ComponentView,
}

/// Per-session gesture router and interaction state.
#[derive(Default)]
pub struct InteractionController {
	next_id: u64,
	components: HashMap<ComponentId, Component>,
	conversation: Option<Box<dyn Conversation>>,
	exporter: Option<Box<dyn Exporter>>,
}

impl InteractionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_conversation(&mut self, conversation: Box<dyn Conversation>) {
		self.conversation = Some(conversation);
	}

	pub fn set_exporter(&mut self, exporter: Box<dyn Exporter>) {
		self.exporter = Some(exporter);
	}

	fn attach(&mut self, component: Component) -> ComponentId {
		self.next_id += 1;
		let id = ComponentId(self.next_id);
		debug!("attached {} component {}", component.kind.key(), id);
		self.components.insert(id, component);
		id
	}

	/// Attach an organization chart; every expandable node starts visible.
	pub fn attach_organization(&mut self, title: &str, forest: &Forest) -> ComponentId {
		let disclosure = forest
			.expandable_ids()
			.into_iter()
			.map(|id| (id, Disclosure::Visible))
			.collect();
		let mut labels = HashMap::new();
		forest.walk(|node| {
			labels
				.entry(node.id().to_string())
				.or_insert_with(|| node.person.display_name().to_string());
		});
		let snapshot = match serde_json::to_string_pretty(forest) {
			Ok(json) => Some(json),
			Err(err) => {
				warn!("could not serialize hierarchy for export: {err}");
				None
			}
		};
		self.attach(Component {
			kind: VisualizationKind::Organization,
			title: title.to_string(),
			labels,
			view: ComponentView::Organization(OrgView {
				disclosure,
				snapshot,
			}),
		})
	}

	/// Attach a collaboration network over `people`.
	pub fn attach_collaboration(&mut self, title: &str, people: &[PersonNode]) -> ComponentId {
		self.attach(Component {
			kind: VisualizationKind::Collaboration,
			title: title.to_string(),
			labels: labels(people),
			view: ComponentView::Collaboration(NetworkView::default()),
		})
	}

	/// Attach a chart with no interaction state beyond export.
	pub fn attach_chart(&mut self, kind: VisualizationKind, title: &str) -> ComponentId {
		self.attach(Component {
			kind,
			title: title.to_string(),
			labels: HashMap::new(),
			view: ComponentView::Chart,
		})
	}

	/// Drop a component's state; its pending gestures become no-ops.
	pub fn detach(&mut self, id: ComponentId) -> bool {
		let removed = self.components.remove(&id).is_some();
		if removed {
			debug!("detached component {}", id);
		}
		removed
	}

	pub fn detach_all(&mut self) {
		self.components.clear();
	}

	pub fn is_attached(&self, id: ComponentId) -> bool {
		self.components.contains_key(&id)
	}

	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}

	/// State of `node` in organization chart `id`; `None` for leaves.
	pub fn disclosure(&self, id: ComponentId, node: &str) -> Option<Disclosure> {
		match &self.components.get(&id)?.view {
			ComponentView::Organization(org) => org.disclosure.get(node).copied(),
			_ => None,
		}
	}

	pub fn network_filter(&self, id: ComponentId) -> Option<&NetworkFilter> {
		match &self.components.get(&id)?.view {
			ComponentView::Collaboration(net) => Some(&net.filter),
			_ => None,
		}
	}

	/// Apply `gesture` to the component it names.
	pub fn dispatch(&mut self, gesture: Gesture) -> Dispatch {
		let id = gesture.component();
		let Some(component) = self.components.get_mut(&id) else {
			debug!("dropping {:?} for unknown component {}", gesture, id);
			return Dispatch::Ignored;
		};

		match (gesture, &mut component.view) {
			(Gesture::Toggle { node, .. }, ComponentView::Organization(org)) => {
				match org.disclosure.get_mut(&node) {
					Some(state) => {
						*state = state.toggled();
						Dispatch::Changed
					}
					None => Dispatch::Ignored,
				}
			}
			(Gesture::ExpandAll { .. }, ComponentView::Organization(org)) => set_all(org, Disclosure::Visible),
			(Gesture::CollapseAll { .. }, ComponentView::Organization(org)) => set_all(org, Disclosure::Hidden),
			(Gesture::FilterDepartment { department, .. }, ComponentView::Collaboration(net)) => {
				let department = department.filter(|d| !d.is_empty());
				replace(&mut net.filter.department, department)
			}
			(Gesture::FilterFrequency { min_strength, .. }, ComponentView::Collaboration(net)) => {
				replace(&mut net.filter.min_strength, min_strength)
			}
			(Gesture::Reset { .. }, ComponentView::Collaboration(net)) => {
				if net.filter.is_active() {
					net.filter = NetworkFilter::default();
					Dispatch::Changed
				} else {
					Dispatch::Unchanged
				}
			}
			(Gesture::Export { .. }, view) => {
				let request = ExportRequest {
					component: id,
					kind: component.kind,
					title: component.title.clone(),
					snapshot: match view {
						ComponentView::Organization(org) => org.snapshot.clone(),
						_ => None,
					},
				};
				let Some(exporter) = &self.exporter else {
					debug!("no exporter configured, skipping export of {}", id);
					return Dispatch::Ignored;
				};
				match exporter.export(&request) {
					Ok(()) => info!("exported {} ({})", request.title, id),
					Err(err) => warn!("export of {} failed: {err}", id),
				}
				Dispatch::Forwarded
			}
			(Gesture::NodeClick { person, .. }, ComponentView::Organization(_) | ComponentView::Collaboration(_)) => {
				let name = component.labels.get(&person).cloned().unwrap_or(person);
				let Some(conversation) = &self.conversation else {
					return Dispatch::Ignored;
				};
				conversation.send_message(person_query(&name));
				Dispatch::Forwarded
			}
			(gesture, _) => {
				debug!("{:?} does not apply to {} component {}", gesture, component.kind.key(), id);
				Dispatch::Ignored
			}
		}
	}
}

/// Follow-up question sent when a person is clicked.
pub fn person_query(name: &str) -> String {
	format!("Tell me more about {name}")
}

fn labels(people: &[PersonNode]) -> HashMap<String, String> {
	let mut labels = HashMap::new();
	for person in people {
		labels
			.entry(person.id.clone())
			.or_insert_with(|| person.display_name().to_string());
	}
	labels
}

fn set_all(org: &mut OrgView, state: Disclosure) -> Dispatch {
	let mut changed = false;
	for current in org.disclosure.values_mut() {
		changed |= *current != state;
		*current = state;
	}
	if changed {
		Dispatch::Changed
	} else {
		Dispatch::Unchanged
	}
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> Dispatch {
	if *slot == value {
		Dispatch::Unchanged
	} else {
		*slot = value;
		Dispatch::Changed
	}
}
