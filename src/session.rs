//! One conversation's worth of charts.
//!
//! The session owns the chart registry and the interaction controller and is
//! handed to the rendering layer explicitly, so tearing down a conversation
//! disposes exactly the charts it created.

use log::info;

use crate::config::ChartConfig;
use crate::hierarchy::{Forest, build_forest};
use crate::intent::Intent;
use crate::interaction::{ComponentId, Conversation, Dispatch, Exporter, Gesture, InteractionController};
use crate::model::{PersonNode, ResultSet};
use crate::registry::{ChartHandle, ChartId, ChartRegistry, RegistryStats};
use crate::selector::{VisualizationDescriptor, VisualizationKind, select_with};

/// Registry, controller and configuration for one conversation.
pub struct ChartSession {
	config: ChartConfig,
	registry: ChartRegistry<Box<dyn ChartHandle>>,
	controller: InteractionController,
}

impl ChartSession {
	pub fn new(config: ChartConfig) -> Self {
		Self {
			config,
			registry: ChartRegistry::new(),
			controller: InteractionController::new(),
		}
	}

	pub fn with_conversation(mut self, conversation: impl Conversation + 'static) -> Self {
		self.controller.set_conversation(Box::new(conversation));
		self
	}

	pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
		self.controller.set_exporter(Box::new(exporter));
		self
	}

	pub fn config(&self) -> &ChartConfig {
		&self.config
	}

	/// Charts to draw for a classifier tag and its result set.
	pub fn select<'a>(&self, intent: &str, result: &'a ResultSet) -> Vec<VisualizationDescriptor<'a>> {
		select_with(&self.config.selector, &Intent::parse(intent), result)
	}

	/// Build the hierarchy for `people` and attach an organization component.
	pub fn mount_organization(&mut self, title: &str, people: &[PersonNode]) -> (ComponentId, Forest) {
		let forest = build_forest(people);
		let id = self.controller.attach_organization(title, &forest);
		(id, forest)
	}

	pub fn mount_collaboration(&mut self, title: &str, people: &[PersonNode]) -> ComponentId {
		self.controller.attach_collaboration(title, people)
	}

	pub fn mount_chart(&mut self, kind: VisualizationKind, title: &str) -> ComponentId {
		self.controller.attach_chart(kind, title)
	}

	pub fn unmount(&mut self, component: ComponentId) {
		self.controller.detach(component);
	}

	pub fn dispatch(&mut self, gesture: Gesture) -> Dispatch {
		self.controller.dispatch(gesture)
	}

	pub fn controller(&self) -> &InteractionController {
		&self.controller
	}

	pub fn register(&mut self, kind: VisualizationKind, handle: Box<dyn ChartHandle>) -> ChartId {
		self.registry.register(kind, handle)
	}

	pub fn reserve(&mut self, kind: VisualizationKind) -> ChartId {
		self.registry.reserve(kind)
	}

	/// Attach the native chart for `id` if it is still live.
	pub fn attach(&mut self, id: ChartId, make: impl FnOnce() -> Option<Box<dyn ChartHandle>>) -> bool {
		self.registry.attach(id, make)
	}

	pub fn destroy(&mut self, id: ChartId) -> bool {
		self.registry.destroy(id)
	}

	pub fn is_live(&self, id: ChartId) -> bool {
		self.registry.is_live(id)
	}

	pub fn is_attached(&self, id: ChartId) -> bool {
		self.registry.is_attached(id)
	}

	pub fn live_charts(&self) -> usize {
		self.registry.len()
	}

	/// Live charts whose native handle exists.
	pub fn attached_charts(&self) -> usize {
		self.registry.attached_len()
	}

	pub fn stats(&self) -> RegistryStats {
		self.registry.stats()
	}

	/// Dispose every chart and drop all interaction state.
	pub fn teardown(&mut self) -> usize {
		let destroyed = self.registry.destroy_all();
		self.controller.detach_all();
		info!("chart session torn down, {destroyed} charts destroyed");
		destroyed
	}
}

impl Default for ChartSession {
	fn default() -> Self {
		Self::new(ChartConfig::default())
	}
}
