//! Reactive access to the conversation's [`ChartSession`].
//!
//! The session lives in a local arena slot (it owns browser handles that are
//! not `Send`); the handle itself is `Copy` and travels freely into view
//! closures and event handlers. Each mounted component gets its own revision
//! signal, bumped when a gesture changes that component's state, so only the
//! views reading that component re-render.

use std::collections::HashMap;

use leptos::prelude::*;

use crate::collaboration::NetworkFilter;
use crate::hierarchy::Forest;
use crate::interaction::{ComponentId, Disclosure, Dispatch, Gesture};
use crate::model::PersonNode;
use crate::registry::{ChartHandle, ChartId};
use crate::selector::VisualizationKind;
use crate::session::ChartSession;

/// Copyable handle to the session provided through context.
#[derive(Clone, Copy)]
pub struct SessionHandle {
	session: StoredValue<ChartSession, LocalStorage>,
	revisions: StoredValue<HashMap<ComponentId, ArcRwSignal<u64>>, LocalStorage>,
}

impl SessionHandle {
	pub fn new(session: ChartSession) -> Self {
		Self {
			session: StoredValue::new_local(session),
			revisions: StoredValue::new_local(HashMap::new()),
		}
	}

	/// Handle provided by the nearest [`SessionHandle::provide`].
	pub fn expect() -> Self {
		expect_context::<Self>()
	}

	pub fn provide(self) {
		provide_context(self);
	}

	fn write<R>(&self, f: impl FnOnce(&mut ChartSession) -> R) -> Option<R> {
		self.session.try_update_value(f)
	}

	fn revision(&self, component: ComponentId) -> Option<ArcRwSignal<u64>> {
		self.revisions
			.try_with_value(|r| r.get(&component).cloned())
			.flatten()
	}

	fn track(&self, component: ComponentId) {
		if let Some(revision) = self.revision(component) {
			revision.track();
		}
	}

	fn mounted(&self, component: ComponentId) -> ComponentId {
		self.revisions.try_update_value(|r| {
			r.insert(component, ArcRwSignal::new(0));
		});
		component
	}

	pub fn with<R>(&self, f: impl FnOnce(&ChartSession) -> R) -> Option<R> {
		self.session.try_with_value(f)
	}

	/// Apply `gesture`; readers of the component it names re-render on change.
	pub fn dispatch(&self, gesture: Gesture) -> Dispatch {
		let component = gesture.component();
		let outcome = self.write(|s| s.dispatch(gesture)).unwrap_or(Dispatch::Ignored);
		if outcome == Dispatch::Changed {
			if let Some(revision) = self.revision(component) {
				revision.update(|r| *r += 1);
			}
		}
		outcome
	}

	/// Disclosure of `node`, re-evaluated when a gesture changes `component`.
	pub fn disclosure(&self, component: ComponentId, node: &str) -> Disclosure {
		self.track(component);
		self.with(|s| s.controller().disclosure(component, node))
			.flatten()
			.unwrap_or_default()
	}

	/// Current filter of a network component, re-evaluated on change.
	pub fn network_filter(&self, component: ComponentId) -> NetworkFilter {
		self.track(component);
		self.with(|s| s.controller().network_filter(component).cloned())
			.flatten()
			.unwrap_or_default()
	}

	pub fn mount_organization(&self, title: &str, people: &[PersonNode]) -> Option<(ComponentId, Forest)> {
		let (component, forest) = self.write(|s| s.mount_organization(title, people))?;
		Some((self.mounted(component), forest))
	}

	pub fn mount_collaboration(&self, title: &str, people: &[PersonNode]) -> Option<ComponentId> {
		self.write(|s| s.mount_collaboration(title, people))
			.map(|component| self.mounted(component))
	}

	pub fn mount_chart(&self, kind: VisualizationKind, title: &str) -> Option<ComponentId> {
		self.write(|s| s.mount_chart(kind, title))
			.map(|component| self.mounted(component))
	}

	pub fn unmount(&self, component: ComponentId) {
		self.write(|s| s.unmount(component));
		self.revisions.try_update_value(|r| r.remove(&component));
	}

	pub fn reserve(&self, kind: VisualizationKind) -> Option<ChartId> {
		self.write(|s| s.reserve(kind))
	}

	pub fn attach(&self, chart: ChartId, make: impl FnOnce() -> Option<Box<dyn ChartHandle>>) -> bool {
		self.write(|s| s.attach(chart, make)).unwrap_or(false)
	}

	pub fn is_live(&self, chart: ChartId) -> bool {
		self.with(|s| s.is_live(chart)).unwrap_or(false)
	}

	pub fn is_attached(&self, chart: ChartId) -> bool {
		self.with(|s| s.is_attached(chart)).unwrap_or(false)
	}

	pub fn destroy(&self, chart: ChartId) {
		self.write(|s| s.destroy(chart));
	}

	pub fn teardown(&self) {
		self.write(|s| s.teardown());
		self.revisions.try_update_value(HashMap::clear);
	}
}
