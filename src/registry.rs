//! Lifecycle bookkeeping for native chart objects.
//!
//! Every chart drawn on a canvas is owned by a [`ChartRegistry`] entry until
//! it is destroyed, individually or when the session tears down. Ids come from
//! a monotonic counter and are never reused, so a stale id can only ever miss.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::selector::VisualizationKind;

/// Dispose contract of a native chart object.
pub trait ChartHandle {
	/// Release the chart's resources. Called at most once per handle.
	fn dispose(&mut self);
}

impl<H: ChartHandle + ?Sized> ChartHandle for Box<H> {
	fn dispose(&mut self) {
		(**self).dispose();
	}
}

/// Opaque identifier of a registered chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartId(u64);

impl fmt::Display for ChartId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "chart-{}", self.0)
	}
}

/// A live registry entry.
#[derive(Debug)]
pub struct ChartInstance<H> {
	pub kind: VisualizationKind,
	/// `None` while the deferred render has not attached a handle yet.
	pub handle: Option<H>,
}

/// Counters over the registry's lifetime.
///
/// Reserved entries hold no handle, so `disposed == registered - attached_len()`
/// at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
	/// Handles ever stored (via `register` or `attach`).
	pub registered: u64,
	/// Handles disposed.
	pub disposed: u64,
}

/// Maps chart ids to their native handles.
#[derive(Debug)]
pub struct ChartRegistry<H> {
	next_id: u64,
	live: BTreeMap<ChartId, ChartInstance<H>>,
	stats: RegistryStats,
}

impl<H> Default for ChartRegistry<H> {
	fn default() -> Self {
		Self {
			next_id: 1,
			live: BTreeMap::new(),
			stats: RegistryStats::default(),
		}
	}
}

impl<H: ChartHandle> ChartRegistry<H> {
	pub fn new() -> Self {
		Self::default()
	}

	fn allocate(&mut self) -> ChartId {
		let id = ChartId(self.next_id);
		self.next_id += 1;
		id
	}

	/// Store `handle` under a fresh id.
	pub fn register(&mut self, kind: VisualizationKind, handle: H) -> ChartId {
		let id = self.allocate();
		self.live.insert(
			id,
			ChartInstance {
				kind,
				handle: Some(handle),
			},
		);
		self.stats.registered += 1;
		debug!("registered {} {}", kind.key(), id);
		id
	}

	/// Claim an id for a chart whose handle will be attached later.
	pub fn reserve(&mut self, kind: VisualizationKind) -> ChartId {
		let id = self.allocate();
		self.live.insert(id, ChartInstance { kind, handle: None });
		debug!("reserved {} {}", kind.key(), id);
		id
	}

	/// Build and store the handle for a reserved id.
	///
	/// `make` only runs when `id` is still live and has no handle yet; a
	/// chart destroyed before its deferred render fires stays destroyed.
	pub fn attach(&mut self, id: ChartId, make: impl FnOnce() -> Option<H>) -> bool {
		let Some(instance) = self.live.get_mut(&id) else {
			debug!("{} was destroyed before its render ran", id);
			return false;
		};
		if instance.handle.is_some() {
			return false;
		}
		match make() {
			Some(handle) => {
				instance.handle = Some(handle);
				self.stats.registered += 1;
				true
			}
			None => false,
		}
	}

	/// Dispose and forget `id`. Unknown ids are ignored.
	pub fn destroy(&mut self, id: ChartId) -> bool {
		let Some(mut instance) = self.live.remove(&id) else {
			return false;
		};
		if let Some(handle) = instance.handle.as_mut() {
			handle.dispose();
			self.stats.disposed += 1;
		}
		debug!("destroyed {} {}", instance.kind.key(), id);
		true
	}

	/// Dispose every live handle; returns how many entries were removed.
	pub fn destroy_all(&mut self) -> usize {
		let ids: Vec<ChartId> = self.live.keys().copied().collect();
		ids.into_iter().filter(|&id| self.destroy(id)).count()
	}

	pub fn is_live(&self, id: ChartId) -> bool {
		self.live.contains_key(&id)
	}

	/// Whether `id` is live and its native handle has been attached.
	pub fn is_attached(&self, id: ChartId) -> bool {
		self.live.get(&id).is_some_and(|i| i.handle.is_some())
	}

	pub fn kind_of(&self, id: ChartId) -> Option<VisualizationKind> {
		self.live.get(&id).map(|i| i.kind)
	}

	pub fn live_ids(&self) -> Vec<ChartId> {
		self.live.keys().copied().collect()
	}

	/// Live entries, reserved ones included.
	pub fn len(&self) -> usize {
		self.live.len()
	}

	/// Live entries whose native handle has been attached.
	pub fn attached_len(&self) -> usize {
		self.live.values().filter(|i| i.handle.is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.live.is_empty()
	}

	pub fn stats(&self) -> RegistryStats {
		self.stats
	}
}

impl<H> Drop for ChartRegistry<H> {
	fn drop(&mut self) {
		if !self.live.is_empty() {
			debug!("chart registry dropped with {} live entries", self.live.len());
		}
	}
}
