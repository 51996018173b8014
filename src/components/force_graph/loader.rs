//! Memoised `graph.json` loading shared by every graph view on a page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use log::{error, info};

use super::types::GraphData;
use crate::dom;
use crate::error::LoadError;

/// Where graph data comes from.
pub trait GraphSource {
	fn fetch(&self) -> LocalBoxFuture<'static, Result<GraphData, LoadError>>;
}

/// Fetches and parses `graph.json` over HTTP.
#[derive(Clone, Debug)]
pub struct HttpGraphSource {
	pub url: String,
}

impl GraphSource for HttpGraphSource {
	fn fetch(&self) -> LocalBoxFuture<'static, Result<GraphData, LoadError>> {
		let url = self.url.clone();
		async move {
			let body = dom::fetch_text(&url).await?;
			let data: GraphData = serde_json::from_str(&body)?;
			Ok(data.prepare())
		}
		.boxed_local()
	}
}

type SharedLoad = Shared<LocalBoxFuture<'static, Option<Rc<GraphData>>>>;

#[derive(Default)]
struct Slot {
	next_id: u64,
	current: Option<(u64, SharedLoad)>,
}

/// Loads graph data at most once; callers arriving while a fetch is in
/// flight share it. A failed fetch is forgotten so the next call retries.
pub struct GraphLoader<S> {
	source: Rc<S>,
	slot: Rc<RefCell<Slot>>,
}

impl<S> Clone for GraphLoader<S> {
	fn clone(&self) -> Self {
		Self {
			source: self.source.clone(),
			slot: self.slot.clone(),
		}
	}
}

impl<S: GraphSource + 'static> GraphLoader<S> {
	pub fn new(source: S) -> Self {
		Self {
			source: Rc::new(source),
			slot: Rc::new(RefCell::new(Slot::default())),
		}
	}

	pub fn load(&self) -> SharedLoad {
		if let Some((_, pending)) = self.slot.borrow().current.as_ref() {
			return pending.clone();
		}

		let id = {
			let mut slot = self.slot.borrow_mut();
			slot.next_id += 1;
			slot.next_id
		};
		let fetch = self.source.fetch();
		let slot: Weak<RefCell<Slot>> = Rc::downgrade(&self.slot);
		let load = async move {
			match fetch.await {
				Ok(data) => {
					info!(
						"graph: loaded {} nodes, {} links",
						data.nodes.len(),
						data.links.len()
					);
					Some(Rc::new(data))
				}
				Err(err) => {
					error!("graph: failed to load data: {err}");
					if let Some(slot) = slot.upgrade() {
						let mut slot = slot.borrow_mut();
						// A newer load may already occupy the slot.
						if slot.current.as_ref().is_some_and(|(current, _)| *current == id) {
							slot.current = None;
						}
					}
					None
				}
			}
		}
		.boxed_local()
		.shared();

		self.slot.borrow_mut().current = Some((id, load.clone()));
		load
	}

	/// Forget any cached result.
	pub fn reset(&self) {
		self.slot.borrow_mut().current = None;
	}
}
