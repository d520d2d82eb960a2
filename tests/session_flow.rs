use std::cell::{Cell, RefCell};
use std::rc::Rc;

use conversation_charts::config::ChartConfig;
use conversation_charts::error::{ChartError, ChartResult};
use conversation_charts::interaction::{Disclosure, Dispatch, ExportRequest, Exporter, Gesture};
use conversation_charts::model::ResultSet;
use conversation_charts::registry::ChartHandle;
use conversation_charts::selector::VisualizationKind;
use conversation_charts::session::ChartSession;

struct Counting(Rc<Cell<u32>>);

impl ChartHandle for Counting {
	fn dispose(&mut self) {
		self.0.set(self.0.get() + 1);
	}
}

fn counting(disposed: &Rc<Cell<u32>>) -> Option<Box<dyn ChartHandle>> {
	Some(Box::new(Counting(disposed.clone())))
}

struct Unreachable;

impl Exporter for Unreachable {
	fn export(&self, _: &ExportRequest) -> ChartResult<()> {
		Err(ChartError::Export("offline".into()))
	}
}

const ANSWER: &str = r#"{
	"people": [
		{"id": "ceo", "name": "Dana", "title": "CEO", "managerId": null, "meetingCount": 9},
		{"id": "cto", "name": "Ravi", "role": "CTO", "managerId": "ceo", "department": "Eng"},
		{"id": "eng", "name": "Mei", "managerId": "cto", "department": "Eng"},
		{"id": "orphan", "managerId": "gone"}
	],
	"meetings": [
		{"id": "m1", "date": "2024-05-06", "attendees": ["ceo", "cto"]},
		{"id": "m2", "date": "2024-05-06", "attendees": ["cto", "Mei"]},
		{"id": "m3", "date": "2024-05-07", "attendees": ["ceo", "cto", "eng"]}
	],
	"relationships": null
}"#;

#[test]
fn conversation_round_trip() {
	let sent = Rc::new(RefCell::new(Vec::new()));
	let sink = sent.clone();
	let mut session = ChartSession::new(ChartConfig::default())
		.with_conversation(move |q: String| sink.borrow_mut().push(q))
		.with_exporter(Unreachable);

	let result = ResultSet::from_json(ANSWER).unwrap();
	let kinds: Vec<_> = session
		.select("general_query", &result)
		.iter()
		.map(|d| d.kind)
		.collect();
	assert_eq!(kinds, vec![VisualizationKind::Timeline, VisualizationKind::Collaboration]);

	let org = session.select("organization_hierarchy", &result);
	assert_eq!(org.len(), 1);
	assert_eq!(org[0].title, "Organization Structure");

	let (tree, forest) = session.mount_organization("Organization Structure", &result.people);
	assert_eq!(forest.roots.len(), 1);
	assert_eq!(forest.detached, vec!["orphan".to_string()]);
	assert_eq!(session.controller().disclosure(tree, "ceo"), Some(Disclosure::Visible));
	assert_eq!(session.controller().disclosure(tree, "eng"), None);

	let toggle = Gesture::Toggle {
		component: tree,
		node: "cto".into(),
	};
	session.dispatch(toggle.clone());
	assert_eq!(session.controller().disclosure(tree, "cto"), Some(Disclosure::Hidden));
	assert_eq!(session.dispatch(Gesture::Export { component: tree }), Dispatch::Forwarded);
	assert_eq!(session.controller().disclosure(tree, "cto"), Some(Disclosure::Hidden));
	session.dispatch(toggle);
	assert_eq!(session.controller().disclosure(tree, "cto"), Some(Disclosure::Visible));

	session.dispatch(Gesture::NodeClick {
		component: tree,
		person: "eng".into(),
	});
	assert_eq!(*sent.borrow(), vec!["Tell me more about Mei".to_string()]);

	let disposed = Rc::new(Cell::new(0));
	let timeline = session.reserve(VisualizationKind::Timeline);
	let network = session.reserve(VisualizationKind::Collaboration);
	let topics = session.register(VisualizationKind::Topics, Box::new(Counting(disposed.clone())));

	// The network is closed before its canvas render runs.
	session.destroy(network);
	assert!(!session.attach(network, || counting(&disposed)));
	assert!(session.attach(timeline, || counting(&disposed)));

	let pending = session.reserve(VisualizationKind::Departments);
	assert_eq!((session.live_charts(), session.attached_charts()), (3, 2));
	let stats = session.stats();
	assert_eq!(stats.disposed, stats.registered - session.attached_charts() as u64);

	session.destroy(topics);
	session.destroy(topics);
	assert_eq!(disposed.get(), 1);

	assert!(session.is_live(pending));
	assert_eq!(session.teardown(), 2);
	assert_eq!(session.live_charts(), 0);
	assert_eq!(disposed.get(), 2);
	let stats = session.stats();
	assert_eq!(stats.registered, 2);
	assert_eq!(stats.disposed, 2);

	// Interaction state went with the session.
	assert_eq!(session.dispatch(Gesture::CollapseAll { component: tree }), Dispatch::Ignored);
	assert_eq!(session.teardown(), 0);
}

#[test]
fn configured_thresholds_drive_selection() {
	let config = ChartConfig::from_json(r#"{"selector": {"min_timeline_meetings": 1}}"#).unwrap();
	let session = ChartSession::new(config);
	let result = ResultSet::from_json(r#"{"meetings": [{"id": "m1"}]}"#).unwrap();
	let kinds: Vec<_> = session
		.select("find_meetings", &result)
		.iter()
		.map(|d| d.kind)
		.collect();
	assert_eq!(kinds, vec![VisualizationKind::Timeline]);
	assert!(ChartSession::default().select("find_meetings", &result).is_empty());
}
