use leptos::prelude::*;

use crate::browser::{DomExporter, load_config};
use crate::components::{SessionHandle, Visualizations};
use crate::model::{DepartmentStat, Meeting, PersonNode, Relationship, ResultSet, TopicTrend};
use crate::session::ChartSession;

/// One answered question in the demo conversation.
struct Turn {
	question: &'static str,
	intent: &'static str,
	result: ResultSet,
}

fn person(id: &str, name: &str, title: &str, dept: &str, manager: Option<&str>, meetings: u32) -> PersonNode {
	PersonNode {
		id: id.into(),
		name: Some(name.into()),
		title: Some(title.into()),
		department: Some(dept.into()),
		manager_id: manager.map(str::to_string),
		is_manager: matches!(id, "ceo" | "cto" | "vps"),
		meeting_count: meetings,
	}
}

fn sample_people() -> Vec<PersonNode> {
	vec![
		person("ceo", "Dana Whitfield", "Chief Executive", "Leadership", None, 31),
		person("cto", "Ravi Menon", "CTO", "Engineering", Some("ceo"), 27),
		person("vps", "Lucia Ortega", "VP Sales", "Sales", Some("ceo"), 22),
		person("eng1", "Tomás Varga", "Staff Engineer", "Engineering", Some("cto"), 18),
		person("eng2", "Mei Tanaka", "Engineer", "Engineering", Some("cto"), 12),
		person("ae1", "Jon Price", "Account Executive", "Sales", Some("vps"), 15),
		person("ctr", "Sam Doyle", "Contractor", "Engineering", Some("former-manager"), 4),
	]
}

fn sample_meetings() -> Vec<Meeting> {
	let meeting = |id: &str, title: &str, date: &str, attendees: &[&str]| Meeting {
		id: id.into(),
		title: Some(title.into()),
		date: Some(date.into()),
		attendees: attendees.iter().map(|a| a.to_string()).collect(),
		duration_minutes: Some(30),
	};
	vec![
		meeting("m1", "Roadmap review", "2024-05-06T09:00:00Z", &["ceo", "cto", "vps"]),
		meeting("m2", "Sprint planning", "2024-05-06T14:00:00Z", &["cto", "eng1", "eng2"]),
		meeting("m3", "Pipeline sync", "2024-05-07T10:00:00Z", &["vps", "ae1"]),
		meeting("m4", "Architecture deep dive", "2024-05-08T11:00:00Z", &["cto", "eng1"]),
		meeting("m5", "Customer escalation", "2024-05-09T16:00:00Z", &["ae1", "eng1", "vps"]),
	]
}

fn sample_turns() -> Vec<Turn> {
	let people = sample_people();
	let meetings = sample_meetings();
	let rel = |a: &str, b: &str, count: u32| Relationship {
		person1: a.into(),
		person2: b.into(),
		meeting_count: count,
		strength: None,
	};

	vec![
		Turn {
			question: "How is the company organized?",
			intent: "organization_hierarchy",
			result: ResultSet {
				people: people.clone(),
				..Default::default()
			},
		},
		Turn {
			question: "Who works most closely together?",
			intent: "collaboration_analysis",
			result: ResultSet {
				people: people.clone(),
				relationships: vec![
					rel("cto", "eng1", 14),
					rel("cto", "eng2", 9),
					rel("vps", "ae1", 11),
					rel("ceo", "cto", 6),
					rel("ceo", "vps", 5),
					rel("eng1", "ae1", 2),
				],
				..Default::default()
			},
		},
		Turn {
			question: "Which departments meet the most?",
			intent: "department_analysis",
			result: ResultSet {
				departments: vec![
					DepartmentStat {
						name: "Engineering".into(),
						meeting_count: 41,
						member_count: 4,
					},
					DepartmentStat {
						name: "Sales".into(),
						meeting_count: 29,
						member_count: 2,
					},
					DepartmentStat {
						name: "Leadership".into(),
						meeting_count: 17,
						member_count: 1,
					},
				],
				..Default::default()
			},
		},
		Turn {
			question: "What have we been talking about?",
			intent: "topic_analysis",
			result: ResultSet {
				topics: vec![
					TopicTrend {
						name: "Roadmap".into(),
						mentions: 12,
					},
					TopicTrend {
						name: "Hiring".into(),
						mentions: 7,
					},
					TopicTrend {
						name: "Escalations".into(),
						mentions: 4,
					},
				],
				..Default::default()
			},
		},
		Turn {
			question: "What happened last week?",
			intent: "general_query",
			result: ResultSet {
				people,
				meetings,
				..Default::default()
			},
		},
	]
}

/// Demo conversation rendering a chart-backed answer per question.
#[component]
pub fn Home() -> impl IntoView {
	let (follow_ups, set_follow_ups) = signal(Vec::<String>::new());

	let session = SessionHandle::new(
		ChartSession::new(load_config())
			.with_conversation(move |query: String| set_follow_ups.update(|q| q.push(query)))
			.with_exporter(DomExporter),
	);
	session.provide();
	on_cleanup(move || session.teardown());

	view! {
		<main class="conversation">
			<h1>"Meeting Insights"</h1>
			<p class="subtitle">
				"Click a person to ask about them. Toggle branches, filter the network, export any chart."
			</p>
			{sample_turns()
				.into_iter()
				.map(|turn| {
					view! {
						<article class="turn">
							<p class="question">{turn.question}</p>
							<Visualizations intent=turn.intent.to_string() result=turn.result />
						</article>
					}
				})
				.collect_view()}
			<aside class="follow-ups">
				<h2>"Follow-up questions"</h2>
				<ul>
					{move || {
						follow_ups
							.get()
							.into_iter()
							.map(|query| view! { <li>{query}</li> })
							.collect_view()
					}}
				</ul>
			</aside>
		</main>
	}
}
