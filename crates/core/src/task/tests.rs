use std::collections::HashMap;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use lore_stream::task::TaskMarker;

use super::*;
use crate::backend::{AnswerBackend, Backends, SearchBackend, Unconfigured};
use crate::error::{ServiceError, ValidationError};
use crate::query::{Query, SearchRequest};
use crate::results::PageRange;

#[derive(Debug, Clone, PartialEq)]
enum Event {
	Begin(String),
	Hits(Vec<String>),
	Answer(String),
	NoContext,
	Error(String),
	Finish,
}

#[derive(Default)]
struct RecordingView {
	events: Vec<Event>,
}

impl RecordingView {
	fn answers(&self) -> Vec<&str> {
		self.events
			.iter()
			.filter_map(|event| match event {
				Event::Answer(text) => Some(text.as_str()),
				_ => None,
			})
			.collect()
	}

	fn errors(&self) -> Vec<&str> {
		self.events
			.iter()
			.filter_map(|event| match event {
				Event::Error(message) => Some(message.as_str()),
				_ => None,
			})
			.collect()
	}

	fn finishes(&self) -> usize {
		self.events
			.iter()
			.filter(|event| **event == Event::Finish)
			.count()
	}
}

impl AnswerView for RecordingView {
	fn begin_search(&mut self, query: &Query) {
		self.events.push(Event::Begin(query.text.clone()));
	}

	fn show_hits(&mut self, hits: &[SearchHit]) {
		self.events.push(Event::Hits(
			hits.iter().map(|hit| hit.document.clone()).collect(),
		));
	}

	fn show_answer(&mut self, answer: &Answer) {
		self.events.push(Event::Answer(answer.text.clone()));
	}

	fn show_no_context(&mut self) {
		self.events.push(Event::NoContext);
	}

	fn show_error(&mut self, message: &str) {
		self.events.push(Event::Error(message.to_string()));
	}

	fn finish(&mut self) {
		self.events.push(Event::Finish);
	}
}

/// Search backend answering from a table keyed by query text. Queries listed
/// in `gated` block until the test releases them.
#[derive(Default)]
struct FakeSearch {
	hits: HashMap<String, Vec<SearchHit>>,
	gated: HashMap<String, Mutex<Receiver<()>>>,
	entered: Option<Mutex<Sender<String>>>,
	panic_on: Option<String>,
	panic_message: Option<String>,
}

impl FakeSearch {
	fn with_hits(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
		self.hits.insert(query.to_string(), hits);
		self
	}

	fn gate(mut self, query: &str) -> (Self, Sender<()>) {
		let (tx, rx) = mpsc::channel();
		self.gated.insert(query.to_string(), Mutex::new(rx));
		(self, tx)
	}

	fn report_entry(mut self) -> (Self, Receiver<String>) {
		let (tx, rx) = mpsc::channel();
		self.entered = Some(Mutex::new(tx));
		(self, rx)
	}
}

impl SearchBackend for FakeSearch {
	fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, ServiceError> {
		if let Some(entered) = &self.entered {
			let _ = entered.lock().unwrap().send(request.query.clone());
		}
		if self.panic_on.as_deref() == Some(request.query.as_str()) {
			panic!(
				"{}",
				self.panic_message.as_deref().unwrap_or("index corrupted")
			);
		}
		if let Some(gate) = self.gated.get(&request.query) {
			let _ = gate.lock().unwrap().recv_timeout(Duration::from_secs(5));
		}
		self.hits
			.get(&request.query)
			.cloned()
			.ok_or_else(|| ServiceError::Exit {
				program: "fake-search".into(),
				status: "exit status: 1".into(),
				stderr: "index unavailable".into(),
			})
	}
}

/// Generator that echoes the query, or fails when `fail` is set.
#[derive(Default)]
struct FakeAnswer {
	fail: bool,
}

impl AnswerBackend for FakeAnswer {
	fn generate(&self, query: &str, hits: &[SearchHit]) -> Result<Answer, ServiceError> {
		if self.fail {
			return Err(ServiceError::Exit {
				program: "fake-answer".into(),
				status: "exit status: 1".into(),
				stderr: "quota exceeded".into(),
			});
		}
		Ok(Answer::new(format!("answer to {query} from {} passages", hits.len())).with_cost(0.01))
	}
}

fn hit(document: &str) -> SearchHit {
	SearchHit::new(document, 0.5, PageRange::single(1)).with_text("passage")
}

fn pump_until_idle(dispatcher: &mut Dispatcher, view: &mut RecordingView) {
	let deadline = Instant::now() + Duration::from_secs(5);
	loop {
		dispatcher.pump(view);
		if !dispatcher.is_searching() {
			return;
		}
		assert!(Instant::now() < deadline, "task did not finish in time");
		thread::sleep(Duration::from_millis(5));
	}
}

fn finished(handle: TaskHandle, outcome: TaskOutcome) -> TaskResult {
	TaskResult {
		id: handle.id(),
		kind: TaskMarker,
		payload: TaskUpdate::Finished(outcome),
		complete: true,
	}
}

fn answered(text: &str) -> TaskOutcome {
	Ok(TaskSuccess {
		hits: vec![hit("a.pdf")],
		answer: Some(Answer::new(text)),
	})
}

#[test]
fn contract_question_publishes_hits_and_answer() {
	let contract = SearchHit::new("docs/contract_12.pdf", 0.91, PageRange::new(4, 5))
		.with_text("Either party may terminate with 30 days written notice.");
	let search = FakeSearch::default().with_hits("What is the termination clause?", vec![contract]);

	struct Fixed;
	impl AnswerBackend for Fixed {
		fn generate(&self, _query: &str, hits: &[SearchHit]) -> Result<Answer, ServiceError> {
			assert_eq!(hits.len(), 1);
			Ok(Answer::new("The termination clause requires 30 days notice."))
		}
	}

	let mut dispatcher = Dispatcher::spawn(Backends::new(search, Fixed));
	let mut view = RecordingView::default();
	dispatcher
		.dispatch(Query::new("What is the termination clause?"), &mut view)
		.expect("valid query");
	assert!(dispatcher.is_searching());

	pump_until_idle(&mut dispatcher, &mut view);

	assert_eq!(
		view.events.first(),
		Some(&Event::Begin("What is the termination clause?".into()))
	);
	assert!(view.events.contains(&Event::Hits(vec!["docs/contract_12.pdf".into()])));
	assert_eq!(
		view.answers(),
		vec!["The termination clause requires 30 days notice."]
	);
	assert_eq!(view.events.last(), Some(&Event::Finish));
	assert_eq!(view.finishes(), 1);
}

#[test]
fn later_query_wins_when_earlier_finishes_last() {
	let (search, release_first) = FakeSearch::default()
		.with_hits("first", vec![hit("one.pdf")])
		.with_hits("second", vec![hit("two.pdf")])
		.gate("first");
	let (search, entered) = search.report_entry();

	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer::default()));
	let mut view = RecordingView::default();

	let first = dispatcher.dispatch(Query::new("first"), &mut view).unwrap();
	assert_eq!(
		entered.recv_timeout(Duration::from_secs(5)).unwrap(),
		"first"
	);
	let second = dispatcher.dispatch(Query::new("second"), &mut view).unwrap();
	assert!(second > first);
	assert_eq!(dispatcher.current(), Some(second));

	release_first.send(()).unwrap();
	pump_until_idle(&mut dispatcher, &mut view);

	assert_eq!(view.answers(), vec!["answer to second from 1 passages"]);
	assert!(!view.events.contains(&Event::Hits(vec!["one.pdf".into()])));
	assert_eq!(view.finishes(), 1);
}

#[test]
fn stale_outcomes_are_dropped_in_any_completion_order() {
	let mut dispatcher = Dispatcher::spawn(Backends::new(
		Unconfigured::search(),
		Unconfigured::generation(),
	));
	let mut view = RecordingView::default();
	let first = dispatcher.submit(Query::new("first")).unwrap();
	let second = dispatcher.submit(Query::new("second")).unwrap();

	assert!(!dispatcher.publish(finished(first, answered("A1")), &mut view));
	assert!(dispatcher.publish(finished(second, answered("A2")), &mut view));
	assert_eq!(view.answers(), vec!["A2"]);

	let third = dispatcher.submit(Query::new("third")).unwrap();
	let fourth = dispatcher.submit(Query::new("fourth")).unwrap();
	assert!(dispatcher.publish(finished(fourth, answered("A4")), &mut view));
	assert!(!dispatcher.publish(finished(third, answered("A3")), &mut view));
	assert_eq!(view.answers(), vec!["A2", "A4"]);
	assert!(!dispatcher.is_searching());
}

#[test]
fn empty_query_starts_no_task() {
	let mut dispatcher = Dispatcher::spawn(Backends::new(
		Unconfigured::search(),
		Unconfigured::generation(),
	));
	let mut view = RecordingView::default();

	let err = dispatcher.dispatch(Query::new("   "), &mut view).unwrap_err();
	assert_eq!(err, ValidationError::EmptyQuery);
	assert!(!dispatcher.is_searching());
	assert_eq!(dispatcher.current(), None);
	assert_eq!(view.events, vec![Event::Error("Please enter a query".into())]);
}

#[test]
fn search_failure_reports_error_and_finishes() {
	let mut dispatcher = Dispatcher::spawn(Backends::new(FakeSearch::default(), FakeAnswer::default()));
	let mut view = RecordingView::default();
	dispatcher.dispatch(Query::new("unknown"), &mut view).unwrap();

	pump_until_idle(&mut dispatcher, &mut view);

	let errors = view.errors();
	assert_eq!(errors.len(), 1);
	assert!(errors[0].starts_with("Search failed"));
	assert!(errors[0].contains("index unavailable"));
	assert_eq!(view.events.last(), Some(&Event::Finish));
}

#[test]
fn generation_failure_keeps_hits_and_reports_error() {
	let search = FakeSearch::default().with_hits("q", vec![hit("a.pdf")]);
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer { fail: true }));
	let mut view = RecordingView::default();
	dispatcher.dispatch(Query::new("q"), &mut view).unwrap();

	pump_until_idle(&mut dispatcher, &mut view);

	assert!(view.events.contains(&Event::Hits(vec!["a.pdf".into()])));
	let errors = view.errors();
	assert_eq!(errors.len(), 1);
	assert!(errors[0].contains("quota exceeded"));
	assert!(view.answers().is_empty());
	assert_eq!(view.finishes(), 1);
}

#[test]
fn backend_panic_becomes_failure() {
	let search = FakeSearch {
		panic_on: Some("boom".into()),
		..FakeSearch::default()
	};
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer::default()));
	let mut view = RecordingView::default();
	dispatcher.dispatch(Query::new("boom"), &mut view).unwrap();

	pump_until_idle(&mut dispatcher, &mut view);

	assert_eq!(
		view.errors(),
		vec!["Something went wrong: index corrupted"]
	);

	// The worker survives the panic and serves later queries.
	dispatcher.dispatch(Query::new("boom"), &mut view).unwrap();
	pump_until_idle(&mut dispatcher, &mut view);
	assert_eq!(view.errors().len(), 2);
}

#[test]
fn empty_search_skips_generation() {
	struct NeverCalled;
	impl AnswerBackend for NeverCalled {
		fn generate(&self, _query: &str, _hits: &[SearchHit]) -> Result<Answer, ServiceError> {
			panic!("generation must not run without context");
		}
	}

	let search = FakeSearch::default().with_hits("obscure", Vec::new());
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, NeverCalled));
	let mut view = RecordingView::default();
	dispatcher.dispatch(Query::new("obscure"), &mut view).unwrap();

	pump_until_idle(&mut dispatcher, &mut view);

	assert_eq!(
		view.events,
		vec![
			Event::Begin("obscure".into()),
			Event::Hits(Vec::new()),
			Event::NoContext,
			Event::Finish,
		]
	);
}

#[test]
fn cancelled_task_publishes_nothing() {
	let (search, release) = FakeSearch::default()
		.with_hits("slow", vec![hit("a.pdf")])
		.gate("slow");
	let (search, entered) = search.report_entry();
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer::default()));
	let mut view = RecordingView::default();

	dispatcher.dispatch(Query::new("slow"), &mut view).unwrap();
	entered.recv_timeout(Duration::from_secs(5)).unwrap();
	assert!(dispatcher.cancel(&mut view));
	assert!(!dispatcher.is_searching());
	assert!(!dispatcher.cancel(&mut view));

	release.send(()).unwrap();
	thread::sleep(Duration::from_millis(50));
	assert_eq!(dispatcher.pump(&mut view), 0);
	assert_eq!(
		view.events,
		vec![Event::Begin("slow".into()), Event::Finish]
	);
}

#[test]
fn stopped_worker_still_finishes_the_query() {
	let search = FakeSearch::default().with_hits("late", vec![hit("a.pdf")]);
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer::default()));
	let mut view = RecordingView::default();

	// The worker handles the shutdown first and never sees the query.
	dispatcher.shutdown();
	dispatcher.dispatch(Query::new("late"), &mut view).unwrap();
	pump_until_idle(&mut dispatcher, &mut view);

	assert!(!dispatcher.is_searching());
	assert_eq!(
		view.errors(),
		vec!["Something went wrong: the background worker stopped"]
	);
	assert_eq!(view.finishes(), 1);
	assert!(view.answers().is_empty());
}

#[test]
fn background_panics_skip_the_process_hook() {
	const MARKER: &str = "disk unreadable while checking the panic hook";

	let calls = Arc::new(AtomicUsize::new(0));
	let counted = Arc::clone(&calls);
	let default_hook = panic::take_hook();
	panic::set_hook(Box::new(move |info| {
		let payload = info.payload();
		let message = payload
			.downcast_ref::<String>()
			.map(String::as_str)
			.or_else(|| payload.downcast_ref::<&str>().copied());
		if message.is_some_and(|message| message.contains(MARKER)) {
			counted.fetch_add(1, Ordering::SeqCst);
		} else {
			default_hook(info);
		}
	}));
	silence_background_panics();

	let search = FakeSearch {
		panic_on: Some("unreadable".into()),
		panic_message: Some(MARKER.into()),
		..FakeSearch::default()
	};
	let mut dispatcher = Dispatcher::spawn(Backends::new(search, FakeAnswer::default()));
	let mut view = RecordingView::default();
	dispatcher.dispatch(Query::new("unreadable"), &mut view).unwrap();
	pump_until_idle(&mut dispatcher, &mut view);

	let worker_calls = calls.load(Ordering::SeqCst);

	// Panics anywhere else still reach the previous hook.
	let interface = thread::Builder::new()
		.name("lore-interface".into())
		.spawn(|| panic!("{MARKER}"))
		.unwrap();
	assert!(interface.join().is_err());
	let interface_calls = calls.load(Ordering::SeqCst);

	drop(panic::take_hook());

	assert_eq!(
		view.errors(),
		vec![format!("Something went wrong: {MARKER}")]
	);
	assert_eq!(worker_calls, 0);
	assert_eq!(interface_calls, 1);
}
