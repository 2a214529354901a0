use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use trellocal_core::{
    ActionKind, CalendarEvent, CalendarSink, DayRange, EventFields, EventTime, Outcome,
    Reconciler, SkipReason, SyncError, SyncResult, Task, TaskSource,
};

struct FakeBoard {
    tasks: Vec<Task>,
    fail: bool,
}

#[async_trait]
impl TaskSource for FakeBoard {
    async fn list_open_tasks(&self) -> SyncResult<Vec<Task>> {
        if self.fail {
            return Err(SyncError::TaskSource("board unreachable".into()));
        }
        Ok(self.tasks.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List(NaiveDate),
    Create(EventFields),
    Update(String, EventFields),
}

/// In-memory calendar keyed by all-day date.
#[derive(Default)]
struct FakeCalendar {
    events: Mutex<Vec<CalendarEvent>>,
    calls: Mutex<Vec<Call>>,
    failing_days: HashSet<NaiveDate>,
    next_id: Mutex<u32>,
}

impl FakeCalendar {
    fn with_events(events: Vec<CalendarEvent>) -> Self {
        FakeCalendar {
            events: Mutex::new(events),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn mutations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, Call::List(_)))
            .count()
    }

    fn events(&self) -> Vec<CalendarEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarSink for FakeCalendar {
    async fn list_events_in_range(&self, range: &DayRange) -> SyncResult<Vec<CalendarEvent>> {
        self.calls.lock().unwrap().push(Call::List(range.date));
        if self.failing_days.contains(&range.date) {
            return Err(SyncError::Calendar("503 Service Unavailable".into()));
        }
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.start == EventTime::Date(range.date))
            .cloned()
            .collect())
    }

    async fn create_event(&self, fields: &EventFields) -> SyncResult<String> {
        self.calls.lock().unwrap().push(Call::Create(fields.clone()));
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = format!("new{}", *next);
        self.events.lock().unwrap().push(CalendarEvent {
            id: id.clone(),
            summary: fields.summary.clone(),
            description: Some(fields.description.clone()),
            start: EventTime::Date(fields.day),
            end: EventTime::Date(fields.day),
            time_zone: Some("Europe/Rome".into()),
        });
        Ok(id)
    }

    async fn update_event(&self, event_id: &str, fields: &EventFields) -> SyncResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(event_id.to_string(), fields.clone()));
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| SyncError::Calendar(format!("404 {event_id}")))?;
        event.summary = fields.summary.clone();
        event.description = Some(fields.description.clone());
        Ok(event_id.to_string())
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn make_task(id: &str, due: Option<&str>, last_modified: &str) -> Task {
    Task {
        id: id.to_string(),
        name: format!("Task {id}"),
        description: format!("about {id}"),
        due: due.map(day),
        last_modified: ts(last_modified),
        due_complete: false,
        closed: false,
        url: format!("https://trello.com/c/{id}"),
    }
}

fn tagged_event(id: &str, on: &str, description: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        summary: format!("Event {id}"),
        description: Some(description.to_string()),
        start: EventTime::Date(day(on)),
        end: EventTime::Date(day(on)),
        time_zone: Some("Europe/Rome".to_string()),
    }
}

fn board(tasks: Vec<Task>) -> FakeBoard {
    FakeBoard { tasks, fail: false }
}

#[tokio::test]
async fn test_creates_event_on_empty_day() {
    let board = board(vec![make_task("c1", Some("2024-05-01"), "2024-05-01 10:00")]);
    let calendar = FakeCalendar::default();

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await
        .unwrap();

    assert_eq!(report.created(), 1);
    assert_eq!(report.outcomes[0].outcome, Outcome::Created("new1".into()));

    let calls = calendar.calls();
    assert_eq!(calls[0], Call::List(day("2024-05-01")));
    match &calls[1] {
        Call::Create(fields) => {
            assert_eq!(fields.summary, "Task c1");
            assert_eq!(fields.day, day("2024-05-01"));
            assert!(
                fields
                    .description
                    .starts_with("[TRELLO]c1[/TRELLO]\n[LASTEDIT]2024-05-01 10:00[/LASTEDIT]\n"),
                "unexpected description: {}",
                fields.description
            );
            assert!(fields.description.ends_with("Link: https://trello.com/c/c1"));
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn test_patches_stale_event() {
    let board = board(vec![make_task("c1", Some("2024-05-01"), "2024-05-01 10:00")]);
    let calendar = FakeCalendar::with_events(vec![tagged_event(
        "e1",
        "2024-05-01",
        "[TRELLO]c1[/TRELLO]\n[LASTEDIT]2024-05-01 09:00[/LASTEDIT]",
    )]);

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcomes[0].outcome, Outcome::Updated("e1".into()));
    assert!(matches!(&calendar.calls()[1], Call::Update(id, _) if id == "e1"));
    assert!(
        calendar.events()[0]
            .description
            .as_deref()
            .unwrap()
            .contains("[LASTEDIT]2024-05-01 10:00[/LASTEDIT]")
    );
}

#[tokio::test]
async fn test_leaves_in_sync_event_alone() {
    let board = board(vec![make_task("c1", Some("2024-05-01"), "2024-05-01 10:00")]);
    let calendar = FakeCalendar::with_events(vec![tagged_event(
        "e1",
        "2024-05-01",
        "[TRELLO]c1[/TRELLO]\n[LASTEDIT]2024-05-01 10:00[/LASTEDIT]",
    )]);

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcomes[0].outcome, Outcome::Unchanged);
    assert_eq!(calendar.mutations(), 0);
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let board = board(vec![
        make_task("c1", Some("2024-05-01"), "2024-05-01 10:00"),
        make_task("c2", Some("2024-05-01"), "2024-04-28 16:45"),
        make_task("c3", Some("2024-05-02"), "2024-04-29 08:10"),
    ]);
    let calendar = FakeCalendar::with_events(vec![tagged_event("x", "2024-05-01", "Standup")]);
    let reconciler = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome);

    let first = reconciler.run().await.unwrap();
    assert_eq!(first.created(), 3);

    let mutations_after_first = calendar.mutations();
    let second = reconciler.run().await.unwrap();

    assert_eq!(second.unchanged(), 3);
    assert_eq!(calendar.mutations(), mutations_after_first);
    assert_eq!(calendar.events().len(), 4);
}

#[tokio::test]
async fn test_skips_undated_completed_and_archived_tasks() {
    let mut completed = make_task("done", Some("2024-05-01"), "2024-05-01 10:00");
    completed.due_complete = true;
    let mut archived = make_task("old", Some("2024-05-01"), "2024-05-01 10:00");
    archived.closed = true;

    let board = board(vec![
        make_task("undated", None, "2024-05-01 10:00"),
        completed,
        archived,
    ]);
    let calendar = FakeCalendar::default();

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await
        .unwrap();

    let outcomes: Vec<_> = report.outcomes.iter().map(|o| o.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Skipped(SkipReason::NoDueDate),
            Outcome::Skipped(SkipReason::Completed),
            Outcome::Skipped(SkipReason::Closed),
        ]
    );
    assert!(calendar.calls().is_empty(), "skipped tasks must not hit the calendar");
}

#[tokio::test]
async fn test_fetch_failure_does_not_stop_the_run() {
    let board = board(vec![
        make_task("c1", Some("2024-05-01"), "2024-05-01 10:00"),
        make_task("c2", Some("2024-05-02"), "2024-05-01 10:00"),
    ]);
    let calendar = FakeCalendar {
        failing_days: HashSet::from([day("2024-05-01")]),
        ..Default::default()
    };

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await
        .unwrap();

    assert!(matches!(report.outcomes[0].outcome, Outcome::Failed(_)));
    assert_eq!(report.outcomes[1].outcome, Outcome::Created("new1".into()));
    assert_eq!(report.failed(), 1);
    // A failed fetch must not be mistaken for an empty day
    assert!(
        !calendar
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Create(f) if f.day == day("2024-05-01")))
    );
}

#[tokio::test]
async fn test_dry_run_plans_without_mutating() {
    let board = board(vec![
        make_task("c1", Some("2024-05-01"), "2024-05-01 10:00"),
        make_task("c2", Some("2024-05-01"), "2024-05-01 10:00"),
        make_task("c3", Some("2024-05-01"), "2024-05-01 10:00"),
    ]);
    let calendar = FakeCalendar::with_events(vec![
        tagged_event(
            "e2",
            "2024-05-01",
            "[TRELLO]c2[/TRELLO]\n[LASTEDIT]2024-04-30 10:00[/LASTEDIT]",
        ),
        tagged_event(
            "e3",
            "2024-05-01",
            "[TRELLO]c3[/TRELLO]\n[LASTEDIT]2024-05-01 10:00[/LASTEDIT]",
        ),
    ]);

    let report = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .dry_run(true)
        .run()
        .await
        .unwrap();

    let planned: Vec<_> = report.outcomes.iter().map(|o| o.outcome.clone()).collect();
    assert_eq!(
        planned,
        vec![
            Outcome::Planned(ActionKind::Create),
            Outcome::Planned(ActionKind::Update),
            Outcome::Planned(ActionKind::Pass),
        ]
    );
    assert_eq!(calendar.mutations(), 0);
}

#[tokio::test]
async fn test_task_list_failure_aborts() {
    let board = FakeBoard {
        tasks: vec![],
        fail: true,
    };
    let calendar = FakeCalendar::default();

    let result = Reconciler::new(&board, &calendar, chrono_tz::Europe::Rome)
        .run()
        .await;

    assert!(matches!(result, Err(SyncError::TaskSource(_))));
    assert!(calendar.calls().is_empty());
}
