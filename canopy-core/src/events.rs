//! The event board: fetch, gated moderation, and registration bookkeeping.
//!
//! Sequencing is fetch → gate-check → mutate → refetch → notify. After any
//! successful create or delete the whole collection is refetched rather
//! than patched locally, so the board never drifts from server-side
//! defaults and validation. The single exception is the registration
//! count, which arrives from the registration sub-flow and is patched in
//! place.

use tracing::{info, warn};

use canopy_sdk::client::ClientError;
use canopy_sdk::objects::events::{Event, EventDraft, RegistrationDraft};

use crate::gate::{AccessGate, GateDialog, GateState};
use crate::notify::{NotificationChannel, NotificationKind};
use crate::outcome::{LoadPhase, SubmitError};
use crate::store::EventStore;

/// Holds the event collection and orchestrates every flow around it.
///
/// The collection is owned exclusively by the board and mutated only
/// between awaits on the caller's task, so no lock guards it.
pub struct EventBoard<S> {
    store: S,
    gate: AccessGate,
    events: Vec<Event>,
    phase: LoadPhase,
    add_dialog: GateDialog,
    remove_dialog: GateDialog,
    notifications: NotificationChannel,
}

impl<S: EventStore> EventBoard<S> {
    pub fn new(store: S, gate: AccessGate) -> Self {
        Self {
            store,
            gate,
            events: Vec::new(),
            phase: LoadPhase::Loading,
            add_dialog: GateDialog::new(),
            remove_dialog: GateDialog::new(),
            notifications: NotificationChannel::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Fetch the event collection, replacing whatever is held.
    ///
    /// On failure the collection is emptied and the cause recorded; there
    /// is no cached prior state worth keeping on a cold load.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(events) => {
                info!(count = events.len(), "loaded event collection");
                self.events = events;
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                warn!(error = %err, "failed to load event collection");
                self.events.clear();
                self.phase = LoadPhase::Failed {
                    message: describe_load_failure(&err),
                };
            }
        }
    }

    /// Re-run the fetch after a failure, without restarting the app.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Probe the backend root and report the outcome as a notification.
    ///
    /// A successful probe clears a standing load failure so the caller can
    /// retry from a clean slate.
    pub async fn check_connection(&mut self) -> bool {
        match self.store.ping().await {
            Ok(()) => {
                if let LoadPhase::Failed { .. } = self.phase {
                    self.phase = LoadPhase::Ready;
                }
                self.notifications
                    .notify("Server connection OK!", NotificationKind::Success);
                true
            }
            Err(err) => {
                let message = format!("Connection test failed: {err}");
                self.phase = LoadPhase::Failed {
                    message: message.clone(),
                };
                self.notifications.notify(message, NotificationKind::Error);
                false
            }
        }
    }

    // -- Gated moderation ---------------------------------------------------

    pub fn add_dialog(&self) -> &GateState {
        self.add_dialog.state()
    }

    pub fn remove_dialog(&self) -> &GateState {
        self.remove_dialog.state()
    }

    pub fn open_add_dialog(&mut self) {
        self.add_dialog.open();
    }

    pub fn submit_add_code(&mut self, entered: &str) -> bool {
        self.add_dialog.submit_code(&self.gate, entered)
    }

    pub fn cancel_add_dialog(&mut self) {
        self.add_dialog.dismiss();
    }

    pub fn open_remove_dialog(&mut self) {
        self.remove_dialog.open();
    }

    pub fn submit_remove_code(&mut self, entered: &str) -> bool {
        self.remove_dialog.submit_code(&self.gate, entered)
    }

    pub fn cancel_remove_dialog(&mut self) {
        self.remove_dialog.dismiss();
    }

    /// Create an event through the unlocked add dialog.
    ///
    /// On success the collection is refetched and the dialog closes; on
    /// failure the collection is untouched and the dialog stays open with
    /// the server's message inline.
    pub async fn submit_new_event(&mut self, draft: EventDraft) -> Result<(), SubmitError> {
        if !self.add_dialog.action_unlocked() {
            return Err(SubmitError::Locked);
        }
        if let Err(err) = draft.validate() {
            self.add_dialog.reject(err.to_string());
            self.notifications
                .notify(format!("Could not add event: {err}"), NotificationKind::Error);
            return Err(err.into());
        }

        match self.store.create(&draft).await {
            Ok(created) => {
                info!(id = created.id, title = %created.title, "event created");
                self.load().await;
                self.add_dialog.complete();
                self.notifications.notify(
                    format!("Event \"{}\" added!", created.title),
                    NotificationKind::Success,
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to create event");
                self.add_dialog.reject(err.to_string());
                self.notifications
                    .notify(format!("Could not add event: {err}"), NotificationKind::Error);
                Err(err.into())
            }
        }
    }

    /// Delete an event through the unlocked remove dialog.
    ///
    /// The title is captured before deletion because the backend's
    /// confirmation may not echo it.
    pub async fn submit_removal(&mut self, id: i64) -> Result<(), SubmitError> {
        if !self.remove_dialog.action_unlocked() {
            return Err(SubmitError::Locked);
        }

        let title = self
            .events
            .iter()
            .find(|event| event.id == id)
            .map(|event| event.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        match self.store.delete(id).await {
            Ok(_confirmation) => {
                info!(id, title = %title, "event deleted");
                self.load().await;
                self.remove_dialog.complete();
                self.notifications.notify(
                    format!("Event \"{title}\" deleted!"),
                    NotificationKind::Success,
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to delete event");
                self.remove_dialog.reject(err.to_string());
                self.notifications.notify(
                    format!("Could not delete event: {err}"),
                    NotificationKind::Error,
                );
                Err(err.into())
            }
        }
    }

    // -- Registration -------------------------------------------------------

    /// Register a participant and fold the receipt back into the board.
    ///
    /// Registration is owned by a separate form flow; the board only
    /// receives the post-registration count and trusts it verbatim.
    pub async fn submit_registration(
        &mut self,
        id: i64,
        draft: RegistrationDraft,
    ) -> Result<(), SubmitError> {
        if let Err(err) = draft.validate() {
            self.notifications.notify(
                format!("Registration failed: {err}"),
                NotificationKind::Error,
            );
            return Err(err.into());
        }

        match self.store.register(id, &draft).await {
            Ok(receipt) => {
                self.apply_registration(receipt.event_id, receipt.registered);
                self.notifications.notify(
                    "Registration successful! The event card has been updated.",
                    NotificationKind::Success,
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, id, "failed to register participant");
                self.notifications.notify(
                    format!("Registration failed: {err}"),
                    NotificationKind::Error,
                );
                Err(err.into())
            }
        }
    }

    /// Patch the registration count pushed back by the registration flow.
    ///
    /// Exactly the `registered` field of the matching event changes; an
    /// unknown id is a no-op. The count is not re-checked against capacity.
    pub fn apply_registration(&mut self, event_id: i64, new_registered: u32) {
        for event in &mut self.events {
            if event.id == event_id {
                event.registered = new_registered;
            }
        }
    }
}

/// Pick the user-facing explanation for a failed load. Failure kinds share
/// one control path; only the message differs.
fn describe_load_failure(err: &ClientError) -> String {
    match err {
        ClientError::Timeout => "Request timeout - the server did not respond".to_string(),
        e if e.is_connect() => {
            "Cannot reach the server. Check that the backend is running.".to_string()
        }
        e => format!("Failed to load events: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use canopy_sdk::client::StatusCode;
    use canopy_sdk::objects::Confirmation;
    use canopy_sdk::objects::events::RegistrationReceipt;
    use time::macros::datetime;

    use super::*;

    #[derive(Clone, Copy)]
    enum Fail {
        Timeout,
        Api(u16, &'static str),
    }

    impl Fail {
        fn to_err(self) -> ClientError {
            match self {
                Fail::Timeout => ClientError::Timeout,
                Fail::Api(status, message) => ClientError::Api {
                    status: StatusCode::from_u16(status).unwrap(),
                    message: message.to_string(),
                },
            }
        }
    }

    /// In-memory store scripted per test. Mirrors the backend contract:
    /// ids are assigned server-side and a created event always starts with
    /// zero registrations, whatever the draft said.
    #[derive(Default)]
    struct ScriptedStore {
        events: Mutex<Vec<Event>>,
        fail_list: Mutex<Option<Fail>>,
        fail_create: Mutex<Option<Fail>>,
        fail_delete: Mutex<Option<Fail>>,
        fail_ping: Mutex<Option<Fail>>,
    }

    impl ScriptedStore {
        fn with_events(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Self::default()
            }
        }

        fn snapshot(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventStore for &ScriptedStore {
        async fn list(&self) -> Result<Vec<Event>, ClientError> {
            if let Some(fail) = *self.fail_list.lock().unwrap() {
                return Err(fail.to_err());
            }
            Ok(self.snapshot())
        }

        async fn create(&self, draft: &EventDraft) -> Result<Event, ClientError> {
            if let Some(fail) = *self.fail_create.lock().unwrap() {
                return Err(fail.to_err());
            }
            let mut events = self.events.lock().unwrap();
            let id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            let created = Event {
                id,
                title: draft.title.clone(),
                location: draft.location.clone(),
                description: draft.description.clone(),
                date: draft.date,
                capacity: draft.capacity,
                registered: 0,
            };
            events.push(created.clone());
            Ok(created)
        }

        async fn delete(&self, id: i64) -> Result<Confirmation, ClientError> {
            if let Some(fail) = *self.fail_delete.lock().unwrap() {
                return Err(fail.to_err());
            }
            self.events.lock().unwrap().retain(|e| e.id != id);
            Ok(Confirmation {
                message: "deleted".to_string(),
            })
        }

        async fn register(
            &self,
            id: i64,
            _draft: &RegistrationDraft,
        ) -> Result<RegistrationReceipt, ClientError> {
            let mut events = self.events.lock().unwrap();
            let event = events.iter_mut().find(|e| e.id == id).ok_or_else(|| {
                ClientError::Api {
                    status: StatusCode::NOT_FOUND,
                    message: "event not found".to_string(),
                }
            })?;
            event.registered += 1;
            Ok(RegistrationReceipt {
                event_id: id,
                registered: event.registered,
            })
        }

        async fn ping(&self) -> Result<(), ClientError> {
            match *self.fail_ping.lock().unwrap() {
                Some(fail) => Err(fail.to_err()),
                None => Ok(()),
            }
        }
    }

    fn event(id: i64, registered: u32, capacity: u32) -> Event {
        Event {
            id,
            title: format!("Planting day {id}"),
            location: "City park".to_string(),
            description: "Bring gloves".to_string(),
            date: datetime!(2026-09-12 08:00 UTC),
            capacity,
            registered,
        }
    }

    fn board(store: &ScriptedStore) -> EventBoard<&ScriptedStore> {
        EventBoard::new(store, AccessGate::new("222"))
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            location: "City park".to_string(),
            description: "Bring gloves".to_string(),
            date: datetime!(2026-11-01 08:00 UTC),
            capacity: 30,
        }
    }

    #[tokio::test]
    async fn load_installs_the_collection() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5), event(2, 5, 5)]);
        let mut board = board(&store);

        board.load().await;

        assert_eq!(board.phase(), &LoadPhase::Ready);
        assert_eq!(board.events(), store.snapshot().as_slice());
    }

    #[tokio::test]
    async fn load_timeout_empties_the_collection_and_explains() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        let mut board = board(&store);
        board.load().await;
        assert!(!board.events().is_empty());

        *store.fail_list.lock().unwrap() = Some(Fail::Timeout);
        board.retry().await;

        assert!(board.events().is_empty());
        match board.phase() {
            LoadPhase::Failed { message } => assert!(message.contains("timeout")),
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_server_error_uses_the_generic_message() {
        let store = ScriptedStore::default();
        *store.fail_list.lock().unwrap() = Some(Fail::Api(500, "boom"));
        let mut board = board(&store);

        board.load().await;

        match board.phase() {
            LoadPhase::Failed { message } => {
                assert!(message.starts_with("Failed to load events"));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_requires_an_unlocked_dialog() {
        let store = ScriptedStore::default();
        let mut board = board(&store);
        board.load().await;

        let result = board.submit_new_event(draft("Planting day")).await;

        assert!(matches!(result, Err(SubmitError::Locked)));
        assert!(store.snapshot().is_empty());
        assert!(board.notifications().current().is_none());
    }

    #[tokio::test]
    async fn wrong_code_keeps_the_dialog_locked() {
        let store = ScriptedStore::default();
        let mut board = board(&store);

        board.open_add_dialog();
        assert!(!board.submit_add_code("111"));
        assert!(matches!(
            board.add_dialog(),
            GateState::CodeEntry { error: Some(_) }
        ));

        let result = board.submit_new_event(draft("Planting day")).await;
        assert!(matches!(result, Err(SubmitError::Locked)));
    }

    #[tokio::test]
    async fn create_refetches_instead_of_patching() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        let mut board = board(&store);
        board.load().await;

        board.open_add_dialog();
        assert!(board.submit_add_code("222"));
        board
            .submit_new_event(draft("Mangrove planting"))
            .await
            .unwrap();

        // The held collection matches an independent list, including the
        // server-assigned id and zeroed registration count.
        assert_eq!(board.events(), store.snapshot().as_slice());
        assert_eq!(board.add_dialog(), &GateState::Closed);

        let note = board.notifications().current().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert!(note.message.contains("Mangrove planting"));
    }

    #[tokio::test]
    async fn create_failure_keeps_the_dialog_open_with_the_server_message() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        *store.fail_create.lock().unwrap() = Some(Fail::Api(400, "title is required"));
        let mut board = board(&store);
        board.load().await;
        let before = board.events().to_vec();

        board.open_add_dialog();
        board.submit_add_code("222");
        let result = board.submit_new_event(draft("Planting day")).await;

        assert!(matches!(result, Err(SubmitError::Store(_))));
        assert_eq!(board.events(), before.as_slice());
        match board.add_dialog() {
            GateState::ActionForm { error: Some(message) } => {
                assert!(message.contains("title is required"));
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(
            board.notifications().current().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let store = ScriptedStore::default();
        let mut board = board(&store);
        board.open_add_dialog();
        board.submit_add_code("222");

        let mut bad = draft("Planting day");
        bad.title = String::new();
        let result = board.submit_new_event(bad).await;

        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn removal_names_the_captured_title() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5), event(2, 0, 10)]);
        let mut board = board(&store);
        board.load().await;

        board.open_remove_dialog();
        assert!(board.submit_remove_code("222"));
        board.submit_removal(1).await.unwrap();

        assert_eq!(board.events(), store.snapshot().as_slice());
        assert!(board.events().iter().all(|e| e.id != 1));

        let note = board.notifications().current().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert!(note.message.contains("Planting day 1"));
    }

    #[tokio::test]
    async fn removal_of_an_unheld_id_reports_unknown() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        let mut board = board(&store);
        board.load().await;

        board.open_remove_dialog();
        board.submit_remove_code("222");
        board.submit_removal(99).await.unwrap();

        let note = board.notifications().current().unwrap();
        assert!(note.message.contains("Unknown"));
    }

    #[tokio::test]
    async fn removal_failure_leaves_everything_untouched() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        *store.fail_delete.lock().unwrap() = Some(Fail::Api(404, "event not found"));
        let mut board = board(&store);
        board.load().await;
        let before = board.events().to_vec();

        board.open_remove_dialog();
        board.submit_remove_code("222");
        let result = board.submit_removal(1).await;

        assert!(matches!(result, Err(SubmitError::Store(_))));
        assert_eq!(board.events(), before.as_slice());
        assert!(matches!(
            board.remove_dialog(),
            GateState::ActionForm { error: Some(_) }
        ));
    }

    #[tokio::test]
    async fn registration_patch_changes_exactly_one_field() {
        let store = ScriptedStore::default();
        let mut board = board(&store);
        board.events = vec![event(1, 3, 5), event(2, 5, 5)];

        assert!(board.events[1].is_full());
        board.apply_registration(1, 4);

        assert_eq!(board.events[0].registered, 4);
        assert_eq!(board.events[0].capacity, 5);
        assert_eq!(board.events[0].title, "Planting day 1");
        assert_eq!(board.events[1], event(2, 5, 5));
        assert!(board.events[1].is_full());

        // Unknown id is a no-op.
        let before = board.events.clone();
        board.apply_registration(42, 9);
        assert_eq!(board.events, before);
    }

    #[tokio::test]
    async fn registration_flow_trusts_the_receipt() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        let mut board = board(&store);
        board.load().await;

        let participant = RegistrationDraft {
            name: "Ayu".to_string(),
            email: "ayu@example.com".to_string(),
            phone: "+62 811 000 111".to_string(),
        };
        board.submit_registration(1, participant).await.unwrap();

        assert_eq!(board.events()[0].registered, 4);
        assert_eq!(
            board.notifications().current().unwrap().kind,
            NotificationKind::Success
        );
    }

    #[tokio::test]
    async fn blank_registration_form_is_rejected_locally() {
        let store = ScriptedStore::with_events(vec![event(1, 3, 5)]);
        let mut board = board(&store);
        board.load().await;

        let participant = RegistrationDraft {
            name: String::new(),
            email: "ayu@example.com".to_string(),
            phone: "+62 811 000 111".to_string(),
        };
        let result = board.submit_registration(1, participant).await;

        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(store.snapshot()[0].registered, 3);
    }

    #[tokio::test]
    async fn connection_check_clears_a_standing_failure() {
        let store = ScriptedStore::default();
        *store.fail_list.lock().unwrap() = Some(Fail::Timeout);
        let mut board = board(&store);
        board.load().await;
        assert!(matches!(board.phase(), LoadPhase::Failed { .. }));

        assert!(board.check_connection().await);
        assert_eq!(board.phase(), &LoadPhase::Ready);
        assert_eq!(
            board.notifications().current().unwrap().kind,
            NotificationKind::Success
        );

        *store.fail_ping.lock().unwrap() = Some(Fail::Api(503, "maintenance"));
        assert!(!board.check_connection().await);
        assert!(matches!(board.phase(), LoadPhase::Failed { .. }));
    }
}
