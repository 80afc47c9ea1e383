mod common;

use common::*;
use headlamp_application::{
    ChatSession, SEND_FAILED_MESSAGE, SendOptions, SendOutcome, SubmitOutcome,
};
use headlamp_core::HeadlampError;
use headlamp_core::chat::{ChatResponse, Role, WireDraft};
use headlamp_core::config::{DraftConfig, DraftRetention};
use headlamp_core::draft::{DraftEditor, DraftIssue};
use std::sync::Arc;
use tokio::sync::Notify;

async fn session_with(
    gateway: Arc<MockChatGateway>,
    repository: Arc<MockIdentityRepository>,
) -> ChatSession {
    ChatSession::start(gateway, repository, DraftConfig::default()).await
}

#[tokio::test]
async fn test_first_message_assigns_identity() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(MockChatGateway::gated(
        vec![reply_with_orgs("u-1", "These organizations can help")],
        gate.clone(),
    ));
    let repository = Arc::new(MockIdentityRepository::empty());
    let session = session_with(gateway.clone(), repository.clone()).await;

    let (outcome, ()) = tokio::join!(
        session.send("I need food help", SendOptions::default()),
        async {
            assert!(session.is_pending());
            assert_eq!(session.len(), 1);
            assert_eq!(session.history()[0].role(), Role::User);
            gate.notify_one();
        }
    );

    assert_eq!(outcome, SendOutcome::Delivered);
    assert!(!session.is_pending());
    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content(), "I need food help");
    assert_eq!(history[1].role(), Role::Assistant);
    assert_eq!(history[1].organizations().unwrap().len(), 3);

    assert_eq!(session.user_id().as_deref(), Some("u-1"));
    assert_eq!(repository.stored().as_deref(), Some("u-1"));
    assert!(gateway.requests()[0].user_id.is_none());
}

#[tokio::test]
async fn test_history_is_append_only_across_outcomes() {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply("u-1", "Hello"),
        Err(HeadlampError::api(502, "bad gateway")),
        reply("u-1", "Back again"),
    ]));
    let session = session_with(gateway, Arc::new(MockIdentityRepository::empty())).await;

    assert_eq!(session.send("hi", SendOptions::default()).await, SendOutcome::Delivered);
    assert_eq!(session.len(), 2);

    assert_eq!(session.send("still there?", SendOptions::default()).await, SendOutcome::Failed);
    assert_eq!(session.len(), 3);
    assert_eq!(session.history()[2].content(), "still there?");
    assert_eq!(session.error().as_deref(), Some(SEND_FAILED_MESSAGE));
    assert!(!session.is_pending());

    assert_eq!(session.send("   ", SendOptions::default()).await, SendOutcome::SkippedEmpty);
    assert_eq!(session.len(), 3);
    assert!(session.error().is_some());

    assert_eq!(session.send("retry", SendOptions::default()).await, SendOutcome::Delivered);
    assert_eq!(session.len(), 5);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_second_send_while_pending_is_skipped() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(MockChatGateway::gated(vec![reply("u-1", "ok")], gate.clone()));
    let session = session_with(gateway.clone(), Arc::new(MockIdentityRepository::empty())).await;

    let (first, second) = tokio::join!(
        session.send("first", SendOptions::default()),
        async {
            let outcome = session.send("second", SendOptions::default()).await;
            gate.notify_one();
            outcome
        }
    );

    assert_eq!(first, SendOutcome::Delivered);
    assert_eq!(second, SendOutcome::SkippedBusy);
    assert_eq!(gateway.calls(), 1);
    let users: Vec<_> = session
        .history()
        .into_iter()
        .filter(|turn| turn.role() == Role::User)
        .collect();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].content(), "first");
}

#[tokio::test]
async fn test_persisted_identity_is_never_overwritten() {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply("B", "first"),
        reply("B", "second"),
    ]));
    let repository = Arc::new(MockIdentityRepository::with_identity("A"));
    let session = session_with(gateway.clone(), repository.clone()).await;

    session.send("one", SendOptions::default()).await;
    session.send("two", SendOptions::default()).await;

    assert_eq!(session.user_id().as_deref(), Some("A"));
    assert_eq!(repository.stored().as_deref(), Some("A"));
    assert_eq!(repository.saves(), 0);
    for request in gateway.requests() {
        assert_eq!(request.user_id.as_deref(), Some("A"));
    }
}

#[tokio::test]
async fn test_identity_is_written_once_and_reused() {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply("u-7", "first"),
        reply("u-7", "second"),
    ]));
    let repository = Arc::new(MockIdentityRepository::empty());
    let session = session_with(gateway.clone(), repository.clone()).await;

    session.send("one", SendOptions::default()).await;
    session.send("two", SendOptions::default()).await;

    assert_eq!(repository.saves(), 1);
    let requests = gateway.requests();
    assert!(requests[0].user_id.is_none());
    assert_eq!(requests[1].user_id.as_deref(), Some("u-7"));
}

#[tokio::test]
async fn test_identity_storage_failures_do_not_block_the_session() {
    let gateway = Arc::new(MockChatGateway::new(vec![reply("u-3", "hi")]));
    let session = session_with(gateway, Arc::new(MockIdentityRepository::failing_load())).await;
    assert!(session.user_id().is_none());

    assert_eq!(session.send("hello", SendOptions::default()).await, SendOutcome::Delivered);

    let gateway = Arc::new(MockChatGateway::new(vec![reply("u-4", "hi")]));
    let repository = Arc::new(MockIdentityRepository::failing_save());
    let session = session_with(gateway, repository.clone()).await;

    session.send("hello", SendOptions::default()).await;

    assert_eq!(repository.saves(), 1);
    assert!(repository.stored().is_none());
    assert_eq!(session.user_id().as_deref(), Some("u-4"));
}

#[tokio::test]
async fn test_clicked_organizations_are_sent() {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply_with_orgs("u-1", "Pick one"),
        reply("u-1", "Tell me more about your situation"),
    ]));
    let session = session_with(gateway.clone(), Arc::new(MockIdentityRepository::empty())).await;

    session.send("I need housing", SendOptions::default()).await;
    assert_eq!(session.offered_organizations().len(), 3);

    session
        .send("I'd like these", SendOptions::clicked(vec![1, 3]))
        .await;

    let requests = gateway.requests();
    let request = &requests[1];
    assert_eq!(request.clicked_org_ids, Some(vec![1, 3]));
    assert!(request.application_draft.is_none());
    assert!(request.do_apply.is_none());
}

#[tokio::test]
async fn test_reset_keeps_identity() {
    let gateway = Arc::new(MockChatGateway::new(vec![reply("u-1", "hi")]));
    let session = session_with(gateway, Arc::new(MockIdentityRepository::empty())).await;

    session.send("hello", SendOptions::default()).await;
    session.reset();

    assert!(session.is_empty());
    assert!(session.error().is_none());
    assert_eq!(session.user_id().as_deref(), Some("u-1"));
}

#[tokio::test]
async fn test_reply_to_request_sent_before_reset_is_dropped() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(MockChatGateway::gated(vec![reply("u-1", "late")], gate.clone()));
    let session = session_with(gateway, Arc::new(MockIdentityRepository::empty())).await;

    let (outcome, ()) = tokio::join!(session.send("hello", SendOptions::default()), async {
        session.reset();
        gate.notify_one();
    });

    assert_eq!(outcome, SendOutcome::Failed);
    assert!(session.is_empty());
    assert!(!session.is_pending());
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_unstructured_draft_is_not_reviewable() {
    let gateway = Arc::new(MockChatGateway::new(vec![Ok(ChatResponse {
        user_id: Some("u-1".to_string()),
        message: "I wrote something up".to_string(),
        orgs: None,
        application_draft: Some(WireDraft::Text("Name: Jordan".to_string())),
    })]));
    let session = session_with(gateway, Arc::new(MockIdentityRepository::empty())).await;

    session.send("draft it", SendOptions::default()).await;

    assert!(session.latest_draft().is_none());
    assert_eq!(session.history()[1].content(), "I wrote something up");
}

#[tokio::test]
async fn test_invalid_draft_is_never_sent() {
    let gateway = Arc::new(MockChatGateway::new(vec![reply_with_draft("u-1")]));
    let session = session_with(gateway.clone(), Arc::new(MockIdentityRepository::empty())).await;
    session.send("apply for me", SendOptions::default()).await;

    let editor = DraftEditor::open(&session.latest_draft().unwrap());
    let outcome = session.submit_draft(editor).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid {
            issue: DraftIssue::ConsentMissing,
            ..
        }
    ));
    assert_eq!(gateway.calls(), 1);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_submit_sends_finalize_request() {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply_with_draft("u-1"),
        reply("u-1", "Your application was sent"),
    ]));
    let session = session_with(gateway.clone(), Arc::new(MockIdentityRepository::empty())).await;
    session.send("apply for me", SendOptions::default()).await;

    let mut editor = DraftEditor::open(&session.latest_draft().unwrap());
    editor.toggle_organization(2).unwrap();
    editor.set_consent(true);
    let outcome = session.submit_draft(editor).await;

    assert!(matches!(outcome, SubmitOutcome::Submitted));
    let requests = gateway.requests();
    let request = &requests[1];
    assert_eq!(request.message, "Submit my application");
    assert_eq!(request.user_id.as_deref(), Some("u-1"));
    assert_eq!(request.do_apply, Some(vec![1, 3]));
    let draft = request.application_draft.as_ref().unwrap();
    assert_eq!(draft.name, "Jordan Reyes");
    assert_eq!(
        draft.organizations.iter().map(|org| org.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
}

async fn failed_submission(retention: DraftRetention) -> SubmitOutcome {
    let gateway = Arc::new(MockChatGateway::new(vec![
        reply_with_draft("u-1"),
        Err(HeadlampError::transport("connection reset")),
    ]));
    let config = DraftConfig {
        retention,
        ..DraftConfig::default()
    };
    let session =
        ChatSession::start(gateway, Arc::new(MockIdentityRepository::empty()), config).await;
    session.send("apply for me", SendOptions::default()).await;

    let mut editor = DraftEditor::open(&session.latest_draft().unwrap());
    editor.set_consent(true);
    let outcome = session.submit_draft(editor).await;
    assert_eq!(session.error().as_deref(), Some(SEND_FAILED_MESSAGE));
    outcome
}

#[tokio::test]
async fn test_failed_submission_discards_draft_by_default() {
    let outcome = failed_submission(DraftRetention::DiscardAlways).await;
    assert!(matches!(
        outcome,
        SubmitOutcome::NotSubmitted {
            outcome: SendOutcome::Failed,
            retained: None
        }
    ));
}

#[tokio::test]
async fn test_failed_submission_can_keep_draft() {
    let outcome = failed_submission(DraftRetention::KeepOnFailure).await;
    let SubmitOutcome::NotSubmitted {
        retained: Some(editor),
        ..
    } = outcome
    else {
        panic!("draft should be retained");
    };
    assert!(editor.has_consent());
    assert_eq!(editor.selected_ids(), &[1, 2, 3]);
}

#[tokio::test]
async fn test_submit_while_sending_is_a_no_op() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(MockChatGateway::gated(vec![reply("u-1", "ok")], gate.clone()));
    let session = session_with(gateway.clone(), Arc::new(MockIdentityRepository::empty())).await;
    let mut editor = DraftEditor::open(&draft());
    editor.set_consent(true);

    let (_, submitted) = tokio::join!(session.send("one moment", SendOptions::default()), async {
        let outcome = session.submit_draft(editor).await;
        gate.notify_one();
        outcome
    });

    assert!(matches!(
        submitted,
        SubmitOutcome::NotSubmitted {
            outcome: SendOutcome::SkippedBusy,
            ..
        }
    ));
    assert_eq!(gateway.calls(), 1);
    assert_eq!(session.len(), 2);
}
