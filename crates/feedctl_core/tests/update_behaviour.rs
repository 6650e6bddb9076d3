use std::sync::Once;

use feedctl_core::{
    update, AppState, ControlAction, ConversionProfile, Effect, Msg, OperationResult,
    ProfileField, SchedulerStatus, StatusReply, LOADING_TEXT, NO_RESPONSE_TEXT,
    STATUS_RUNNING_TEXT, STATUS_STOPPED_TEXT,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feedctl_logging::initialize_for_tests);
}

fn mount(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::Mounted);
    let call_id = match effects.as_slice() {
        [Effect::QueryStatus { call_id }] => *call_id,
        other => panic!("expected a single status query, got {other:?}"),
    };
    (state, call_id)
}

fn edit(state: AppState, field: ProfileField, value: &str) -> AppState {
    update(
        state,
        Msg::FieldChanged {
            field,
            value: value.to_string(),
        },
    )
    .0
}

fn filled_profile() -> ConversionProfile {
    ConversionProfile {
        source_url: "http://a.com/feed.xml".to_string(),
        ftp_host: "feed.walde.ch".to_string(),
        ftp_username: "u".to_string(),
        ftp_password: "p".to_string(),
        ftp_target_path: "fgp.xml".to_string(),
    }
}

fn fill(mut state: AppState, profile: &ConversionProfile) -> AppState {
    for field in ProfileField::ALL {
        state = edit(state, field, profile.get(field));
    }
    state
}

#[test]
fn field_edit_merges_into_draft() {
    init_logging();
    let state = fill(AppState::new(), &filled_profile());

    let state = edit(state, ProfileField::FtpHost, "ftp.example.org");

    let mut expected = filled_profile();
    expected.ftp_host = "ftp.example.org".to_string();
    assert_eq!(state.draft(), &expected);
}

#[test]
fn each_field_update_leaves_the_other_four_alone() {
    init_logging();
    for field in ProfileField::ALL {
        let state = fill(AppState::new(), &filled_profile());
        let state = edit(state, field, "changed");
        for other in ProfileField::ALL {
            let expected = if other == field {
                "changed".to_string()
            } else {
                filled_profile().get(other).to_string()
            };
            assert_eq!(state.draft().get(other), expected, "field {other:?}");
        }
    }
}

#[test]
fn mount_issues_exactly_one_status_query() {
    init_logging();
    let (state, _call_id) = mount(AppState::new());
    assert!(state.is_loading());

    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn before_any_result_status_shows_loading_and_response_placeholder() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.status_text, LOADING_TEXT);
    assert_eq!(view.response_text, NO_RESPONSE_TEXT);
    assert!(!view.loading);
}

#[test]
fn fresh_load_with_stopped_scheduler_keeps_empty_draft() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let (mut state, effects) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Status(SchedulerStatus::from_payload(&json!({ "running": false }))),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.draft(), &ConversionProfile::default());
    assert_eq!(state.view().status_text, STATUS_STOPPED_TEXT);
    assert_eq!(state.view().response_text, STATUS_STOPPED_TEXT);
    assert!(state.consume_dirty());
}

#[test]
fn stopped_status_keeps_what_the_user_typed() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let state = edit(state, ProfileField::SourceUrl, "http://typed.example/feed.xml");

    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Status(SchedulerStatus::Stopped),
        },
    );
    assert_eq!(state.draft().source_url, "http://typed.example/feed.xml");
}

#[test]
fn fresh_load_with_running_scheduler_adopts_server_config() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let state = edit(state, ProfileField::FtpUsername, "local-typing");

    let payload = json!({
        "running": true,
        "config": {
            "source_url": "http://a.com/feed.xml",
            "ftp_host": "feed.walde.ch",
            "ftp_username": "u",
            "ftp_password": "p",
            "ftp_target_path": "fgp.xml",
        }
    });
    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Status(SchedulerStatus::from_payload(&payload)),
        },
    );

    assert_eq!(state.draft(), &filled_profile());
    assert_eq!(state.view().status_text, STATUS_RUNNING_TEXT);
    assert!(!state.is_loading());
}

#[test]
fn running_with_partial_config_merges_into_draft() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let state = edit(state, ProfileField::SourceUrl, "typed");
    let state = edit(state, ProfileField::FtpHost, "typed.host");
    let payload = json!({ "running": true, "config": { "ftp_host": "only.host" } });

    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Status(SchedulerStatus::from_payload(&payload)),
        },
    );

    let expected = ConversionProfile {
        source_url: "typed".to_string(),
        ftp_host: "only.host".to_string(),
        ..ConversionProfile::default()
    };
    assert_eq!(state.draft(), &expected);
    assert_eq!(state.view().status_text, STATUS_RUNNING_TEXT);
}

#[test]
fn running_without_config_reads_as_stopped_and_keeps_draft() {
    init_logging();
    for payload in [json!({ "running": true }), json!({ "running": true, "config": "bogus" })] {
        let (state, call_id) = mount(fill(AppState::new(), &filled_profile()));
        let (state, _) = update(
            state,
            Msg::StatusResolved {
                call_id,
                reply: StatusReply::Status(SchedulerStatus::from_payload(&payload)),
            },
        );
        assert_eq!(state.draft(), &filled_profile());
        assert_eq!(state.view().status_text, STATUS_STOPPED_TEXT);
        assert!(!state.is_loading());
    }
}

#[test]
fn failed_status_query_clears_loading_and_shows_error() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let failure = OperationResult::from_payload(&json!({ "error": "dns error" }));

    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Failed(failure),
        },
    );

    assert!(!state.is_loading());
    assert!(state.view().response_text.contains("dns error"));
    assert_eq!(state.draft(), &ConversionProfile::default());
}

#[test]
fn run_now_sends_draft_and_renders_summary() {
    init_logging();
    let (state, call_id) = mount(AppState::new());
    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id,
            reply: StatusReply::Status(SchedulerStatus::Stopped),
        },
    );
    let state = fill(state, &filled_profile());

    let (state, effects) = update(state, Msg::ActionClicked(ControlAction::RunNow));
    let run_id = match effects.as_slice() {
        [Effect::RunOnce { call_id, profile }] => {
            assert_eq!(profile, &filled_profile());
            *call_id
        }
        other => panic!("expected run-once effect, got {other:?}"),
    };
    assert!(state.is_loading());
    let view = state.view();
    assert!(view.loading);
    assert!(view.actions.iter().all(|action| !action.enabled));
    assert_eq!(view.actions[1].label, "Processing...");

    let payload = json!({ "status": "ok", "removed_images": 3, "ftp_target_path": "fgp.xml" });
    let (state, _) = update(
        state,
        Msg::ControlResolved {
            call_id: run_id,
            result: OperationResult::from_payload(&payload),
        },
    );

    assert!(!state.is_loading());
    let view = state.view();
    assert_eq!(
        view.response_text,
        "Status: ok\nRemoved images: 3\nFTP Path: fgp.xml"
    );
    assert!(view.actions.iter().all(|action| action.enabled));
    assert_eq!(view.actions[1].label, "Run Now");
}

#[test]
fn start_and_stop_emit_their_effects() {
    init_logging();
    let state = fill(AppState::new(), &filled_profile());

    let (state, effects) = update(state, Msg::ActionClicked(ControlAction::StartScheduler));
    let start_id = match effects.as_slice() {
        [Effect::StartScheduler { call_id, profile }] => {
            assert_eq!(profile, &filled_profile());
            *call_id
        }
        other => panic!("expected start effect, got {other:?}"),
    };
    assert_eq!(state.view().actions[0].label, "Starting...");

    let (state, _) = update(
        state,
        Msg::ControlResolved {
            call_id: start_id,
            result: Some(OperationResult::message("Scheduler started")),
        },
    );

    let (state, effects) = update(state, Msg::ActionClicked(ControlAction::StopScheduler));
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::StopScheduler { .. }));
    assert_ne!(effects[0].call_id(), start_id);
    assert!(state.is_loading());
}

#[test]
fn actions_are_gated_while_loading() {
    init_logging();
    let (state, _call_id) = mount(AppState::new());
    let before = state.clone();

    for action in ControlAction::ALL {
        let (next, effects) = update(state.clone(), Msg::ActionClicked(action));
        assert!(effects.is_empty());
        assert_eq!(next, before);
    }
}

#[test]
fn transport_failure_on_stop_clears_loading() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ActionClicked(ControlAction::StopScheduler));
    let call_id = effects[0].call_id();
    assert!(state.is_loading());

    let failure = OperationResult::from_payload(&json!({ "error": "operation timed out" }));
    let (state, _) = update(state, Msg::ControlResolved { call_id, result: failure });

    assert!(!state.is_loading());
    assert!(state.view().response_text.contains("operation timed out"));
}

#[test]
fn empty_control_payload_clears_result_slot() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ActionClicked(ControlAction::RunNow));
    let call_id = effects[0].call_id();

    let (state, _) = update(state, Msg::ControlResolved { call_id, result: None });
    assert!(state.result().is_none());
    assert_eq!(state.view().response_text, NO_RESPONSE_TEXT);
    assert!(!state.is_loading());
}

#[test]
fn later_result_overwrites_earlier_one_regardless_of_order() {
    init_logging();
    let (state, status_id) = mount(AppState::new());
    // A forced action while the status query is still pending.
    let (state, effects) = update(state, Msg::ActionClicked(ControlAction::RunNow));
    assert!(effects.is_empty());

    // Resolve the status query, then run a control call whose result lands
    // after it.
    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id: status_id,
            reply: StatusReply::Status(SchedulerStatus::Stopped),
        },
    );
    let (state, effects) = update(state, Msg::ActionClicked(ControlAction::StopScheduler));
    let stop_id = effects[0].call_id();
    let (state, _) = update(
        state,
        Msg::ControlResolved {
            call_id: stop_id,
            result: Some(OperationResult::message("Scheduler stopped")),
        },
    );
    assert_eq!(state.view().response_text, "Scheduler stopped");
}

#[test]
fn overlapping_completions_keep_loading_until_all_settle() {
    init_logging();
    let (state, status_id) = mount(AppState::new());
    // A completion for an unknown call replaces the result but must not
    // clear Loading while the status query is still pending.
    let (state, _) = update(
        state,
        Msg::ControlResolved {
            call_id: status_id + 100,
            result: Some(OperationResult::message("stray")),
        },
    );
    assert!(state.is_loading());
    assert_eq!(state.view().response_text, "stray");

    let (state, _) = update(
        state,
        Msg::StatusResolved {
            call_id: status_id,
            reply: StatusReply::Status(SchedulerStatus::Stopped),
        },
    );
    assert!(!state.is_loading());
    assert_eq!(state.view().response_text, STATUS_STOPPED_TEXT);
}

#[test]
fn password_is_masked_in_view() {
    init_logging();
    let state = edit(AppState::new(), ProfileField::FtpPassword, "s3cret");
    let view = state.view();
    let password = view
        .fields
        .iter()
        .find(|field| field.field == ProfileField::FtpPassword)
        .unwrap();
    assert_eq!(password.value, "******");
    assert_eq!(state.draft().ftp_password, "s3cret");
}

#[test]
fn focus_moves_through_fields() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::FocusNext);
    assert_eq!(state.focus(), ProfileField::FtpHost);
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::FocusPrevious);
    let (state, _) = update(state, Msg::FocusPrevious);
    assert_eq!(state.focus(), ProfileField::FtpTargetPath);
    assert!(state.view().fields[4].focused);
}
