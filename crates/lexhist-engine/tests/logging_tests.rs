#![allow(clippy::unwrap_used)]

mod common;

use common::{date, doc_id, scenario_source, service};
use lexhist_core::logging_facility::test_capture::init_test_capture;
use lexhist_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_operations_log_start_end_and_error() {
    let capture = init_test_capture();
    let svc = service(scenario_source());

    svc.reconstruct(&doc_id(), date("2005-01-01")).unwrap();
    capture.assert_event_exists("reconstruct", EVENT_START);
    capture.assert_event_exists("reconstruct", EVENT_END);

    svc.diff_versions(&doc_id(), date("2015-01-01"), date("2005-01-01"))
        .unwrap_err();
    let errors: Vec<_> = capture
        .events_for_op("diff_versions")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_code"), Some("ERR_INVALID_DATE_RANGE"));
}
