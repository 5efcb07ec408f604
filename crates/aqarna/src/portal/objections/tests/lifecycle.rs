use crate::portal::objections::domain::{ObjectionStatus, TransitionError};

use super::common::*;

#[test]
fn statuses_expose_terminality() {
    assert!(!ObjectionStatus::New.is_terminal());
    assert!(!ObjectionStatus::UnderReview.is_terminal());
    assert!(ObjectionStatus::Accepted.is_terminal());
    assert!(ObjectionStatus::Rejected.is_terminal());
}

#[test]
fn whitelist_admits_only_forward_moves() {
    use ObjectionStatus::*;

    assert!(New.can_become(UnderReview));
    assert!(New.can_become(Accepted));
    assert!(New.can_become(Rejected));
    assert!(UnderReview.can_become(Accepted));
    assert!(UnderReview.can_become(Rejected));

    assert!(!UnderReview.can_become(New), "review cannot regress to new");
    assert!(!Accepted.can_become(Rejected));
    assert!(!Accepted.can_become(UnderReview));
    assert!(!Rejected.can_become(Accepted));
    assert!(!New.can_become(New));
}

#[test]
fn transition_mutates_only_on_allowed_moves() {
    let (service, _) = build_service();
    let mut objection = service
        .submit_owner(owner_draft(), submitter(), today())
        .expect("submission accepted");

    objection
        .transition(ObjectionStatus::UnderReview)
        .expect("intake enters review");
    assert_eq!(objection.status, ObjectionStatus::UnderReview);

    objection
        .transition(ObjectionStatus::Accepted)
        .expect("review concludes");

    let err = objection
        .transition(ObjectionStatus::Rejected)
        .expect_err("terminal state is final");
    assert_eq!(
        err,
        TransitionError::Terminal {
            from: ObjectionStatus::Accepted,
            to: ObjectionStatus::Rejected,
        }
    );
    assert_eq!(objection.status, ObjectionStatus::Accepted, "status unchanged");
}

#[test]
fn terminal_error_message_names_both_states() {
    let err = TransitionError::Terminal {
        from: ObjectionStatus::Rejected,
        to: ObjectionStatus::Accepted,
    };
    assert_eq!(
        err.to_string(),
        "objection is already rejected and cannot become accepted"
    );
}

#[test]
fn new_objections_present_as_under_review_in_lists() {
    assert_eq!(ObjectionStatus::New.label(), "new");
    assert_eq!(ObjectionStatus::New.public_label(), "under_review");
    assert_eq!(ObjectionStatus::Accepted.public_label(), "accepted");
}
