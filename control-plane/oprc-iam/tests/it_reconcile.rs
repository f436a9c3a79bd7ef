// End-to-end checks of one reconciliation pass over realistic role shapes.

use oprc_iam::controller::{
    create_patch, diff_tags, generate_role, is_role_up_to_date,
    late_initialize_role, plan_update,
};
use oprc_iam::crd::RoleParameters;
use oprc_iam::remote::ObservedRole;
use oprc_iam::DiffError;

mod common;
use common::{apply_tag_diff, load_observed, tag_map, tags};

#[test_log::test]
fn changed_tag_value_is_added_not_removed() {
    let local = tags(&[("env", "prod")]);
    let remote = tags(&[("env", "staging"), ("team", "x")]);
    let (add, remove) = diff_tags(&local, &remote);
    assert_eq!(add, tags(&[("env", "prod")]));
    assert_eq!(remove, vec!["team".to_string()]);
}

#[test_log::test]
fn malformed_document_is_drift_not_fail_open() {
    let params = RoleParameters {
        assume_role_policy_document: "{".into(),
        ..Default::default()
    };
    let mut scratch = ObservedRole::default();
    assert!(matches!(
        generate_role(&params, &mut scratch),
        Err(DiffError::MalformedDocument(_))
    ));

    let observed = load_observed("observed.json");
    let err = is_role_up_to_date(&params, &observed).unwrap_err();
    assert!(matches!(err, DiffError::MalformedDocument(_)));
    assert!(!err.assume_up_to_date(), "malformed input must not fail open");
}

#[test_log::test]
fn unset_path_late_initializes_once() {
    let observed = ObservedRole {
        path: Some("/svc/".into()),
        ..Default::default()
    };
    let once = late_initialize_role(RoleParameters::default(), Some(&observed));
    assert_eq!(once.path.as_deref(), Some("/svc/"));
    assert_eq!(late_initialize_role(once.clone(), Some(&observed)), once);
}

#[test_log::test]
fn description_change_patches_only_description() {
    let observed = load_observed("observed.json");
    let mut target = late_initialize_role(RoleParameters::default(), Some(&observed));
    target.description = Some("new".into());

    let patch = create_patch(&observed, &target).unwrap();
    assert_eq!(
        patch,
        RoleParameters {
            description: Some("new".into()),
            ..Default::default()
        }
    );
}

#[test_log::test]
fn mirrored_spec_is_up_to_date() {
    let observed = load_observed("observed.json");
    let params = late_initialize_role(RoleParameters::default(), Some(&observed));
    assert!(is_role_up_to_date(&params, &observed).unwrap());
}

#[test_log::test]
fn late_init_is_idempotent_and_non_destructive() {
    let observed = load_observed("observed.json");
    let inputs = vec![
        RoleParameters::default(),
        RoleParameters {
            description: Some("mine".into()),
            tags: tags(&[("owner", "me")]),
            ..Default::default()
        },
        RoleParameters {
            assume_role_policy_document: "{}".into(),
            max_session_duration: Some(43200),
            path: Some("/".into()),
            permissions_boundary: Some("arn:aws:iam::1:policy/b".into()),
            ..Default::default()
        },
    ];
    for desired in inputs {
        let once = late_initialize_role(desired.clone(), Some(&observed));
        assert_eq!(late_initialize_role(once.clone(), Some(&observed)), once);

        if !desired.assume_role_policy_document.is_empty() {
            assert_eq!(once.assume_role_policy_document, desired.assume_role_policy_document);
        }
        for (before, after) in [
            (&desired.description, &once.description),
            (&desired.path, &once.path),
            (&desired.permissions_boundary, &once.permissions_boundary),
        ] {
            if before.is_some() {
                assert_eq!(before, after);
            }
        }
        if desired.max_session_duration.is_some() {
            assert_eq!(desired.max_session_duration, once.max_session_duration);
        }
        if !desired.tags.is_empty() {
            assert_eq!(desired.tags, once.tags);
        }
    }
}

#[test_log::test]
fn tag_diff_partitions_and_converges() {
    let cases = vec![
        (tags(&[]), tags(&[])),
        (tags(&[("a", "1")]), tags(&[("a", "1")])),
        (tags(&[("a", "1"), ("b", "2")]), tags(&[("b", "x"), ("c", "3")])),
        (tags(&[("k", "v")]), tags(&[("a", "1"), ("b", "2"), ("k", "v")])),
    ];
    for (local, remote) in cases {
        let (add, remove) = diff_tags(&local, &remote);
        assert!(add.iter().all(|t| !remove.contains(&t.key)));
        assert_eq!(apply_tag_diff(&remote, &add, &remove), tag_map(&local));

        let (same_add, same_remove) = diff_tags(&local, &local);
        assert!(same_add.is_empty() && same_remove.is_empty());
    }
}

#[test_log::test]
fn full_pass_plans_only_needed_calls() {
    let observed = load_observed("observed.json");
    let desired = RoleParameters {
        // Same trust policy as observed, reformatted.
        assume_role_policy_document: r#"{
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": {"Service": "ec2.amazonaws.com"},
                "Action": "sts:AssumeRole"
            }]
        }"#
        .into(),
        description: Some("new".into()),
        tags: tags(&[("env", "prod")]),
        ..Default::default()
    };

    let plan = plan_update(desired, &observed).unwrap();
    let update = plan.update_role.as_ref().expect("update_role");
    assert_eq!(update.role_name, "payments");
    assert_eq!(update.description.as_deref(), Some("new"));
    assert!(plan.update_assume_role_policy.is_none());
    assert!(plan.put_permissions_boundary.is_none());
    assert_eq!(plan.tag, tags(&[("env", "prod")]));
    assert_eq!(plan.untag, vec!["team".to_string()]);
    assert!(plan.immutable_drift.is_empty());
}

#[test_log::test]
fn comparison_failure_fails_open_with_error() {
    let observed = load_observed("observed_bad_policy.json");
    let params = RoleParameters {
        assume_role_policy_document: r#"{"Version":"2012-10-17"}"#.into(),
        ..Default::default()
    };
    let params = late_initialize_role(params, Some(&observed));
    let err = is_role_up_to_date(&params, &observed).unwrap_err();
    assert!(matches!(err, DiffError::ComparisonInfrastructure(_)));
    assert!(err.assume_up_to_date());
}
