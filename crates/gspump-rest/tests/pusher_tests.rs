//! Protocol tests for the pusher against a scripted client.

use gspump_fs::BackupPath;
use gspump_rest::{Error, PushOutcome, PushRequest, Pusher, StatusCode};
use gspump_test_utils::{MockRestClient, TestBackup, Verb};
use pretty_assertions::assert_eq;
use rstest::rstest;

const ADMIN: &str = "http://gs/rest";

fn style_backup() -> TestBackup {
    TestBackup::new()
        .global_style("point.xml", "<style><name>point</name></style>")
        .global_style("point.sld", "<StyledLayerDescriptor/>")
}

fn styles_dir(backup: &TestBackup) -> BackupPath {
    backup.path().join("styles")
}

#[test]
fn create_preferred_without_existing_object_skips_delete() {
    let backup = style_backup();
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Created);
    assert_eq!(
        client.call_lines(),
        vec![
            "GET http://gs/rest/styles/point.xml",
            "POST http://gs/rest/styles",
        ]
    );
}

#[test]
fn create_preferred_deletes_existing_object_before_post() {
    let backup = style_backup();
    let client = MockRestClient::new().respond(
        Verb::Get,
        "http://gs/rest/styles/point.xml",
        StatusCode::OK,
    );
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Created);
    assert_eq!(
        client.call_lines(),
        vec![
            "GET http://gs/rest/styles/point.xml",
            "DELETE http://gs/rest/styles/point.xml",
            "POST http://gs/rest/styles",
        ]
    );
}

#[test]
fn delete_carries_query_parameters() {
    let backup = TestBackup::new().workspace("sf");
    let client =
        MockRestClient::new().respond(Verb::Get, "http://gs/rest/workspaces/sf.xml", StatusCode::OK);
    let pusher = Pusher::new(&client, ADMIN);

    pusher
        .push(
            &PushRequest::new("/workspaces", "sf.xml", backup.path().join("workspaces/sf"))
                .source_file("workspace.xml")
                .recurse_on_delete()
                .purified(),
        )
        .unwrap();

    let deletes = client.calls_with(Verb::Delete);
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].params, vec![("recurse".to_string(), "true".to_string())]);
}

#[test]
fn failed_delete_still_posts() {
    let backup = style_backup();
    let client = MockRestClient::new()
        .respond(Verb::Get, "http://gs/rest/styles/point.xml", StatusCode::OK)
        .respond(
            Verb::Delete,
            "http://gs/rest/styles/point.xml",
            StatusCode::INTERNAL_SERVER_ERROR,
        );
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Created);
    assert_eq!(client.calls_with(Verb::Post).len(), 1);
}

#[rstest]
#[case::forbidden(StatusCode::FORBIDDEN, StatusCode::OK, PushOutcome::FallbackUpdated)]
#[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, StatusCode::CREATED, PushOutcome::FallbackUpdated)]
#[case::fallback_refused(StatusCode::FORBIDDEN, StatusCode::BAD_REQUEST, PushOutcome::Failed { status: Some(400) })]
fn refused_post_falls_back_to_put(
    #[case] post_status: StatusCode,
    #[case] put_status: StatusCode,
    #[case] expected: PushOutcome,
) {
    let backup = style_backup();
    let client = MockRestClient::new()
        .respond(Verb::Post, "http://gs/rest/styles", post_status)
        .respond(Verb::Put, "http://gs/rest/styles/point.xml", put_status);
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, expected);
    assert_eq!(
        client.call_lines(),
        vec![
            "GET http://gs/rest/styles/point.xml",
            "POST http://gs/rest/styles",
            "PUT http://gs/rest/styles/point.xml",
        ]
    );
}

#[rstest]
#[case(StatusCode::BAD_REQUEST, Some(400))]
#[case(StatusCode::UNAUTHORIZED, Some(401))]
#[case(StatusCode::CONFLICT, Some(409))]
fn other_post_refusals_fail_without_fallback(#[case] status: StatusCode, #[case] reported: Option<u16>) {
    let backup = style_backup();
    let client = MockRestClient::new().respond(Verb::Post, "http://gs/rest/styles", status);
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Failed { status: reported });
    assert!(client.calls_with(Verb::Put).is_empty());
}

#[rstest]
#[case::existing(StatusCode::OK)]
#[case::missing(StatusCode::NOT_FOUND)]
#[case::broken(StatusCode::INTERNAL_SERVER_ERROR)]
fn update_only_issues_one_get_and_one_put(#[case] get_status: StatusCode) {
    let backup = style_backup();
    let client =
        MockRestClient::new().respond(Verb::Get, "http://gs/rest/styles/point.sld", get_status);
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.sld", styles_dir(&backup)).update_only())
        .unwrap();

    assert_eq!(outcome, PushOutcome::Updated);
    assert_eq!(
        client.call_lines(),
        vec![
            "GET http://gs/rest/styles/point.sld",
            "PUT http://gs/rest/styles/point.sld",
        ]
    );
}

#[rstest]
#[case(StatusCode::OK, PushOutcome::Updated)]
#[case(StatusCode::CREATED, PushOutcome::Updated)]
#[case(StatusCode::METHOD_NOT_ALLOWED, PushOutcome::Failed { status: Some(405) })]
fn update_only_outcome_follows_put_status(#[case] put_status: StatusCode, #[case] expected: PushOutcome) {
    let backup = style_backup();
    let client = MockRestClient::new().respond(Verb::Put, "http://gs/rest/styles/point.sld", put_status);
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.sld", styles_dir(&backup)).update_only())
        .unwrap();

    assert_eq!(outcome, expected);
}

#[test]
fn content_type_follows_source_file_extension() {
    let backup = style_backup();
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    pusher
        .push(&PushRequest::new("/styles", "point.sld", styles_dir(&backup)).update_only())
        .unwrap();

    let puts = client.calls_with(Verb::Put);
    assert_eq!(puts[0].content_type.as_deref(), Some("application/vnd.ogc.sld+xml"));
    assert_eq!(puts[0].body_text(), "<StyledLayerDescriptor/>");
}

#[test]
fn purified_body_is_uploaded() {
    let backup = TestBackup::new().workspace("sf");
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    pusher
        .push(
            &PushRequest::new("/workspaces", "sf.xml", backup.path().join("workspaces/sf"))
                .source_file("workspace.xml")
                .purified(),
        )
        .unwrap();

    let posts = client.calls_with(Verb::Post);
    assert_eq!(posts[0].body_text(), "<workspace>\n  <name>sf</name>\n  </workspace>\n");
}

#[test]
fn unpurified_body_is_sent_verbatim() {
    let backup = TestBackup::new().workspace("sf");
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    pusher
        .push(
            &PushRequest::new("/workspaces", "sf.xml", backup.path().join("workspaces/sf"))
                .source_file("workspace.xml"),
        )
        .unwrap();

    let posts = client.calls_with(Verb::Post);
    assert_eq!(posts[0].body_text(), backup.read("workspaces/sf/workspace.xml"));
}

#[test]
fn missing_source_file_is_an_error_and_sends_nothing() {
    let backup = TestBackup::new();
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    let result = pusher.push(&PushRequest::new("/styles", "ghost.sld", styles_dir(&backup)));

    assert!(matches!(result, Err(Error::Fs(_))));
    assert!(client.calls().is_empty());
}

#[test]
fn malformed_xml_is_an_error_when_purifying() {
    let backup = TestBackup::new().write("workspaces/sf/workspace.xml", "<workspace><name>sf</workspace>");
    let client = MockRestClient::new();
    let pusher = Pusher::new(&client, ADMIN);

    let result = pusher.push(
        &PushRequest::new("/workspaces", "sf.xml", backup.path().join("workspaces/sf"))
            .source_file("workspace.xml")
            .purified(),
    );

    assert!(matches!(result, Err(Error::Xml { .. })));
    assert!(client.calls().is_empty());
}

#[test]
fn transport_failure_on_post_is_reported_not_raised() {
    let backup = style_backup();
    let client = MockRestClient::new().fail(Verb::Post, "http://gs/rest/styles");
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Failed { status: None });
}

#[test]
fn transport_failure_on_get_still_attempts_create() {
    let backup = style_backup();
    let client = MockRestClient::new().fail(Verb::Get, "http://gs/rest/styles/point.xml");
    let pusher = Pusher::new(&client, ADMIN);

    let outcome = pusher
        .push(&PushRequest::new("/styles", "point.xml", styles_dir(&backup)))
        .unwrap();

    assert_eq!(outcome, PushOutcome::Created);
    assert!(client.calls_with(Verb::Delete).is_empty());
}
