//! End-to-end restore scenarios against a scripted GeoServer.

use gspump_core::{NodeKind, Pump, PumpOptions};
use gspump_rest::{PushOutcome, Pusher, StatusCode};
use gspump_test_utils::{MockRestClient, TestBackup, Verb};
use pretty_assertions::assert_eq;

const ADMIN: &str = "http://localhost:8080/geoserver/rest";

fn full_backup() -> TestBackup {
    TestBackup::new()
        .global_style("point.xml", "<style><name>point</name><filename>point.sld</filename></style>")
        .global_style("point.sld", "<StyledLayerDescriptor version=\"1.0.0\"/>")
        .global_template("footer.ftl")
        .workspace("sf")
        .datastore("sf", "sf_store")
        .featuretype("sf", "sf_store", "roads")
        .featuretype("sf", "sf_store", "streams")
        .featuretype_template("sf", "sf_store", "roads", "content.ftl")
        .workspace("topp")
        .datastore("topp", "states_shapefile")
        .featuretype("topp", "states_shapefile", "states")
}

/// A server that already holds every descriptor-backed object.
fn populated_server() -> MockRestClient {
    [
        "/workspaces/sf.xml",
        "/namespaces/sf.xml",
        "/workspaces/sf/datastores/sf_store.xml",
        "/workspaces/sf/datastores/sf_store/featuretypes/roads.xml",
        "/workspaces/topp.xml",
    ]
    .iter()
    .fold(MockRestClient::new(), |client, path| {
        client.respond(Verb::Get, &format!("{}{}", ADMIN, path), StatusCode::OK)
    })
}

#[test]
fn restore_into_empty_server() {
    let backup = full_backup();
    let client = MockRestClient::new();
    let pump = Pump::new(Pusher::new(&client, ADMIN), PumpOptions::default());

    let report = pump.pump_all(&backup.path()).unwrap();

    // 2 styles, 2 workspaces and their namespaces, 2 datastores, 3 feature
    // types and their layers, 2 templates.
    assert_eq!(report.pushed.len(), 16);
    assert!(report.is_clean());
    assert!(client.calls_with(Verb::Delete).is_empty());

    let kinds: Vec<NodeKind> = report.pushed.iter().map(|r| r.kind).collect();
    assert_eq!(kinds.first(), Some(&NodeKind::Style));
    assert_eq!(kinds.last(), Some(&NodeKind::Template));

    // Every workspace precedes its datastores, every datastore its feature types.
    let position = |target: &str| {
        report
            .pushed
            .iter()
            .position(|r| r.target == target)
            .unwrap_or_else(|| panic!("{} was not pushed", target))
    };
    assert!(position("/workspaces/sf.xml") < position("/workspaces/sf/datastores/sf_store.xml"));
    assert!(
        position("/workspaces/sf/datastores/sf_store.xml")
            < position("/workspaces/sf/datastores/sf_store/featuretypes/roads.xml")
    );
    assert!(
        position("/workspaces/sf/datastores/sf_store/featuretypes/roads.xml")
            < position("/layers/roads.xml")
    );
    assert!(position("/layers/states.xml") < position("/templates/footer.ftl"));
}

#[test]
fn restore_over_existing_configuration() {
    let backup = full_backup();
    let client = populated_server().respond(
        Verb::Post,
        &format!("{}/namespaces", ADMIN),
        StatusCode::FORBIDDEN,
    );
    let pump = Pump::new(Pusher::new(&client, ADMIN), PumpOptions::default());

    let report = pump.pump_all(&backup.path()).unwrap();

    let deletes: Vec<String> = client
        .calls_with(Verb::Delete)
        .into_iter()
        .map(|call| call.url)
        .collect();
    assert_eq!(
        deletes,
        vec![
            format!("{}/workspaces/sf.xml", ADMIN),
            format!("{}/namespaces/sf.xml", ADMIN),
            format!("{}/workspaces/sf/datastores/sf_store.xml", ADMIN),
            format!("{}/workspaces/sf/datastores/sf_store/featuretypes/roads.xml", ADMIN),
            format!("{}/workspaces/topp.xml", ADMIN),
        ]
    );

    let namespace = report
        .pushed
        .iter()
        .find(|r| r.target == "/namespaces/sf.xml")
        .unwrap();
    assert_eq!(namespace.outcome, PushOutcome::FallbackUpdated);
    assert_eq!(report.fallback_updated(), 1);
    assert_eq!(report.failed(), 0);
}

#[test]
fn uploaded_descriptors_carry_no_links() {
    let backup = full_backup();
    let client = MockRestClient::new();
    let pump = Pump::new(Pusher::new(&client, ADMIN), PumpOptions::default());

    pump.pump_all(&backup.path()).unwrap();

    for call in client.calls_with(Verb::Post) {
        let body = call.body_text();
        if call.url.ends_with("/workspaces") || call.url.ends_with("/datastores") {
            assert!(!body.contains("atom:link"), "{} still links: {}", call.url, body);
            assert_eq!(gspump_xml::purify(&body).unwrap(), body);
        }
    }
}

#[test]
fn report_round_trips_through_json() {
    let backup = full_backup();
    let client = MockRestClient::new().respond(
        Verb::Put,
        &format!("{}/layers/streams.xml", ADMIN),
        StatusCode::NOT_FOUND,
    );
    let pump = Pump::new(Pusher::new(&client, ADMIN), PumpOptions::default());

    let report = pump.pump_all(&backup.path()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let parsed: gspump_core::PumpReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, report);
    assert_eq!(parsed.failed(), 1);
    assert!(json.contains("\"status\":404"));
}
