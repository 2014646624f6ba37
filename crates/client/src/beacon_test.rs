use std::sync::Arc;

use vantage_cache::BeaconCache;
use vantage_config::{
    AppConfig, BeaconConfig, CrashReportingLevel, DataCollectionLevel, PrivacyConfig, ServerConfig,
};
use vantage_protocol::test::ScriptedHttpClientProvider;
use vantage_protocol::{
    percent_encode, HttpClientConfig, ResponseAttributes, AGENT_VERSION,
};
use vantage_providers::{
    DefaultRandomNumberGenerator, FixedTimingProvider, RandomNumberGenerator, SessionIdProvider,
    ThreadIdProvider,
};

use crate::{ActionData, Beacon, BeaconInit, WebRequestData};

const SESSION_START: i64 = 1_000;
const DEVICE_ID: i64 = 12_345;

struct FixedSessionIds(i32);

impl SessionIdProvider for FixedSessionIds {
    fn next_session_id(&self) -> i32 {
        self.0
    }
}

struct FixedThreadIds(i32);

impl ThreadIdProvider for FixedThreadIds {
    fn thread_id(&self) -> i32 {
        self.0
    }
}

struct FixedRandom(i64);

impl RandomNumberGenerator for FixedRandom {
    fn next_positive_i64(&self) -> i64 {
        self.0
    }
}

struct TestBeacon {
    beacon: Beacon,
    cache: Arc<BeaconCache>,
    timing: Arc<FixedTimingProvider>,
    http: ScriptedHttpClientProvider,
}

impl TestBeacon {
    fn send(&self) -> Option<vantage_protocol::StatusResponse> {
        self.beacon.send(&self.http, None)
    }

    fn bodies(&self) -> Vec<String> {
        self.http.beacon_bodies()
    }
}

fn beacon() -> TestBeacon {
    beacon_with(PrivacyConfig::default(), None)
}

fn beacon_with(privacy: PrivacyConfig, client_ip: Option<&str>) -> TestBeacon {
    beacon_with_random(privacy, client_ip, Arc::new(FixedRandom(0x0123_4567)))
}

fn beacon_with_random(
    privacy: PrivacyConfig,
    client_ip: Option<&str>,
    random: Arc<dyn RandomNumberGenerator>,
) -> TestBeacon {
    let cache = Arc::new(BeaconCache::new());
    let timing = Arc::new(FixedTimingProvider::new(SESSION_START));
    let config = Arc::new(BeaconConfig::new(
        AppConfig::new("app", DEVICE_ID),
        privacy,
        HttpClientConfig::new("http://collector/m", 1, "app"),
    ));
    let beacon = Beacon::new(
        BeaconInit {
            cache: Arc::clone(&cache),
            session_ids: Arc::new(FixedSessionIds(42)),
            session_sequence_number: 0,
            timing: timing.clone(),
            thread_ids: Arc::new(FixedThreadIds(7)),
            random,
            client_ip: client_ip.map(str::to_string),
        },
        config,
    );
    TestBeacon {
        beacon,
        cache,
        timing,
        http: ScriptedHttpClientProvider::new(),
    }
}

fn performance_privacy() -> PrivacyConfig {
    PrivacyConfig {
        data_collection_level: DataCollectionLevel::Performance,
        ..Default::default()
    }
}

fn expected_prefix(visitor_id: i64, transmission_time: i64) -> String {
    format!(
        "vv=3&va={}&ap=app&pt=1&tt=vantage&vi={visitor_id}&sn=42&ip=&dl=2&cl=2&vs=1&tx={transmission_time}&tv={SESSION_START}&mp=1",
        percent_encode(AGENT_VERSION, &['_']),
    )
}

// =============================================================================
// Wire format
// =============================================================================

#[test]
fn test_empty_session_body() {
    let bed = beacon();
    bed.beacon.start_session();
    bed.timing.advance(400);
    bed.beacon.end_session();

    let response = bed.send();
    assert_eq!(response.unwrap().status_code(), 200);

    let bodies = bed.bodies();
    assert_eq!(bodies.len(), 1);
    let expected = format!(
        "{}&et=18&it=7&pa=0&s0=1&t0=0&et=19&it=7&pa=0&s0=2&t0=400",
        expected_prefix(DEVICE_ID, SESSION_START + 400),
    );
    assert_eq!(bodies[0], expected);
    assert!(bed.beacon.is_empty());
}

#[test]
fn test_action_fragment_precedes_event_fragment() {
    let bed = beacon();
    let action = ActionData {
        id: 3,
        parent_id: 0,
        name: "load".to_string(),
        start_time: SESSION_START + 100,
        end_time: SESSION_START + 150,
        start_sequence_no: 4,
        end_sequence_no: 5,
    };
    bed.beacon.add_action(&action);
    bed.timing.set(SESSION_START + 200);
    bed.beacon.report_int_value(3, "k", 7);
    bed.send();

    let body = &bed.bodies()[0];
    let action_fragment = "&et=1&na=load&it=7&ca=3&pa=0&s0=4&t0=100&s1=5&t1=50";
    let value_fragment = "&et=12&na=k&it=7&pa=3&s0=1&t0=200&vl=7";
    let action_at = body.find(action_fragment).expect("action fragment present");
    let value_at = body.find(value_fragment).expect("value fragment present");
    assert!(action_at < value_at);
}

#[test]
fn test_reserved_underscores_are_escaped_in_names_and_values() {
    let bed = beacon();
    bed.beacon.report_string_value(1, "a_b", Some("x_y"));
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("na=a%5Fb"));
    assert!(body.contains("vl=x%5Fy"));
    assert!(!body.contains("a_b"));
    assert!(!body.contains("x_y"));
}

#[test]
fn test_double_values_use_shortest_round_trip_rendering() {
    let bed = beacon();
    bed.beacon.report_double_value(1, "ratio", 2.5);
    bed.beacon.report_double_value(1, "tiny", 0.1);
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("et=13&na=ratio&it=7&pa=1&s0=1&t0=0&vl=2.5"));
    assert!(body.contains("vl=0.1"));
}

#[test]
fn test_string_value_of_none_omits_value_field() {
    let bed = beacon();
    bed.beacon.report_string_value(1, "k", None);
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("&et=11&na=k&it=7&pa=1&s0=1&t0=0"));
    assert!(!body.contains("vl="));
}

#[test]
fn test_names_are_trimmed_then_truncated_to_250_characters() {
    let bed = beacon();
    let long_name = format!("  {}  ", "n".repeat(300));
    bed.beacon.report_event(0, &long_name);
    bed.send();

    let body = &bed.bodies()[0];
    let expected = format!("na={}&", "n".repeat(250));
    assert!(body.contains(&expected));
    assert!(!body.contains(&"n".repeat(251)));
}

#[test]
fn test_error_and_crash_fragments() {
    let bed = beacon();
    bed.timing.set(SESSION_START + 10);
    bed.beacon.report_error(5, "HttpError", 404, Some("not found"));
    bed.timing.set(SESSION_START + 20);
    bed.beacon.report_crash("OutOfMemory", Some("heap full"), Some("stack trace"));
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains(
        "&et=40&na=HttpError&it=7&pa=5&s0=1&t0=10&ev=404&rs=not%20found&tt=vantage"
    ));
    assert!(body.contains(
        "&et=50&na=OutOfMemory&it=7&pa=0&s0=2&t0=20&rs=heap%20full&st=stack%20trace&tt=vantage"
    ));
}

#[test]
fn test_web_request_fragment_omits_unknown_sizes() {
    let bed = beacon();
    let unknown = WebRequestData {
        url: "http://api/orders".to_string(),
        start_time: SESSION_START + 5,
        end_time: SESSION_START + 25,
        start_sequence_no: 1,
        end_sequence_no: 2,
        ..Default::default()
    };
    bed.beacon.add_web_request(9, &unknown);
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("&et=30&na=http%3A%2F%2Fapi%2Forders&it=7&pa=9&s0=1&t0=5&s1=2&t1=20"));
    assert!(!body.contains("bs="));
    assert!(!body.contains("br="));
    assert!(!body.contains("rc="));
}

#[test]
fn test_web_request_fragment_with_known_sizes() {
    let bed = beacon();
    let traced = WebRequestData {
        url: "http://api/orders".to_string(),
        start_time: SESSION_START,
        end_time: SESSION_START + 1,
        start_sequence_no: 1,
        end_sequence_no: 2,
        bytes_sent: 140,
        bytes_received: 4_096,
        response_code: 201,
    };
    bed.beacon.add_web_request(0, &traced);
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("&bs=140&br=4096&rc=201"));
}

#[test]
fn test_identify_user_without_tag_omits_name() {
    let bed = beacon();
    bed.beacon.identify_user(None);
    bed.send();

    let body = &bed.bodies()[0];
    assert!(body.contains("&et=60&it=7&pa=0&s0=1&t0=0"));
}

// =============================================================================
// Chunking and rollback
// =============================================================================

#[test]
fn test_failed_send_keeps_data_and_retransmits_identical_bytes() {
    let bed = beacon();
    bed.beacon.start_session();
    bed.beacon.end_session();

    bed.http.push_status(500);
    let first = bed.send();
    assert!(first.unwrap().is_erroneous());
    assert!(!bed.beacon.is_empty());

    // next pass against a healthy collector; the clock did not move, so the
    // retransmitted body is byte-identical
    let second = bed.send();
    assert_eq!(second.unwrap().status_code(), 200);
    let bodies = bed.bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
    assert!(bed.beacon.is_empty());
}

#[test]
fn test_transport_error_returns_none_and_keeps_data() {
    let bed = beacon();
    bed.beacon.start_session();

    bed.http.push_transport_error();
    assert!(bed.send().is_none());
    assert!(!bed.beacon.is_empty());
}

#[test]
fn test_chunks_stay_within_the_configured_budget() {
    let bed = beacon();
    bed.beacon
        .initialize_server_config(ServerConfig::from_attributes(&ResponseAttributes {
            beacon_size_bytes: Some(2_048),
            ..Default::default()
        }));
    for _ in 0..5 {
        bed.beacon.report_event(0, &"x".repeat(280));
    }

    bed.send();

    let bodies = bed.bodies();
    assert!(bodies.len() >= 2, "expected multiple chunks, got {}", bodies.len());
    for body in &bodies {
        assert!(body.len() <= 2_048 - 1_024, "chunk of {} bytes", body.len());
    }
    let fragments: usize = bodies.iter().map(|body| body.matches("et=10").count()).sum();
    assert_eq!(fragments, 5);
    assert!(bed.beacon.is_empty());
}

#[test]
fn test_send_without_data_issues_no_requests() {
    let bed = beacon();
    assert!(bed.send().is_none());
    assert!(bed.http.requests().is_empty());
}

// =============================================================================
// Privacy and capture gates
// =============================================================================

#[test]
fn test_device_id_is_randomised_unless_sending_is_allowed() {
    let allowed = beacon();
    assert_eq!(allowed.beacon.device_id(), DEVICE_ID);

    let denied = beacon_with(performance_privacy(), None);
    assert_eq!(denied.beacon.device_id(), 0x0123_4567);

    for _ in 0..25 {
        let anonymous = beacon_with_random(
            performance_privacy(),
            None,
            Arc::new(DefaultRandomNumberGenerator),
        );
        assert!(anonymous.beacon.device_id() >= 0);
        assert_ne!(anonymous.beacon.device_id(), DEVICE_ID);
    }
}

#[test]
fn test_session_number_is_hidden_when_not_allowed() {
    let bed = beacon_with(performance_privacy(), None);
    assert_eq!(bed.beacon.session_number(), 1);
    // the cache identity keeps the real number
    assert_eq!(bed.beacon.key().session_number, 42);

    bed.beacon.start_session();
    bed.send();
    assert!(bed.bodies()[0].contains("&sn=1&"));
}

#[test]
fn test_privacy_denied_operations_leave_no_trace() {
    let bed = beacon_with(
        PrivacyConfig {
            data_collection_level: DataCollectionLevel::Off,
            crash_reporting_level: CrashReportingLevel::Off,
        },
        None,
    );

    bed.beacon.end_session();
    bed.beacon.add_action(&ActionData {
        id: 1,
        parent_id: 0,
        name: "a".to_string(),
        start_time: SESSION_START,
        end_time: SESSION_START,
        start_sequence_no: 1,
        end_sequence_no: 2,
    });
    bed.beacon.report_int_value(1, "v", 1);
    bed.beacon.report_double_value(1, "v", 1.0);
    bed.beacon.report_string_value(1, "v", Some("s"));
    bed.beacon.report_event(1, "e");
    bed.beacon.report_error(1, "err", 1, None);
    bed.beacon.report_crash("crash", None, None);
    bed.beacon.add_web_request(1, &WebRequestData::default());
    bed.beacon.identify_user(Some("user"));

    assert!(bed.beacon.is_empty());
    assert_eq!(bed.beacon.create_tag(1, 1), "");
}

#[test]
fn test_capture_disabled_blocks_session_start() {
    let bed = beacon();
    bed.beacon.disable_capture();
    bed.beacon.start_session();
    assert!(bed.beacon.is_empty());

    bed.beacon.enable_capture();
    bed.beacon.start_session();
    assert!(!bed.beacon.is_empty());
}

#[test]
fn test_error_capture_gate_is_independent_of_crash_gate() {
    let bed = beacon();
    bed.beacon
        .initialize_server_config(ServerConfig::from_attributes(&ResponseAttributes {
            capture_errors: Some(false),
            ..Default::default()
        }));

    bed.beacon.report_error(0, "err", 1, None);
    assert!(bed.beacon.is_empty());

    bed.beacon.report_crash("crash", None, None);
    assert!(!bed.beacon.is_empty());
}

// =============================================================================
// Identifiers and tags
// =============================================================================

#[test]
fn test_ids_and_sequence_numbers_start_at_one_and_increase() {
    let bed = beacon();
    assert_eq!(bed.beacon.create_id(), 1);
    assert_eq!(bed.beacon.create_id(), 2);
    assert_eq!(bed.beacon.create_id(), 3);
    assert_eq!(bed.beacon.create_sequence_number(), 1);
    assert_eq!(bed.beacon.create_sequence_number(), 2);
}

#[test]
fn test_web_request_tag_format() {
    let bed = beacon();
    assert_eq!(bed.beacon.create_tag(13, 2), "MT_3_1_12345_42_app_13_7_2");
}

#[test]
fn test_web_request_tag_includes_session_sequence_on_visit_store_2() {
    let bed = beacon();
    bed.beacon
        .initialize_server_config(ServerConfig::from_attributes(&ResponseAttributes {
            visit_store_version: Some(2),
            ..Default::default()
        }));
    assert_eq!(bed.beacon.create_tag(13, 2), "MT_3_1_12345_42-0_app_13_7_2");
}

#[test]
fn test_mutable_prefix_carries_session_sequence_on_visit_store_2() {
    let bed = beacon();
    bed.beacon
        .initialize_server_config(ServerConfig::from_attributes(&ResponseAttributes {
            visit_store_version: Some(2),
            ..Default::default()
        }));
    bed.beacon.start_session();
    bed.send();

    assert!(bed.bodies()[0].contains("&vs=2&ss=0&tx="));
}

// =============================================================================
// Client IP handling
// =============================================================================

#[test]
fn test_valid_client_ip_is_sent_verbatim() {
    let bed = beacon_with(PrivacyConfig::default(), Some("192.168.0.1"));
    bed.beacon.start_session();
    bed.send();
    assert!(bed.bodies()[0].contains("&ip=192.168.0.1&"));
}

#[test]
fn test_invalid_client_ip_falls_back_to_empty() {
    let bed = beacon_with(PrivacyConfig::default(), Some("999.999.1.1"));
    bed.beacon.start_session();
    bed.send();
    assert!(bed.bodies()[0].contains("&ip=&"));
}

// =============================================================================
// Cache interaction
// =============================================================================

#[test]
fn test_clear_data_deletes_the_cache_entry() {
    let bed = beacon();
    bed.beacon.start_session();
    bed.beacon.report_event(0, "e");
    assert!(!bed.beacon.is_empty());

    bed.beacon.clear_data();
    assert!(bed.beacon.is_empty());
    assert_eq!(bed.cache.size_bytes(), 0);
}

#[test]
fn test_fragments_written_during_send_survive_for_the_next_pass() {
    let bed = beacon();
    bed.beacon.start_session();
    bed.send();
    // reported after the drain finished
    bed.beacon.report_event(0, "late");
    assert!(!bed.beacon.is_empty());

    bed.send();
    assert_eq!(bed.bodies().len(), 2);
    assert!(bed.bodies()[1].contains("na=late"));
    assert!(bed.beacon.is_empty());
}
