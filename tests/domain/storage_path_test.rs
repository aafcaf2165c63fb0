use cry_relay::domain::{CorrelationId, StoragePath};

#[test]
fn given_correlation_id_and_filename_when_creating_path_then_format_is_id_slash_filename() {
    let id = CorrelationId::from_raw("req_1700000000000_abcd1234");
    let path = StoragePath::for_request(&id, "audio.wav");

    assert_eq!(path.as_str(), "req_1700000000000_abcd1234/audio.wav");
}

#[test]
fn given_two_different_requests_when_creating_paths_then_paths_differ() {
    let path_a = StoragePath::for_request(&CorrelationId::new(), "audio.wav");
    let path_b = StoragePath::for_request(&CorrelationId::new(), "audio.wav");

    assert_ne!(path_a, path_b);
}

#[test]
fn given_storage_path_when_displayed_then_matches_as_str() {
    let path = StoragePath::for_request(&CorrelationId::new(), "audio.wav");

    assert_eq!(format!("{}", path), path.as_str());
}

#[test]
fn given_file_name_with_separators_when_creating_path_then_stays_under_request_prefix() {
    let id = CorrelationId::from_raw("req_1_a");

    let path = StoragePath::for_request(&id, "../other/audio.wav");

    assert_eq!(path.as_str(), "req_1_a/.._other_audio.wav");
}
