use std::str::FromStr;

use super::{PerfMarker, PerfMarkerSink, RecordingMarkerSink, TracingMarkerSink};

#[test]
fn test_marker_names() {
    assert_eq!(
        PerfMarker::GenerateAsymmetricKeyStart.to_string(),
        "GENERATE_AT_POP_ASYMMETRIC_KEYPAIR_START"
    );
    assert_eq!(
        PerfMarker::from_str("GENERATE_AT_POP_ASYMMETRIC_KEYPAIR_END").unwrap(),
        PerfMarker::GenerateAsymmetricKeyEnd
    );
}

#[test]
fn test_recording_sink_keeps_order() {
    let sink = RecordingMarkerSink::new(10);

    sink.mark(PerfMarker::GenerateAsymmetricKeyStart);
    sink.mark(PerfMarker::GenerateAsymmetricKeyEnd);

    let markers: Vec<_> = sink.markers().into_iter().map(|m| m.marker).collect();
    assert_eq!(
        markers,
        vec![
            PerfMarker::GenerateAsymmetricKeyStart,
            PerfMarker::GenerateAsymmetricKeyEnd
        ]
    );

    sink.clear();
    assert!(sink.markers().is_empty());
}

#[test]
fn test_recording_sink_drops_oldest() {
    let sink = RecordingMarkerSink::new(1);

    sink.mark(PerfMarker::GenerateAsymmetricKeyStart);
    sink.mark(PerfMarker::GenerateAsymmetricKeyEnd);

    let markers = sink.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].marker, PerfMarker::GenerateAsymmetricKeyEnd);
}

#[test]
fn test_tracing_sink_does_not_panic_without_subscriber() {
    TracingMarkerSink.mark(PerfMarker::GenerateAsymmetricKeyStart);
}
