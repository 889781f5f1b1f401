// tests/trial_pipeline.rs
//! End-to-end trial processing tests
//!
//! Recordings are assembled with `RecordingBuilder` on a 100 Hz motion clock
//! and a 1000 Hz analog clock, then run through `TrialAnalysis`.

use gait_core::config::SynergyResampleMode;
use gait_core::recording::PointGroup;
use gait_core::{
    AnalysisConfig, CycleSide, DiagnosticCode, EmgLabelSet, FrameRange, GaitError, RawRecording, RecordingBuilder,
    TrialAnalysis,
};

const MOTION_FRAMES: usize = 300;
const ANALOG_FRAMES: usize = 3000;

fn ramp(n: usize, offset: f64) -> Vec<f64> {
    (0..n).map(|i| offset + i as f64).collect()
}

fn angles(offset: f64) -> [Vec<f64>; 3] {
    [
        ramp(MOTION_FRAMES, offset),
        ramp(MOTION_FRAMES, offset + 500.0),
        ramp(MOTION_FRAMES, offset + 800.0),
    ]
}

/// Left strikes at 1.0 s and 2.2 s, right strikes at 1.5 s and 2.7 s
fn canonical_events(builder: RecordingBuilder) -> RecordingBuilder {
    builder
        .event(1.00, "Left", "Foot Strike")
        .event(1.10, "Right", "Foot Off")
        .event(1.50, "Right", "Foot Strike")
        .event(1.60, "Left", "Foot Off")
        .event(2.20, "Left", "Foot Strike")
        .event(2.30, "Right", "Foot Off")
        .event(2.70, "Right", "Foot Strike")
}

fn with_numbered_emg(mut builder: RecordingBuilder) -> RecordingBuilder {
    for i in 1..=12 {
        builder = builder.analog_channel(
            &format!("EMG{}", i),
            "EMG Channel",
            "V",
            ramp(ANALOG_FRAMES, i as f64 * 10_000.0),
        );
    }
    builder
}

fn canonical_recording(name: &str) -> RawRecording {
    let builder = RecordingBuilder::new(name)
        .point_clock(100.0, 0)
        .analog_clock(1000.0, 0)
        .subject("ANON01")
        .point_channel("LKneeAngles", angles(0.0))
        .point_channel("RKneeAngles", angles(1000.0))
        .point_channel("LHipPower", angles(2000.0))
        .point_group(PointGroup::Angles, "LKneeAngles")
        .point_group(PointGroup::Angles, "RKneeAngles")
        .point_group(PointGroup::Powers, "LHipPower");
    let builder = with_numbered_emg(canonical_events(builder))
        .analog_channel("FSL", "Foot switch", "V", ramp(ANALOG_FRAMES, 0.0));
    builder.build().unwrap()
}

#[test]
fn test_canonical_trial_cycles() {
    let analysis = TrialAnalysis::from_recording(&canonical_recording("walk01"), &AnalysisConfig::default()).unwrap();

    let left = analysis.cycles.left.unwrap();
    assert_eq!(left.motion_frames, FrameRange::new(100, 220));
    assert_eq!(left.analog_frames, FrameRange::new(1000, 2200));

    let right = analysis.cycles.right.unwrap();
    assert_eq!(right.motion_frames, FrameRange::new(150, 270));
    assert_eq!(right.analog_frames, FrameRange::new(1500, 2700));

    let full = analysis.cycles.full.unwrap();
    assert_eq!(full.motion_frames, FrameRange::new(100, 270));

    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
}

#[test]
fn test_canonical_trial_channels() {
    let analysis = TrialAnalysis::from_recording(&canonical_recording("walk01"), &AnalysisConfig::default()).unwrap();

    let knee = analysis.kinematics.slices.get(CycleSide::Left, "Knee Flexion Left").unwrap();
    assert_eq!(knee.len(), 120);
    assert_eq!(knee[0], 100.0);

    let knee_right = analysis.kinematics.slices.get(CycleSide::Right, "Knee Flexion Right").unwrap();
    assert_eq!(knee_right[0], 1150.0);

    assert_eq!(analysis.kinetics.powers.len(), 3);
    assert_eq!(analysis.kinetics.powers.get(CycleSide::Full, "LHipPower_Y").unwrap()[0], 2600.0);

    assert_eq!(analysis.emg.label_set, EmgLabelSet::Numbered);
    assert_eq!(analysis.emg.canonical.len(), 12);
    let lrf = analysis.emg.canonical.get(CycleSide::Left, "LRF").unwrap();
    assert_eq!(lrf.len(), 1200);
    assert_eq!(lrf[0], 11_000.0);
    assert_eq!(analysis.emg.canonical.get(CycleSide::Right, "RRF").unwrap()[0], 71_500.0);
    // Foot switches are not EMG
    assert!(analysis.emg.passthrough.is_empty());

    assert_eq!(analysis.gps.sample_count, 51);
    assert!(analysis.gps.series.values().all(|s| s.len() == 51));
}

#[test]
fn test_passthrough_never_replaces_canonical_series() {
    // A raw channel that happens to carry a canonical code as its label
    let recording = with_numbered_emg(canonical_events(
        RecordingBuilder::new("walk06")
            .point_clock(100.0, 0)
            .analog_clock(1000.0, 0)
            .point_channel("LKneeAngles", angles(0.0)),
    ))
    .analog_channel("LRF", "Spare electrode", "V", ramp(ANALOG_FRAMES, 90_000.0))
    .build()
    .unwrap();

    let analysis = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.emg.canonical.get(CycleSide::Left, "LRF").unwrap()[0], 11_000.0);
    assert_eq!(analysis.emg.passthrough.get(CycleSide::Left, "LRF").unwrap()[0], 91_000.0);
    assert!(analysis.diagnostics.has(DiagnosticCode::LabelLookupMiss));

    let output = analysis.output();
    assert_eq!(output.emg[&CycleSide::Left]["LRF"][0], 11_000.0);
    assert_eq!(output.emg_passthrough[&CycleSide::Left]["LRF"][0], 91_000.0);
}

#[test]
fn test_output_contract_serializes() {
    let analysis = TrialAnalysis::from_recording(&canonical_recording("walk01"), &AnalysisConfig::default()).unwrap();
    let output = analysis.output();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["trial"], "walk01");
    assert_eq!(json["subject"], "ANON01");
    assert_eq!(json["emg_label_set"], "numbered");
    assert_eq!(json["needs_review"], false);
    assert_eq!(json["cycles"]["left"]["motion_frames"]["start"], 100);
    assert_eq!(json["cycles"]["full"]["analog_frames"]["end"], 2700);
    assert_eq!(json["emg"]["right"]["RSOL"].as_array().unwrap().len(), 1200);
    assert!(json["emg_passthrough"]["left"].as_object().unwrap().is_empty());
    assert!(json["kinematics"]["left"]["Knee Flexion Left"].is_array());
    assert_eq!(json["events"].as_array().unwrap().len(), 7);
}

#[test]
fn test_synergy_input_fixed_count() {
    let mut config = AnalysisConfig::default();
    config.synergy.mode = SynergyResampleMode::Count;
    config.synergy.target = 101;
    config.synergy.cycle = CycleSide::Right;

    let analysis = TrialAnalysis::from_recording(&canonical_recording("walk01"), &config).unwrap();
    let input = analysis.synergy_input().unwrap();

    assert_eq!(input.side, CycleSide::Right);
    assert_eq!(input.matrix.shape(), &[12, 101]);
    assert_eq!(input.channels[0], "LRF");
    assert!(input.diagnostics.is_empty());
}

#[test]
fn test_unevented_trial_is_fatal() {
    let recording = with_numbered_emg(RecordingBuilder::new("static01")).build().unwrap();
    let err = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default()).unwrap_err();

    assert!(matches!(err, GaitError::NotEvented { .. }));
    assert!(err.is_eventing_failure());
}

#[test]
fn test_cycle_past_end_of_data_is_fatal() {
    let recording = RecordingBuilder::new("walk03")
        .point_clock(100.0, 0)
        .point_channel("LKneeAngles", angles(0.0))
        .event(1.0, "Left", "Foot Strike")
        .event(4.0, "Left", "Foot Strike")
        .build()
        .unwrap();

    let err = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, GaitError::Slice { .. }));
}

#[test]
fn test_one_sided_trial_reports_missing_cycles() {
    let recording = RecordingBuilder::new("walk04")
        .point_clock(100.0, 0)
        .point_channel("LKneeAngles", angles(0.0))
        .point_channel("RKneeAngles", angles(1000.0))
        .event(1.0, "Left", "Foot Strike")
        .event(2.0, "Left", "Foot Strike")
        .build()
        .unwrap();

    let analysis = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default()).unwrap();

    assert!(analysis.cycles.left.is_some());
    assert!(analysis.cycles.right.is_none());
    assert!(analysis.cycles.full.is_none());
    assert!(analysis.diagnostics.has(DiagnosticCode::InsufficientEvents));
    assert!(analysis.diagnostics.has(DiagnosticCode::MissingSideCycle));
    assert!(analysis.diagnostics.has(DiagnosticCode::UnmatchedFullCycle));
    assert!(!analysis.diagnostics.needs_review());

    // No right cycle, so right-side GPS series are skipped
    assert!(analysis.gps.series.contains_key("Knee Flexion Left"));
    assert!(!analysis.gps.series.contains_key("Knee Flexion Right"));
}

#[test]
fn test_superset_surplus_flags_review() {
    let mut builder = canonical_events(RecordingBuilder::new("walk05").point_clock(100.0, 0));
    for i in 1..=16 {
        builder = builder.analog_channel(&format!("BEMG{}", i), "", "V", ramp(ANALOG_FRAMES, 0.0));
    }
    let recording = builder.build().unwrap();

    let analysis = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.emg.label_set, EmgLabelSet::Superset);
    assert_eq!(analysis.emg.canonical.len(), 12);
    assert_eq!(analysis.emg.spares.len(), 4);
    assert!(analysis.output().needs_review);
}

#[test]
fn test_inconsistent_config_rejected() {
    let mut config = AnalysisConfig::default();
    config.segmentation.gps_sample_count = 0;

    let err = TrialAnalysis::from_recording(&canonical_recording("walk01"), &config).unwrap_err();
    assert!(matches!(err, GaitError::Configuration { .. }));
}
