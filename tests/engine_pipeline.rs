//! End-to-end pipeline tests: simulated source → acquisition cycle →
//! recording sink, at the full default sizes.

use rustyscope::simulation::SimulatedSource;
use rustyscope::tracing_init::init_test_tracing;
use rustyscope::{
    AcquisitionCycle, EngineConfig, Measurement, MeasurementPlan, Mode, ResultSink, SpectrumTrace,
};

#[derive(Default)]
struct RecordingSink {
    traces: Vec<SpectrumTrace>,
    audio_blocks: Vec<Vec<f32>>,
    measurements: Vec<Measurement>,
}

impl ResultSink for RecordingSink {
    fn publish_trace(&mut self, trace: &SpectrumTrace) {
        self.traces.push(trace.clone());
    }

    fn publish_audio(&mut self, audio: &[f32]) {
        self.audio_blocks.push(audio.to_vec());
    }

    fn publish_measurement(&mut self, measurement: &Measurement) {
        self.measurements.push(measurement.clone());
    }
}

fn build_cycle(seed: u64) -> AcquisitionCycle<SimulatedSource, RecordingSink> {
    init_test_tracing();
    let config = EngineConfig::default();
    let source = SimulatedSource::new(&config, seed);
    let mut cycle =
        AcquisitionCycle::new(source, RecordingSink::default(), config).expect("cycle builds");
    cycle.set_center(1e9);
    cycle.set_span(100e6);
    cycle
}

#[test]
fn continuous_run_publishes_every_tick() {
    let mut cycle = build_cycle(1);
    cycle.start();
    for _ in 0..3 {
        cycle.tick();
    }
    cycle.stop();

    let (_, sink) = cycle.into_parts();
    assert_eq!(sink.traces.len(), 3);
    for trace in &sink.traces {
        assert_eq!(trace.len(), 1001);
        assert_eq!(trace.start_freq(), 0.95e9);
        assert_eq!(trace.stop_freq(), 1.05e9);
    }
}

#[test]
fn channel_power_sees_the_simulated_carrier() {
    let mut cycle = build_cycle(2);
    cycle.set_plan(MeasurementPlan {
        channel_power: Some((0.995e9, 1.005e9)),
        ..Default::default()
    });
    cycle.single_sweep();

    let (_, sink) = cycle.into_parts();
    let power = match sink.measurements.as_slice() {
        [Measurement::ChannelPower(p)] => *p,
        other => panic!("unexpected measurements: {:?}", other),
    };
    // Carrier at -20 dBm averaged across a 10 MHz window of floor.
    assert!(power > -60.0 && power < -10.0, "channel power {}", power);
}

#[test]
fn spur_search_finds_both_simulated_spurs() {
    let mut cycle = build_cycle(3);
    cycle.set_plan(MeasurementPlan {
        spur_threshold: Some(-80.0),
        ..Default::default()
    });
    cycle.single_sweep();

    let (_, sink) = cycle.into_parts();
    let spurs = match sink.measurements.as_slice() {
        [Measurement::Spurs(spurs)] => spurs.clone(),
        other => panic!("unexpected measurements: {:?}", other),
    };
    assert_eq!(spurs.len(), 2);
    // Strongest first: the -65 dBm spur before the -72 dBm one.
    assert_eq!(spurs[0].amplitude, -65.0);
    assert_eq!(spurs[1].amplitude, -72.0);
    assert!(spurs[0].relative_power < -20.0);
}

#[test]
fn obw_tracks_the_narrow_carrier() {
    let mut cycle = build_cycle(4);
    cycle.set_plan(MeasurementPlan {
        obw_percent: Some(99.0),
        ..Default::default()
    });
    cycle.single_sweep();

    let (_, sink) = cycle.into_parts();
    let obw = match sink.measurements.as_slice() {
        [Measurement::OccupiedBandwidth(hz)] => *hz,
        other => panic!("unexpected measurements: {:?}", other),
    };
    // Nearly all power sits within a few bins of the carrier, far
    // narrower than the 100 MHz span.
    assert!(obw > 0.0 && obw < 5e6, "obw {}", obw);
}

#[test]
fn acpr_shows_suppressed_adjacent_channels() {
    let mut cycle = build_cycle(5);
    cycle.set_plan(MeasurementPlan {
        acpr: Some((10e6, 20e6)),
        ..Default::default()
    });
    cycle.single_sweep();

    let (_, sink) = cycle.into_parts();
    let acpr = match sink.measurements.as_slice() {
        [Measurement::Acpr(acpr)] => acpr.clone(),
        other => panic!("unexpected measurements: {:?}", other),
    };
    assert!(acpr.lower_ratio > 10.0, "lower ratio {}", acpr.lower_ratio);
    assert!(acpr.upper_ratio > 10.0, "upper ratio {}", acpr.upper_ratio);
}

#[test]
fn fm_demodulation_produces_full_length_audio() {
    let mut cycle = build_cycle(6);
    cycle.set_demod_active(true);
    cycle
        .demodulator_mut()
        .set_mode(Mode::Fm)
        .expect("mode switch");
    cycle.demodulator_mut().set_volume(0.8);
    cycle.start();
    cycle.tick();
    cycle.tick();

    let (_, sink) = cycle.into_parts();
    assert_eq!(sink.audio_blocks.len(), 2);
    for block in &sink.audio_blocks {
        assert_eq!(block.len(), 16384);
        assert!(block.iter().any(|&s| s != 0.0));
    }
}

#[test]
fn phase_noise_profile_reports_requested_offsets() {
    let mut cycle = build_cycle(7);
    cycle.set_plan(MeasurementPlan {
        phase_noise_offsets: Some(vec![1e3, 10e3]),
        ..Default::default()
    });
    cycle.single_sweep();

    let (_, sink) = cycle.into_parts();
    let profile = sink
        .measurements
        .iter()
        .find_map(|m| match m {
            Measurement::PhaseNoise(p) => Some(p.clone()),
            _ => None,
        })
        .expect("phase noise published");
    assert_eq!(profile.points.len(), 2);
    assert_eq!(profile.points[0].0, 1e3);
    assert_eq!(profile.points[1].0, 10e3);
    // Density at an offset can never beat the carrier bin itself.
    for &(_, dbc) in &profile.points {
        assert!(dbc < 0.0, "dBc/Hz {}", dbc);
    }
}
