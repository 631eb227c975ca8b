//! Spectrum-analyzer simulator
//!
//! Runs the measurement engine against the built-in simulated source:
//! sweeps a synthetic spectrum, prints the measurements each tick, and
//! optionally writes the demodulated FM audio to a WAV file.
//!
//! Usage:
//!   cargo run --bin scopesim -- [sweeps] [output.wav]
//!
//! Examples:
//!   # Ten sweeps, measurements to stdout
//!   scopesim 10
//!
//!   # Five sweeps, demodulated audio to audio.wav
//!   scopesim 5 audio.wav

use rustyscope::simulation::{SimulatedSource, SIM_SAMPLE_RATE};
use rustyscope::tracing_init::init_tracing;
use rustyscope::{
    AcquisitionCycle, EngineConfig, Measurement, MeasurementPlan, Mode, ResultSink, SpectrumTrace,
};

/// Prints measurements and buffers demodulated audio for WAV export.
struct ConsoleSink {
    audio: Vec<f32>,
    sweeps: usize,
}

impl ResultSink for ConsoleSink {
    fn publish_trace(&mut self, trace: &SpectrumTrace) {
        self.sweeps += 1;
        println!(
            "sweep {}: {} points, {:.1} - {:.1} MHz",
            self.sweeps,
            trace.len(),
            trace.start_freq() / 1e6,
            trace.stop_freq() / 1e6
        );
    }

    fn publish_audio(&mut self, audio: &[f32]) {
        self.audio.extend_from_slice(audio);
    }

    fn publish_measurement(&mut self, measurement: &Measurement) {
        match measurement {
            Measurement::ChannelPower(dbm) => println!("  channel power: {:.2} dBm", dbm),
            Measurement::OccupiedBandwidth(hz) => println!("  obw: {:.1} kHz", hz / 1e3),
            Measurement::Acpr(acpr) => println!(
                "  acpr: main {:.2} dBm, lower ratio {:.1} dB, upper ratio {:.1} dB",
                acpr.main_channel_power, acpr.lower_ratio, acpr.upper_ratio
            ),
            Measurement::Spurs(spurs) => {
                println!("  spurs: {}", spurs.len());
                for spur in spurs {
                    println!(
                        "    {:.3} MHz at {:.1} dBm ({:.1} dBc)",
                        spur.frequency / 1e6,
                        spur.amplitude,
                        spur.relative_power
                    );
                }
            }
            Measurement::PhaseNoise(profile) => {
                for &(offset, dbc) in &profile.points {
                    println!("  phase noise at {:.0} Hz: {:.1} dBc/Hz", offset, dbc);
                }
            }
        }
    }
}

fn write_wav(path: &str, audio: &[f32]) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SIM_SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let peak = audio.iter().fold(1e-6f32, |m, &s| m.max(s.abs()));
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in audio {
        writer.write_sample((sample / peak * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let sweeps: usize = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let wav_path = args.get(2).cloned();

    let config = EngineConfig::default();
    let source = SimulatedSource::new(&config, 1);
    let sink = ConsoleSink {
        audio: Vec::new(),
        sweeps: 0,
    };

    let mut cycle = match AcquisitionCycle::new(source, sink, config) {
        Ok(cycle) => cycle,
        Err(e) => {
            eprintln!("failed to build acquisition cycle: {}", e);
            std::process::exit(1);
        }
    };

    cycle.set_center(1e9);
    cycle.set_span(100e6);
    cycle.set_plan(MeasurementPlan {
        channel_power: Some((0.995e9, 1.005e9)),
        obw_percent: Some(99.0),
        acpr: Some((10e6, 20e6)),
        spur_threshold: Some(-80.0),
        phase_noise_offsets: Some(vec![1e3, 10e3, 20e3]),
    });

    if wav_path.is_some() {
        cycle.set_demod_active(true);
        if let Err(e) = cycle.demodulator_mut().set_mode(Mode::Fm) {
            eprintln!("failed to configure demodulator: {}", e);
            std::process::exit(1);
        }
        cycle.demodulator_mut().set_volume(0.8);
    }

    cycle.start();
    for _ in 0..sweeps {
        cycle.tick();
    }
    cycle.stop();

    if let Some(path) = wav_path {
        let (_, sink) = cycle.into_parts();
        match write_wav(&path, &sink.audio) {
            Ok(()) => println!("wrote {} audio samples to {}", sink.audio.len(), path),
            Err(e) => {
                eprintln!("wav write failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
