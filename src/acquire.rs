//! Acquisition cycle
//!
//! Orchestrates the repeating fetch → measure/demodulate → publish
//! loop. The engine is single-threaded and owns no timer: hosts call
//! [`AcquisitionCycle::tick`] from their event loop at
//! `EngineConfig::update_period_ms` intervals while the cycle is
//! running, or [`AcquisitionCycle::single_sweep`] for a one-shot
//! measurement. Each tick runs to completion before the next; there is
//! no overlap and no queueing.

use rustfft::num_complex::Complex;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::demod::Demodulator;
use crate::error::Result;
use crate::measure::{
    find_spurs, measure_acpr, measure_channel_power, measure_obw, measure_phase_noise, Measurement,
};
use crate::trace::{IqBlock, SpectrumTrace};

/// Data provider contract. An empty trace or block means "no data this
/// tick" (device not connected, fetch not ready) and is skipped
/// quietly.
pub trait SpectrumSource {
    /// One amplitude sweep in dBm. The engine builds the frequency axis
    /// from its configured center and span.
    fn fetch_trace(&mut self) -> Vec<f64>;
    /// One block of complex baseband samples.
    fn fetch_iq_block(&mut self) -> Vec<Complex<f32>>;
    /// IQ sample rate in Hz.
    fn sample_rate(&self) -> f64;
}

/// Display/playback contract. The engine is agnostic to what the sink
/// does with the data.
pub trait ResultSink {
    fn publish_trace(&mut self, trace: &SpectrumTrace);
    fn publish_audio(&mut self, audio: &[f32]);
    fn publish_measurement(&mut self, measurement: &Measurement);
}

/// Which measurements to run each tick. Fields left `None` are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementPlan {
    /// (start_freq, stop_freq) window for channel power.
    pub channel_power: Option<(f64, f64)>,
    /// Percentage of total power for occupied bandwidth.
    pub obw_percent: Option<f64>,
    /// (channel_bw, channel_spacing) for ACPR.
    pub acpr: Option<(f64, f64)>,
    /// dBm threshold for spur search.
    pub spur_threshold: Option<f64>,
    /// Carrier offsets in Hz for the phase-noise profile.
    pub phase_noise_offsets: Option<Vec<f64>>,
}

impl MeasurementPlan {
    fn wants_phase_noise(&self) -> bool {
        self.phase_noise_offsets
            .as_ref()
            .is_some_and(|offsets| !offsets.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    Idle,
    Running,
}

/// The fetch → transform → publish orchestrator.
///
/// Owns the demodulator (and with it the FM phase memory and filter
/// kernel); `tick` takes `&mut self`, which statically enforces the
/// single-writer discipline the order-dependent demodulator state
/// needs.
#[derive(Debug)]
pub struct AcquisitionCycle<S, K> {
    source: S,
    sink: K,
    config: EngineConfig,
    center_hz: f64,
    span_hz: f64,
    state: CycleState,
    demodulator: Demodulator,
    demod_active: bool,
    plan: MeasurementPlan,
}

impl<S: SpectrumSource, K: ResultSink> AcquisitionCycle<S, K> {
    /// Reference sweep defaults: 1 GHz center, 100 MHz span.
    pub fn new(source: S, sink: K, config: EngineConfig) -> Result<Self> {
        let demodulator = Demodulator::new(config.filter_order)?;
        Ok(Self {
            source,
            sink,
            config,
            center_hz: 1e9,
            span_hz: 100e6,
            state: CycleState::Idle,
            demodulator,
            demod_active: false,
            plan: MeasurementPlan::default(),
        })
    }

    pub fn set_center(&mut self, center_hz: f64) {
        self.center_hz = center_hz;
    }

    pub fn set_span(&mut self, span_hz: f64) {
        self.span_hz = span_hz;
    }

    pub fn set_plan(&mut self, plan: MeasurementPlan) {
        self.plan = plan;
    }

    pub fn plan(&self) -> &MeasurementPlan {
        &self.plan
    }

    /// Enable or disable audio demodulation for subsequent ticks.
    pub fn set_demod_active(&mut self, active: bool) {
        self.demod_active = active;
    }

    /// Mutable access to the owned demodulator for mode/bandwidth/
    /// volume configuration.
    pub fn demodulator_mut(&mut self) -> &mut Demodulator {
        &mut self.demodulator
    }

    pub fn is_running(&self) -> bool {
        self.state == CycleState::Running
    }

    /// Tear the cycle down, returning the source and sink to the host.
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// The tick period hosts should drive `tick` at while running.
    pub fn update_period_ms(&self) -> u64 {
        self.config.update_period_ms
    }

    /// Enter continuous acquisition. Starting while already running is
    /// a no-op.
    pub fn start(&mut self) {
        if self.state == CycleState::Running {
            return;
        }
        info!(center_hz = self.center_hz, span_hz = self.span_hz, "acquisition started");
        self.state = CycleState::Running;
    }

    /// Leave continuous acquisition. The last published results stay in
    /// place; stopping while idle is a no-op.
    pub fn stop(&mut self) {
        if self.state == CycleState::Idle {
            return;
        }
        info!("acquisition stopped");
        self.state = CycleState::Idle;
    }

    /// One continuous-mode cycle. Does nothing unless running.
    pub fn tick(&mut self) {
        if self.state != CycleState::Running {
            return;
        }
        self.sweep_once();
    }

    /// One on-demand fetch-process-publish sweep, independent of the
    /// running state.
    pub fn single_sweep(&mut self) {
        self.sweep_once();
    }

    fn sweep_once(&mut self) {
        let amplitudes = self.source.fetch_trace();
        if amplitudes.is_empty() {
            debug!("empty trace from source, skipping tick");
        } else {
            let trace = SpectrumTrace::from_sweep(self.center_hz, self.span_hz, amplitudes);
            self.sink.publish_trace(&trace);
            self.run_trace_measurements(&trace);
        }

        if self.demod_active || self.plan.wants_phase_noise() {
            self.process_iq();
        }
    }

    fn run_trace_measurements(&mut self, trace: &SpectrumTrace) {
        if let Some((start, stop)) = self.plan.channel_power {
            let power = measure_channel_power(trace, start, stop);
            debug!(start, stop, power, "channel power");
            self.sink
                .publish_measurement(&Measurement::ChannelPower(power));
        }
        if let Some(percent) = self.plan.obw_percent {
            let obw = measure_obw(trace, percent);
            self.sink
                .publish_measurement(&Measurement::OccupiedBandwidth(obw));
        }
        if let Some((bw, spacing)) = self.plan.acpr {
            let result = measure_acpr(trace, bw, spacing);
            self.sink.publish_measurement(&Measurement::Acpr(result));
        }
        if let Some(threshold) = self.plan.spur_threshold {
            let spurs = find_spurs(trace, threshold);
            debug!(count = spurs.len(), "spur search");
            self.sink.publish_measurement(&Measurement::Spurs(spurs));
        }
    }

    fn process_iq(&mut self) {
        let samples = self.source.fetch_iq_block();
        if samples.is_empty() {
            debug!("empty IQ block from source, skipping demodulation");
            return;
        }
        let block = IqBlock::new(samples, self.source.sample_rate());

        if self.demod_active {
            let audio = self.demodulator.demodulate(&block.samples);
            self.sink.publish_audio(&audio);
        }

        if let Some(offsets) = self.plan.phase_noise_offsets.clone() {
            if !offsets.is_empty() {
                let profile = measure_phase_noise(&block, &offsets, self.config.fft_size);
                self.sink
                    .publish_measurement(&Measurement::PhaseNoise(profile));
            }
        }
    }
}
